use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable is set but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    /// When unset, skills are kept in process memory.
    pub redis_url: Option<String>,
    pub skill_slot_prefix: String,
    pub recommender_url: String,
    pub recommender_timeout: Duration,
    pub recommender_retry_base: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            redis_url: optional_env("REDIS_URL"),
            skill_slot_prefix: optional_env("SKILL_SLOT_PREFIX")
                .unwrap_or_else(|| "userSkills".to_string()),
            recommender_url: optional_env("RECOMMENDER_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            recommender_timeout: Duration::from_secs(parse_env("RECOMMENDER_TIMEOUT_SECS", 30)?),
            recommender_retry_base: Duration::from_millis(parse_env(
                "RECOMMENDER_RETRY_BASE_MS",
                1000,
            )?),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
