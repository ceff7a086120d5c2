//! Recommendation provider boundary.
//!
//! The provider owns job matching; this service only sends a skill list and
//! validates what comes back. All provider traffic goes through
//! `RecommendationProvider`, carried in `AppState` as `Arc<dyn _>`.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::job::JobRecord;
use crate::models::skill::SkillSet;

pub mod client;
pub mod wire;

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed provider response: {0}")]
    Malformed(String),

    #[error("Provider unavailable after {retries} attempts")]
    Exhausted { retries: u32 },
}

impl RecommendationError {
    /// Whether the caller should offer a retry. Everything except a malformed
    /// payload is treated as the provider being (temporarily) unavailable.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, RecommendationError::Malformed(_))
    }
}

#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Returns scored job records for the given skills, in provider order.
    async fn recommend(&self, skills: &SkillSet) -> Result<Vec<JobRecord>, RecommendationError>;
}
