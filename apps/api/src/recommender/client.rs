/// HTTP client for the job recommendation provider.
///
/// Calls `POST {base_url}/recommend` with `{"skills": [...]}` and validates the
/// response into `JobRecord`s. Retries transport errors, 429 and 5xx (the
/// provider answers 503 while its model is still loading).
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::job::JobRecord;
use crate::models::skill::SkillSet;
use crate::recommender::wire::{into_job_records, RecommendRequest, RecommendResponse};
use crate::recommender::{RecommendationError, RecommendationProvider};

const MAX_RETRIES: u32 = 3;

/// FastAPI error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ProviderError {
    detail: String,
}

#[derive(Clone)]
pub struct HttpRecommendationClient {
    client: Client,
    endpoint: String,
    retry_base: Duration,
}

impl HttpRecommendationClient {
    pub fn new(base_url: &str, timeout: Duration, retry_base: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            endpoint: format!("{}/recommend", base_url.trim_end_matches('/')),
            retry_base,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecommendationProvider for HttpRecommendationClient {
    async fn recommend(&self, skills: &SkillSet) -> Result<Vec<JobRecord>, RecommendationError> {
        let labels = skills.labels();
        let request_body = RecommendRequest { skills: &labels };

        let mut last_error: Option<RecommendationError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: base, 2×base, 4×base …
                let delay = self.retry_base * (1 << (attempt - 1));
                warn!(
                    "Recommendation attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&self.endpoint)
                .json(&request_body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(RecommendationError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Recommendation provider returned {}: {}", status, body);
                last_error = Some(RecommendationError::Api {
                    status: status.as_u16(),
                    message: provider_message(body),
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(RecommendationError::Api {
                    status: status.as_u16(),
                    message: provider_message(body),
                });
            }

            let body = response.text().await?;
            let decoded: RecommendResponse = serde_json::from_str(&body)
                .map_err(|e| RecommendationError::Malformed(format!("invalid JSON: {e}")))?;
            let jobs = into_job_records(decoded)?;

            debug!(
                "Recommendation call succeeded: skills={}, jobs={}",
                labels.len(),
                jobs.len()
            );

            return Ok(jobs);
        }

        Err(last_error.unwrap_or(RecommendationError::Exhausted {
            retries: MAX_RETRIES,
        }))
    }
}

/// Uses the FastAPI `detail` when the body carries one, else the raw body.
fn provider_message(body: String) -> String {
    serde_json::from_str::<ProviderError>(&body)
        .map(|e| e.detail)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn spawn_provider(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(base_url: &str) -> HttpRecommendationClient {
        HttpRecommendationClient::new(base_url, Duration::from_secs(5), Duration::from_millis(1))
    }

    fn one_job() -> Value {
        json!({
            "recommendations": [{
                "Job Title": "Data Scientist",
                "Company": "Umbrella",
                "Match Score": "88%",
                "Required Skills": ["Python", "Spark"],
                "Missing Skills": ["Spark"]
            }]
        })
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = client_for("http://localhost:8000/");
        assert_eq!(client.endpoint(), "http://localhost:8000/recommend");
    }

    #[test]
    fn test_provider_message_prefers_fastapi_detail() {
        assert_eq!(
            provider_message(r#"{"detail":"Model is not loaded"}"#.to_string()),
            "Model is not loaded"
        );
        assert_eq!(provider_message("oops".to_string()), "oops");
    }

    #[tokio::test]
    async fn test_sends_skills_and_parses_jobs() {
        let router = Router::new().route(
            "/recommend",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({ "skills": ["Python", "SQL"] }));
                Json(one_job())
            }),
        );
        let base = spawn_provider(router).await;

        let jobs = client_for(&base)
            .recommend(&SkillSet::from_labels(["Python", "SQL"]))
            .await
            .unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Umbrella");
        assert_eq!(jobs[0].match_score, 88.0);
    }

    #[tokio::test]
    async fn test_retries_while_model_loads() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let router = Router::new().route(
            "/recommend",
            post(move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err((
                            StatusCode::SERVICE_UNAVAILABLE,
                            Json(json!({ "detail": "Model is not loaded" })),
                        ))
                    } else {
                        Ok(Json(one_job()))
                    }
                }
            }),
        );
        let base = spawn_provider(router).await;

        let jobs = client_for(&base)
            .recommend(&SkillSet::from_labels(["Python"]))
            .await
            .unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let router = Router::new().route(
            "/recommend",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
                }
            }),
        );
        let base = spawn_provider(router).await;

        let err = client_for(&base)
            .recommend(&SkillSet::from_labels(["Python"]))
            .await
            .unwrap_err();

        assert!(err.is_unavailable());
        assert!(matches!(err, RecommendationError::Api { status: 500, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), MAX_RETRIES);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let router = Router::new().route(
            "/recommend",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::UNPROCESSABLE_ENTITY, "bad payload")
                }
            }),
        );
        let base = spawn_provider(router).await;

        let err = client_for(&base)
            .recommend(&SkillSet::from_labels(["Python"]))
            .await
            .unwrap_err();

        assert!(matches!(err, RecommendationError::Api { status: 422, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_field_is_malformed() {
        let router = Router::new().route(
            "/recommend",
            post(|| async {
                Json(json!({
                    "recommendations": [{
                        "Job Title": "QA", "Company": "Vandelay",
                        "Match Score": "51%", "Required Skills": ["Selenium"]
                    }]
                }))
            }),
        );
        let base = spawn_provider(router).await;

        let err = client_for(&base)
            .recommend(&SkillSet::from_labels(["Python"]))
            .await
            .unwrap_err();

        assert!(matches!(err, RecommendationError::Malformed(_)));
        assert!(!err.is_unavailable());
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_unavailable() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{addr}"))
            .recommend(&SkillSet::from_labels(["Python"]))
            .await
            .unwrap_err();

        assert!(matches!(err, RecommendationError::Http(_)));
        assert!(err.is_unavailable());
    }
}
