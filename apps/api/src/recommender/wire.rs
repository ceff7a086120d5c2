//! Provider wire format and its validation into `JobRecord`s.
//!
//! Every field is optional at the serde level so that a missing field is
//! reported as a `Malformed` error naming the record and field, instead of a
//! generic serde message. Nothing is defaulted.

use serde::{Deserialize, Serialize};

use crate::models::job::JobRecord;
use crate::models::skill::SkillSet;
use crate::recommender::RecommendationError;

#[derive(Debug, Serialize)]
pub struct RecommendRequest<'a> {
    pub skills: &'a [String],
}

#[derive(Debug, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Option<Vec<WireJob>>,
}

#[derive(Debug, Deserialize)]
pub struct WireJob {
    #[serde(rename = "Job Title")]
    pub job_title: Option<String>,
    #[serde(rename = "Company")]
    pub company: Option<String>,
    #[serde(rename = "Match Score")]
    pub match_score: Option<WireScore>,
    #[serde(rename = "Required Skills")]
    pub required_skills: Option<Vec<String>>,
    #[serde(rename = "Missing Skills")]
    pub missing_skills: Option<Vec<String>>,
}

/// The provider formats scores as `"95%"`; plain numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireScore {
    Number(f64),
    Text(String),
}

impl WireScore {
    /// Non-finite values ("NaN%", "inf") are rejected.
    fn parse(&self) -> Option<f64> {
        let value = match self {
            WireScore::Number(n) => Some(*n),
            WireScore::Text(s) => {
                let s = s.trim();
                s.strip_suffix('%').unwrap_or(s).trim().parse().ok()
            }
        };
        value.filter(|v: &f64| v.is_finite())
    }
}

/// Validates a decoded provider response into job records.
pub fn into_job_records(response: RecommendResponse) -> Result<Vec<JobRecord>, RecommendationError> {
    let jobs = response.recommendations.ok_or_else(|| {
        RecommendationError::Malformed("response has no 'recommendations' array".to_string())
    })?;

    jobs.into_iter()
        .enumerate()
        .map(|(i, job)| validate_job(i, job))
        .collect()
}

fn validate_job(index: usize, job: WireJob) -> Result<JobRecord, RecommendationError> {
    let missing = |field: &str| {
        RecommendationError::Malformed(format!("recommendation {index} is missing '{field}'"))
    };

    let title = job.job_title.ok_or_else(|| missing("Job Title"))?;
    let company = job.company.ok_or_else(|| missing("Company"))?;
    let score = job.match_score.ok_or_else(|| missing("Match Score"))?;
    let required = job.required_skills.ok_or_else(|| missing("Required Skills"))?;
    let missing_skills = job.missing_skills.ok_or_else(|| missing("Missing Skills"))?;

    let match_score = score.parse().ok_or_else(|| {
        RecommendationError::Malformed(format!(
            "recommendation {index} has an unparseable 'Match Score': {score:?}"
        ))
    })?;

    Ok(JobRecord {
        title,
        company,
        match_score,
        required_skills: SkillSet::from_labels(required),
        missing_skills: SkillSet::from_labels(missing_skills),
    })
}
