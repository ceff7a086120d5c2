//! Gap analysis pipeline: resolve skills → ask the provider → aggregate.
//!
//! The one suspension point that can fail is the provider call. An empty
//! skill set short-circuits before the provider is contacted.

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::gap::engine::{aggregate, SkillGapReport};
use crate::models::job::{JobRecord, MatchBand};
use crate::models::skill::SkillSet;
use crate::recommender::RecommendationProvider;
use crate::skills::resolver::resolve;
use crate::skills::store::SkillStore;

const NO_SKILLS_MESSAGE: &str = "No skills found. Add your skills to see your analysis.";

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GapAnalysis {
    NoSkills { message: String },
    Ready(SkillGapReport),
}

#[derive(Debug, Serialize)]
pub struct JobView {
    #[serde(flatten)]
    pub job: JobRecord,
    pub match_band: MatchBand,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobListing {
    NoSkills { message: String },
    Ready { skills: SkillSet, jobs: Vec<JobView> },
}

pub async fn run_gap_analysis(
    store: &dyn SkillStore,
    provider: &dyn RecommendationProvider,
    user_id: Uuid,
) -> Result<GapAnalysis, AppError> {
    let skills = resolve(store, user_id).await?;
    if skills.is_empty() {
        return Ok(GapAnalysis::NoSkills {
            message: NO_SKILLS_MESSAGE.to_string(),
        });
    }

    let jobs = provider.recommend(&skills).await?;
    flag_overlapping_missing_skills(&skills, &jobs);

    let report = aggregate(&skills, &jobs);
    info!(
        "Gap analysis for user {user_id}: matched={}, to_develop={}, records={}",
        report.matched.len(),
        report.to_develop.len(),
        report.total_records
    );
    for entry in &report.to_develop {
        debug!(
            "  {} x{} [{}] {}",
            entry.name,
            entry.frequency,
            entry.priority.label(),
            entry.description
        );
    }

    Ok(GapAnalysis::Ready(report))
}

pub async fn list_recommendations(
    store: &dyn SkillStore,
    provider: &dyn RecommendationProvider,
    user_id: Uuid,
) -> Result<JobListing, AppError> {
    let skills = resolve(store, user_id).await?;
    if skills.is_empty() {
        return Ok(JobListing::NoSkills {
            message: NO_SKILLS_MESSAGE.to_string(),
        });
    }

    let jobs = provider
        .recommend(&skills)
        .await?
        .into_iter()
        .map(|job| JobView {
            match_band: job.match_band(),
            job,
        })
        .collect::<Vec<_>>();
    info!("Found {} jobs for user {user_id}", jobs.len());

    Ok(JobListing::Ready { skills, jobs })
}

/// The provider should never list a skill the user holds as missing.
/// Not corrected here; only surfaced as a data-quality warning.
fn flag_overlapping_missing_skills(skills: &SkillSet, jobs: &[JobRecord]) {
    for job in jobs {
        for skill in job.missing_skills.iter().filter(|s| skills.contains(s)) {
            warn!(
                "Provider listed held skill '{skill}' as missing for '{}' at {}",
                job.title, job.company
            );
        }
    }
}
