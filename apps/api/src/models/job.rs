use serde::{Deserialize, Serialize};

use crate::models::skill::SkillSet;

/// One job returned by the recommendation provider.
///
/// `missing_skills` is taken verbatim from the provider; it is never
/// recomputed from `required_skills` here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub match_score: f64, // 0 – 100, provider-supplied
    pub required_skills: SkillSet,
    pub missing_skills: SkillSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    Strong, // ≥ 80
    Fair,   // 50 – 79
    Weak,   // < 50
}

impl JobRecord {
    pub fn match_band(&self) -> MatchBand {
        if self.match_score >= 80.0 {
            MatchBand::Strong
        } else if self.match_score >= 50.0 {
            MatchBand::Fair
        } else {
            MatchBand::Weak
        }
    }
}
