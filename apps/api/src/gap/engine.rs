//! Skill-gap aggregation: turns a user's skills plus the provider's job
//! records into a matched / to-develop breakdown.
//!
//! Pure and deterministic. No I/O, no errors, no state between calls.
//! The caller guarantees `user_skills` is non-empty (see `skills::resolver`).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::models::job::JobRecord;
use crate::models::skill::{Skill, SkillSet};

/// Possession level reported for every declared skill.
pub const POSSESSED_LEVEL: u8 = 100;
/// How many develop entries survive ranking.
pub const MAX_SKILLS_TO_DEVELOP: usize = 5;
/// A develop skill is high priority when strictly more than this share of
/// recommended jobs lists it as missing.
pub const HIGH_PRIORITY_SHARE: f64 = 0.5;

const LEARN_SEARCH_URL: &str = "https://www.google.com/search";

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillStatus {
    Matched,
    Develop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "High Priority")]
    High,
    #[serde(rename = "Medium Priority")]
    Medium,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High Priority",
            Priority::Medium => "Medium Priority",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStatus {
    Active,
    None,
}

/// A skill the user already holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedSkillEntry {
    pub name: Skill,
    pub level: u8,
    pub status: SkillStatus,
}

/// A skill missing from recommended jobs that the user should pick up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopSkillEntry {
    pub name: Skill,
    pub frequency: u32,      // number of job records listing it as missing
    pub share_percent: u32,  // round(frequency / total * 100)
    pub priority: Priority,
    pub description: String,
    pub status: SkillStatus,
    pub learn_url: Option<String>,
}

/// Full breakdown handed to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapReport {
    pub matched: Vec<MatchedSkillEntry>,
    pub to_develop: Vec<DevelopSkillEntry>,
    pub total_records: usize,
    pub learning_status: LearningStatus,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Aggregates job records against the user's skills.
///
/// Algorithm:
/// 1. Every user skill becomes a matched entry (level 100), in set order.
/// 2. Tally each missing skill across records (one per record at most,
///    since a record's missing skills form a set).
/// 3. Stable-sort the tally by count descending; ties keep first-appearance order.
/// 4. Keep the top 5.
/// 5. High priority iff `count > total * 0.5`, else medium.
/// 6. Describe as "required by N% of your recommended jobs".
pub fn aggregate(user_skills: &SkillSet, job_records: &[JobRecord]) -> SkillGapReport {
    let matched: Vec<MatchedSkillEntry> = user_skills
        .iter()
        .map(|skill| MatchedSkillEntry {
            name: skill.clone(),
            level: POSSESSED_LEVEL,
            status: SkillStatus::Matched,
        })
        .collect();

    let total = job_records.len();
    let to_develop: Vec<DevelopSkillEntry> = rank_missing_skills(job_records)
        .into_iter()
        .take(MAX_SKILLS_TO_DEVELOP)
        .map(|(skill, count)| build_develop_entry(skill, count, total))
        .collect();

    let learning_status = if to_develop.is_empty() {
        LearningStatus::None
    } else {
        LearningStatus::Active
    };

    SkillGapReport {
        matched,
        to_develop,
        total_records: total,
        learning_status,
        generated_at: Utc::now(),
    }
}

/// Counts missing skills across records and orders them by count descending.
/// `sort_by` is stable, so equal counts stay in first-appearance order.
fn rank_missing_skills(job_records: &[JobRecord]) -> Vec<(Skill, u32)> {
    let mut tally: Vec<(Skill, u32)> = Vec::new();
    let mut index: HashMap<Skill, usize> = HashMap::new();

    for record in job_records {
        for skill in &record.missing_skills {
            match index.get(skill) {
                Some(&i) => tally[i].1 += 1,
                None => {
                    index.insert(skill.clone(), tally.len());
                    tally.push((skill.clone(), 1));
                }
            }
        }
    }

    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally
}

fn build_develop_entry(skill: Skill, count: u32, total: usize) -> DevelopSkillEntry {
    // count ≥ 1 implies total ≥ 1
    let total = total as f64;
    let priority = if f64::from(count) > total * HIGH_PRIORITY_SHARE {
        Priority::High
    } else {
        Priority::Medium
    };
    let share_percent = (f64::from(count) / total * 100.0).round() as u32;
    let learn_url = learn_url(&skill);

    DevelopSkillEntry {
        description: format!("required by {share_percent}% of your recommended jobs"),
        name: skill,
        frequency: count,
        share_percent,
        priority,
        status: SkillStatus::Develop,
        learn_url,
    }
}

/// Tutorial search link for a skill, e.g. `...?q=learn+Docker`.
fn learn_url(skill: &Skill) -> Option<String> {
    Url::parse_with_params(LEARN_SEARCH_URL, &[("q", format!("learn {skill}"))])
        .ok()
        .map(String::from)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
