//! Skill Set Resolver: reads the user's current skills from the store.
//!
//! An empty result is a normal state ("no skills declared yet"), never an
//! error. Callers must branch on it before running gap analysis.

use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::skill::{Skill, SkillSet};
use crate::skills::store::SkillStore;

/// Returns the stored skill set, or an empty set when the slot is absent,
/// empty, or holds something that is not a label array.
pub async fn resolve(store: &dyn SkillStore, user_id: Uuid) -> Result<SkillSet, AppError> {
    let payload = store.get(user_id).await?;
    Ok(decode_slot(user_id, payload.as_deref()))
}

fn decode_slot(user_id: Uuid, payload: Option<&str>) -> SkillSet {
    let Some(payload) = payload else {
        return SkillSet::new();
    };

    match serde_json::from_str::<Vec<String>>(payload) {
        Ok(labels) => SkillSet::from_labels(labels),
        Err(e) => {
            warn!("Skill slot for user {user_id} is not a label array, treating as empty: {e}");
            SkillSet::new()
        }
    }
}

/// Overwrites the user's skill set. At least one non-blank label is required.
pub async fn replace_skills(
    store: &dyn SkillStore,
    user_id: Uuid,
    labels: &[String],
) -> Result<SkillSet, AppError> {
    let skills = SkillSet::capture_labels(labels);
    if skills.is_empty() {
        return Err(AppError::Validation(
            "Please add at least one skill".to_string(),
        ));
    }
    store.put(user_id, &skills.labels()).await?;
    Ok(skills)
}

/// Adds skills to the stored set, keeping existing order. Returns the updated
/// set and how many skills were new.
pub async fn add_skills(
    store: &dyn SkillStore,
    user_id: Uuid,
    new_skills: impl IntoIterator<Item = Skill>,
) -> Result<(SkillSet, usize), AppError> {
    let new_skills: Vec<Skill> = new_skills.into_iter().collect();
    let mut outcome = (SkillSet::new(), 0);

    store
        .update(user_id, &mut |payload: Option<&str>| {
            let mut skills = decode_slot(user_id, payload);
            let before = skills.len();
            skills.extend(new_skills.iter().cloned());
            let added = skills.len() - before;
            let write = (added > 0).then(|| skills.labels());
            outcome = (skills, added);
            write
        })
        .await?;

    Ok(outcome)
}

/// Removes one skill from the stored set.
pub async fn remove_skill(
    store: &dyn SkillStore,
    user_id: Uuid,
    skill: &Skill,
) -> Result<SkillSet, AppError> {
    let mut remaining = SkillSet::new();

    let removed = store
        .update(user_id, &mut |payload: Option<&str>| {
            let mut skills = decode_slot(user_id, payload);
            let write = skills.remove(skill).then(|| skills.labels());
            remaining = skills;
            write
        })
        .await?;

    if !removed {
        return Err(AppError::NotFound(format!("Skill '{skill}' not found")));
    }
    Ok(remaining)
}
