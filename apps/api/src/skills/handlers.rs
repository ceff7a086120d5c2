//! Axum route handlers for skill entry and résumé extraction.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::skill::{Skill, SkillSet};
use crate::skills::resolver::{add_skills, remove_skill, replace_skills, resolve};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceSkillsRequest {
    pub user_id: Uuid,
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddSkillRequest {
    pub user_id: Uuid,
    pub skill: String,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: SkillSet,
}

#[derive(Debug, Serialize)]
pub struct AddSkillResponse {
    pub skills: SkillSet,
    pub added: bool,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub resume_text: String,
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub save: bool,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub extracted: SkillSet,
    /// The user's stored set after saving; absent when nothing was saved.
    pub saved_skills: Option<SkillSet>,
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/skills
pub async fn handle_get_skills(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SkillsResponse>, AppError> {
    let skills = resolve(state.skill_store.as_ref(), params.user_id).await?;
    Ok(Json(SkillsResponse { skills }))
}

/// PUT /api/v1/skills
///
/// Overwrites the stored set with the submitted list.
pub async fn handle_replace_skills(
    State(state): State<AppState>,
    Json(request): Json<ReplaceSkillsRequest>,
) -> Result<Json<SkillsResponse>, AppError> {
    let skills = replace_skills(state.skill_store.as_ref(), request.user_id, &request.skills).await?;
    info!("Stored {} skills for user {}", skills.len(), request.user_id);
    Ok(Json(SkillsResponse { skills }))
}

/// POST /api/v1/skills
///
/// Adds one skill; adding a skill that is already present is a no-op.
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(request): Json<AddSkillRequest>,
) -> Result<Json<AddSkillResponse>, AppError> {
    let skill = Skill::capture(&request.skill)
        .ok_or_else(|| AppError::Validation("skill cannot be empty".to_string()))?;

    let (skills, added) = add_skills(state.skill_store.as_ref(), request.user_id, [skill]).await?;
    Ok(Json(AddSkillResponse {
        skills,
        added: added > 0,
    }))
}

/// DELETE /api/v1/skills/:skill
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(skill): Path<String>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SkillsResponse>, AppError> {
    let skill = Skill::capture(&skill)
        .ok_or_else(|| AppError::Validation("skill cannot be empty".to_string()))?;
    let skills = remove_skill(state.skill_store.as_ref(), params.user_id, &skill).await?;
    Ok(Json(SkillsResponse { skills }))
}

// ────────────────────────────────────────────────────────────────────────────
// Résumé extraction
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/extract
///
/// Extracts skills from pasted résumé text. With `save`, the extracted skills
/// are added to the user's stored set.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    extract_and_maybe_save(&state, &request.resume_text, request.user_id, request.save)
        .await
        .map(Json)
}

/// POST /api/v1/resume/extract/pdf
///
/// Multipart form: `file` (PDF bytes, required), `user_id` and `save` (optional).
pub async fn handle_extract_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut pdf: Option<Vec<u8>> = None;
    let mut user_id: Option<Uuid> = None;
    let mut save = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                pdf = Some(bytes.to_vec());
            }
            "user_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read user_id: {e}")))?;
                let parsed = Uuid::parse_str(text.trim())
                    .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?;
                user_id = Some(parsed);
            }
            "save" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read save: {e}")))?;
                save = matches!(text.trim(), "true" | "1" | "on");
            }
            _ => {}
        }
    }

    let pdf = pdf.ok_or_else(|| AppError::Validation("file field is required".to_string()))?;
    let text = pdf_to_text(pdf).await?;

    extract_and_maybe_save(&state, &text, user_id, save)
        .await
        .map(Json)
}

async fn extract_and_maybe_save(
    state: &AppState,
    text: &str,
    user_id: Option<Uuid>,
    save: bool,
) -> Result<ExtractResponse, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let extracted = state.extractor.extract(text);
    info!("Extracted {} skills from résumé text", extracted.len());

    let saved_skills = match (save, user_id) {
        (false, _) => None,
        (true, None) => {
            return Err(AppError::Validation(
                "user_id is required when save is set".to_string(),
            ))
        }
        (true, Some(user_id)) => {
            let (skills, _) = add_skills(
                state.skill_store.as_ref(),
                user_id,
                extracted.iter().cloned(),
            )
            .await?;
            Some(skills)
        }
    };

    Ok(ExtractResponse {
        extracted,
        saved_skills,
    })
}

/// PDF text extraction is CPU-bound, so it runs on the blocking pool.
async fn pdf_to_text(pdf: Vec<u8>) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))
}
