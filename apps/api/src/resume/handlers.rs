//! Axum route handlers for the Resume API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::ExternalId;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::state::AppState;
use crate::users::require_user;

use super::{get_resume, improve_entry, upsert_resume, ImproveEntryRequest};

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ImproveEntryResponse {
    pub improved: String,
}

/// POST /api/v1/resume
pub async fn handle_save_resume(
    State(state): State<AppState>,
    ExternalId(external_id): ExternalId,
    Json(request): Json<SaveResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    let user = require_user(&state.db, &external_id).await?;
    let resume = upsert_resume(&state.db, user.id, &request.content).await?;
    Ok(Json(resume))
}

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    ExternalId(external_id): ExternalId,
) -> Result<Json<ResumeRow>, AppError> {
    let user = require_user(&state.db, &external_id).await?;
    let resume = get_resume(&state.db, user.id).await?;
    Ok(Json(resume))
}

/// POST /api/v1/resume/improve
pub async fn handle_improve_entry(
    State(state): State<AppState>,
    ExternalId(external_id): ExternalId,
    Json(request): Json<ImproveEntryRequest>,
) -> Result<Json<ImproveEntryResponse>, AppError> {
    let user = require_user(&state.db, &external_id).await?;
    let improved = improve_entry(state.llm.as_ref(), &user, &request).await?;
    Ok(Json(ImproveEntryResponse { improved }))
}
