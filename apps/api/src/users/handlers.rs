//! Axum route handlers for the Users API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::ExternalId;
use crate::errors::AppError;
use crate::models::insight::IndustryInsightRow;
use crate::models::user::UserRow;
use crate::state::AppState;

use super::{onboard_user, require_user, OnboardingData};

#[derive(Debug, Serialize)]
pub struct OnboardResponse {
    pub user: UserRow,
    pub insight: IndustryInsightRow,
}

#[derive(Debug, Serialize)]
pub struct OnboardingStatusResponse {
    pub is_onboarded: bool,
}

/// POST /api/v1/users/onboard
///
/// Attaches the caller to an industry, creating the industry insight on first
/// sight of a new key.
pub async fn handle_onboard(
    State(state): State<AppState>,
    ExternalId(external_id): ExternalId,
    Json(data): Json<OnboardingData>,
) -> Result<Json<OnboardResponse>, AppError> {
    let (user, insight) =
        onboard_user(&state.db, state.llm.as_ref(), &external_id, data).await?;
    Ok(Json(OnboardResponse { user, insight }))
}

/// GET /api/v1/users/onboarding-status
pub async fn handle_onboarding_status(
    State(state): State<AppState>,
    ExternalId(external_id): ExternalId,
) -> Result<Json<OnboardingStatusResponse>, AppError> {
    let user = require_user(&state.db, &external_id).await?;
    Ok(Json(OnboardingStatusResponse {
        is_onboarded: user.is_onboarded(),
    }))
}
