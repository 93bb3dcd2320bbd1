//! Axum route handlers for the Insights API.

use axum::{extract::State, Json};

use crate::auth::ExternalId;
use crate::errors::AppError;
use crate::insights::refresh::{refresh_all_insights, RefreshReport};
use crate::models::insight::IndustryInsightRow;
use crate::state::AppState;
use crate::users::require_user;

use super::ensure_industry_insight;

/// GET /api/v1/insights
///
/// Returns the caller's industry insight, generating and persisting it first
/// when the industry has never been seen.
pub async fn handle_get_insights(
    State(state): State<AppState>,
    ExternalId(external_id): ExternalId,
) -> Result<Json<IndustryInsightRow>, AppError> {
    let user = require_user(&state.db, &external_id).await?;
    let industry = user.industry.ok_or_else(|| {
        AppError::Validation("Complete onboarding before requesting insights".to_string())
    })?;

    let insight = ensure_industry_insight(&state.db, state.llm.as_ref(), &industry).await?;
    Ok(Json(insight))
}

/// POST /internal/jobs/refresh-insights
///
/// Entry point for the external weekly scheduler. Takes no payload and
/// returns the per-industry refresh report.
pub async fn handle_refresh_insights(
    State(state): State<AppState>,
) -> Result<Json<RefreshReport>, AppError> {
    let report = refresh_all_insights(&state.db, state.llm.as_ref()).await?;
    Ok(Json(report))
}
