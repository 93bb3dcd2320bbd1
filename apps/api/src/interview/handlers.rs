//! Axum route handlers for the Interview API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::ExternalId;
use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::state::AppState;
use crate::users::require_user;

use super::{generate_quiz, list_assessments, save_quiz_attempt, QuizQuestion};

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct SaveAttemptRequest {
    pub questions: Vec<QuizQuestion>,
    pub answers: Vec<String>,
}

/// POST /api/v1/interview/quiz
///
/// Generates a fresh 10-question quiz for the caller's industry and skills.
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    ExternalId(external_id): ExternalId,
) -> Result<Json<QuizResponse>, AppError> {
    let user = require_user(&state.db, &external_id).await?;
    let questions = generate_quiz(state.llm.as_ref(), &user).await?;
    Ok(Json(QuizResponse { questions }))
}

/// POST /api/v1/interview/attempts
///
/// Scores the submitted answers server-side, attempts an improvement tip for
/// the wrong ones, and persists the assessment.
pub async fn handle_save_attempt(
    State(state): State<AppState>,
    ExternalId(external_id): ExternalId,
    Json(request): Json<SaveAttemptRequest>,
) -> Result<Json<AssessmentRow>, AppError> {
    let user = require_user(&state.db, &external_id).await?;
    let assessment = save_quiz_attempt(
        &state.db,
        state.llm.as_ref(),
        &user,
        &request.questions,
        &request.answers,
    )
    .await?;
    Ok(Json(assessment))
}

/// GET /api/v1/interview/attempts
///
/// Returns the caller's assessment history, oldest first.
pub async fn handle_list_attempts(
    State(state): State<AppState>,
    ExternalId(external_id): ExternalId,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    let user = require_user(&state.db, &external_id).await?;
    let assessments = list_assessments(&state.db, user.id).await?;
    Ok(Json(assessments))
}
