use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One completed quiz attempt. Append-only: the score and question list are
/// derived at creation and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Percentage in [0, 100], derived from `questions` by the scoring engine.
    pub quiz_score: f64,
    /// Ordered `QuestionResult` list, length fixed at creation.
    pub questions: Value,
    pub category: String,
    pub improvement_tip: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-question outcome stored inside an assessment. Value type, not an
/// entity of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question: String,
    /// The correct answer as generated.
    pub answer: String,
    /// The answer the user submitted.
    pub user_answer: String,
    /// Exact string equality of `answer` and `user_answer`.
    pub is_correct: bool,
    pub explanation: String,
}
