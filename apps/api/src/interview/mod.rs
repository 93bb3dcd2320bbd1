//! Interview prep — quiz generation, scoring, and assessment history.
//!
//! Flow: compose prompt → generation client → sanitize/parse → (on save)
//! scoring engine → best-effort improvement tip → persist assessment.
//! The tip call is the only place a generation failure is swallowed; it is
//! logged and the assessment is saved without a tip.

pub mod handlers;
pub mod prompts;
pub mod scoring;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{parse_structured, sanitize_response, FormatError, GenerationClient};
use crate::models::assessment::{AssessmentRow, QuestionResult};
use crate::models::user::UserRow;

use crate::interview::prompts::{improvement_prompt, quiz_prompt};
use crate::interview::scoring::score_quiz;

/// Every quiz has exactly this many questions.
pub const QUIZ_QUESTION_COUNT: usize = 10;
/// Every question has exactly this many options.
pub const QUIZ_OPTION_COUNT: usize = 4;

/// Category label stamped on every saved quiz attempt.
const ASSESSMENT_CATEGORY: &str = "Technical";

// ────────────────────────────────────────────────────────────────────────────
// Generated payload shape
// ────────────────────────────────────────────────────────────────────────────

/// One generated multiple-choice question (camelCase keys per the prompt's
/// schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizPayload {
    pub questions: Vec<QuizQuestion>,
}

impl QuizPayload {
    /// Structural checks: exactly the requested number of questions, each with
    /// the full option set. All-or-nothing — a 7-question payload is rejected,
    /// not trimmed down.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.questions.len() != QUIZ_QUESTION_COUNT {
            return Err(FormatError::Schema(format!(
                "expected exactly {QUIZ_QUESTION_COUNT} questions, got {}",
                self.questions.len()
            )));
        }
        for (i, q) in self.questions.iter().enumerate() {
            if q.options.len() != QUIZ_OPTION_COUNT {
                return Err(FormatError::Schema(format!(
                    "question {i} has {} options, expected {QUIZ_OPTION_COUNT}",
                    q.options.len()
                )));
            }
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Generates a fresh quiz for the user's industry and skills.
pub async fn generate_quiz(
    llm: &dyn GenerationClient,
    user: &UserRow,
) -> Result<Vec<QuizQuestion>, AppError> {
    let industry = user.industry.as_deref().ok_or_else(|| {
        AppError::Validation("Complete onboarding before generating a quiz".to_string())
    })?;
    let skills = user.skills.as_deref().unwrap_or(&[]);

    let prompt = quiz_prompt(industry, skills);
    let raw = llm.generate(&prompt).await?;
    let payload: QuizPayload = parse_structured(&raw)?;
    payload.validate()?;

    info!(
        "Generated {} quiz questions for user {}",
        payload.questions.len(),
        user.id
    );

    Ok(payload.questions)
}

/// Scores a completed quiz, attempts one improvement tip for the wrong
/// answers, and persists the assessment.
///
/// Persistence happens only after scoring completes and the tip attempt has
/// resolved either way; the tip never blocks or fails the save beyond its own
/// error boundary.
pub async fn save_quiz_attempt(
    pool: &PgPool,
    llm: &dyn GenerationClient,
    user: &UserRow,
    questions: &[QuizQuestion],
    answers: &[String],
) -> Result<AssessmentRow, AppError> {
    let scored = score_quiz(questions, answers)?;

    let improvement_tip = best_effort_improvement_tip(llm, user, &scored.results).await;

    let questions_value = serde_json::to_value(&scored.results)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize results: {e}")))?;

    let assessment: AssessmentRow = sqlx::query_as(
        r#"
        INSERT INTO assessments (id, user_id, quiz_score, questions, category, improvement_tip)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(scored.score)
    .bind(&questions_value)
    .bind(ASSESSMENT_CATEGORY)
    .bind(&improvement_tip)
    .fetch_one(pool)
    .await?;

    info!(
        "Saved assessment {} (score {:.1}) for user {}",
        assessment.id, scored.score, user.id
    );

    Ok(assessment)
}

/// One generation attempt for an improvement tip covering the wrong answers.
///
/// Best-effort by contract: returns `None` when everything was answered
/// correctly, when the user has no industry on record, or when the provider
/// call fails — the failure is logged, never raised.
async fn best_effort_improvement_tip(
    llm: &dyn GenerationClient,
    user: &UserRow,
    results: &[QuestionResult],
) -> Option<String> {
    let wrong: Vec<&QuestionResult> = results.iter().filter(|r| !r.is_correct).collect();
    if wrong.is_empty() {
        return None;
    }

    let industry = user.industry.as_deref()?;

    match llm.generate(&improvement_prompt(industry, &wrong)).await {
        Ok(text) => Some(sanitize_response(&text).to_string()),
        Err(e) => {
            warn!("Improvement tip generation failed, saving without tip: {e}");
            None
        }
    }
}

/// Returns the user's full assessment history, oldest first.
pub async fn list_assessments(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<AssessmentRow>, AppError> {
    let assessments = sqlx::query_as(
        "SELECT * FROM assessments WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(assessments)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::FakeGenerationClient;
    use chrono::Utc;

    fn test_user() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            external_id: "user_2abc".to_string(),
            email: "dev@example.com".to_string(),
            industry: Some("tech-software_engineering".to_string()),
            experience: Some(5),
            bio: None,
            skills: Some(vec!["Rust".to_string()]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn quiz_json(count: usize) -> String {
        let questions: Vec<serde_json::Value> = (0..count)
            .map(|n| {
                serde_json::json!({
                    "question": format!("Question {n}"),
                    "options": ["Option A", "Option B", "Option C", "Option D"],
                    "correctAnswer": "Option A",
                    "explanation": format!("Explanation {n}")
                })
            })
            .collect();
        serde_json::json!({ "questions": questions }).to_string()
    }

    fn parsed_questions(count: usize) -> Vec<QuizQuestion> {
        let payload: QuizPayload = parse_structured(&quiz_json(count)).unwrap();
        payload.questions
    }

    #[tokio::test]
    async fn test_generate_quiz_happy_path() {
        let fake =
            FakeGenerationClient::replying(&format!("```json\n{}\n```", quiz_json(10)));
        let questions = generate_quiz(&fake, &test_user()).await.unwrap();

        assert_eq!(questions.len(), 10);
        assert_eq!(questions[0].question, "Question 0");
        assert_eq!(questions[0].correct_answer, "Option A");

        let prompt = &fake.prompts()[0];
        assert!(prompt.contains("tech-software_engineering"));
        assert!(prompt.contains("with expertise in Rust"));
    }

    #[tokio::test]
    async fn test_generate_quiz_rejects_short_payload() {
        let fake = FakeGenerationClient::replying(&quiz_json(7));
        let err = generate_quiz(&fake, &test_user()).await.unwrap_err();
        assert!(matches!(err, AppError::Format(FormatError::Schema(_))));
    }

    #[tokio::test]
    async fn test_generate_quiz_requires_onboarded_user() {
        let fake = FakeGenerationClient::with_responses([]);
        let mut user = test_user();
        user.industry = None;
        let err = generate_quiz(&fake, &user).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn test_quiz_payload_rejects_missing_option() {
        let mut payload: QuizPayload = parse_structured(&quiz_json(10)).unwrap();
        payload.questions[3].options.pop();
        assert!(payload.validate().is_err());
    }

    #[tokio::test]
    async fn test_tip_invoked_once_with_every_wrong_question() {
        let qs = parsed_questions(10);
        let mut answers = vec!["Option A".to_string(); 6];
        answers.extend(vec!["Option B".to_string(); 4]);
        let scored = score_quiz(&qs, &answers).unwrap();
        assert!((scored.score - 60.0).abs() < f64::EPSILON);

        let fake = FakeGenerationClient::replying("Brush up on ownership semantics.");
        let tip = best_effort_improvement_tip(&fake, &test_user(), &scored.results).await;

        assert_eq!(tip.as_deref(), Some("Brush up on ownership semantics."));
        assert_eq!(fake.call_count(), 1);

        let prompt = &fake.prompts()[0];
        for n in 6..10 {
            assert!(prompt.contains(&format!("Question {n}")));
        }
        for n in 0..6 {
            assert!(!prompt.contains(&format!("Question {n}\"")));
        }
    }

    #[tokio::test]
    async fn test_tip_failure_degrades_to_none() {
        let qs = parsed_questions(10);
        let answers = vec!["Option B".to_string(); 10];
        let scored = score_quiz(&qs, &answers).unwrap();

        let fake = FakeGenerationClient::failing();
        let tip = best_effort_improvement_tip(&fake, &test_user(), &scored.results).await;
        assert!(tip.is_none());
    }

    #[tokio::test]
    async fn test_perfect_quiz_skips_tip_call() {
        let qs = parsed_questions(10);
        let answers = vec!["Option A".to_string(); 10];
        let scored = score_quiz(&qs, &answers).unwrap();

        // No canned responses queued: a call here would panic the fake.
        let fake = FakeGenerationClient::with_responses([]);
        let tip = best_effort_improvement_tip(&fake, &test_user(), &scored.results).await;
        assert!(tip.is_none());
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn test_results_serialize_in_original_order() {
        let qs = parsed_questions(10);
        let answers = vec!["Option A".to_string(); 10];
        let scored = score_quiz(&qs, &answers).unwrap();

        let value = serde_json::to_value(&scored.results).unwrap();
        let list = value.as_array().unwrap();
        assert_eq!(list.len(), 10);
        for (i, entry) in list.iter().enumerate() {
            assert_eq!(entry["question"], format!("Question {i}"));
        }
    }
}
