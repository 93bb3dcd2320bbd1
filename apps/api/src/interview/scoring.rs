//! Scoring engine for completed quizzes.
//!
//! Correctness is exact string equality against the generated answer —
//! case-sensitive, no trimming or normalization. A provider-generated option
//! with stray whitespace would therefore score as wrong; that behavior is
//! intentional and must not be "fixed" silently.

use crate::errors::AppError;
use crate::models::assessment::QuestionResult;

use super::QuizQuestion;

/// The outcome of scoring one quiz attempt. `results` preserves question
/// order exactly as submitted; right and wrong answers are never regrouped.
#[derive(Debug, Clone)]
pub struct ScoredQuiz {
    /// Percentage in [0, 100].
    pub score: f64,
    pub results: Vec<QuestionResult>,
}

/// Scores `answers` against `questions` positionally.
///
/// A length mismatch is rejected outright — extra or missing answers are
/// never truncated or padded.
pub fn score_quiz(questions: &[QuizQuestion], answers: &[String]) -> Result<ScoredQuiz, AppError> {
    if questions.is_empty() {
        return Err(AppError::Validation("Quiz has no questions".to_string()));
    }
    if answers.len() != questions.len() {
        return Err(AppError::Validation(format!(
            "Expected {} answers, got {}",
            questions.len(),
            answers.len()
        )));
    }

    let results: Vec<QuestionResult> = questions
        .iter()
        .zip(answers)
        .map(|(q, user_answer)| QuestionResult {
            question: q.question.clone(),
            answer: q.correct_answer.clone(),
            user_answer: user_answer.clone(),
            is_correct: q.correct_answer == *user_answer,
            explanation: q.explanation.clone(),
        })
        .collect();

    let correct = results.iter().filter(|r| r.is_correct).count();
    let score = correct as f64 / results.len() as f64 * 100.0;

    Ok(ScoredQuiz { score, results })
}
