//! Resume storage and AI-assisted entry improvement.
//!
//! The resume itself is a single markdown document, overwritten on each save.
//! Entry improvement is a free-text generation flow: the sanitized provider
//! response IS the result, with no JSON parsing involved.

pub mod handlers;
pub mod prompts;

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{sanitize_response, GenerationClient};
use crate::models::resume::ResumeRow;
use crate::models::user::UserRow;

use crate::resume::prompts::improve_entry_prompt;

/// Saves the user's resume, replacing any previous content. One row per user.
pub async fn upsert_resume(
    pool: &PgPool,
    user_id: Uuid,
    content: &str,
) -> Result<ResumeRow, AppError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::Validation(
            "Resume content cannot be empty".to_string(),
        ));
    }

    let resume: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes (id, user_id, content)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id)
        DO UPDATE SET content = EXCLUDED.content, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    info!("Saved resume for user {user_id}");

    Ok(resume)
}

pub async fn get_resume(pool: &PgPool, user_id: Uuid) -> Result<ResumeRow, AppError> {
    sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("No resume on file".to_string()))
}

/// One resume entry to improve.
#[derive(Debug, Deserialize)]
pub struct ImproveEntryRequest {
    pub current: String,
    /// Entry kind: "experience", "education", or "project".
    #[serde(rename = "type")]
    pub entry_type: String,
    pub organization: String,
}

/// Rewrites one resume entry for the user's industry.
///
/// Unlike the improvement-tip path, a generation failure here propagates to
/// the caller — there is no stored fallback to degrade to.
pub async fn improve_entry(
    llm: &dyn GenerationClient,
    user: &UserRow,
    request: &ImproveEntryRequest,
) -> Result<String, AppError> {
    if request.current.trim().is_empty() {
        return Err(AppError::Validation(
            "Nothing to improve: description is empty".to_string(),
        ));
    }
    let industry = user.industry.as_deref().ok_or_else(|| {
        AppError::Validation("Complete onboarding before improving entries".to_string())
    })?;

    let prompt = improve_entry_prompt(
        industry,
        &request.entry_type,
        &request.organization,
        &request.current,
    );
    let raw = llm.generate(&prompt).await?;

    Ok(sanitize_response(&raw).to_string())
}

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
            skills: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_improve_request_uses_type_key() {
        let json = serde_json::json!({
            "current": "Did backend work",
            "type": "experience",
            "organization": "Acme Corp"
        });
        let request: ImproveEntryRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.entry_type, "experience");
    }

    #[tokio::test]
    async fn test_improve_entry_returns_trimmed_free_text() {
        let fake = FakeGenerationClient::replying(
            "\nEngineered high-throughput backend services in Rust, cutting p99 latency 40%.\n",
        );
        let request = ImproveEntryRequest {
            current: "Did backend work".to_string(),
            entry_type: "experience".to_string(),
            organization: "Acme Corp".to_string(),
        };

        let improved = improve_entry(&fake, &test_user(), &request).await.unwrap();
        assert_eq!(
            improved,
            "Engineered high-throughput backend services in Rust, cutting p99 latency 40%."
        );

        let prompt = &fake.prompts()[0];
        assert!(prompt.contains("Did backend work"));
        assert!(prompt.contains("Acme Corp"));
    }

    #[tokio::test]
    async fn test_improve_entry_rejects_empty_description() {
        let fake = FakeGenerationClient::with_responses([]);
        let request = ImproveEntryRequest {
            current: "  ".to_string(),
            entry_type: "experience".to_string(),
            organization: "Acme Corp".to_string(),
        };
        let err = improve_entry(&fake, &test_user(), &request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_improve_entry_propagates_provider_failure() {
        let fake = FakeGenerationClient::failing();
        let request = ImproveEntryRequest {
            current: "Did backend work".to_string(),
            entry_type: "experience".to_string(),
            organization: "Acme Corp".to_string(),
        };
        let err = improve_entry(&fake, &test_user(), &request).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }
}
