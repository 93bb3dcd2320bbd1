//! User profiles — lookup, onboarding, and the industry attachment contract.

pub mod handlers;

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::insights::ensure_industry_insight;
use crate::llm_client::GenerationClient;
use crate::models::insight::IndustryInsightRow;
use crate::models::user::UserRow;

pub async fn find_by_external_id(
    pool: &PgPool,
    external_id: &str,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE external_id = $1")
        .bind(external_id)
        .fetch_optional(pool)
        .await
}

/// Resolves the authenticated subject to a registered user.
pub async fn require_user(pool: &PgPool, external_id: &str) -> Result<UserRow, AppError> {
    find_by_external_id(pool, external_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Profile fields submitted by the onboarding form.
#[derive(Debug, Deserialize)]
pub struct OnboardingData {
    /// Composite `industry-sub_industry` key.
    pub industry: String,
    pub experience: i32,
    pub bio: String,
    pub skills: Vec<String>,
}

impl OnboardingData {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.industry.trim().is_empty() {
            return Err(AppError::Validation("industry cannot be empty".to_string()));
        }
        if self.experience < 0 {
            return Err(AppError::Validation(
                "experience cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Onboards a user into an industry.
///
/// Two phases per the persistence contract: the insight row is ensured first —
/// idempotent, outside any transaction, because it may block on a generation
/// call for tens of seconds and must not hold locks meanwhile. The profile
/// update is then a single short statement. Insight rows are never deleted, so
/// the committed user row always references an existing industry key; a
/// failure before the update leaves the profile untouched.
pub async fn onboard_user(
    pool: &PgPool,
    llm: &dyn GenerationClient,
    external_id: &str,
    data: OnboardingData,
) -> Result<(UserRow, IndustryInsightRow), AppError> {
    data.validate()?;
    let user = require_user(pool, external_id).await?;

    let insight = ensure_industry_insight(pool, llm, &data.industry).await?;

    let updated: UserRow = sqlx::query_as(
        r#"
        UPDATE users
        SET industry = $2, experience = $3, bio = $4, skills = $5, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&data.industry)
    .bind(data.experience)
    .bind(&data.bio)
    .bind(&data.skills)
    .fetch_one(pool)
    .await?;

    info!("User {} onboarded into '{}'", updated.id, data.industry);

    Ok((updated, insight))
}
