//! Industry insights — generation, lazy creation, and persistence.
//!
//! Flow: compose prompt → generation client → sanitize → parse → validate →
//! persist. Creation for an unseen industry runs the full pipeline; the
//! refresh job re-enters it per industry on a schedule.

pub mod handlers;
pub mod prompts;
pub mod refresh;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{parse_structured, FormatError, GenerationClient};
use crate::models::insight::IndustryInsightRow;

use crate::insights::prompts::insight_prompt;

/// How long a generated insight stays current before the refresh job is due.
pub const REFRESH_INTERVAL_DAYS: i64 = 7;

const MIN_SALARY_ROLES: usize = 5;
const MIN_TOP_SKILLS: usize = 5;
const MIN_KEY_TRENDS: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Generated payload shape
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

impl DemandLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemandLevel::High => "HIGH",
            DemandLevel::Medium => "MEDIUM",
            DemandLevel::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketOutlook {
    Positive,
    Neutral,
    Negative,
}

impl MarketOutlook {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketOutlook::Positive => "POSITIVE",
            MarketOutlook::Neutral => "NEUTRAL",
            MarketOutlook::Negative => "NEGATIVE",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRange {
    pub role: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    #[serde(default)]
    pub location: Option<String>,
}

/// The insight payload as the provider must return it (camelCase keys per the
/// prompt's schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightPayload {
    pub salary_ranges: Vec<SalaryRange>,
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub key_trends: Vec<String>,
    #[serde(default)]
    pub recommended_skills: Vec<String>,
}

impl InsightPayload {
    /// Shape checks beyond field presence, matching what the prompt demands.
    /// All-or-nothing: a payload that fails here is discarded entirely.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.salary_ranges.len() < MIN_SALARY_ROLES {
            return Err(FormatError::Schema(format!(
                "expected at least {MIN_SALARY_ROLES} salary ranges, got {}",
                self.salary_ranges.len()
            )));
        }
        if self.top_skills.len() < MIN_TOP_SKILLS {
            return Err(FormatError::Schema(format!(
                "expected at least {MIN_TOP_SKILLS} top skills, got {}",
                self.top_skills.len()
            )));
        }
        if self.key_trends.len() < MIN_KEY_TRENDS {
            return Err(FormatError::Schema(format!(
                "expected at least {MIN_KEY_TRENDS} key trends, got {}",
                self.key_trends.len()
            )));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs compose → generate → sanitize/parse → validate for one industry.
pub async fn generate_insights(
    llm: &dyn GenerationClient,
    industry: &str,
) -> Result<InsightPayload, AppError> {
    let prompt = insight_prompt(industry);
    let raw = llm.generate(&prompt).await?;
    let payload: InsightPayload = parse_structured(&raw)?;
    payload.validate()?;
    Ok(payload)
}

pub async fn find_by_industry(
    pool: &PgPool,
    industry: &str,
) -> Result<Option<IndustryInsightRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM industry_insights WHERE industry = $1")
        .bind(industry)
        .fetch_optional(pool)
        .await
}

/// Returns the insight row for `industry`, generating and inserting it first
/// when absent.
///
/// Runs OUTSIDE any transaction: the generation call can take tens of seconds
/// and must not hold row locks. Concurrent callers for the same new industry
/// race benignly — `ON CONFLICT (industry) DO NOTHING` keeps a single row and
/// the re-select returns the winner's. Rows are never deleted, so a key handed
/// out here stays resolvable.
pub async fn ensure_industry_insight(
    pool: &PgPool,
    llm: &dyn GenerationClient,
    industry: &str,
) -> Result<IndustryInsightRow, AppError> {
    if let Some(existing) = find_by_industry(pool, industry).await? {
        return Ok(existing);
    }

    info!("No insight on record for '{industry}', generating");
    let payload = generate_insights(llm, industry).await?;
    insert_insight(pool, industry, &payload).await?;

    find_by_industry(pool, industry).await?.ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "insight row for '{industry}' missing after insert"
        ))
    })
}

async fn insert_insight(
    pool: &PgPool,
    industry: &str,
    payload: &InsightPayload,
) -> Result<(), AppError> {
    let now = Utc::now();
    let salary_ranges = serde_json::to_value(&payload.salary_ranges)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize salary ranges: {e}")))?;

    sqlx::query(
        r#"
        INSERT INTO industry_insights
            (id, industry, salary_ranges, growth_rate, demand_level, market_outlook,
             top_skills, key_trends, recommended_skills, last_updated, next_update)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (industry) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(industry)
    .bind(&salary_ranges)
    .bind(payload.growth_rate)
    .bind(payload.demand_level.as_str())
    .bind(payload.market_outlook.as_str())
    .bind(&payload.top_skills)
    .bind(&payload.key_trends)
    .bind(&payload.recommended_skills)
    .bind(now)
    .bind(now + Duration::days(REFRESH_INTERVAL_DAYS))
    .execute(pool)
    .await?;

    Ok(())
}

/// Overwrites every derived field of an existing insight row and advances
/// `last_updated` / `next_update`. Last writer wins; no optimistic locking.
pub(crate) async fn overwrite_insight(
    pool: &PgPool,
    industry: &str,
    payload: &InsightPayload,
) -> Result<(), AppError> {
    let now = Utc::now();
    let salary_ranges = serde_json::to_value(&payload.salary_ranges)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize salary ranges: {e}")))?;

    let result = sqlx::query(
        r#"
        UPDATE industry_insights
        SET salary_ranges = $2,
            growth_rate = $3,
            demand_level = $4,
            market_outlook = $5,
            top_skills = $6,
            key_trends = $7,
            recommended_skills = $8,
            last_updated = $9,
            next_update = $10
        WHERE industry = $1
        "#,
    )
    .bind(industry)
    .bind(&salary_ranges)
    .bind(payload.growth_rate)
    .bind(payload.demand_level.as_str())
    .bind(payload.market_outlook.as_str())
    .bind(&payload.top_skills)
    .bind(&payload.key_trends)
    .bind(&payload.recommended_skills)
    .bind(now)
    .bind(now + Duration::days(REFRESH_INTERVAL_DAYS))
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "No insight on record for industry '{industry}'"
        )));
    }

    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
