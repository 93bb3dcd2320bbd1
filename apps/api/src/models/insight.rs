use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Periodically refreshed market data for one industry key.
///
/// Invariant: at most one row per industry string (unique constraint). Rows are
/// created lazily on first onboarding for a new industry, overwritten in place
/// by the refresh job, and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IndustryInsightRow {
    pub id: Uuid,
    pub industry: String,
    /// Ordered list of `{role, min, max, median, location}` objects.
    pub salary_ranges: Value,
    pub growth_rate: f64,
    pub demand_level: String,
    pub market_outlook: String,
    pub top_skills: Vec<String>,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}
