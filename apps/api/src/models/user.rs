use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user. Identity is owned by the external provider; `external_id`
/// is its subject. Industry is a composite `industry-sub_industry` string key
/// resolving to an `industry_insights` row, set once onboarding completes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub industry: Option<String>,
    pub experience: Option<i32>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    /// A user counts as onboarded once an industry has been chosen.
    pub fn is_onboarded(&self) -> bool {
        self.industry.is_some()
    }
}
