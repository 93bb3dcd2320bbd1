//! Scheduled insight refresh.
//!
//! The external scheduler triggers this weekly with no payload. Every industry
//! on record is re-generated independently; a per-industry failure leaves that
//! row unchanged and never aborts the rest of the run.

use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::GenerationClient;

use super::{generate_insights, overwrite_insight};

#[derive(Debug, Serialize)]
pub struct RefreshFailure {
    pub industry: String,
    pub error: String,
}

/// Aggregated outcome of one refresh run.
#[derive(Debug, Default, Serialize)]
pub struct RefreshReport {
    pub refreshed: Vec<String>,
    pub failed: Vec<RefreshFailure>,
}

/// Re-runs the insight pipeline for every tracked industry.
///
/// Only the initial industry listing can fail the job as a whole; each
/// industry after that is its own error boundary.
pub async fn refresh_all_insights(
    pool: &PgPool,
    llm: &dyn GenerationClient,
) -> Result<RefreshReport, AppError> {
    let industries: Vec<String> =
        sqlx::query_scalar("SELECT industry FROM industry_insights ORDER BY industry")
            .fetch_all(pool)
            .await?;

    info!("Refreshing insights for {} industries", industries.len());

    let mut report = RefreshReport::default();

    for industry in industries {
        match refresh_one(pool, llm, &industry).await {
            Ok(()) => report.refreshed.push(industry),
            Err(e) => {
                warn!("Insight refresh failed for '{industry}', leaving row unchanged: {e}");
                report.failed.push(RefreshFailure {
                    industry,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        "Insight refresh complete: {} refreshed, {} failed",
        report.refreshed.len(),
        report.failed.len()
    );

    Ok(report)
}

async fn refresh_one(
    pool: &PgPool,
    llm: &dyn GenerationClient,
    industry: &str,
) -> Result<(), AppError> {
    let payload = generate_insights(llm, industry).await?;
    overwrite_insight(pool, industry, &payload).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_with_failures() {
        let report = RefreshReport {
            refreshed: vec!["tech".to_string()],
            failed: vec![RefreshFailure {
                industry: "finance".to_string(),
                error: "Generation unavailable: provider error (status 503)".to_string(),
            }],
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["refreshed"][0], "tech");
        assert_eq!(json["failed"][0]["industry"], "finance");
    }

    #[test]
    fn test_empty_report_is_clean() {
        let report = RefreshReport::default();
        assert!(report.refreshed.is_empty());
        assert!(report.failed.is_empty());
    }
}
