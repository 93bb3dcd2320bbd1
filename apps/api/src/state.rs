use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::GenerationClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The generation provider behind a trait object so tests can inject fakes.
    pub llm: Arc<dyn GenerationClient>,
    #[allow(dead_code)]
    pub config: Config,
}
