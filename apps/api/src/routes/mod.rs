pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::insights::handlers as insight_handlers;
use crate::interview::handlers as interview_handlers;
use crate::resume::handlers as resume_handlers;
use crate::state::AppState;
use crate::users::handlers as user_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Users
        .route("/api/v1/users/onboard", post(user_handlers::handle_onboard))
        .route(
            "/api/v1/users/onboarding-status",
            get(user_handlers::handle_onboarding_status),
        )
        // Industry insights
        .route(
            "/api/v1/insights",
            get(insight_handlers::handle_get_insights),
        )
        // Interview prep
        .route(
            "/api/v1/interview/quiz",
            post(interview_handlers::handle_generate_quiz),
        )
        .route(
            "/api/v1/interview/attempts",
            post(interview_handlers::handle_save_attempt)
                .get(interview_handlers::handle_list_attempts),
        )
        // Resume
        .route(
            "/api/v1/resume",
            post(resume_handlers::handle_save_resume).get(resume_handlers::handle_get_resume),
        )
        .route(
            "/api/v1/resume/improve",
            post(resume_handlers::handle_improve_entry),
        )
        // Jobs — hit by the external cron scheduler, not end users
        .route(
            "/internal/jobs/refresh-insights",
            post(insight_handlers::handle_refresh_insights),
        )
        .with_state(state)
}
