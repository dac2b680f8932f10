pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/analyze", post(handlers::handle_analyze))
        .route("/api/v1/analysis/report", post(handlers::handle_report))
        .route("/api/v1/analysis/score", post(handlers::handle_score))
        .with_state(state)
}
