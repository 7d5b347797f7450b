pub mod assessments;
pub mod health;
pub mod reports;
pub mod ui;

use axum::Router;
use axum::routing::{get, post};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index))
        .route("/api/health", get(health::health))
        .route("/api/assessments", post(assessments::create_assessment))
        .route("/api/reports/pdf", post(reports::render_pdf))
        .with_state(state)
}
