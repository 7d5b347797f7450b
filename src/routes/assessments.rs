use axum::{Json, extract::State};

use crate::AppState;
use crate::error::AppResult;
use crate::triage::intake::AssessmentRequest;
use crate::triage::{Assessment, run_assessment};

pub async fn create_assessment(
    State(state): State<AppState>,
    Json(body): Json<AssessmentRequest>,
) -> AppResult<Json<Assessment>> {
    let assessment = run_assessment(&state.services, body).await?;
    Ok(Json(assessment))
}
