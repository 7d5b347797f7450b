use axum::{
    Json,
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::report::{PageGeometry, REPORT_FILE_NAME, REPORT_MIME, render_report};

#[derive(Debug, Deserialize)]
pub struct RenderReportBody {
    pub text: String,
    pub geometry: Option<PageGeometry>,
}

pub async fn render_pdf(Json(body): Json<RenderReportBody>) -> AppResult<Response> {
    if body.text.trim().is_empty() {
        return Err(AppError::Validation("report text must not be empty".into()));
    }

    let geometry = body.geometry.unwrap_or_default();
    let pdf = render_report(&body.text, geometry)?;

    Ok((
        [
            (header::CONTENT_TYPE, REPORT_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}
