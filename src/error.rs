use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use opentelemetry::trace::TraceContextExt;
use serde_json::json;
use thiserror::Error;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::report::ReportError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::LocationNotFound(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Report(ReportError::InvalidGeometry(_)) => StatusCode::BAD_REQUEST,
            AppError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn get_trace_id() -> Option<String> {
    let span = Span::current();
    let context = span.context();
    let span_ref = context.span();
    let span_context = span_ref.span_context();

    if span_context.is_valid() {
        Some(span_context.trace_id().to_string())
    } else {
        None
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::Validation(msg) | AppError::LocationNotFound(msg) => {
                tracing::warn!(warning = %msg, "Request rejected");
                msg.clone()
            }
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "Upstream service error");
                "Upstream service unavailable".to_string()
            }
            AppError::Report(ReportError::InvalidGeometry(msg)) => msg.clone(),
            AppError::Report(e) => {
                tracing::error!(error = %e, "Report rendering error");
                "Internal server error".to_string()
            }
        };

        let body = if let Some(trace_id) = get_trace_id() {
            json!({
                "error": error_message,
                "status": status.as_u16(),
                "trace_id": trace_id,
            })
        } else {
            json!({
                "error": error_message,
                "status": status.as_u16(),
            })
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
