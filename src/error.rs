use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Failures raised by the analyzer and the statistics it computes.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("No data provided")]
    NoDataProvided,

    #[error("No dataset loaded")]
    NoDatasetLoaded,

    #[error("Insufficient data: at least {required} values are required, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Value at index {index} is not a finite number")]
    NonFiniteValue { index: usize },

    #[error("Invalid chart type: {kind}")]
    InvalidChartKind { kind: String },

    #[error("Computation failed: {context}")]
    Computation { context: String },

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl AnalyzerError {
    pub fn computation(context: impl Into<String>) -> Self {
        Self::Computation {
            context: context.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {reason}")]
    Drawing { reason: String },

    #[error("PNG encoding failed")]
    Encode {
        #[from]
        source: image::ImageError,
    },

    #[error("Drawing surface of {width}x{height} could not be allocated")]
    Surface { width: u32, height: u32 },
}

impl RenderError {
    pub fn drawing(reason: impl std::fmt::Display) -> Self {
        Self::Drawing {
            reason: reason.to_string(),
        }
    }
}

/// Error returned from HTTP handlers, rendered as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    #[error("Invalid request body: {reason}")]
    InvalidPayload { reason: String },

    #[error("Invalid query parameter: {reason}")]
    InvalidQuery { reason: String },

    #[error("Background task failed: {context}")]
    TaskFailed { context: String },
}

impl ApiError {
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            reason: reason.into(),
        }
    }

    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            reason: reason.into(),
        }
    }

    // A missing dataset is a 400 on every route, central tendency included:
    // it follows from the caller's request order, not a server fault.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Analyzer(AnalyzerError::Computation { .. })
            | ApiError::Analyzer(AnalyzerError::Render(_))
            | ApiError::TaskFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,

            ApiError::Analyzer(_)
            | ApiError::InvalidPayload { .. }
            | ApiError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "request failed: {self}");
        } else {
            tracing::debug!(status = status.as_u16(), "request rejected: {self}");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
