//! Request handler errors and their HTTP mapping

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::models::ErrorResponse;
use crate::generator::GeneratorError;
use crate::params::ParameterError;
use crate::statistics::StatisticsError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request must be JSON: {0}")]
    MalformedRequest(String),

    #[error(transparent)]
    InvalidParameters(#[from] ParameterError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] StatisticsError),

    #[error("Sample generation failed: {0}")]
    Generation(#[from] GeneratorError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) | ApiError::InvalidParameters(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::MalformedRequest(_) => "malformed_request",
            ApiError::InvalidParameters(_) => "invalid_parameters",
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::Generation(_) => "generation_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error_type = self.error_type(), %message, "chart request failed");
        } else {
            tracing::warn!(error_type = self.error_type(), %message, "chart request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
