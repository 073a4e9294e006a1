//! HTTP client for a running chart service
//!
//! Every failure is surfaced to the caller; nothing is retried here.

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::api::models::{ChartResponse, ErrorResponse};
use crate::params::ChartRequest;

/// Chart endpoint path relative to the service base URL
pub const GENERATE_CHART_PATH: &str = "/generate_chart";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request failed or the service answered with a non-success status
    #[error("{}", transport_message(.status, .message))]
    Transport {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Failed to decode chart response: {0}")]
    Decode(#[source] reqwest::Error),
}

fn transport_message(status: &Option<StatusCode>, message: &str) -> String {
    match status {
        Some(status) => format!("HTTP error! status: {} - {}", status.as_u16(), message),
        None => format!("Request failed: {message}"),
    }
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Transport { status, .. } => *status,
            ClientError::Decode(_) => None,
        }
    }
}

/// Client for `POST /generate_chart`
#[derive(Debug, Clone)]
pub struct ChartClient {
    http: Client,
    base_url: String,
}

impl ChartClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_CHART_PATH)
    }

    /// Request a chart for the given shape
    pub async fn generate(&self, request: &ChartRequest) -> Result<ChartResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                status: e.status(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            // The body is best effort: a proxy may answer without our JSON shape
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => "Unknown error".to_string(),
            };
            tracing::warn!(status = status.as_u16(), %message, "chart request failed");
            return Err(ClientError::Transport {
                status: Some(status),
                message,
            });
        }

        response.json().await.map_err(ClientError::Decode)
    }
}
