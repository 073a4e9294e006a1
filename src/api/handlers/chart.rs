//! X-bar chart generation handlers

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use serde_json::Value;

use crate::{
    api::{
        AppState,
        errors::ApiError,
        models::{ChartResponse, ErrorResponse, HealthResponse},
    },
    params::ChartRequest,
    statistics,
};

/// Generate an X-bar chart from freshly generated samples
#[utoipa::path(
    post,
    path = "/generate_chart",
    request_body = ChartRequest,
    responses(
        (status = 200, description = "Chart computed successfully", body = ChartResponse),
        (status = 400, description = "Invalid request parameters", body = ErrorResponse),
        (
            status = 422,
            description = "Generated samples rejected by the statistics engine",
            body = ErrorResponse
        ),
        (status = 500, description = "Sample generation failed", body = ErrorResponse)
    ),
    tag = "X-bar Chart"
)]
pub async fn generate_chart(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChartResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::MalformedRequest(rejection.body_text()))?;

    // Validate input before anything is generated
    let params = ChartRequest::from_json(&body)?.into_parameters(&state.config.chart.limits())?;
    let factor = state
        .config
        .chart
        .factor
        .resolve(params.measurements_per_sample())?;

    let start_time = Instant::now();

    let samples = state.generator.generate(&params)?;
    let chart = statistics::compute(&samples, factor)?;

    tracing::info!(
        num_samples = params.num_samples(),
        measurements_per_sample = params.measurements_per_sample(),
        factor,
        overall_mean = chart.statistics.overall_mean,
        ucl = chart.statistics.ucl,
        lcl = chart.statistics.lcl,
        elapsed_us = start_time.elapsed().as_micros() as u64,
        "chart generated"
    );

    Ok(Json(ChartResponse::from_chart(
        &chart,
        state.config.chart.clamp_lcl_at_zero,
    )))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}
