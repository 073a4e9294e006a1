//! HTTP API for chart generation
//!
//! [`models`] is always available so clients can decode responses. The router,
//! handlers and error mapping need the `api` feature.

pub mod models;

#[cfg(feature = "api")]
pub mod errors;
#[cfg(feature = "api")]
pub mod handlers;

#[cfg(feature = "api")]
pub use server::{ApiDoc, AppState, app};

#[cfg(feature = "api")]
mod server {
    use std::sync::Arc;

    use axum::{
        Json, Router,
        http::HeaderValue,
        routing::{get, post},
    };
    use tower::limit::ConcurrencyLimitLayer;
    use tower_http::{
        cors::{AllowOrigin, CorsLayer},
        request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
        trace::TraceLayer,
    };
    use utoipa::OpenApi;

    use super::handlers;
    use super::models::{ChartData, ChartResponse, ErrorResponse, HealthResponse, KeyStats};
    use crate::config::AppConfig;
    use crate::generator::{GeneratorError, NormalSampleGenerator, SampleGenerator};
    use crate::params::ChartRequest;

    /// Immutable per-process handler state
    pub struct AppState {
        pub config: AppConfig,
        pub generator: Arc<dyn SampleGenerator>,
    }

    impl AppState {
        pub fn new(config: AppConfig, generator: Arc<dyn SampleGenerator>) -> Arc<Self> {
            Arc::new(Self { config, generator })
        }

        /// State backed by the configured normal generator
        pub fn from_config(config: AppConfig) -> Result<Arc<Self>, GeneratorError> {
            let generator = NormalSampleGenerator::new(&config.generator)?;
            Ok(Self::new(config, Arc::new(generator)))
        }
    }

    #[derive(OpenApi)]
    #[openapi(
        paths(handlers::chart::generate_chart, handlers::chart::health_check),
        components(schemas(
            ChartRequest,
            ChartResponse,
            KeyStats,
            ChartData,
            ErrorResponse,
            HealthResponse
        )),
        tags(
            (name = "X-bar Chart", description = "Statistical process control X-bar charts"),
            (name = "Health", description = "Service health")
        )
    )]
    pub struct ApiDoc;

    pub fn app(state: Arc<AppState>) -> Router {
        let max_concurrent_requests = state.config.server.max_concurrent_requests;

        let allowed = &state.config.server.allowed_origins;
        let allow_origin = if allowed.iter().any(|origin| origin.trim() == "*") {
            AllowOrigin::any()
        } else {
            let mut origins = Vec::new();
            for origin in allowed {
                match origin.trim().parse::<HeaderValue>() {
                    Ok(value) => origins.push(value),
                    Err(e) => tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e),
                }
            }
            AllowOrigin::list(origins)
        };
        let cors = CorsLayer::new().allow_origin(allow_origin);

        let openapi = ApiDoc::openapi();

        Router::new()
            .route("/generate_chart", post(handlers::generate_chart))
            .route("/health", get(handlers::health_check))
            .route("/openapi.json", get(move || async move { Json(openapi) }))
            .layer(ConcurrencyLimitLayer::new(max_concurrent_requests))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
