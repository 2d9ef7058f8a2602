//! CNC Maintenance API Server
//!
//! REST API behind the maintenance dashboard: dataset overview and
//! previews, and free-text operator queries answered by the query router.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use datasets::Datasets;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod rate_limit;
mod routes;
mod settings;

pub use error::{ApiError, RequestError};
pub use rate_limit::{create_governor_config, RateLimitConfig};
pub use settings::{LoggingSettings, PreviewSettings, ServerSettings, Settings};

/// Application state shared across handlers
///
/// Datasets are an immutable snapshot, so handlers read them without locking.
pub struct AppState {
    /// Loaded tables
    pub datasets: Arc<Datasets>,
    /// Preview row limits
    pub preview: PreviewSettings,
    /// Prometheus handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(datasets: Arc<Datasets>, preview: PreviewSettings) -> Self {
        Self {
            datasets,
            preview,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }

    /// Expose metrics from an installed Prometheus recorder
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub datasets: DatasetCounts,
}

/// Row counts per table
#[derive(Debug, Serialize)]
pub struct DatasetCounts {
    pub sensor_rows: usize,
    pub maintenance_rows: usize,
    pub failure_rows: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/datasets", get(routes::datasets::get_overview))
        .route(
            "/api/v1/datasets/:table/preview",
            get(routes::datasets::get_preview),
        )
        .route("/api/v1/query", post(routes::query::post_query))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        datasets: DatasetCounts {
            sensor_rows: state.datasets.sensor.len(),
            maintenance_rows: state.datasets.maintenance.len(),
            failure_rows: state.datasets.failure.len(),
        },
    })
}

/// Prometheus text exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::NOT_FOUND,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// Initialize logging
pub fn init_logging(settings: &LoggingSettings) -> Result<(), ApiError> {
    let level = settings.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if settings.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| ApiError::Logging(e.to_string()))
}

/// Install the global Prometheus recorder
pub fn install_metrics() -> Result<PrometheusHandle, ApiError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ApiError::Metrics(e.to_string()))
}

/// Run the server
pub async fn run_server(settings: &Settings, state: AppState) -> Result<(), ApiError> {
    let governor = create_governor_config(&settings.rate_limit)?;
    let app = create_router(Arc::new(state)).layer(GovernorLayer { config: governor });

    info!("Starting API server on {}", settings.server.bind_address);

    let listener = tokio::net::TcpListener::bind(&settings.server.bind_address).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
