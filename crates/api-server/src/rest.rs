//! REST API handlers for attribution queries and operational endpoints.

use std::sync::Arc;
use std::time::Instant;

use attribution_core::model::ModelInfo;
use attribution_core::types::Journey;
use attribution_core::AttributionError;
use attribution_engine::channel_metrics::ChannelMetrics;
use attribution_engine::funnel::FunnelStage;
use attribution_engine::performers::TopPerformers;
use attribution_engine::synergy::ChannelSynergy;
use attribution_engine::trends::RevenueTrendPoint;
use attribution_engine::variance::AttributionVariance;
use attribution_engine::{AttributionResult, AttributionService, ModelComparison, SummaryStats};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AttributionService>,
    pub node_id: String,
    pub start_time: Instant,
}

/// Engine error mapped onto an HTTP status.
pub struct ApiError(pub AttributionError);

impl From<AttributionError> for ApiError {
    fn from(err: AttributionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            AttributionError::UnknownModel(_) => (StatusCode::BAD_REQUEST, "unknown_model"),
            AttributionError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AttributionError::EmptyDataset => (StatusCode::SERVICE_UNAVAILABLE, "empty_dataset"),
            AttributionError::InvalidJourney { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_journey")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        } else {
            warn!(error = %self.0, "Request rejected");
        }
        metrics::counter!("api.errors", "code" => code).increment(1);

        (
            status,
            Json(ErrorResponse {
                error: code.to_string(),
                message: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

fn record(endpoint: &'static str) {
    metrics::counter!("api.requests", "endpoint" => endpoint).increment(1);
}

/// GET /api/: Service banner.
#[utoipa::path(
    get,
    path = "/api/",
    tag = "Operations",
    responses((status = 200, description = "Service banner", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "AttributionIQ API".to_string(),
    })
}

/// GET /api/stats: Global KPIs over all journeys.
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Attribution",
    responses((status = 200, description = "Summary statistics", body = SummaryStats))
)]
pub async fn get_stats(State(state): State<AppState>) -> Json<SummaryStats> {
    record("stats");
    Json(state.service.get_summary())
}

/// GET /api/models: Attribution model catalog.
#[utoipa::path(
    get,
    path = "/api/models",
    tag = "Attribution",
    responses((status = 200, description = "Available attribution models", body = [ModelInfo]))
)]
pub async fn list_models(State(state): State<AppState>) -> Json<Vec<ModelInfo>> {
    Json(state.service.models())
}

/// GET /api/journeys: All customer journeys.
#[utoipa::path(
    get,
    path = "/api/journeys",
    tag = "Journeys",
    responses((status = 200, description = "Customer journeys", body = [Journey]))
)]
pub async fn list_journeys(State(state): State<AppState>) -> Json<Vec<Journey>> {
    record("journeys");
    Json(state.service.list_journeys())
}

/// GET /api/journeys/:journey_id: One journey.
#[utoipa::path(
    get,
    path = "/api/journeys/{journey_id}",
    tag = "Journeys",
    params(("journey_id" = String, Path, description = "Journey identifier")),
    responses(
        (status = 200, description = "Journey found", body = Journey),
        (status = 404, description = "Journey not found", body = ErrorResponse),
    )
)]
pub async fn get_journey(
    State(state): State<AppState>,
    Path(journey_id): Path<String>,
) -> Result<Json<Journey>, ApiError> {
    record("journey");
    Ok(Json(state.service.get_journey(&journey_id)?))
}

/// GET /api/attribution/:model: Channel attribution under one model.
#[utoipa::path(
    get,
    path = "/api/attribution/{model}",
    tag = "Attribution",
    params(("model" = String, Path, description = "Model identifier, e.g. time-decay")),
    responses(
        (status = 200, description = "Per-channel attribution", body = [AttributionResult]),
        (status = 400, description = "Unknown model", body = ErrorResponse),
    )
)]
pub async fn get_attribution(
    State(state): State<AppState>,
    Path(model): Path<String>,
) -> Result<Json<Vec<AttributionResult>>, ApiError> {
    record("attribution");
    Ok(Json(state.service.get_attribution(&model)?))
}

/// GET /api/attribution/compare/all: Every model side by side.
#[utoipa::path(
    get,
    path = "/api/attribution/compare/all",
    tag = "Attribution",
    responses((status = 200, description = "All models compared", body = [ModelComparison]))
)]
pub async fn compare_models(State(state): State<AppState>) -> Json<Vec<ModelComparison>> {
    record("compare");
    Json(state.service.compare_models())
}

/// GET /api/advanced-metrics: Conversion rate and CPA per channel.
#[utoipa::path(
    get,
    path = "/api/advanced-metrics",
    tag = "Analytics",
    responses((status = 200, description = "Channel efficiency metrics", body = [ChannelMetrics]))
)]
pub async fn advanced_metrics(State(state): State<AppState>) -> Json<Vec<ChannelMetrics>> {
    record("advanced_metrics");
    Json(state.service.get_advanced_metrics())
}

/// GET /api/revenue-trends: Daily revenue series.
#[utoipa::path(
    get,
    path = "/api/revenue-trends",
    tag = "Analytics",
    responses((status = 200, description = "Daily revenue trend", body = [RevenueTrendPoint]))
)]
pub async fn revenue_trends(State(state): State<AppState>) -> Json<Vec<RevenueTrendPoint>> {
    record("revenue_trends");
    Json(state.service.get_revenue_trends())
}

/// GET /api/channel-synergy: Channel pair co-occurrence.
#[utoipa::path(
    get,
    path = "/api/channel-synergy",
    tag = "Analytics",
    responses((status = 200, description = "Channel pairs ranked by value", body = [ChannelSynergy]))
)]
pub async fn channel_synergy(State(state): State<AppState>) -> Json<Vec<ChannelSynergy>> {
    record("channel_synergy");
    Json(state.service.get_channel_synergy())
}

/// GET /api/funnel-analysis: Journeys by touchpoint count.
#[utoipa::path(
    get,
    path = "/api/funnel-analysis",
    tag = "Analytics",
    responses((status = 200, description = "Funnel stages", body = [FunnelStage]))
)]
pub async fn funnel_analysis(State(state): State<AppState>) -> Json<Vec<FunnelStage>> {
    record("funnel");
    Json(state.service.get_funnel())
}

/// GET /api/top-performers: Best and worst channels under the reference model.
#[utoipa::path(
    get,
    path = "/api/top-performers",
    tag = "Analytics",
    responses((status = 200, description = "Top and bottom channels", body = TopPerformers))
)]
pub async fn top_performers(State(state): State<AppState>) -> Json<TopPerformers> {
    record("top_performers");
    Json(state.service.get_top_performers())
}

/// GET /api/attribution-variance: Model sensitivity per channel.
#[utoipa::path(
    get,
    path = "/api/attribution-variance",
    tag = "Analytics",
    responses((status = 200, description = "Cross-model variance", body = [AttributionVariance]))
)]
pub async fn attribution_variance(
    State(state): State<AppState>,
) -> Json<Vec<AttributionVariance>> {
    record("attribution_variance");
    Json(state.service.get_attribution_variance())
}

/// GET /health: Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service health", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        journeys: state.service.snapshot().len(),
    })
}

/// GET /ready: Ready once there are journeys to attribute.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses(
        (status = 200, description = "Ready to serve"),
        (status = 503, description = "No journeys loaded", body = ErrorResponse),
    )
)]
pub async fn readiness(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.service.require_data()?;
    Ok(StatusCode::OK)
}

/// GET /live: Liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
    pub journeys: usize,
}
