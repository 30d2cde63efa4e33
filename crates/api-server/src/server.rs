//! API server: starts the HTTP (REST) server and the metrics exporter.

use crate::rest::{self, AppState};
use crate::swagger::ApiDoc;
use attribution_core::config::AppConfig;
use attribution_engine::AttributionService;
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;

/// Main API server exposing the attribution service over HTTP.
pub struct ApiServer {
    config: AppConfig,
    service: Arc<AttributionService>,
}

impl ApiServer {
    pub fn new(config: AppConfig, service: Arc<AttributionService>) -> Self {
        Self { config, service }
    }

    /// Start the HTTP REST server. Returns once a shutdown signal arrives.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let state = AppState {
            service: self.service.clone(),
            node_id: self.config.node_id.clone(),
            start_time: Instant::now(),
        };

        let app = build_router(state);

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Start the metrics server on a separate port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}

/// Full application router with middleware applied.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(rest::root))
        .route("/stats", get(rest::get_stats))
        .route("/models", get(rest::list_models))
        .route("/journeys", get(rest::list_journeys))
        .route("/journeys/:journey_id", get(rest::get_journey))
        .route("/attribution/compare/all", get(rest::compare_models))
        .route("/attribution/:model", get(rest::get_attribution))
        .route("/advanced-metrics", get(rest::advanced_metrics))
        .route("/revenue-trends", get(rest::revenue_trends))
        .route("/channel-synergy", get(rest::channel_synergy))
        .route("/funnel-analysis", get(rest::funnel_analysis))
        .route("/top-performers", get(rest::top_performers))
        .route("/attribution-variance", get(rest::attribution_variance));

    Router::new()
        .nest("/api", api)
        // Operational endpoints
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::readiness))
        .route("/live", get(rest::liveness))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
