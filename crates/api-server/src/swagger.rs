//! OpenAPI specification for the attribution API.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AttributionIQ API",
        version = "0.1.0",
        description = "Multi-touch marketing attribution.\n\nCredits conversion revenue to channels under seven attribution models and derives channel efficiency, synergy, funnel and model-sensitivity analytics.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Attribution", description = "Per-model channel attribution and model comparison"),
        (name = "Journeys", description = "Customer journey lookup"),
        (name = "Analytics", description = "Derived channel analytics"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Attribution
        crate::rest::get_stats,
        crate::rest::list_models,
        crate::rest::get_attribution,
        crate::rest::compare_models,
        // Journeys
        crate::rest::list_journeys,
        crate::rest::get_journey,
        // Analytics
        crate::rest::advanced_metrics,
        crate::rest::revenue_trends,
        crate::rest::channel_synergy,
        crate::rest::funnel_analysis,
        crate::rest::top_performers,
        crate::rest::attribution_variance,
        // Operations
        crate::rest::root,
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Domain types
        attribution_core::AttributionModel,
        attribution_core::model::ModelInfo,
        attribution_core::types::Journey,
        attribution_core::types::Touchpoint,
        // Engine outputs
        attribution_engine::AttributionResult,
        attribution_engine::Aggregation,
        attribution_engine::ModelComparison,
        attribution_engine::SummaryStats,
        attribution_engine::channel_metrics::ChannelMetrics,
        attribution_engine::funnel::FunnelStage,
        attribution_engine::synergy::ChannelSynergy,
        attribution_engine::trends::RevenueTrendPoint,
        attribution_engine::performers::PerformerEntry,
        attribution_engine::performers::TopPerformers,
        attribution_engine::variance::AttributionVariance,
        // REST error/health types
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
        crate::rest::RootResponse,
    ))
)]
pub struct ApiDoc;
