use serde::Deserialize;

use crate::model::AttributionModel;

/// Root application configuration. Loaded from an optional
/// `attribution-iq.toml` file and environment variables with the prefix
/// `ATTRIBUTION_IQ__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// JSON file holding the journey snapshot.
    #[serde(default = "default_journeys_path")]
    pub journeys_path: String,
}

// ─── Analytics Config ───────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Model whose ranking drives top/bottom performers.
    #[serde(default = "default_reference_model")]
    pub reference_model: AttributionModel,
    /// K for top-K and bottom-K performers.
    #[serde(default = "default_performer_count")]
    pub performer_count: usize,
    /// Coefficient of variation (percent) above which a channel is model-sensitive.
    #[serde(default = "default_variance_threshold_pct")]
    pub variance_threshold_pct: f64,
}

// Default functions
fn default_node_id() -> String {
    "attribution-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8001
}
fn default_metrics_enabled() -> bool {
    true
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_journeys_path() -> String {
    "data/journeys.json".to_string()
}
fn default_reference_model() -> AttributionModel {
    AttributionModel::Linear
}
fn default_performer_count() -> usize {
    5
}
fn default_variance_threshold_pct() -> f64 {
    50.0
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            journeys_path: default_journeys_path(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            reference_model: default_reference_model(),
            performer_count: default_performer_count(),
            variance_threshold_pct: default_variance_threshold_pct(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            store: StoreConfig::default(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and an optional config file.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("attribution-iq")
    }

    /// Same as [`AppConfig::load`] with an explicit config file stem.
    pub fn load_from(file_stem: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(file_stem).required(false))
            .add_source(
                config::Environment::with_prefix("ATTRIBUTION_IQ")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
