//! AttributionIQ: multi-touch marketing attribution service.
//!
//! Main entry point that loads the journey dataset and starts the server.

use attribution_api::ApiServer;
use attribution_core::config::AppConfig;
use attribution_engine::{AttributionService, FileJourneyStore};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "attribution-iq")]
#[command(about = "Multi-touch marketing attribution service")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "ATTRIBUTION_IQ__NODE_ID")]
    node_id: Option<String>,

    /// Journey dataset path (overrides config)
    #[arg(long, env = "ATTRIBUTION_IQ__STORE__JOURNEYS_PATH")]
    journeys: Option<PathBuf>,

    /// Bind address (overrides config)
    #[arg(long, env = "ATTRIBUTION_IQ__API__HOST")]
    host: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "ATTRIBUTION_IQ__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Validate the journey dataset and exit
    #[arg(long, default_value_t = false)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "attribution_iq=info,attribution_engine=info,attribution_api=info,tower_http=info"
                    .into()
            }),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("AttributionIQ starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(path) = cli.journeys {
        config.store.journeys_path = path.display().to_string();
    }
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }

    info!(
        node_id = %config.node_id,
        journeys_path = %config.store.journeys_path,
        http_port = config.api.http_port,
        reference_model = %config.analytics.reference_model,
        "Configuration loaded"
    );

    // Load and validate the journey snapshot
    let store = FileJourneyStore::open(&config.store.journeys_path).map_err(|e| {
        error!(error = %e, path = %config.store.journeys_path, "Failed to load journeys");
        e
    })?;
    let service = Arc::new(AttributionService::from_store(
        &store,
        config.analytics.clone(),
    )?);

    if cli.check {
        let summary = service.get_summary();
        info!(
            journeys = summary.total_conversions,
            revenue = summary.total_revenue,
            spend = summary.total_marketing_spend,
            "Journey dataset is valid"
        );
        return Ok(());
    }

    let api_server = ApiServer::new(config.clone(), service);

    // Start metrics exporter
    if config.metrics.enabled {
        if let Err(e) = api_server.start_metrics().await {
            error!(error = %e, "Failed to start metrics exporter");
        }
    }

    info!("AttributionIQ is ready to serve traffic");

    api_server.start_http().await?;

    info!("AttributionIQ shut down");
    Ok(())
}
