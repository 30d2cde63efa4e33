//! Query service: the operations the transport layer calls, each a pure
//! computation over the shared journey snapshot.

use std::sync::Arc;

use attribution_core::config::AnalyticsConfig;
use attribution_core::model::ModelInfo;
use attribution_core::types::Journey;
use attribution_core::{AttributionError, AttributionModel, EngineResult};
use tracing::{debug, info};

use crate::attribution::{aggregate, Aggregation, AttributionResult};
use crate::channel_metrics::{channel_metrics, ChannelMetrics};
use crate::comparison::{compare_all, ModelComparison};
use crate::funnel::{funnel_by_touchpoints, FunnelStage};
use crate::performers::{top_performers, TopPerformers};
use crate::store::{JourneySnapshot, JourneyStore};
use crate::summary::{summarize, SummaryStats};
use crate::synergy::{channel_synergy, ChannelSynergy};
use crate::trends::{revenue_trends, RevenueTrendPoint};
use crate::variance::{attribution_variance, AttributionVariance};

pub struct AttributionService {
    snapshot: Arc<JourneySnapshot>,
    settings: AnalyticsConfig,
}

impl AttributionService {
    pub fn new(snapshot: JourneySnapshot, settings: AnalyticsConfig) -> Self {
        info!(
            journeys = snapshot.len(),
            reference_model = %settings.reference_model,
            "Attribution service initialized"
        );
        Self {
            snapshot: Arc::new(snapshot),
            settings,
        }
    }

    /// Take a validated snapshot of `store`.
    pub fn from_store(store: &dyn JourneyStore, settings: AnalyticsConfig) -> EngineResult<Self> {
        Ok(Self::new(JourneySnapshot::from_store(store)?, settings))
    }

    pub fn snapshot(&self) -> &JourneySnapshot {
        &self.snapshot
    }

    pub fn settings(&self) -> &AnalyticsConfig {
        &self.settings
    }

    /// Fails with `EmptyDataset` when there is nothing to attribute.
    pub fn require_data(&self) -> EngineResult<()> {
        if self.snapshot.is_empty() {
            return Err(AttributionError::EmptyDataset);
        }
        Ok(())
    }

    pub fn get_summary(&self) -> SummaryStats {
        summarize(self.journeys())
    }

    /// Channel results for the model named `model_id`.
    pub fn get_attribution(&self, model_id: &str) -> EngineResult<Vec<AttributionResult>> {
        let model: AttributionModel = model_id.parse()?;
        Ok(self.get_aggregation(model).channels)
    }

    pub fn get_aggregation(&self, model: AttributionModel) -> Aggregation {
        aggregate(self.journeys(), model)
    }

    pub fn compare_models(&self) -> Vec<ModelComparison> {
        compare_all(self.journeys())
    }

    pub fn get_advanced_metrics(&self) -> Vec<ChannelMetrics> {
        channel_metrics(self.journeys(), self.snapshot.non_converting_exposures())
    }

    pub fn get_revenue_trends(&self) -> Vec<RevenueTrendPoint> {
        revenue_trends(self.journeys())
    }

    pub fn get_channel_synergy(&self) -> Vec<ChannelSynergy> {
        channel_synergy(self.journeys())
    }

    pub fn get_funnel(&self) -> Vec<FunnelStage> {
        funnel_by_touchpoints(self.journeys())
    }

    pub fn get_top_performers(&self) -> TopPerformers {
        let aggregation = self.get_aggregation(self.settings.reference_model);
        top_performers(&aggregation, self.settings.performer_count)
    }

    pub fn get_attribution_variance(&self) -> Vec<AttributionVariance> {
        let rows = attribution_variance(
            &self.compare_models(),
            self.settings.variance_threshold_pct,
        );
        debug!(
            channels = rows.len(),
            model_sensitive = rows.iter().filter(|r| r.model_sensitive).count(),
            "Attribution variance computed"
        );
        rows
    }

    pub fn get_journey(&self, journey_id: &str) -> EngineResult<Journey> {
        self.snapshot
            .get(journey_id)
            .cloned()
            .ok_or_else(|| AttributionError::NotFound(journey_id.to_string()))
    }

    pub fn list_journeys(&self) -> Vec<Journey> {
        self.journeys().to_vec()
    }

    /// The model catalog with explanatory copy.
    pub fn models(&self) -> Vec<ModelInfo> {
        AttributionModel::ALL.iter().map(|m| m.info()).collect()
    }

    fn journeys(&self) -> &[Journey] {
        self.snapshot.journeys()
    }
}
