//! Comparison engine: every model over the same journeys, side by side.

use std::collections::BTreeMap;

use attribution_core::types::Journey;
use attribution_core::AttributionModel;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::attribution::{aggregate, AttributionResult};

/// One model's channel results within a comparison.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelComparison {
    pub model: AttributionModel,
    pub model_name: String,
    pub channels: Vec<AttributionResult>,
}

impl ModelComparison {
    pub fn revenue_by_channel(&self) -> BTreeMap<String, f64> {
        self.channels
            .iter()
            .map(|r| (r.channel.clone(), r.attributed_revenue))
            .collect()
    }
}

/// Run the aggregator for all seven models, in catalog order. Each model run
/// reads the shared journeys independently.
pub fn compare_all(journeys: &[Journey]) -> Vec<ModelComparison> {
    let comparisons: Vec<ModelComparison> = AttributionModel::ALL[..]
        .par_iter()
        .map(|&model| ModelComparison {
            model,
            model_name: model.display_name().to_string(),
            channels: aggregate(journeys, model).channels,
        })
        .collect();

    debug!(
        models = comparisons.len(),
        journeys = journeys.len(),
        "Model comparison computed"
    );
    comparisons
}

/// Channel × model matrix of attributed revenue. Channels a model did not
/// credit at all are absent from that channel's row.
pub fn revenue_matrix(
    comparisons: &[ModelComparison],
) -> BTreeMap<String, BTreeMap<AttributionModel, f64>> {
    let mut matrix: BTreeMap<String, BTreeMap<AttributionModel, f64>> = BTreeMap::new();
    for comparison in comparisons {
        for row in &comparison.channels {
            matrix
                .entry(row.channel.clone())
                .or_default()
                .insert(comparison.model, row.attributed_revenue);
        }
    }
    matrix
}
