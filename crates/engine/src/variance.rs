//! Attribution variance: how much a channel's credited revenue moves when the
//! attribution model changes.

use attribution_core::AttributionModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::comparison::{revenue_matrix, ModelComparison};
use crate::numeric::{ratio, round2};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttributionVariance {
    pub channel: String,
    pub avg_revenue: f64,
    /// Population standard deviation across models.
    pub std_dev: f64,
    /// `std_dev / avg_revenue * 100`; absent when the mean is 0.
    pub coefficient_of_variation: Option<f64>,
    pub min_revenue: f64,
    pub max_revenue: f64,
    /// Coefficient of variation above the configured threshold.
    pub model_sensitive: bool,
}

/// Per-channel spread of attributed revenue across the compared models.
/// A model that did not credit a channel counts as 0 for it. Ordered by
/// coefficient of variation descending, undefined values last.
pub fn attribution_variance(
    comparisons: &[ModelComparison],
    threshold_pct: f64,
) -> Vec<AttributionVariance> {
    let models: Vec<AttributionModel> = comparisons.iter().map(|c| c.model).collect();
    if models.is_empty() {
        return Vec::new();
    }

    let mut rows: Vec<AttributionVariance> = revenue_matrix(comparisons)
        .into_iter()
        .map(|(channel, by_model)| {
            let revenues: Vec<f64> = models
                .iter()
                .map(|m| by_model.get(m).copied().unwrap_or(0.0))
                .collect();
            let n = revenues.len() as f64;
            let mean = revenues.iter().sum::<f64>() / n;
            let variance = revenues.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
            let std_dev = variance.sqrt();
            let cv = ratio(std_dev, mean).map(|v| round2(v * 100.0));

            AttributionVariance {
                channel,
                avg_revenue: round2(mean),
                std_dev: round2(std_dev),
                coefficient_of_variation: cv,
                min_revenue: round2(revenues.iter().copied().fold(f64::INFINITY, f64::min)),
                max_revenue: round2(revenues.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
                model_sensitive: cv.is_some_and(|v| v > threshold_pct),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        let a_cv = a.coefficient_of_variation.unwrap_or(f64::NEG_INFINITY);
        let b_cv = b.coefficient_of_variation.unwrap_or(f64::NEG_INFINITY);
        b_cv.total_cmp(&a_cv).then_with(|| a.channel.cmp(&b.channel))
    });
    rows
}
