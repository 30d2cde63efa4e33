//! Top and bottom performing channels under a reference model.

use attribution_core::AttributionModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::attribution::Aggregation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PerformerEntry {
    pub channel: String,
    pub revenue: f64,
    pub roas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopPerformers {
    pub model: AttributionModel,
    /// Highest attributed revenue first.
    pub top: Vec<PerformerEntry>,
    /// Tail of the same ranking, still highest first. Overlaps `top` when
    /// fewer than `2 * k` channels exist.
    pub bottom: Vec<PerformerEntry>,
}

/// Slice the head and tail of an aggregation already ranked by revenue.
pub fn top_performers(aggregation: &Aggregation, k: usize) -> TopPerformers {
    let entries: Vec<PerformerEntry> = aggregation
        .channels
        .iter()
        .map(|r| PerformerEntry {
            channel: r.channel.clone(),
            revenue: r.attributed_revenue,
            roas: r.roas,
        })
        .collect();

    let top = entries.iter().take(k).cloned().collect();
    let bottom = entries[entries.len().saturating_sub(k)..].to_vec();

    TopPerformers {
        model: aggregation.model,
        top,
        bottom,
    }
}
