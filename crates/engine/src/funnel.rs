//! Funnel analysis: journeys grouped by how many touchpoints they took.

use std::collections::BTreeMap;

use attribution_core::types::Journey;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::numeric::{ratio_or_zero, round2};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FunnelStage {
    pub touchpoint_count: usize,
    pub journeys: u64,
    pub revenue: f64,
    pub avg_conversion_value: f64,
}

/// One stage per distinct touchpoint count, ascending.
pub fn funnel_by_touchpoints(journeys: &[Journey]) -> Vec<FunnelStage> {
    let mut stages: BTreeMap<usize, (u64, f64)> = BTreeMap::new();
    for journey in journeys {
        let stage = stages.entry(journey.touchpoint_count).or_default();
        stage.0 += 1;
        stage.1 += journey.conversion_value;
    }

    stages
        .into_iter()
        .map(|(touchpoint_count, (count, revenue))| FunnelStage {
            touchpoint_count,
            journeys: count,
            revenue: round2(revenue),
            avg_conversion_value: round2(ratio_or_zero(revenue, count as f64)),
        })
        .collect()
}
