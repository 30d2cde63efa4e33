//! Summary stats: global KPIs over the journey snapshot, independent of any
//! attribution model.

use attribution_core::types::Journey;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::numeric::{ratio_or_zero, round2, round_to};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SummaryStats {
    pub total_conversions: u64,
    pub total_revenue: f64,
    pub avg_touchpoints: f64,
    /// Mean days from first touchpoint to conversion.
    pub avg_time_to_conversion: f64,
    pub total_marketing_spend: f64,
    /// Total revenue over total spend; 0 when nothing was spent.
    pub overall_roas: f64,
}

pub fn summarize(journeys: &[Journey]) -> SummaryStats {
    let count = journeys.len() as f64;
    let mut total_revenue = 0.0;
    let mut total_touchpoints = 0usize;
    let mut total_days = 0u64;
    let mut total_spend = 0.0;

    for journey in journeys {
        total_revenue += journey.conversion_value;
        total_touchpoints += journey.touchpoint_count;
        total_days += u64::from(journey.time_to_conversion);
        total_spend += journey.total_cost();
    }

    SummaryStats {
        total_conversions: journeys.len() as u64,
        total_revenue: round2(total_revenue),
        avg_touchpoints: round_to(ratio_or_zero(total_touchpoints as f64, count), 1),
        avg_time_to_conversion: round_to(ratio_or_zero(total_days as f64, count), 1),
        total_marketing_spend: round2(total_spend),
        overall_roas: round2(ratio_or_zero(total_revenue, total_spend)),
    }
}
