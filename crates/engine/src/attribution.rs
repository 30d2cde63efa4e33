//! Attribution aggregator: applies one model across every journey and rolls
//! credited revenue up to channels.

use std::collections::BTreeMap;

use attribution_core::types::Journey;
use attribution_core::AttributionModel;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::models;
use crate::numeric::{ratio_or_zero, round2, round_to};

/// Decimal places kept on channel percentages.
const PERCENTAGE_DECIMALS: u32 = 4;

/// Per-channel attribution outcome under one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttributionResult {
    pub channel: String,
    pub attributed_revenue: f64,
    /// Share of the total attributed revenue, in percent.
    pub attribution_percentage: f64,
    pub touchpoint_count: u64,
    pub cost: f64,
    /// Attributed revenue over cost; 0 for zero-cost channels.
    pub roas: f64,
    /// Distinct journeys with at least one touchpoint on this channel.
    pub conversions_influenced: u64,
    /// Mean 1-based sequence position of this channel's touchpoints.
    pub avg_position: f64,
}

/// Aggregator output for one model.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Aggregation {
    pub model: AttributionModel,
    /// Ordered by attributed revenue descending, then channel name.
    pub channels: Vec<AttributionResult>,
    pub total_attributed_revenue: f64,
    /// 100 minus the sum of the rounded percentages. Reported, never topped up.
    pub percentage_residual: f64,
}

impl Aggregation {
    pub fn revenue_by_channel(&self) -> BTreeMap<String, f64> {
        self.channels
            .iter()
            .map(|r| (r.channel.clone(), r.attributed_revenue))
            .collect()
    }

    pub fn channel(&self, name: &str) -> Option<&AttributionResult> {
        self.channels.iter().find(|r| r.channel == name)
    }
}

#[derive(Default)]
struct ChannelAccumulator {
    revenue: f64,
    cost: f64,
    touchpoints: u64,
    position_sum: u64,
    journeys: u64,
    last_journey: Option<usize>,
}

/// Attribute every journey under `model` and roll the credit up per channel.
/// Single pass over all touchpoints.
pub fn aggregate(journeys: &[Journey], model: AttributionModel) -> Aggregation {
    let mut channels: BTreeMap<&str, ChannelAccumulator> = BTreeMap::new();

    for (journey_idx, journey) in journeys.iter().enumerate() {
        let weights = models::weights(model, journey);
        for (tp, weight) in journey.touchpoints.iter().zip(weights) {
            let acc = channels.entry(tp.channel.as_str()).or_default();
            acc.revenue += weight * journey.conversion_value;
            acc.cost += tp.cost;
            acc.touchpoints += 1;
            acc.position_sum += u64::from(tp.sequence);
            if acc.last_journey != Some(journey_idx) {
                acc.last_journey = Some(journey_idx);
                acc.journeys += 1;
            }
        }
    }

    let total: f64 = channels.values().map(|a| a.revenue).sum();

    let mut rows: Vec<AttributionResult> = channels
        .into_iter()
        .map(|(channel, acc)| AttributionResult {
            channel: channel.to_string(),
            attributed_revenue: round2(acc.revenue),
            attribution_percentage: round_to(
                ratio_or_zero(acc.revenue, total) * 100.0,
                PERCENTAGE_DECIMALS,
            ),
            touchpoint_count: acc.touchpoints,
            cost: round2(acc.cost),
            roas: round2(ratio_or_zero(acc.revenue, acc.cost)),
            conversions_influenced: acc.journeys,
            avg_position: round2(ratio_or_zero(
                acc.position_sum as f64,
                acc.touchpoints as f64,
            )),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.attributed_revenue
            .total_cmp(&a.attributed_revenue)
            .then_with(|| a.channel.cmp(&b.channel))
    });

    let percentage_residual = if rows.is_empty() || total <= 0.0 {
        0.0
    } else {
        round_to(
            100.0 - rows.iter().map(|r| r.attribution_percentage).sum::<f64>(),
            PERCENTAGE_DECIMALS + 2,
        )
    };

    debug!(
        model = %model,
        journeys = journeys.len(),
        channels = rows.len(),
        residual = percentage_residual,
        "Attribution aggregated"
    );

    Aggregation {
        model,
        channels: rows,
        total_attributed_revenue: round2(total),
        percentage_residual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{j1, sample_dataset};
    use attribution_core::types::{Touchpoint, DIRECT_TRAFFIC};

    fn revenue(agg: &Aggregation, channel: &str) -> f64 {
        agg.channel(channel).map(|r| r.attributed_revenue).unwrap_or(-1.0)
    }

    #[test]
    fn test_j1_first_touch() {
        let agg = aggregate(&[j1()], AttributionModel::FirstTouch);
        assert_eq!(revenue(&agg, "Google Ads"), 10_000.0);
        assert_eq!(revenue(&agg, "Email Campaign"), 0.0);
        assert_eq!(revenue(&agg, DIRECT_TRAFFIC), 0.0);

        let google = agg.channel("Google Ads").unwrap();
        assert_eq!(google.roas, 100.0);
        assert_eq!(google.attribution_percentage, 100.0);
        assert_eq!(google.avg_position, 1.0);
        assert_eq!(google.conversions_influenced, 1);
    }

    #[test]
    fn test_j1_last_touch_and_linear() {
        let last = aggregate(&[j1()], AttributionModel::LastTouch);
        assert_eq!(revenue(&last, DIRECT_TRAFFIC), 10_000.0);
        assert_eq!(last.channel(DIRECT_TRAFFIC).unwrap().roas, 0.0);

        let linear = aggregate(&[j1()], AttributionModel::Linear);
        for channel in ["Google Ads", "Email Campaign", DIRECT_TRAFFIC] {
            assert_eq!(revenue(&linear, channel), 3333.33);
        }
    }

    #[test]
    fn test_j1_u_shaped() {
        let agg = aggregate(&[j1()], AttributionModel::UShaped);
        assert_eq!(revenue(&agg, "Google Ads"), 4000.0);
        assert_eq!(revenue(&agg, DIRECT_TRAFFIC), 4000.0);
        assert_eq!(revenue(&agg, "Email Campaign"), 2000.0);
    }

    #[test]
    fn test_ordering_breaks_ties_by_channel_name() {
        let agg = aggregate(&[j1()], AttributionModel::FirstTouch);
        let names: Vec<_> = agg.channels.iter().map(|r| r.channel.as_str()).collect();
        assert_eq!(names, vec!["Google Ads", DIRECT_TRAFFIC, "Email Campaign"]);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let journeys = sample_dataset();
        for model in AttributionModel::ALL {
            let agg = aggregate(&journeys, model);
            let sum: f64 = agg.channels.iter().map(|r| r.attribution_percentage).sum();
            assert!((99.9..=100.1).contains(&sum), "{model}: {sum}");
            assert!((agg.percentage_residual - (100.0 - sum)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_percentages_stay_in_band_with_many_channels() {
        for channel_count in [31u32, 97, 250] {
            let journeys: Vec<Journey> = (0..channel_count)
                .map(|i| {
                    Journey::new(
                        format!("J{i}"),
                        "Customer",
                        100.0,
                        vec![Touchpoint::new(1, format!("Channel {i:03}"), "Click", 0, 1.0)],
                    )
                    .unwrap()
                })
                .collect();
            let agg = aggregate(&journeys, AttributionModel::Linear);
            assert_eq!(agg.channels.len(), channel_count as usize);
            let sum: f64 = agg.channels.iter().map(|r| r.attribution_percentage).sum();
            assert!((99.9..=100.1).contains(&sum), "{channel_count} channels: {sum}");
            assert!((agg.percentage_residual - (100.0 - sum)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_revenue_is_fully_distributed() {
        let journeys = sample_dataset();
        let expected: f64 = journeys.iter().map(|j| j.conversion_value).sum();
        for model in AttributionModel::ALL {
            let agg = aggregate(&journeys, model);
            assert!((agg.total_attributed_revenue - expected).abs() < 0.01);
        }
    }

    #[test]
    fn test_channel_counts_and_positions() {
        let journeys = sample_dataset();
        let agg = aggregate(&journeys, AttributionModel::Linear);
        let email = agg.channel("Email Campaign").unwrap();
        // Email appears at position 2 in J1 and positions 1 and 3 in J3.
        assert_eq!(email.touchpoint_count, 3);
        assert_eq!(email.conversions_influenced, 2);
        assert_eq!(email.avg_position, 2.0);
        assert_eq!(email.cost, 45.0);
    }

    #[test]
    fn test_channels_without_touchpoints_are_omitted() {
        let journey = Journey::new(
            "J9",
            "Kabir",
            500.0,
            vec![Touchpoint::new(1, "Webinar", "Engagement", 0, 0.0)],
        )
        .unwrap();
        let agg = aggregate(&[journey], AttributionModel::WShaped);
        assert_eq!(agg.channels.len(), 1);
        assert_eq!(agg.channels[0].attributed_revenue, 500.0);
    }

    #[test]
    fn test_empty_dataset() {
        let agg = aggregate(&[], AttributionModel::TimeDecay);
        assert!(agg.channels.is_empty());
        assert_eq!(agg.total_attributed_revenue, 0.0);
        assert_eq!(agg.percentage_residual, 0.0);
    }
}
