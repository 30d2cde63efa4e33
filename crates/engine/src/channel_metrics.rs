//! Channel efficiency metrics: conversion rate and cost per acquisition.
//!
//! Conversion rate compares a channel's touchpoints inside converting
//! journeys with the non-converting exposures the store reports. When the
//! store has no non-converting population every channel converts at 100%.

use std::collections::BTreeMap;

use attribution_core::types::Journey;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::numeric::{ratio, ratio_or_zero, round2};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChannelMetrics {
    pub channel: String,
    /// Percent of this channel's exposures that belong to a converting journey.
    pub conversion_rate: f64,
    /// Spend per influenced conversion; absent when no conversion was influenced.
    pub cpa: Option<f64>,
    /// Touchpoints inside converting journeys.
    pub total_interactions: u64,
    pub non_converting_exposures: u64,
    /// Distinct converting journeys that touched the channel.
    pub conversions: u64,
    /// Conversion value split evenly across each journey's distinct channels.
    pub revenue: f64,
    pub spend: f64,
}

#[derive(Default)]
struct MetricsAccumulator {
    interactions: u64,
    conversions: u64,
    revenue: f64,
    spend: f64,
    last_journey: Option<usize>,
}

pub fn channel_metrics(
    journeys: &[Journey],
    non_converting_exposures: &BTreeMap<String, u64>,
) -> Vec<ChannelMetrics> {
    let mut channels: BTreeMap<&str, MetricsAccumulator> = BTreeMap::new();

    for (journey_idx, journey) in journeys.iter().enumerate() {
        let distinct = journey.channels().len() as f64;
        for tp in &journey.touchpoints {
            let acc = channels.entry(tp.channel.as_str()).or_default();
            acc.interactions += 1;
            acc.spend += tp.cost;
            if acc.last_journey != Some(journey_idx) {
                acc.last_journey = Some(journey_idx);
                acc.conversions += 1;
                acc.revenue += journey.conversion_value / distinct;
            }
        }
    }

    for channel in non_converting_exposures.keys() {
        channels.entry(channel.as_str()).or_default();
    }

    let mut rows: Vec<ChannelMetrics> = channels
        .into_iter()
        .map(|(channel, acc)| {
            let exposures = non_converting_exposures.get(channel).copied().unwrap_or(0);
            let total_exposures = (acc.interactions + exposures) as f64;
            ChannelMetrics {
                channel: channel.to_string(),
                conversion_rate: round2(
                    ratio_or_zero(acc.interactions as f64, total_exposures) * 100.0,
                ),
                cpa: ratio(acc.spend, acc.conversions as f64).map(round2),
                total_interactions: acc.interactions,
                non_converting_exposures: exposures,
                conversions: acc.conversions,
                revenue: round2(acc.revenue),
                spend: round2(acc.spend),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.conversion_rate
            .total_cmp(&a.conversion_rate)
            .then_with(|| a.channel.cmp(&b.channel))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_dataset;

    fn find<'a>(rows: &'a [ChannelMetrics], channel: &str) -> &'a ChannelMetrics {
        rows.iter().find(|r| r.channel == channel).unwrap()
    }

    #[test]
    fn test_closed_world_converts_at_hundred_percent() {
        let rows = channel_metrics(&sample_dataset(), &BTreeMap::new());
        assert!(rows.iter().all(|r| r.conversion_rate == 100.0));

        let google = find(&rows, "Google Ads");
        assert_eq!(google.conversions, 2);
        assert_eq!(google.spend, 180.0);
        assert_eq!(google.cpa, Some(90.0));
        // 10,000 / 3 channels + 2,750.25 / 1 channel
        assert_eq!(google.revenue, 6083.58);
    }

    #[test]
    fn test_exposures_lower_conversion_rate() {
        let mut exposures = BTreeMap::new();
        exposures.insert("Email Campaign".to_string(), 9);
        let rows = channel_metrics(&sample_dataset(), &exposures);
        let email = find(&rows, "Email Campaign");
        assert_eq!(email.total_interactions, 3);
        assert_eq!(email.conversion_rate, 25.0);
        assert_eq!(rows.last().unwrap().channel, "Email Campaign");
    }

    #[test]
    fn test_cpa_undefined_without_conversions() {
        let mut exposures = BTreeMap::new();
        exposures.insert("Instagram".to_string(), 40);
        let rows = channel_metrics(&sample_dataset(), &exposures);
        let instagram = find(&rows, "Instagram");
        assert_eq!(instagram.conversions, 0);
        assert_eq!(instagram.cpa, None);
        assert_eq!(instagram.conversion_rate, 0.0);
    }

    #[test]
    fn test_zero_cost_channel_has_zero_cpa() {
        let rows = channel_metrics(&sample_dataset(), &BTreeMap::new());
        assert_eq!(find(&rows, "Referral").cpa, Some(0.0));
    }

    #[test]
    fn test_empty_dataset() {
        assert!(channel_metrics(&[], &BTreeMap::new()).is_empty());
    }
}
