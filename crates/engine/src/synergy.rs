//! Channel synergy: which channel pairs appear together in converting
//! journeys, and how much value those journeys carried.

use std::collections::BTreeMap;

use attribution_core::types::Journey;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::numeric::round2;

/// An unordered channel pair; `channel_a` sorts before `channel_b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChannelSynergy {
    pub channel_a: String,
    pub channel_b: String,
    pub co_occurring_journeys: u64,
    pub combined_value: f64,
}

/// Pairs ranked by combined value, then co-occurrence count, then names.
pub fn channel_synergy(journeys: &[Journey]) -> Vec<ChannelSynergy> {
    let mut pairs: BTreeMap<(&str, &str), (u64, f64)> = BTreeMap::new();

    for journey in journeys {
        let channels: Vec<&str> = journey.channels().into_iter().collect();
        for (i, a) in channels.iter().enumerate() {
            for b in &channels[i + 1..] {
                let pair = pairs.entry((*a, *b)).or_default();
                pair.0 += 1;
                pair.1 += journey.conversion_value;
            }
        }
    }

    let mut rows: Vec<ChannelSynergy> = pairs
        .into_iter()
        .map(|((a, b), (count, value))| ChannelSynergy {
            channel_a: a.to_string(),
            channel_b: b.to_string(),
            co_occurring_journeys: count,
            combined_value: round2(value),
        })
        .collect();

    rows.sort_by(|x, y| {
        y.combined_value
            .total_cmp(&x.combined_value)
            .then_with(|| y.co_occurring_journeys.cmp(&x.co_occurring_journeys))
            .then_with(|| x.channel_a.cmp(&y.channel_a))
            .then_with(|| x.channel_b.cmp(&y.channel_b))
    });
    rows
}
