//! Revenue trends: daily revenue, spend and ROAS by conversion date.

use std::collections::BTreeMap;

use attribution_core::types::Journey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::numeric::{ratio_or_zero, round2};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RevenueTrendPoint {
    pub date: NaiveDate,
    pub revenue: f64,
    pub conversions: u64,
    pub spend: f64,
    /// Daily revenue over daily spend; 0 on days without spend.
    pub roas: f64,
    pub cumulative_revenue: f64,
}

#[derive(Default)]
struct DayBucket {
    revenue: f64,
    conversions: u64,
    spend: f64,
}

/// Daily series in ascending date order. Journeys without a conversion date
/// are left out.
pub fn revenue_trends(journeys: &[Journey]) -> Vec<RevenueTrendPoint> {
    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    let mut undated = 0usize;

    for journey in journeys {
        let Some(day) = journey.conversion_day() else {
            undated += 1;
            continue;
        };
        let bucket = days.entry(day).or_default();
        bucket.revenue += journey.conversion_value;
        bucket.conversions += 1;
        bucket.spend += journey.total_cost();
    }

    if undated > 0 {
        debug!(undated, "Journeys without conversion date skipped from trends");
    }

    let mut cumulative = 0.0;
    days.into_iter()
        .map(|(date, bucket)| {
            cumulative += bucket.revenue;
            RevenueTrendPoint {
                date,
                revenue: round2(bucket.revenue),
                conversions: bucket.conversions,
                spend: round2(bucket.spend),
                roas: round2(ratio_or_zero(bucket.revenue, bucket.spend)),
                cumulative_revenue: round2(cumulative),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{j1, sample_dataset};

    #[test]
    fn test_daily_buckets() {
        let points = revenue_trends(&sample_dataset());
        assert_eq!(points.len(), 3);

        let first = &points[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(first.conversions, 2);
        assert_eq!(first.revenue, 14_200.0);
        assert_eq!(first.spend, 670.0);
        assert_eq!(first.roas, 21.19);

        assert_eq!(points[1].cumulative_revenue, 22_000.5);
        assert_eq!(points[1].roas, 312.02);
    }

    #[test]
    fn test_zero_spend_day_and_running_total() {
        let points = revenue_trends(&sample_dataset());
        let last = points.last().unwrap();
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(last.spend, 0.0);
        assert_eq!(last.roas, 0.0);
        // The undated J5 never enters the series.
        assert_eq!(last.cumulative_revenue, 23_500.5);
    }

    #[test]
    fn test_undated_journeys_only() {
        assert!(revenue_trends(&[j1()]).is_empty());
        assert!(revenue_trends(&[]).is_empty());
    }
}
