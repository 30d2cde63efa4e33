//! Journey and touchpoint domain types.
//!
//! Journeys are immutable inputs to every computation. They are validated once
//! at the ingestion boundary (deserialization or [`Journey::new`]) so the
//! engine can rely on the ordering invariants without re-checking them.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AttributionError, EngineResult};

/// Channel key that last-non-direct attribution skips over.
pub const DIRECT_TRAFFIC: &str = "Direct Traffic";

/// One marketing interaction within a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Touchpoint {
    /// 1-based position within the journey.
    pub sequence: u32,
    pub channel: String,
    #[serde(default)]
    pub interaction_type: String,
    /// 0 on the converting touchpoint.
    pub days_before_conversion: u32,
    #[serde(default)]
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Touchpoint {
    pub fn new(
        sequence: u32,
        channel: impl Into<String>,
        interaction_type: impl Into<String>,
        days_before_conversion: u32,
        cost: f64,
    ) -> Self {
        Self {
            sequence,
            channel: channel.into(),
            interaction_type: interaction_type.into(),
            days_before_conversion,
            cost,
            timestamp: None,
        }
    }

    pub fn is_direct(&self) -> bool {
        self.channel == DIRECT_TRAFFIC
    }
}

/// One converting customer's ordered path of touchpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "JourneyRecord")]
pub struct Journey {
    pub journey_id: String,
    pub customer_name: String,
    pub conversion_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_date: Option<DateTime<Utc>>,
    pub touchpoint_count: usize,
    /// Days from the first touchpoint to conversion.
    pub time_to_conversion: u32,
    pub touchpoints: Vec<Touchpoint>,
}

impl Journey {
    /// Build a journey, deriving `touchpoint_count` and `time_to_conversion`.
    /// Touchpoints must already be in sequence order 1..N.
    pub fn new(
        journey_id: impl Into<String>,
        customer_name: impl Into<String>,
        conversion_value: f64,
        touchpoints: Vec<Touchpoint>,
    ) -> EngineResult<Self> {
        let journey = Self {
            journey_id: journey_id.into(),
            customer_name: customer_name.into(),
            conversion_value,
            conversion_date: None,
            touchpoint_count: touchpoints.len(),
            time_to_conversion: touchpoints
                .first()
                .map(|t| t.days_before_conversion)
                .unwrap_or(0),
            touchpoints,
        };
        journey.validate()?;
        Ok(journey)
    }

    pub fn with_conversion_date(mut self, date: DateTime<Utc>) -> Self {
        self.conversion_date = Some(date);
        self
    }

    /// Check every structural invariant of a journey.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |reason: String| AttributionError::invalid_journey(&self.journey_id, reason);

        if self.journey_id.trim().is_empty() {
            return Err(invalid("journey_id must not be empty".to_string()));
        }
        if self.touchpoints.is_empty() {
            return Err(invalid("journey has no touchpoints".to_string()));
        }
        if !self.conversion_value.is_finite() || self.conversion_value <= 0.0 {
            return Err(invalid(format!(
                "conversion_value must be positive, got {}",
                self.conversion_value
            )));
        }

        let mut previous_days: Option<u32> = None;
        for (idx, tp) in self.touchpoints.iter().enumerate() {
            let expected = idx as u32 + 1;
            if tp.sequence != expected {
                return Err(invalid(format!(
                    "touchpoint sequence {} found where {} was expected",
                    tp.sequence, expected
                )));
            }
            if tp.channel.trim().is_empty() {
                return Err(invalid(format!("touchpoint {} has an empty channel", tp.sequence)));
            }
            if !tp.cost.is_finite() || tp.cost < 0.0 {
                return Err(invalid(format!(
                    "touchpoint {} has invalid cost {}",
                    tp.sequence, tp.cost
                )));
            }
            if let Some(prev) = previous_days {
                if tp.days_before_conversion > prev {
                    return Err(invalid(format!(
                        "touchpoint {} is {} days before conversion, later than its predecessor at {}",
                        tp.sequence, tp.days_before_conversion, prev
                    )));
                }
            }
            previous_days = Some(tp.days_before_conversion);
        }

        if previous_days != Some(0) {
            return Err(invalid(
                "final touchpoint must have days_before_conversion == 0".to_string(),
            ));
        }
        if self.touchpoint_count != self.touchpoints.len() {
            return Err(invalid(format!(
                "touchpoint_count {} does not match {} touchpoints",
                self.touchpoint_count,
                self.touchpoints.len()
            )));
        }
        let max_days = self.touchpoints[0].days_before_conversion;
        if self.time_to_conversion != max_days {
            return Err(invalid(format!(
                "time_to_conversion {} does not match first touchpoint at {} days",
                self.time_to_conversion, max_days
            )));
        }
        Ok(())
    }

    /// Sum of touchpoint costs.
    pub fn total_cost(&self) -> f64 {
        self.touchpoints.iter().map(|t| t.cost).sum()
    }

    /// Distinct channels touched by this journey, in name order.
    pub fn channels(&self) -> BTreeSet<&str> {
        self.touchpoints.iter().map(|t| t.channel.as_str()).collect()
    }

    /// UTC calendar day of conversion, when the store supplied one.
    pub fn conversion_day(&self) -> Option<NaiveDate> {
        self.conversion_date.map(|d| d.date_naive())
    }
}

/// Wire form of a journey. Derived fields are optional and, when present,
/// must agree with the touchpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct JourneyRecord {
    pub journey_id: String,
    #[serde(default)]
    pub customer_name: String,
    pub conversion_value: f64,
    #[serde(default)]
    pub conversion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub touchpoint_count: Option<usize>,
    #[serde(default)]
    pub time_to_conversion: Option<u32>,
    pub touchpoints: Vec<Touchpoint>,
}

impl TryFrom<JourneyRecord> for Journey {
    type Error = AttributionError;

    fn try_from(record: JourneyRecord) -> Result<Self, Self::Error> {
        let mut journey = Journey::new(
            record.journey_id,
            record.customer_name,
            record.conversion_value,
            record.touchpoints,
        )?;
        journey.conversion_date = record.conversion_date;

        if let Some(count) = record.touchpoint_count {
            if count != journey.touchpoint_count {
                return Err(AttributionError::invalid_journey(
                    &journey.journey_id,
                    format!(
                        "touchpoint_count {} does not match {} touchpoints",
                        count, journey.touchpoint_count
                    ),
                ));
            }
        }
        if let Some(days) = record.time_to_conversion {
            if days != journey.time_to_conversion {
                return Err(AttributionError::invalid_journey(
                    &journey.journey_id,
                    format!(
                        "time_to_conversion {} does not match derived {}",
                        days, journey.time_to_conversion
                    ),
                ));
            }
        }
        Ok(journey)
    }
}
