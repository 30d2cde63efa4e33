//! Attribution model catalog: the closed set of rule-based weighting models
//! and the explanatory copy shown alongside each one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AttributionError;

/// One of the seven deterministic attribution models.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum AttributionModel {
    /// 100% credit to the first touchpoint.
    #[serde(alias = "first_touch")]
    FirstTouch,
    /// 100% credit to the last touchpoint.
    #[serde(alias = "last_touch")]
    LastTouch,
    /// 100% credit to the last touchpoint that is not direct traffic.
    #[serde(alias = "last_non_direct")]
    LastNonDirect,
    /// Equal credit to every touchpoint.
    Linear,
    /// Exponential decay with a 7-day half-life.
    #[serde(alias = "time_decay")]
    TimeDecay,
    /// 40/20/40 position-based split.
    #[serde(alias = "u_shaped", alias = "position-based", alias = "position_based")]
    UShaped,
    /// 30/30/30 split with a key middle milestone, 10% to the rest.
    #[serde(alias = "w_shaped")]
    WShaped,
}

impl AttributionModel {
    /// Catalog order. Comparison output follows this order.
    pub const ALL: [AttributionModel; 7] = [
        AttributionModel::FirstTouch,
        AttributionModel::LastTouch,
        AttributionModel::LastNonDirect,
        AttributionModel::Linear,
        AttributionModel::TimeDecay,
        AttributionModel::UShaped,
        AttributionModel::WShaped,
    ];

    /// Stable identifier used on the wire and in configuration.
    pub fn id(&self) -> &'static str {
        match self {
            AttributionModel::FirstTouch => "first-touch",
            AttributionModel::LastTouch => "last-touch",
            AttributionModel::LastNonDirect => "last-non-direct",
            AttributionModel::Linear => "linear",
            AttributionModel::TimeDecay => "time-decay",
            AttributionModel::UShaped => "u-shaped",
            AttributionModel::WShaped => "w-shaped",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AttributionModel::FirstTouch => "First-Touch",
            AttributionModel::LastTouch => "Last-Touch",
            AttributionModel::LastNonDirect => "Last Non-Direct",
            AttributionModel::Linear => "Linear",
            AttributionModel::TimeDecay => "Time Decay",
            AttributionModel::UShaped => "U-Shaped",
            AttributionModel::WShaped => "W-Shaped",
        }
    }

    /// Explanatory copy for the model catalog.
    pub fn info(&self) -> ModelInfo {
        let (description, use_case, pros, cons) = match self {
            AttributionModel::FirstTouch => (
                "Gives 100% credit to the first touchpoint in the customer journey.",
                "Evaluating awareness campaigns and top-of-funnel channels.",
                "Clear view of customer acquisition sources.",
                "Ignores all nurturing touchpoints that helped close the sale.",
            ),
            AttributionModel::LastTouch => (
                "Gives 100% credit to the last touchpoint before conversion.",
                "Evaluating closing channels and direct conversion drivers.",
                "Shows which channels directly drive conversions.",
                "Ignores the customer journey and awareness channels.",
            ),
            AttributionModel::LastNonDirect => (
                "Gives 100% credit to the last non-direct touchpoint.",
                "Understanding which marketing channels drive conversions, excluding direct traffic.",
                "Removes bias toward direct traffic.",
                "Still ignores the full customer journey.",
            ),
            AttributionModel::Linear => (
                "Distributes credit equally across all touchpoints.",
                "Understanding overall channel contribution throughout the journey.",
                "Fair distribution that acknowledges all touchpoints.",
                "Does not account for the varying importance of touchpoints.",
            ),
            AttributionModel::TimeDecay => (
                "Gives exponentially more credit to recent touchpoints (7-day half-life).",
                "Short sales cycles where recent interactions matter most.",
                "Prioritizes touchpoints closer to conversion.",
                "May undervalue early awareness touchpoints.",
            ),
            AttributionModel::UShaped => (
                "40% to first touch, 40% to last touch, 20% split among the middle.",
                "High-consideration purchases where awareness and closing matter most.",
                "Balances first and last touch importance.",
                "Middle touchpoints get minimal credit.",
            ),
            AttributionModel::WShaped => (
                "30% first, 30% key middle touchpoint, 30% last, 10% to the others.",
                "Complex sales with a clear milestone such as a demo or trial signup.",
                "Recognizes the key middle milestone in the journey.",
                "Relies on the median touchpoint standing in for the milestone.",
            ),
        };

        ModelInfo {
            model: *self,
            name: self.display_name().to_string(),
            description: description.to_string(),
            use_case: use_case.to_string(),
            pros: pros.to_string(),
            cons: cons.to_string(),
        }
    }
}

impl fmt::Display for AttributionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AttributionModel {
    type Err = AttributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "first-touch" => Ok(AttributionModel::FirstTouch),
            "last-touch" => Ok(AttributionModel::LastTouch),
            "last-non-direct" => Ok(AttributionModel::LastNonDirect),
            "linear" => Ok(AttributionModel::Linear),
            "time-decay" => Ok(AttributionModel::TimeDecay),
            "u-shaped" | "position-based" => Ok(AttributionModel::UShaped),
            "w-shaped" => Ok(AttributionModel::WShaped),
            _ => Err(AttributionError::UnknownModel(s.to_string())),
        }
    }
}

/// Catalog entry describing a model to API consumers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelInfo {
    pub model: AttributionModel,
    pub name: String,
    pub description: String,
    pub use_case: String,
    pub pros: String,
    pub cons: String,
}
