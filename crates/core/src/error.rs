use thiserror::Error;

pub type EngineResult<T> = Result<T, AttributionError>;

#[derive(Error, Debug)]
pub enum AttributionError {
    #[error("Unknown attribution model: {0}")]
    UnknownModel(String),

    #[error("Journey not found: {0}")]
    NotFound(String),

    #[error("No journeys available")]
    EmptyDataset,

    #[error("Invalid journey {journey_id}: {reason}")]
    InvalidJourney { journey_id: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AttributionError {
    pub fn invalid_journey(journey_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidJourney {
            journey_id: journey_id.into(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for AttributionError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
