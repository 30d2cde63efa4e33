pub mod config;
pub mod error;
pub mod model;
pub mod types;

pub use config::AppConfig;
pub use error::{AttributionError, EngineResult};
pub use model::AttributionModel;
pub use types::{Journey, JourneyRecord, Touchpoint};
