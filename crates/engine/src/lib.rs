//! Attribution engine: multi-touch revenue attribution across seven
//! rule-based models, plus the cross-model and cross-channel analytics built
//! on top of it.

pub mod attribution;
pub mod channel_metrics;
pub mod comparison;
pub mod funnel;
pub mod models;
pub mod numeric;
pub mod performers;
pub mod service;
pub mod store;
pub mod summary;
pub mod synergy;
pub mod trends;
pub mod variance;

#[cfg(test)]
mod testing;

pub use attribution::{aggregate, Aggregation, AttributionResult};
pub use comparison::{compare_all, ModelComparison};
pub use service::AttributionService;
pub use store::{FileJourneyStore, InMemoryJourneyStore, JourneySnapshot, JourneyStore};
pub use summary::{summarize, SummaryStats};
