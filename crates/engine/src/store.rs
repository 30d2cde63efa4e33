//! Journey store boundary: the immutable snapshot every computation reads.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use attribution_core::types::{Journey, JourneyRecord};
use attribution_core::{AttributionError, EngineResult};
use serde::Deserialize;
use tracing::{info, warn};

/// Source of canonical journeys.
pub trait JourneyStore: Send + Sync {
    /// Every converting journey currently held by the store.
    fn list_journeys(&self) -> Vec<Journey>;

    /// Exposures per channel that did not end in a conversion. Empty when the
    /// store only knows about converting journeys.
    fn non_converting_exposures(&self) -> BTreeMap<String, u64> {
        BTreeMap::new()
    }
}

/// Validated, read-only view over a store's journeys.
#[derive(Debug, Clone, Default)]
pub struct JourneySnapshot {
    journeys: Vec<Journey>,
    index: HashMap<String, usize>,
    exposures: BTreeMap<String, u64>,
}

impl JourneySnapshot {
    /// Validate every journey and reject duplicate identifiers.
    pub fn new(journeys: Vec<Journey>) -> EngineResult<Self> {
        let mut index = HashMap::with_capacity(journeys.len());
        for (idx, journey) in journeys.iter().enumerate() {
            journey.validate()?;
            if index.insert(journey.journey_id.clone(), idx).is_some() {
                return Err(AttributionError::invalid_journey(
                    &journey.journey_id,
                    "duplicate journey_id",
                ));
            }
        }
        Ok(Self {
            journeys,
            index,
            exposures: BTreeMap::new(),
        })
    }

    pub fn with_exposures(mut self, exposures: BTreeMap<String, u64>) -> Self {
        self.exposures = exposures;
        self
    }

    pub fn from_store(store: &dyn JourneyStore) -> EngineResult<Self> {
        Ok(Self::new(store.list_journeys())?.with_exposures(store.non_converting_exposures()))
    }

    pub fn journeys(&self) -> &[Journey] {
        &self.journeys
    }

    pub fn get(&self, journey_id: &str) -> Option<&Journey> {
        self.index.get(journey_id).map(|&idx| &self.journeys[idx])
    }

    pub fn non_converting_exposures(&self) -> &BTreeMap<String, u64> {
        &self.exposures
    }

    pub fn len(&self) -> usize {
        self.journeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.journeys.is_empty()
    }
}

/// Store backed by journeys held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJourneyStore {
    journeys: Vec<Journey>,
    exposures: BTreeMap<String, u64>,
}

impl InMemoryJourneyStore {
    pub fn new(journeys: Vec<Journey>) -> Self {
        Self {
            journeys,
            exposures: BTreeMap::new(),
        }
    }

    pub fn with_exposures(mut self, exposures: BTreeMap<String, u64>) -> Self {
        self.exposures = exposures;
        self
    }
}

impl JourneyStore for InMemoryJourneyStore {
    fn list_journeys(&self) -> Vec<Journey> {
        self.journeys.clone()
    }

    fn non_converting_exposures(&self) -> BTreeMap<String, u64> {
        self.exposures.clone()
    }
}

/// On-disk layout: a bare array of journeys, or an object that also carries
/// non-converting exposures.
#[derive(Deserialize)]
#[serde(untagged)]
enum JourneyFile {
    Records(Vec<JourneyRecord>),
    Dataset {
        journeys: Vec<JourneyRecord>,
        #[serde(default)]
        non_converting_exposures: BTreeMap<String, u64>,
    },
}

/// Store loaded once from a JSON file.
#[derive(Debug, Clone)]
pub struct FileJourneyStore {
    path: PathBuf,
    inner: InMemoryJourneyStore,
}

impl FileJourneyStore {
    /// Read and validate the journey file at `path`.
    pub fn open(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref().to_path_buf();
        let raw = std::fs::read_to_string(&path)?;
        let (records, exposures) = match serde_json::from_str::<JourneyFile>(&raw)? {
            JourneyFile::Records(records) => (records, BTreeMap::new()),
            JourneyFile::Dataset {
                journeys,
                non_converting_exposures,
            } => (journeys, non_converting_exposures),
        };

        let journeys = records
            .into_iter()
            .map(Journey::try_from)
            .collect::<EngineResult<Vec<_>>>()?;

        if journeys.is_empty() {
            warn!(path = %path.display(), "Journey file contains no journeys");
        }
        info!(
            path = %path.display(),
            journeys = journeys.len(),
            exposure_channels = exposures.len(),
            "Journey file loaded"
        );

        Ok(Self {
            path,
            inner: InMemoryJourneyStore::new(journeys).with_exposures(exposures),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JourneyStore for FileJourneyStore {
    fn list_journeys(&self) -> Vec<Journey> {
        self.inner.list_journeys()
    }

    fn non_converting_exposures(&self) -> BTreeMap<String, u64> {
        self.inner.non_converting_exposures()
    }
}
