//! Dataset resolution: turning a dataset id into the distances to sort.

mod csv_loader;
mod geo;

pub use csv_loader::CsvDatasetLoader;
pub use geo::{haversine_km, ReferencePoint, EARTH_RADIUS_KM};

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::{DatasetError, DatasetResult};

/// Source of datasets for playback sessions.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Resolve `dataset` into an ordered list of distances.
    ///
    /// An empty list is a valid dataset; only an unknown id or an unreadable
    /// source is an error.
    async fn load(&self, dataset: &str) -> DatasetResult<Vec<f64>>;
}

/// Fixed in-memory datasets.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatasets {
    datasets: HashMap<String, Vec<f64>>,
}

impl InMemoryDatasets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, values: Vec<f64>) -> Self {
        self.datasets.insert(id.into(), values);
        self
    }
}

#[async_trait]
impl DatasetSource for InMemoryDatasets {
    async fn load(&self, dataset: &str) -> DatasetResult<Vec<f64>> {
        self.datasets
            .get(dataset)
            .cloned()
            .ok_or_else(|| DatasetError::UnknownDataset(dataset.to_string()))
    }
}
