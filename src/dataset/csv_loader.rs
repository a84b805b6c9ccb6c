//! Delimited-file dataset loader.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::geo::ReferencePoint;
use super::DatasetSource;
use crate::config::DatasetConfig;
use crate::error::{DatasetError, DatasetResult};

/// Resolves dataset ids to files of coordinates and turns each row into its
/// distance from the reference point.
///
/// Files are re-read on every request. Rows whose coordinates are missing,
/// unparsable or non-finite are skipped.
#[derive(Debug, Clone)]
pub struct CsvDatasetLoader {
    files: BTreeMap<String, PathBuf>,
    delimiter: u8,
    latitude_column: String,
    longitude_column: String,
    reference: ReferencePoint,
}

impl CsvDatasetLoader {
    pub fn from_config(config: &DatasetConfig) -> Self {
        CsvDatasetLoader {
            files: config.files.clone(),
            // Validated as ASCII when the config is loaded.
            delimiter: config.delimiter as u8,
            latitude_column: config.latitude_column.clone(),
            longitude_column: config.longitude_column.clone(),
            reference: config.reference.clone(),
        }
    }

    pub fn path_of(&self, dataset: &str) -> Option<&Path> {
        self.files.get(dataset).map(PathBuf::as_path)
    }

    /// Parse file contents into distances, in row order.
    pub fn parse_distances(&self, path: &Path, content: &[u8]) -> DatasetResult<Vec<f64>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content);

        let headers = reader.headers().map_err(|e| DatasetError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DatasetError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };
        let lat_idx = column(&self.latitude_column)?;
        let lon_idx = column(&self.longitude_column)?;

        let mut distances = Vec::new();
        let mut skipped = 0usize;
        for record in reader.records() {
            let Ok(record) = record else {
                skipped += 1;
                continue;
            };
            let coord = |idx: usize| {
                record
                    .get(idx)
                    .and_then(|raw| raw.parse::<f64>().ok())
                    .filter(|v| v.is_finite())
            };
            match (coord(lat_idx), coord(lon_idx)) {
                (Some(lat), Some(lon)) => distances.push(self.reference.distance_km(lat, lon)),
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(
                path = %path.display(),
                skipped,
                kept = distances.len(),
                "skipped malformed rows"
            );
        }
        Ok(distances)
    }
}

#[async_trait]
impl DatasetSource for CsvDatasetLoader {
    async fn load(&self, dataset: &str) -> DatasetResult<Vec<f64>> {
        let path = self
            .path_of(dataset)
            .ok_or_else(|| DatasetError::UnknownDataset(dataset.to_string()))?;
        let content = tokio::fs::read(path)
            .await
            .map_err(|source| DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        self.parse_distances(path, &content)
    }
}
