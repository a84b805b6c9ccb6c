use std::collections::BTreeMap;
use std::time::Duration;

use super::ServerConfig;
use crate::error::{SessionError, SessionResult};
use crate::session::SessionRequest;
use crate::sorting::SortAlgorithm;

/// Immutable lookup tables for the three request selectors.
///
/// Built once at startup and shared read-only by every connection.
#[derive(Debug, Clone)]
pub struct Catalog {
    datasets: Vec<String>,
    speeds: BTreeMap<String, Duration>,
}

/// A request whose selectors all matched the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub algorithm: SortAlgorithm,
    pub dataset: String,
    pub delay: Duration,
}

impl Catalog {
    pub fn from_config(config: &ServerConfig) -> Self {
        Catalog {
            datasets: config.dataset.files.keys().cloned().collect(),
            speeds: config
                .speeds
                .iter()
                .map(|(id, millis)| (id.clone(), Duration::from_millis(*millis)))
                .collect(),
        }
    }

    pub fn algorithms(&self) -> &'static [SortAlgorithm] {
        &SortAlgorithm::ALL
    }

    pub fn datasets(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(String::as_str)
    }

    pub fn speed(&self, id: &str) -> Option<Duration> {
        self.speeds.get(id).copied()
    }

    /// Validate every selector of `request`. The algorithm is checked first,
    /// then the dataset, then the speed.
    pub fn resolve(&self, request: &SessionRequest) -> SessionResult<ResolvedRequest> {
        let algorithm: SortAlgorithm = request.algo.parse()?;
        if !self.datasets.iter().any(|id| *id == request.file) {
            return Err(SessionError::UnknownDataset(request.file.clone()));
        }
        let delay = self
            .speed(&request.speed)
            .ok_or_else(|| SessionError::UnknownSpeed(request.speed.clone()))?;

        Ok(ResolvedRequest {
            algorithm,
            dataset: request.file.clone(),
            delay,
        })
    }
}
