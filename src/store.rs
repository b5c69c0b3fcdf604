use crate::error::StoreError;
use crate::flight::FlightRecord;
use crate::maintenance::workpackage::WorkPackage;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub trait FlightStore {
    fn load_flights(&self) -> Result<Vec<FlightRecord>, StoreError>;

    /// Replaces whatever was stored before.
    fn store_flights(&mut self, flights: &[FlightRecord]) -> Result<(), StoreError>;
}

pub trait WorkpackageStore {
    fn store_workpackages(&mut self, packages: &[WorkPackage]) -> Result<(), StoreError>;
}

/// Seed files under a root directory, pretty-printed JSON arrays.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonFileStore { root: root.into() }
    }

    pub fn flights_path(&self) -> PathBuf {
        self.root.join("flights").join("seed_flight.json")
    }

    pub fn workpackages_path(&self) -> PathBuf {
        self.root.join("workpackages").join("workpackages.json")
    }

    fn write<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let data = serde_json::to_string_pretty(items).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, data).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl FlightStore for JsonFileStore {
    fn load_flights(&self) -> Result<Vec<FlightRecord>, StoreError> {
        let path = self.flights_path();
        let data = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| StoreError::Json { path, source })
    }

    fn store_flights(&mut self, flights: &[FlightRecord]) -> Result<(), StoreError> {
        let path = self.flights_path();
        Self::write(&path, flights)?;
        tracing::info!(count = flights.len(), path = %path.display(), "wrote flights");
        Ok(())
    }
}

impl WorkpackageStore for JsonFileStore {
    fn store_workpackages(&mut self, packages: &[WorkPackage]) -> Result<(), StoreError> {
        let path = self.workpackages_path();
        Self::write(&path, packages)?;
        tracing::info!(count = packages.len(), path = %path.display(), "wrote work packages");
        Ok(())
    }
}
