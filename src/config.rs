use crate::error::{ConfigError, GenerateError};
use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const FLIGHT_CONFIG_FILE: &str = "flight_config.json";
pub const WORKPACKAGE_CONFIG_FILE: &str = "workpackage_config.json";
pub const SUBTYPE_MAPPINGS_FILE: &str = "aircraft_subtype_mappings.json";

pub const DEFAULT_ENVIRONMENT: &str = "test";
pub const OVERNIGHT_POOL: &str = "overnight";

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Uniform draw from a configured pool.
pub fn pick<'a, R: Rng>(
    rng: &mut R,
    pool: &'a [String],
    name: &'static str,
) -> Result<&'a str, GenerateError> {
    pool.choose(rng)
        .map(|s| s.as_str())
        .ok_or(GenerateError::EmptyPool(name))
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightConfig {
    #[serde(default)]
    pub airlines: Vec<String>,
    #[serde(default, rename = "aircraft_Types")]
    pub aircraft_types: Vec<String>,
    #[serde(default)]
    pub stations: Vec<String>,
    #[serde(default)]
    pub stands: Vec<String>,
    #[serde(default)]
    pub registrations_by_day: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSummary {
    pub airlines: usize,
    pub aircraft_types: usize,
    pub stands: usize,
    pub registrations: usize,
    pub stations: usize,
}

impl FlightConfig {
    pub fn load(dir: &Path, environment: &str) -> Result<FlightConfig, ConfigError> {
        let path = dir.join(FLIGHT_CONFIG_FILE);
        let mut envs: HashMap<String, FlightConfig> = match read_document(&path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound {
                    environment: environment.to_string(),
                    path,
                });
            }
            other => other?,
        };
        envs.remove(environment).ok_or(ConfigError::NotFound {
            environment: environment.to_string(),
            path,
        })
    }

    pub fn registrations(&self, pool: &str) -> &[String] {
        self.registrations_by_day
            .get(&pool.to_lowercase())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn all_registrations(&self) -> Vec<&str> {
        self.registrations_by_day
            .values()
            .flatten()
            .map(|s| s.as_str())
            .collect()
    }

    pub fn overnight_registrations(&self) -> &[String] {
        self.registrations(OVERNIGHT_POOL)
    }

    /// Monday is 0.
    pub fn registrations_for_weekday(&self, weekday: u32) -> Result<&[String], ConfigError> {
        let day = WEEKDAYS
            .get(weekday as usize)
            .ok_or(ConfigError::InvalidWeekday(weekday))?;
        Ok(self.registrations(day))
    }

    pub fn registrations_for_date(&self, date: NaiveDate) -> Result<&[String], ConfigError> {
        self.registrations_for_weekday(date.weekday().num_days_from_monday())
    }

    pub fn summary(&self) -> EnvironmentSummary {
        EnvironmentSummary {
            airlines: self.airlines.len(),
            aircraft_types: self.aircraft_types.len(),
            stands: self.stands.len(),
            registrations: self.all_registrations().len(),
            stations: self.stations.len(),
        }
    }
}

/// Vocabularies for work orders and packages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkpackageConfig {
    pub scope_values: Vec<String>,
    pub skill_values: Vec<String>,
    pub wp_names: Vec<String>,
    pub aircraft_subtypes: Vec<String>,
    pub work_order_area: Vec<String>,
    pub work_package_area: Vec<String>,
    pub work_order_names: Vec<String>,
}

impl WorkpackageConfig {
    /// Never fails: an unknown environment falls back to the `test` profile and an
    /// unreadable document to an empty profile.
    pub fn load(dir: &Path, environment: &str) -> WorkpackageConfig {
        let path = dir.join(WORKPACKAGE_CONFIG_FILE);
        let mut envs: HashMap<String, WorkpackageConfig> = match read_document(&path) {
            Ok(envs) => envs,
            Err(e) => {
                tracing::warn!(error = %e, "work package config unavailable, using empty profile");
                return WorkpackageConfig::default();
            }
        };
        if let Some(config) = envs.remove(environment) {
            return config;
        }
        tracing::warn!(
            environment,
            fallback = DEFAULT_ENVIRONMENT,
            "environment not found in work package config"
        );
        envs.remove(DEFAULT_ENVIRONMENT).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubtypeEntry {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubtypeMappings {
    #[serde(default)]
    pub mappings: HashMap<String, SubtypeEntry>,
    #[serde(default)]
    pub default_subtypes: HashMap<String, Vec<String>>,
}

impl SubtypeMappings {
    pub fn path(dir: &Path) -> PathBuf {
        dir.join(SUBTYPE_MAPPINGS_FILE)
    }

    pub fn load(path: &Path) -> Result<SubtypeMappings, ConfigError> {
        read_document(path)
    }
}
