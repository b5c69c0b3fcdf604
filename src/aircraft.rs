use crate::config::{SubtypeEntry, SubtypeMappings, pick};
use crate::error::GenerateError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_SUBTYPES: [&str; 2] = ["A", "B"];

/// Hands out registrations without repeats until the pool is used up, then starts over.
#[derive(Debug, Default)]
pub struct RegistrationPicker {
    used: HashSet<String>,
}

impl RegistrationPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw<R: Rng>(
        &mut self,
        rng: &mut R,
        pool: &[String],
    ) -> Result<String, GenerateError> {
        let mut available: Vec<&String> = pool.iter().filter(|r| !self.used.contains(*r)).collect();
        if available.is_empty() {
            tracing::debug!(pool = pool.len(), "registration pool exhausted, starting over");
            self.used.clear();
            available = pool.iter().collect();
        }
        let registration = available
            .choose(rng)
            .map(|r| (*r).clone())
            .ok_or(GenerateError::EmptyPool("registrations"))?;
        self.used.insert(registration.clone());
        Ok(registration)
    }

    pub fn reset(&mut self) {
        self.used.clear();
    }

    #[cfg(test)]
    pub fn used(&self) -> usize {
        self.used.len()
    }
}

/// Maps an aircraft type onto a subtype, falling back to a default pool.
#[derive(Debug, Clone)]
pub struct SubtypeResolver {
    mappings: Option<SubtypeMappings>,
    fallback: Vec<String>,
}

impl SubtypeResolver {
    pub fn new(mappings: Option<SubtypeMappings>, configured: &[String], environment: &str) -> Self {
        let fallback = if !configured.is_empty() {
            configured.to_vec()
        } else {
            mappings
                .as_ref()
                .and_then(|m| m.default_subtypes.get(environment))
                .filter(|pool| !pool.is_empty())
                .cloned()
                .unwrap_or_else(|| BUILTIN_SUBTYPES.iter().map(|s| s.to_string()).collect())
        };
        SubtypeResolver { mappings, fallback }
    }

    /// A missing or corrupt mapping document only costs the mapping, never the run.
    pub fn from_file(path: &Path, configured: &[String], environment: &str) -> Self {
        let mappings = match SubtypeMappings::load(path) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!(error = %e, "aircraft subtype mapping unavailable, using default pool");
                None
            }
        };
        Self::new(mappings, configured, environment)
    }

    pub fn resolve<R: Rng>(
        &self,
        rng: &mut R,
        aircraft_type: &str,
    ) -> Result<String, GenerateError> {
        let mapped = self
            .mappings
            .as_ref()
            .and_then(|m| m.mappings.get(aircraft_type));
        match mapped {
            Some(SubtypeEntry::One(subtype)) => Ok(subtype.clone()),
            Some(SubtypeEntry::Many(subtypes)) if !subtypes.is_empty() => {
                pick(rng, subtypes, "aircraft subtypes").map(str::to_string)
            }
            _ => pick(rng, &self.fallback, "aircraft subtypes").map(str::to_string),
        }
    }
}
