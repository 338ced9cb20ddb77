//! Add-on configuration.
//!
//! Every field has a default matching the stock add-on, so an empty YAML
//! document is a valid configuration:
//!
//! ```yaml
//! home_name: newtonHome
//! collection_name: Collection
//! world_name: newton world
//! engine:
//!   sub_steps: 2
//!   solver_iterations: 4
//!   worker_threads: 1
//! ```

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

use crate::{DEFAULT_COLLECTION, DEFAULT_WORLD_NAME, HOME_OBJECT_NAME};

/// Accepted solver sub-step counts.
pub const SUB_STEP_RANGE: RangeInclusive<u32> = 2..=8;

/// Accepted iterative solver pass counts.
pub const SOLVER_ITERATION_RANGE: RangeInclusive<u32> = 4..=32;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("{0} must not be empty")]
    EmptyName(&'static str),
}

/// Parameters handed to the physics engine when a world is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub sub_steps: u32,
    pub solver_iterations: u32,
    pub worker_threads: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            sub_steps: 2,
            solver_iterations: 4,
            worker_threads: 1,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("sub_steps", self.sub_steps, SUB_STEP_RANGE)?;
        check_range(
            "solver_iterations",
            self.solver_iterations,
            SOLVER_ITERATION_RANGE,
        )?;
        check_range("worker_threads", self.worker_threads, 1..=u32::MAX)?;
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    value: u32,
    range: RangeInclusive<u32>,
) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Names and engine defaults used by the lifecycle operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddonConfig {
    /// Name of the anchor object searched for and created by the add-on.
    pub home_name: String,
    /// Collection the home object is looked up in.
    pub collection_name: String,
    /// Display name given to new worlds.
    pub world_name: String,
    pub engine: EngineSettings,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            home_name: HOME_OBJECT_NAME.to_owned(),
            collection_name: DEFAULT_COLLECTION.to_owned(),
            world_name: DEFAULT_WORLD_NAME.to_owned(),
            engine: EngineSettings::default(),
        }
    }
}

impl AddonConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = if source.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(source)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.home_name.is_empty() {
            return Err(ConfigError::EmptyName("home_name"));
        }
        if self.collection_name.is_empty() {
            return Err(ConfigError::EmptyName("collection_name"));
        }
        self.engine.validate()
    }
}
