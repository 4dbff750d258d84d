pub mod path;

#[cfg(test)]
pub mod config_test;

use std::{io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drivers::onetouch::{
    calibration::{CalibrationBounds, TargetArea},
    filter::FilterConfig,
    TTY_TIMEOUT,
};

/// Default serial device the panel is attached to
pub const DEFAULT_DEVICE: &str = "/dev/ttyS0";
/// Default name of the virtual pointer device
pub const DEFAULT_POINTER_NAME: &str = "OneTouch Pointer";

/// Represents all possible errors loading a [Config]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read: {0}")]
    IoError(#[from] io::Error),
    #[error("Unable to deserialize: {0}")]
    DeserializeError(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Daemon configuration. Every field is optional in the YAML file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    pub version: u32,
    /// Serial device node, e.g. "/dev/ttyS0"
    pub device: String,
    /// Serial read timeout in milliseconds
    pub timeout_ms: u64,
    pub filter: FilterConfig,
    pub target: TargetArea,
    /// Starting calibration. Learned from scratch if omitted.
    pub calibration: Option<CalibrationBounds>,
    pub pointer_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            device: DEFAULT_DEVICE.to_string(),
            timeout_ms: TTY_TIMEOUT,
            filter: FilterConfig::default(),
            target: TargetArea::default(),
            calibration: None,
            pointer_name: DEFAULT_POINTER_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load a [Config] from the given YAML string
    pub fn from_yaml(content: String) -> Result<Config, LoadError> {
        let config: Config = serde_yaml::from_str(content.as_str())?;
        config.validate()?;
        Ok(config)
    }

    /// Load a [Config] from the given YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Config, LoadError> {
        let file = std::fs::File::open(path)?;
        let config: Config = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Check for values the pipeline cannot run with
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.filter.avg_count == 0 {
            return Err(LoadError::Invalid("filter.avg_count must be at least 1".into()));
        }
        if self.target.height == 0 || self.target.width == 0 {
            return Err(LoadError::Invalid("target area must not be empty".into()));
        }
        if let Some(bounds) = self.calibration.as_ref() {
            if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
                if min.x > max.x || min.y > max.y {
                    return Err(LoadError::Invalid(
                        "calibration.min must not exceed calibration.max".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}
