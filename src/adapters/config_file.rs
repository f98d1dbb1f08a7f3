//! JSON config-file adapter.
//!
//! Implements [`ConfigPort`] on top of an optional file path.  No path
//! means factory defaults.  Fields absent from the file take their
//! defaults too, so a file may hold only the values being tuned:
//!
//! ```json
//! { "settings": { "min_moisture_percent": 35.0 }, "telemetry_interval_secs": 30 }
//! ```
//!
//! The file is read once at start-up and never written.

use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;
use crate::error::Error;

#[derive(Debug, Clone, Default)]
pub struct JsonConfigFile {
    path: Option<PathBuf>,
}

impl JsonConfigFile {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Parse and validate a JSON document.
    pub fn parse(text: &str) -> Result<SystemConfig, ConfigError> {
        let cfg: SystemConfig = serde_json::from_str(text).map_err(|e| {
            warn!("config: parse error: {}", e);
            ConfigError::Corrupted
        })?;
        cfg.validate().map_err(validation_error)?;
        Ok(cfg)
    }
}

fn validation_error(e: Error) -> ConfigError {
    match e {
        Error::InvalidSettings(msg) | Error::Config(msg) => ConfigError::ValidationFailed(msg),
        Error::Sensor(_) => ConfigError::ValidationFailed("unexpected sensor error"),
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let Some(path) = &self.path else {
            info!("config: no file given, using defaults");
            return Ok(SystemConfig::default());
        };

        let text = fs::read_to_string(path).map_err(|e| {
            warn!("config: cannot read {}: {}", path.display(), e);
            ConfigError::IoError
        })?;
        let cfg = Self::parse(&text)?;
        info!("config: loaded {}", path.display());
        Ok(cfg)
    }
}
