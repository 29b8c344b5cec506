//! Converter configuration
//!
//! Serializable settings for building a `Converter`, shared by the CLI
//! configuration file and library callers.

use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Settings for one converter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub algorithm: Algorithm,
    /// Interleaved channels per frame
    pub channels: usize,
    /// Largest number of input frames accepted per `process` call
    pub max_frames: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Linear,
            channels: 2,
            max_frames: 4096,
        }
    }
}

impl ConverterConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(Error::InvalidConfig("channels must be > 0".to_string()));
        }
        if self.max_frames == 0 {
            return Err(Error::InvalidConfig("max_frames must be > 0".to_string()));
        }
        Ok(())
    }
}
