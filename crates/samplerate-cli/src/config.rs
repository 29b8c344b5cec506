//! TOML configuration for `srconvert`
//!
//! Every section is optional; command line flags override file values.

use std::path::Path;

use anyhow::Context;
use samplerate_core::{Algorithm, ConverterConfig};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SrConfig {
    #[serde(default)]
    pub converter: ConverterSection,
    #[serde(default)]
    pub output: OutputSection,
}

/// Converter selection and streaming granularity
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConverterSection {
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,
    /// Input frames fed to the converter per call
    #[serde(default = "default_chunk_frames")]
    pub chunk_frames: usize,
}

impl ConverterSection {
    /// Converter settings for a stream with `channels` channels
    pub fn converter_config(&self, channels: usize) -> ConverterConfig {
        ConverterConfig {
            algorithm: self.algorithm,
            channels,
            max_frames: self.chunk_frames,
        }
    }
}

impl Default for ConverterSection {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            chunk_frames: default_chunk_frames(),
        }
    }
}

fn default_algorithm() -> Algorithm {
    Algorithm::SincMedium
}
fn default_chunk_frames() -> usize {
    4096
}

/// Where and how converted files are written
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputSection {
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Target rate used when `--rate` is not given
    #[serde(default)]
    pub sample_rate: Option<u32>,
    #[serde(default)]
    pub sample_format: SampleFormat,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            sample_rate: None,
            sample_format: SampleFormat::default(),
        }
    }
}

fn default_directory() -> String {
    "./resampled".to_string()
}

/// Sample encoding for WAV output
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// Same encoding as the input file
    #[default]
    Source,
    Int16,
    Float32,
}

impl SrConfig {
    /// Load configuration from TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SrConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.converter.chunk_frames == 0 {
            anyhow::bail!("converter.chunk_frames must be > 0");
        }
        if self.output.sample_rate == Some(0) {
            anyhow::bail!("output.sample_rate must be > 0");
        }
        Ok(())
    }
}
