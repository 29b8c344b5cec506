//! PCM16 stream format

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PcmError, Result};

/// Bytes per sample for 16-bit PCM
pub const BYTES_PER_SAMPLE: usize = 2;

/// Sample rate and channel layout of an interleaved PCM16 LE stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcmFormat {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Interleaved channel count
    pub channels: u16,
}

impl PcmFormat {
    pub const fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    pub const fn mono(sample_rate: u32) -> Self {
        Self::new(sample_rate, 1)
    }

    pub const fn stereo(sample_rate: u32) -> Self {
        Self::new(sample_rate, 2)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(PcmError::InvalidFormat("sample_rate must be > 0".into()));
        }
        if self.channels == 0 {
            return Err(PcmError::InvalidFormat("channels must be > 0".into()));
        }
        Ok(())
    }

    pub fn channel_count(&self) -> usize {
        self.channels as usize
    }

    /// Bytes in one interleaved frame
    pub fn frame_bytes(&self) -> usize {
        self.channel_count() * BYTES_PER_SAMPLE
    }

    pub fn bytes_in_frames(&self, frames: usize) -> usize {
        frames * self.frame_bytes()
    }

    /// Whole frames contained in `bytes`
    pub fn frames_in_bytes(&self, bytes: usize) -> usize {
        bytes / self.frame_bytes()
    }

    /// Conversion ratio (output rate / input rate) from `self` to `target`
    pub fn ratio_to(&self, target: &PcmFormat) -> f64 {
        target.sample_rate as f64 / self.sample_rate as f64
    }

    /// Duration of `frames` frames in milliseconds
    pub fn duration_ms(&self, frames: u64) -> u64 {
        frames * 1000 / self.sample_rate.max(1) as u64
    }
}

impl fmt::Display for PcmFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz, {} ch, s16le", self.sample_rate, self.channels)
    }
}
