//! Samplerate Core - Streaming Sample-Rate Conversion
//!
//! Converts interleaved multi-channel `f32` audio between sample rates with a
//! selectable interpolator, keeping interpolation history between calls so a
//! long stream can be fed in chunks.
//!
//! ```
//! use samplerate_core::{Algorithm, Converter};
//!
//! let mut converter = Converter::new(Algorithm::Linear, 2, 1024)?;
//! let first = converter.process(&[0.1, -0.5, 0.2, -0.3], 2.0, false)?;
//! let rest = converter.process(&[0.3, -0.1], 2.0, true)?;
//! assert!(!first.is_empty() && !rest.is_empty());
//! # Ok::<(), samplerate_core::Error>(())
//! ```

pub mod algorithm;
pub mod config;
pub mod converter;
pub mod error;
pub mod kernel;
pub mod pcm;
pub mod ratio;
pub mod simple;

pub use algorithm::{description_of, name_of, Algorithm};
pub use config::ConverterConfig;
pub use converter::Converter;
pub use error::{error_message, Error, ErrorCode, Result};
pub use pcm::{
    float_to_pcm16, float_to_pcm16_bytes, float_to_pcm32, pcm16_bytes_to_float, pcm16_to_float,
    pcm32_to_float,
};
pub use ratio::{is_valid_ratio, MAX_RATIO, MIN_RATIO};
pub use simple::{simple, simple_with_id};

/// Library name and version, e.g. `samplerate-core-0.1.0`
pub fn version() -> &'static str {
    concat!("samplerate-core-", env!("CARGO_PKG_VERSION"))
}
