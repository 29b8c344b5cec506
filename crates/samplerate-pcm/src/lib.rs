//! Raw PCM16 stream adapters around `samplerate-core`
//!
//! [`PcmReader`] and [`PcmWriter`] move interleaved little-endian 16-bit PCM
//! in and out of `f32` chunks. [`ResamplingReader`] chains a reader with a
//! [`samplerate_core::Converter`] and exposes the converted stream through
//! `std::io::Read`.

pub mod error;
pub mod format;
pub mod reader;
pub mod resampling;
pub mod writer;

pub use error::{PcmError, Result};
pub use format::{PcmFormat, BYTES_PER_SAMPLE};
pub use reader::PcmReader;
pub use resampling::{ResamplingReader, DEFAULT_CHUNK_FRAMES};
pub use writer::PcmWriter;
