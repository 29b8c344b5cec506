//! One-shot conversion

use crate::algorithm::Algorithm;
use crate::converter::Converter;
use crate::error::{Error, ErrorCode, Result};
use crate::ratio::is_valid_ratio;

/// Resample a complete buffer in one call
///
/// Builds a converter sized for `input`, processes it with end-of-input
/// set and releases the converter before returning.
pub fn simple(input: &[f32], ratio: f64, channels: usize, algorithm: Algorithm) -> Result<Vec<f32>> {
    if !is_valid_ratio(ratio) {
        return Err(Error::InvalidRatio(ratio));
    }
    if channels == 0 {
        return Err(Error::init_failure(ErrorCode::BAD_CHANNEL_COUNT));
    }
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let frames = input.len() / channels;
    let mut converter = Converter::new(algorithm, channels, frames.max(1))?;
    let output = converter.process(input, ratio, true)?;
    converter.delete()?;
    Ok(output)
}

/// `simple` with a raw algorithm id
pub fn simple_with_id(input: &[f32], ratio: f64, channels: usize, id: i32) -> Result<Vec<f32>> {
    let algorithm =
        Algorithm::from_id(id).map_err(|_| Error::init_failure(ErrorCode::BAD_CONVERTER))?;
    simple(input, ratio, channels, algorithm)
}
