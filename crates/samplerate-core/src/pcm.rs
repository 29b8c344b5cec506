//! Conversion between `f32` samples and integer PCM
//!
//! Floats are full scale in [-1.0, 1.0]. The float to integer direction follows
//! libsamplerate: scale to 32 bits, saturate, round half to even, then shift
//! down, so -1.0 maps to the most negative integer and +1.0 to the most
//! positive one.

use crate::error::{Error, Result};

const SCALE_32: f64 = 2_147_483_648.0; // 2^31
const SCALE_16: f64 = 32_768.0; // 2^15

fn check_lengths(input: usize, output: usize) -> Result<()> {
    if input != output {
        return Err(Error::LengthMismatch { input, output });
    }
    Ok(())
}

#[inline]
fn scale_to_i32(sample: f32) -> i32 {
    let scaled = sample as f64 * SCALE_32;
    if scaled >= i32::MAX as f64 {
        i32::MAX
    } else if scaled <= i32::MIN as f64 {
        i32::MIN
    } else {
        // NaN falls through both comparisons and rounds to 0
        scaled.round_ties_even() as i32
    }
}

#[inline]
fn sample_to_i16(sample: f32) -> i16 {
    (scale_to_i32(sample) >> 16) as i16
}

#[inline]
fn i16_to_sample(sample: i16) -> f32 {
    (sample as f64 / SCALE_16) as f32
}

/// Convert floats to signed 16-bit PCM, clamping out-of-range input
pub fn float_to_pcm16(input: &[f32], output: &mut [i16]) -> Result<()> {
    check_lengths(input.len(), output.len())?;
    for (out, &sample) in output.iter_mut().zip(input) {
        *out = sample_to_i16(sample);
    }
    Ok(())
}

/// Convert signed 16-bit PCM to floats (`s / 32768`)
pub fn pcm16_to_float(input: &[i16], output: &mut [f32]) -> Result<()> {
    check_lengths(input.len(), output.len())?;
    for (out, &sample) in output.iter_mut().zip(input) {
        *out = i16_to_sample(sample);
    }
    Ok(())
}

/// Convert little-endian 16-bit PCM bytes to floats
///
/// `input` must hold exactly two bytes per output sample.
pub fn pcm16_bytes_to_float(input: &[u8], output: &mut [f32]) -> Result<()> {
    if input.len() % 2 != 0 {
        return Err(Error::OddByteLength(input.len()));
    }
    check_lengths(input.len() / 2, output.len())?;
    for (out, pair) in output.iter_mut().zip(input.chunks_exact(2)) {
        *out = i16_to_sample(i16::from_le_bytes([pair[0], pair[1]]));
    }
    Ok(())
}

/// Convert floats to little-endian 16-bit PCM bytes
///
/// `output` must hold exactly two bytes per input sample.
pub fn float_to_pcm16_bytes(input: &[f32], output: &mut [u8]) -> Result<()> {
    if output.len() % 2 != 0 {
        return Err(Error::OddByteLength(output.len()));
    }
    check_lengths(input.len(), output.len() / 2)?;
    for (pair, &sample) in output.chunks_exact_mut(2).zip(input) {
        pair.copy_from_slice(&sample_to_i16(sample).to_le_bytes());
    }
    Ok(())
}

/// Convert floats to signed 32-bit PCM, clamping out-of-range input
pub fn float_to_pcm32(input: &[f32], output: &mut [i32]) -> Result<()> {
    check_lengths(input.len(), output.len())?;
    for (out, &sample) in output.iter_mut().zip(input) {
        *out = scale_to_i32(sample);
    }
    Ok(())
}

/// Convert signed 32-bit PCM to floats (`s / 2^31`)
pub fn pcm32_to_float(input: &[i32], output: &mut [f32]) -> Result<()> {
    check_lengths(input.len(), output.len())?;
    for (out, &sample) in output.iter_mut().zip(input) {
        *out = (sample as f64 / SCALE_32) as f32;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_float_extremes_to_pcm16() {
        let mut output = [0i16; 2];
        float_to_pcm16(&[-1.0, 1.0], &mut output).unwrap();
        assert_eq!(output, [-32768, 32767]);
    }

    #[test]
    fn test_float_to_pcm16_clamps() {
        let mut output = [0i16; 4];
        float_to_pcm16(&[-3.5, 2.0, 0.0, f32::NAN], &mut output).unwrap();
        assert_eq!(output, [-32768, 32767, 0, 0]);
    }

    #[test]
    fn test_pcm16_extremes_to_float() {
        let mut output = [0f32; 2];
        pcm16_to_float(&[-32768, 32767], &mut output).unwrap();
        assert_abs_diff_eq!(output[0], -1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(output[1], 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pcm16_bytes_to_float() {
        let mut output = [0f32; 2];
        pcm16_bytes_to_float(&[0x00, 0x80, 0xFF, 0x7F], &mut output).unwrap();
        assert_abs_diff_eq!(output[0], -1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(output[1], 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pcm16_round_trip() {
        let input: Vec<f32> = (-100..=100).map(|i| i as f32 / 100.0).collect();
        let mut pcm = vec![0i16; input.len()];
        let mut back = vec![0f32; input.len()];
        float_to_pcm16(&input, &mut pcm).unwrap();
        pcm16_to_float(&pcm, &mut back).unwrap();
        for (a, b) in input.iter().zip(&back) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1.0 / 32768.0 + f32::EPSILON);
        }
    }

    #[test]
    fn test_bytes_round_trip_through_writer() {
        let input = [0.25f32, -0.75, 0.5];
        let mut bytes = [0u8; 6];
        let mut back = [0f32; 3];
        float_to_pcm16_bytes(&input, &mut bytes).unwrap();
        assert_eq!(&bytes[..2], &8192i16.to_le_bytes());
        pcm16_bytes_to_float(&bytes, &mut back).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn test_length_mismatch() {
        let mut short = [0i16; 1];
        assert_eq!(
            float_to_pcm16(&[0.0, 0.0], &mut short),
            Err(Error::LengthMismatch { input: 2, output: 1 })
        );
        let mut floats = [0f32; 3];
        assert!(matches!(
            pcm16_to_float(&[0, 0], &mut floats),
            Err(Error::LengthMismatch { .. })
        ));
        assert!(matches!(
            pcm16_bytes_to_float(&[0, 0, 0, 0], &mut floats),
            Err(Error::LengthMismatch { input: 2, output: 3 })
        ));
    }

    #[test]
    fn test_odd_byte_length() {
        let mut output = [0f32; 1];
        assert_eq!(
            pcm16_bytes_to_float(&[0, 0, 0], &mut output),
            Err(Error::OddByteLength(3))
        );
    }

    #[test]
    fn test_pcm32_mapping() {
        let mut ints = [0i32; 3];
        float_to_pcm32(&[-1.0, 1.0, 0.5], &mut ints).unwrap();
        assert_eq!(ints, [i32::MIN, i32::MAX, 1 << 30]);

        let mut floats = [0f32; 3];
        pcm32_to_float(&ints, &mut floats).unwrap();
        assert_abs_diff_eq!(floats[0], -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(floats[1], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(floats[2], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_ties_round_to_even() {
        // -2^-32 scales to exactly -0.5
        let tiny = -(2.0f32).powi(-32);
        let mut output = [1i16; 1];
        float_to_pcm16(&[tiny], &mut output).unwrap();
        assert_eq!(output, [0]);

        let lsb = (2.0f32).powi(-31);
        let mut ints = [0i32; 4];
        float_to_pcm32(&[0.5 * lsb, 1.5 * lsb, 2.5 * lsb, -1.5 * lsb], &mut ints).unwrap();
        assert_eq!(ints, [0, 2, 2, -2]);
    }
}
