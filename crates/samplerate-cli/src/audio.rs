//! Input detection and WAV decoding/encoding

use std::path::Path;

use anyhow::{Context, Result};
use samplerate_core::{float_to_pcm16, pcm16_to_float};

use crate::config::SampleFormat;

/// Container of an input file, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Wav,
    /// Headerless interleaved PCM16 LE
    RawPcm,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "wav" | "wave" => Ok(InputKind::Wav),
            "pcm" | "raw" | "s16" => Ok(InputKind::RawPcm),
            _ => anyhow::bail!("Unsupported input format: {}", path.display()),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            InputKind::Wav => "wav",
            InputKind::RawPcm => "pcm",
        }
    }
}

/// Decoded audio data
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Interleaved samples in [-1.0, 1.0]
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
    pub spec: hound::WavSpec,
}

impl AudioData {
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }
}

/// Decode a WAV file of any integer width or 32-bit float
pub fn decode_wav(path: &Path) -> Result<AudioData> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;

    let spec = reader.spec();
    if spec.channels == 0 {
        anyhow::bail!("WAV file has no channels: {}", path.display());
    }

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, _) => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        (hound::SampleFormat::Int, 16) => {
            let ints = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;
            let mut samples = vec![0.0; ints.len()];
            pcm16_to_float(&ints, &mut samples)?;
            samples
        }
        (hound::SampleFormat::Int, bits) => {
            let max_val = (1i64 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    log::info!(
        "Decoded {}: {} samples @ {}Hz, {} channels",
        path.display(),
        samples.len(),
        spec.sample_rate,
        spec.channels
    );

    Ok(AudioData {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        spec,
    })
}

/// WAV layout for converted output
pub fn output_spec(source: hound::WavSpec, sample_rate: u32, format: SampleFormat) -> hound::WavSpec {
    let (bits_per_sample, sample_format) = match format {
        SampleFormat::Source => (source.bits_per_sample, source.sample_format),
        SampleFormat::Int16 => (16, hound::SampleFormat::Int),
        SampleFormat::Float32 => (32, hound::SampleFormat::Float),
    };
    hound::WavSpec {
        channels: source.channels,
        sample_rate,
        bits_per_sample,
        sample_format,
    }
}

/// Encode interleaved samples to a WAV file, clamping to full scale
pub fn write_wav(path: &Path, samples: &[f32], spec: hound::WavSpec) -> Result<()> {
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;

    match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, _) => {
            for &s in samples {
                writer.write_sample(s)?;
            }
        }
        (hound::SampleFormat::Int, 16) => {
            let mut ints = vec![0i16; samples.len()];
            float_to_pcm16(samples, &mut ints)?;
            for s in ints {
                writer.write_sample(s)?;
            }
        }
        (hound::SampleFormat::Int, bits) => {
            let max_val = (1i64 << (bits - 1)) as f64;
            for &s in samples {
                let v = (s as f64 * max_val).round().clamp(-max_val, max_val - 1.0);
                writer.write_sample(v as i32)?;
            }
        }
    }

    writer
        .finalize()
        .with_context(|| format!("Failed to finalize WAV file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn spec(bits: u16, format: hound::SampleFormat) -> hound::WavSpec {
        hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: bits,
            sample_format: format,
        }
    }

    #[test]
    fn test_input_kind() {
        assert_eq!(InputKind::from_path(&PathBuf::from("a.wav")).unwrap(), InputKind::Wav);
        assert_eq!(InputKind::from_path(&PathBuf::from("a.WAV")).unwrap(), InputKind::Wav);
        assert_eq!(InputKind::from_path(&PathBuf::from("a.pcm")).unwrap(), InputKind::RawPcm);
        assert!(InputKind::from_path(&PathBuf::from("a.mp3")).is_err());
        assert!(InputKind::from_path(&PathBuf::from("noext")).is_err());
    }

    #[test]
    fn test_output_spec() {
        let source = spec(24, hound::SampleFormat::Int);
        let same = output_spec(source, 48000, SampleFormat::Source);
        assert_eq!(same.bits_per_sample, 24);
        assert_eq!(same.sample_rate, 48000);
        assert_eq!(same.channels, 2);

        let float = output_spec(source, 48000, SampleFormat::Float32);
        assert_eq!(float.bits_per_sample, 32);
        assert_eq!(float.sample_format, hound::SampleFormat::Float);
    }

    #[test]
    fn test_wav_write_then_decode() {
        let dir = tempfile::tempdir().unwrap();
        let samples = [0.0f32, 0.5, -0.5, 1.0, -1.0, 0.25];

        for (bits, format) in [
            (16, hound::SampleFormat::Int),
            (24, hound::SampleFormat::Int),
            (32, hound::SampleFormat::Float),
        ] {
            let path = dir.path().join(format!("t{bits}.wav"));
            write_wav(&path, &samples, spec(bits, format)).unwrap();
            let decoded = decode_wav(&path).unwrap();
            assert_eq!(decoded.channels, 2);
            assert_eq!(decoded.sample_rate, 44100);
            assert_eq!(decoded.frames(), 3);
            for (a, b) in decoded.samples.iter().zip(&samples) {
                approx::assert_abs_diff_eq!(*a, *b, epsilon = 1.0 / 32768.0);
            }
        }
    }
}
