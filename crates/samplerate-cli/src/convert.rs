//! Per-file conversion jobs

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use samplerate_core::{is_valid_ratio, Converter, ConverterConfig};
use samplerate_pcm::{PcmFormat, ResamplingReader};
use serde::Serialize;

use crate::audio::{decode_wav, output_spec, write_wav, InputKind};
use crate::config::{ConverterSection, SampleFormat};

/// Settings shared by every file of one `srconvert` run
#[derive(Debug, Clone)]
pub struct ConvertJob {
    pub target_rate: u32,
    pub converter: ConverterSection,
    pub output_dir: PathBuf,
    /// Layout of headerless `.pcm` inputs
    pub raw_format: Option<PcmFormat>,
    pub sample_format: SampleFormat,
}

/// Outcome of one converted file
#[derive(Debug, Clone, Serialize)]
pub struct ConvertReport {
    pub input_file: String,
    pub output_file: String,
    pub algorithm: &'static str,
    pub input_rate: u32,
    pub output_rate: u32,
    pub channels: u16,
    pub frames_in: u64,
    pub frames_out: u64,
    pub processing_time_seconds: f64,
}

impl ConvertJob {
    /// Convert one file into `output_dir`
    pub fn run(&self, input: &Path) -> Result<ConvertReport> {
        if !input.exists() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
        let kind = InputKind::from_path(input)?;
        let output = output_path(input, &self.output_dir, self.target_rate, kind)?;

        log::info!("Processing: {} -> {}", input.display(), output.display());
        let start = Instant::now();
        let mut report = match kind {
            InputKind::Wav => self.convert_wav(input, &output)?,
            InputKind::RawPcm => self.convert_raw(input, &output)?,
        };
        report.processing_time_seconds = start.elapsed().as_secs_f64();

        log::info!(
            "Converted {} frames into {} frames in {:.2}s",
            report.frames_in,
            report.frames_out,
            report.processing_time_seconds
        );
        Ok(report)
    }

    fn convert_wav(&self, input: &Path, output: &Path) -> Result<ConvertReport> {
        let audio = decode_wav(input)?;
        let ratio = self.target_rate as f64 / audio.sample_rate as f64;

        let config = self.converter.converter_config(audio.channels as usize);
        let resampled = resample_chunked(&audio.samples, ratio, &config)
            .with_context(|| format!("Failed to resample {}", input.display()))?;

        let spec = output_spec(audio.spec, self.target_rate, self.sample_format);
        write_wav(output, &resampled, spec)?;

        Ok(ConvertReport {
            input_file: input.display().to_string(),
            output_file: output.display().to_string(),
            algorithm: self.converter.algorithm.name(),
            input_rate: audio.sample_rate,
            output_rate: self.target_rate,
            channels: audio.channels,
            frames_in: audio.frames() as u64,
            frames_out: (resampled.len() / audio.channels as usize) as u64,
            processing_time_seconds: 0.0,
        })
    }

    fn convert_raw(&self, input: &Path, output: &Path) -> Result<ConvertReport> {
        let format = self
            .raw_format
            .context("Raw PCM input needs --input-rate and --channels")?;

        let file = File::open(input)
            .with_context(|| format!("Failed to open PCM file: {}", input.display()))?;
        let mut resampler = ResamplingReader::with_chunk_frames(
            BufReader::new(file),
            format,
            self.target_rate,
            self.converter.algorithm,
            self.converter.chunk_frames,
        )?;

        let out = File::create(output)
            .with_context(|| format!("Failed to create PCM file: {}", output.display()))?;
        let mut writer = BufWriter::new(out);
        let bytes = io::copy(&mut resampler, &mut writer)
            .with_context(|| format!("Failed to resample {}", input.display()))?;
        writer.flush()?;

        let out_format = resampler.output_format();
        Ok(ConvertReport {
            input_file: input.display().to_string(),
            output_file: output.display().to_string(),
            algorithm: self.converter.algorithm.name(),
            input_rate: format.sample_rate,
            output_rate: out_format.sample_rate,
            channels: format.channels,
            frames_in: resampler.frames_in(),
            frames_out: out_format.frames_in_bytes(bytes as usize) as u64,
            processing_time_seconds: 0.0,
        })
    }
}

/// `<output_dir>/<stem>-<rate>hz.<ext>`
pub fn output_path(input: &Path, output_dir: &Path, rate: u32, kind: InputKind) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Input path has no usable file name: {}", input.display()))?;
    Ok(output_dir.join(format!("{}-{}hz.{}", stem, rate, kind.extension())))
}

/// Run a whole interleaved signal through one converter in chunks
///
/// Each call feeds `config.max_frames` frames.
pub fn resample_chunked(
    samples: &[f32],
    ratio: f64,
    config: &ConverterConfig,
) -> samplerate_core::Result<Vec<f32>> {
    if !is_valid_ratio(ratio) {
        return Err(samplerate_core::Error::InvalidRatio(ratio));
    }
    let mut converter = Converter::from_config(config)?;
    let channels = config.channels;
    let mut output = Vec::with_capacity((samples.len() as f64 * ratio) as usize + channels);

    let mut chunks = samples.chunks(config.max_frames * channels).peekable();
    while let Some(chunk) = chunks.next() {
        let last = chunks.peek().is_none();
        output.extend(converter.process(chunk, ratio, last)?);
    }

    converter.delete()?;
    Ok(output)
}
