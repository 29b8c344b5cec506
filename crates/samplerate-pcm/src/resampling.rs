//! Pull-based resampling over `std::io::Read`

use std::io::{self, Read};

use samplerate_core::{float_to_pcm16_bytes, is_valid_ratio, Algorithm, Converter, Error};

use crate::error::Result;
use crate::format::PcmFormat;
use crate::reader::PcmReader;

/// Source frames pulled per conversion step
pub const DEFAULT_CHUNK_FRAMES: usize = 1024;

/// Resamples a PCM16 LE source on demand
///
/// Each `read` pulls at most one chunk from the source, converts it and hands
/// out the resulting bytes. Converted bytes that do not fit the caller's
/// buffer are kept for the next call. When the source runs dry the converter
/// is flushed once with end of input and the reader then reports EOF.
pub struct ResamplingReader<R: Read> {
    source: PcmReader<R>,
    output: PcmFormat,
    converter: Converter,
    ratio: f64,
    chunk_frames: usize,
    pending: Vec<u8>,
    offset: usize,
    finished: bool,
}

impl<R: Read> ResamplingReader<R> {
    pub fn new(source: R, input: PcmFormat, output_rate: u32, algorithm: Algorithm) -> Result<Self> {
        Self::with_chunk_frames(source, input, output_rate, algorithm, DEFAULT_CHUNK_FRAMES)
    }

    pub fn with_chunk_frames(
        source: R,
        input: PcmFormat,
        output_rate: u32,
        algorithm: Algorithm,
        chunk_frames: usize,
    ) -> Result<Self> {
        let output = PcmFormat::new(output_rate, input.channels);
        output.validate()?;
        let source = PcmReader::new(source, input)?;

        let ratio = input.ratio_to(&output);
        if !is_valid_ratio(ratio) {
            return Err(Error::InvalidRatio(ratio).into());
        }

        let chunk_frames = chunk_frames.max(1);
        let converter = Converter::new(algorithm, input.channel_count(), chunk_frames)?;
        log::debug!(
            "Resampling {} -> {} with {} (ratio {:.6})",
            input,
            output,
            algorithm.name(),
            ratio
        );

        Ok(Self {
            source,
            output,
            converter,
            ratio,
            chunk_frames,
            pending: Vec::new(),
            offset: 0,
            finished: false,
        })
    }

    pub fn input_format(&self) -> PcmFormat {
        self.source.format()
    }

    pub fn output_format(&self) -> PcmFormat {
        self.output
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Source frames consumed so far
    pub fn frames_in(&self) -> u64 {
        self.source.frames_read()
    }

    /// Convert chunks until there are bytes to hand out or the stream is done
    fn refill(&mut self) -> Result<()> {
        while self.offset >= self.pending.len() && !self.finished {
            let samples = self.source.read_frames(self.chunk_frames)?;
            let end_of_input = samples.len() < self.chunk_frames * self.output.channel_count();

            let converted = self.converter.process(&samples, self.ratio, end_of_input)?;
            self.pending.resize(converted.len() * 2, 0);
            float_to_pcm16_bytes(&converted, &mut self.pending)?;
            self.offset = 0;

            if end_of_input {
                self.finished = true;
                log::debug!(
                    "Resampling done after {} input frames",
                    self.source.frames_read()
                );
            }
        }
        Ok(())
    }
}

impl<R: Read> Read for ResamplingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        self.refill()?;

        let available = &self.pending[self.offset..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.offset += n;
        Ok(n)
    }
}
