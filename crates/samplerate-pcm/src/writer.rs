//! PCM16 LE stream writer

use std::io::{BufWriter, Write};

use samplerate_core::float_to_pcm16_bytes;

use crate::error::{PcmError, Result};
use crate::format::PcmFormat;

/// Writes interleaved `f32` chunks as PCM16 LE
pub struct PcmWriter<W: Write> {
    inner: BufWriter<W>,
    format: PcmFormat,
    bytes: Vec<u8>,
    frames_written: u64,
}

impl<W: Write> PcmWriter<W> {
    pub fn new(inner: W, format: PcmFormat) -> Result<Self> {
        format.validate()?;
        Ok(Self {
            inner: BufWriter::new(inner),
            format,
            bytes: Vec::new(),
            frames_written: 0,
        })
    }

    pub fn format(&self) -> PcmFormat {
        self.format
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Clamp, quantise and write whole frames
    pub fn write_frames(&mut self, samples: &[f32]) -> Result<()> {
        let channels = self.format.channel_count();
        if samples.len() % channels != 0 {
            return Err(PcmError::PartialFrame {
                samples: samples.len(),
                channels,
            });
        }

        self.bytes.resize(samples.len() * 2, 0);
        float_to_pcm16_bytes(samples, &mut self.bytes)?;
        self.inner.write_all(&self.bytes)?;
        self.frames_written += (samples.len() / channels) as u64;
        Ok(())
    }

    /// Flush and hand back the sink with the number of frames written
    pub fn finish(self) -> Result<(W, u64)> {
        let frames = self.frames_written;
        let inner = self
            .inner
            .into_inner()
            .map_err(|e| PcmError::Io(e.into_error()))?;
        Ok((inner, frames))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_finish() {
        let mut writer = PcmWriter::new(Vec::new(), PcmFormat::stereo(8000)).unwrap();
        writer.write_frames(&[0.0, 0.5, -1.0, 1.0]).unwrap();
        writer.write_frames(&[2.0, -2.0]).unwrap();
        let (bytes, frames) = writer.finish().unwrap();

        assert_eq!(frames, 3);
        let samples: Vec<i16> = bytes
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        assert_eq!(samples, vec![0, 16384, -32768, 32767, 32767, -32768]);
    }

    #[test]
    fn test_partial_frame_rejected() {
        let mut writer = PcmWriter::new(Vec::new(), PcmFormat::stereo(8000)).unwrap();
        let err = writer.write_frames(&[0.1, 0.2, 0.3]).unwrap_err();
        assert!(matches!(
            err,
            PcmError::PartialFrame {
                samples: 3,
                channels: 2
            }
        ));
        assert_eq!(writer.frames_written(), 0);
    }
}
