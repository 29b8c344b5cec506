//! PCM16 LE stream reader

use std::io::{self, Read};

use samplerate_core::pcm16_bytes_to_float;

use crate::error::{PcmError, Result};
use crate::format::PcmFormat;

/// Reads interleaved PCM16 LE frames from any `Read` as `f32` chunks
pub struct PcmReader<R: Read> {
    inner: R,
    format: PcmFormat,
    bytes: Vec<u8>,
    frames_read: u64,
}

impl<R: Read> PcmReader<R> {
    pub fn new(inner: R, format: PcmFormat) -> Result<Self> {
        format.validate()?;
        Ok(Self {
            inner,
            format,
            bytes: Vec::new(),
            frames_read: 0,
        })
    }

    pub fn format(&self) -> PcmFormat {
        self.format
    }

    /// Frames returned so far
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Read up to `max_frames` frames as interleaved floats
    ///
    /// Fewer frames than requested means the source is exhausted; an empty
    /// vector means nothing was left. A stream that stops part way through a
    /// frame fails with [`PcmError::TruncatedFrame`].
    pub fn read_frames(&mut self, max_frames: usize) -> Result<Vec<f32>> {
        let frame_bytes = self.format.frame_bytes();
        self.bytes.resize(self.format.bytes_in_frames(max_frames), 0);

        let filled = fill(&mut self.inner, &mut self.bytes)?;
        let remainder = filled % frame_bytes;
        if remainder != 0 {
            return Err(PcmError::TruncatedFrame {
                remainder,
                frame_bytes,
            });
        }

        let mut samples = vec![0.0f32; filled / 2];
        pcm16_bytes_to_float(&self.bytes[..filled], &mut samples)?;
        self.frames_read += (filled / frame_bytes) as u64;
        Ok(samples)
    }

    /// Read every remaining frame
    pub fn read_to_end(&mut self, chunk_frames: usize) -> Result<Vec<f32>> {
        let chunk_frames = chunk_frames.max(1);
        let mut all = Vec::new();
        loop {
            let chunk = self.read_frames(chunk_frames)?;
            let short = chunk.len() < chunk_frames * self.format.channel_count();
            all.extend_from_slice(&chunk);
            if short {
                return Ok(all);
            }
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Read until `buf` is full or the source reports end of stream
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::io::Cursor;

    fn le_bytes(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    /// Hands out at most `step` bytes per read call
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(self.step).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn test_read_frames_in_chunks() {
        let data = le_bytes(&[0, 16384, -16384, 32767, -32768, 0]);
        let mut reader = PcmReader::new(Cursor::new(data), PcmFormat::stereo(8000)).unwrap();

        let first = reader.read_frames(2).unwrap();
        assert_eq!(first.len(), 4);
        assert_abs_diff_eq!(first[1], 0.5);
        assert_abs_diff_eq!(first[2], -0.5);

        let second = reader.read_frames(2).unwrap();
        assert_eq!(second.len(), 2);
        assert_abs_diff_eq!(second[0], -1.0);

        assert!(reader.read_frames(2).unwrap().is_empty());
        assert_eq!(reader.frames_read(), 3);
    }

    #[test]
    fn test_short_reads_are_joined() {
        let data = le_bytes(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let source = Trickle {
            data,
            pos: 0,
            step: 3,
        };
        let mut reader = PcmReader::new(source, PcmFormat::stereo(8000)).unwrap();
        assert_eq!(reader.read_frames(4).unwrap().len(), 8);
    }

    #[test]
    fn test_truncated_frame() {
        let mut data = le_bytes(&[1, 2, 3]);
        data.push(0);
        let mut reader = PcmReader::new(Cursor::new(data), PcmFormat::stereo(8000)).unwrap();
        let err = reader.read_frames(8).unwrap_err();
        assert!(matches!(
            err,
            PcmError::TruncatedFrame {
                remainder: 3,
                frame_bytes: 4
            }
        ));
    }

    #[test]
    fn test_read_to_end() {
        let data = le_bytes(&vec![100i16; 1001]);
        let mut reader = PcmReader::new(Cursor::new(data), PcmFormat::mono(8000)).unwrap();
        assert_eq!(reader.read_to_end(64).unwrap().len(), 1001);
    }

    #[test]
    fn test_rejects_bad_format() {
        assert!(PcmReader::new(Cursor::new(Vec::new()), PcmFormat::new(8000, 0)).is_err());
    }
}
