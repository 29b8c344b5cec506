use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PcmError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("conversion failed: {0}")]
    Convert(#[from] samplerate_core::Error),

    #[error("stream ended inside a frame: {remainder} trailing bytes, frame is {frame_bytes} bytes")]
    TruncatedFrame { remainder: usize, frame_bytes: usize },

    #[error("{samples} samples do not split into frames of {channels} channels")]
    PartialFrame { samples: usize, channels: usize },

    #[error("invalid PCM format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, PcmError>;

impl From<PcmError> for io::Error {
    fn from(err: PcmError) -> Self {
        match err {
            PcmError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_passes_through() {
        let err: io::Error = PcmError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "gone")).into();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_other_errors_become_invalid_data() {
        let err: io::Error = PcmError::TruncatedFrame {
            remainder: 1,
            frame_bytes: 4,
        }
        .into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("1 trailing bytes"));
    }

    #[test]
    fn test_convert_error_message() {
        let err = PcmError::from(samplerate_core::Error::InvalidRatio(512.0));
        assert!(err.to_string().contains("Error code: 6"));
    }
}
