//! Error types and the kernel error-code table
//!
//! Numeric codes follow libsamplerate's numbering so that codes reported by
//! `Converter::error_no` mean the same thing to callers used to that library.

use thiserror::Error;

/// Numeric error code reported by a converter or its kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    pub const NO_ERROR: ErrorCode = ErrorCode(0);
    pub const MALLOC_FAILED: ErrorCode = ErrorCode(1);
    pub const BAD_STATE: ErrorCode = ErrorCode(2);
    pub const BAD_DATA: ErrorCode = ErrorCode(3);
    pub const BAD_DATA_PTR: ErrorCode = ErrorCode(4);
    pub const NO_PRIVATE: ErrorCode = ErrorCode(5);
    pub const BAD_SRC_RATIO: ErrorCode = ErrorCode(6);
    pub const BAD_PROC_PTR: ErrorCode = ErrorCode(7);
    pub const SHIFT_BITS: ErrorCode = ErrorCode(8);
    pub const FILTER_LEN: ErrorCode = ErrorCode(9);
    pub const BAD_CONVERTER: ErrorCode = ErrorCode(10);
    pub const BAD_CHANNEL_COUNT: ErrorCode = ErrorCode(11);
    pub const SINC_BAD_BUFFER_LEN: ErrorCode = ErrorCode(12);
    pub const SIZE_INCOMPATIBILITY: ErrorCode = ErrorCode(13);
    pub const BAD_PRIV_PTR: ErrorCode = ErrorCode(14);
    pub const BAD_SINC_STATE: ErrorCode = ErrorCode(15);
    pub const DATA_OVERLAP: ErrorCode = ErrorCode(16);
    pub const BAD_CALLBACK: ErrorCode = ErrorCode(17);
    pub const BAD_MODE: ErrorCode = ErrorCode(18);
    pub const NULL_CALLBACK: ErrorCode = ErrorCode(19);
    pub const NO_VARIABLE_RATIO: ErrorCode = ErrorCode(20);
    pub const SINC_PREPARE_DATA_BAD_LEN: ErrorCode = ErrorCode(21);
    pub const BAD_INTERNAL_STATE: ErrorCode = ErrorCode(22);

    pub fn is_error(self) -> bool {
        self != Self::NO_ERROR
    }

    pub fn message(self) -> &'static str {
        error_message(self.0)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

const MESSAGES: [&str; 23] = [
    "No error.",
    "Malloc failed.",
    "SRC_STATE pointer is NULL.",
    "SRC_DATA pointer is NULL.",
    "SRC_DATA->data_out or SRC_DATA->data_in is NULL.",
    "Internal error. No private data.",
    "SRC ratio outside [1/256, 256] range.",
    "Internal error. No process pointer.",
    "Internal error. SHIFT_BITS too large.",
    "Internal error. Filter length too large.",
    "Bad converter number.",
    "Channel count must be >= 1.",
    "Internal error. Bad buffer length. Please report this.",
    "Internal error. Input data / internal buffer size difference. Please report this.",
    "Internal error. Private pointer is NULL. Please report this.",
    "src_process() called without reset after end_of_input.",
    "Input and output data arrays overlap.",
    "Supplied callback function pointer is NULL.",
    "Calling mode differs from initialisation mode (ie process v callback).",
    "Callback function pointer is NULL in src_callback_read ().",
    "This converter only allows constant conversion ratios.",
    "Internal error : Bad length in prepare_data ().",
    "Error : Someone is trampling on my internal state.",
];

const UNKNOWN_MESSAGE: &str = "Placeholder. No error defined for this error number.";

/// Map a numeric error code to its message
pub fn error_message(code: i32) -> &'static str {
    usize::try_from(code)
        .ok()
        .and_then(|idx| MESSAGES.get(idx).copied())
        .unwrap_or(UNKNOWN_MESSAGE)
}

/// Errors raised by the conversion engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Catalog lookup with an id outside the five known algorithms
    #[error("unknown samplerate converter")]
    UnknownAlgorithm(i32),

    #[error("Error code: 6; SRC ratio outside [1/256, 256] range.")]
    InvalidRatio(f64),

    #[error("buffer length mismatch: input has {input} samples, output has room for {output}")]
    LengthMismatch { input: usize, output: usize },

    #[error("byte buffer of length {0} does not hold whole 16-bit samples")]
    OddByteLength(usize),

    #[error("data slice of {len} samples is not a whole number of {channels}-channel frames")]
    ChannelMismatch { len: usize, channels: usize },

    #[error("data slice is larger than buffer: {frames} frames exceeds capacity of {capacity}")]
    BufferTooLarge { frames: usize, capacity: usize },

    #[error("Error code: {code}; {message}")]
    Kernel { code: ErrorCode, message: &'static str },

    #[error("Could not initialize samplerate converter object: {message}")]
    InitFailure { code: ErrorCode, message: &'static str },

    #[error("samplerate converter has been destroyed")]
    InvalidConverter,

    #[error("samplerate converter teardown failed: {0}")]
    TeardownFailure(String),

    #[error("invalid converter configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn kernel(code: ErrorCode) -> Self {
        Error::Kernel { code, message: code.message() }
    }

    pub fn init_failure(code: ErrorCode) -> Self {
        Error::InitFailure { code, message: code.message() }
    }

    /// Numeric code carried by the error, if it has one
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::InvalidRatio(_) => Some(ErrorCode::BAD_SRC_RATIO),
            Error::Kernel { code, .. } | Error::InitFailure { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
