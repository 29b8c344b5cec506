//! Streaming converter
//!
//! A `Converter` is one resampling session. It owns the kernel history so
//! that consecutive `process` calls on chunks of a stream join up seamlessly.

use crate::algorithm::Algorithm;
use crate::config::ConverterConfig;
use crate::error::{Error, ErrorCode, Result};
use crate::kernel::{self, Kernel, RatioRamp};
use crate::ratio::is_valid_ratio;
use std::fmt;

pub struct Converter {
    algorithm: Algorithm,
    channels: usize,
    max_frames: usize,
    /// `None` once the converter has been deleted
    kernel: Option<Box<dyn Kernel>>,
    /// Ratio the kernel finished the previous call with
    last_ratio: Option<f64>,
    last_error: ErrorCode,
}

impl Converter {
    /// Create a converter for `channels` interleaved channels
    ///
    /// `max_frames` bounds the number of input frames accepted per
    /// `process` call.
    pub fn new(algorithm: Algorithm, channels: usize, max_frames: usize) -> Result<Self> {
        if channels == 0 {
            return Err(Error::init_failure(ErrorCode::BAD_CHANNEL_COUNT));
        }
        if max_frames == 0 {
            return Err(Error::InvalidConfig("max_frames must be > 0".to_string()));
        }

        log::debug!(
            "Creating {} converter: {} channels, {} frames per call",
            algorithm.name(),
            channels,
            max_frames
        );

        let kernel = kernel::create(algorithm, channels).map_err(Error::init_failure)?;

        Ok(Self {
            algorithm,
            channels,
            max_frames,
            kernel: Some(kernel),
            last_ratio: None,
            last_error: ErrorCode::NO_ERROR,
        })
    }

    /// Create a converter from a raw algorithm id
    pub fn from_id(id: i32, channels: usize, max_frames: usize) -> Result<Self> {
        let algorithm =
            Algorithm::from_id(id).map_err(|_| Error::init_failure(ErrorCode::BAD_CONVERTER))?;
        Self::new(algorithm, channels, max_frames)
    }

    pub fn from_config(config: &ConverterConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.algorithm, config.channels, config.max_frames)
    }

    /// Resample one chunk of interleaved samples at `ratio`
    ///
    /// Without `end_of_input` the kernel may hold back the tail of the chunk
    /// until more data arrives; with it the tail is flushed. Feeding a stream
    /// in chunks gives the same result as feeding it in one call.
    pub fn process(&mut self, input: &[f32], ratio: f64, end_of_input: bool) -> Result<Vec<f32>> {
        self.ensure_live()?;

        if !is_valid_ratio(ratio) {
            return Err(self.fail(Error::InvalidRatio(ratio)));
        }
        if input.len() % self.channels != 0 {
            return Err(self.fail(Error::ChannelMismatch {
                len: input.len(),
                channels: self.channels,
            }));
        }
        let frames = input.len() / self.channels;
        if frames > self.max_frames {
            return Err(self.fail(Error::BufferTooLarge {
                frames,
                capacity: self.max_frames,
            }));
        }

        let start = self.last_ratio.unwrap_or(ratio);
        let ramp = RatioRamp::new(start, ratio);
        if !ramp.is_constant() {
            log::debug!("Ramping ratio from {:.6} to {:.6}", start, ratio);
        }

        let kernel = self.kernel.as_mut().ok_or(Error::InvalidConverter)?;
        let output = match kernel.process(input, &ramp, end_of_input) {
            Ok(output) => output,
            Err(code) => {
                log::warn!("{} kernel failed: {}", self.algorithm.name(), code.message());
                return Err(self.fail(Error::kernel(code)));
            }
        };

        let generated = output.len() / self.channels;
        self.last_ratio = Some(ratio);

        log::trace!(
            "Processed {} frames at ratio {:.6} into {} frames (end_of_input: {})",
            frames,
            ratio,
            generated,
            end_of_input
        );

        Ok(output)
    }

    /// Validate and stage a new ratio
    ///
    /// A ratio that differs from the previous call's is reached by a linear
    /// ramp over the next call's output buffer. The first call after creation
    /// or reset converts at its ratio from the first frame.
    pub fn set_ratio(&mut self, ratio: f64) -> Result<()> {
        self.ensure_live()?;
        if !is_valid_ratio(ratio) {
            return Err(self.fail(Error::InvalidRatio(ratio)));
        }
        let kernel = self.kernel.as_mut().ok_or(Error::InvalidConverter)?;
        kernel.set_ratio(ratio);
        self.last_ratio = Some(ratio);
        Ok(())
    }

    /// Clear the interpolation history; the converter behaves as new
    pub fn reset(&mut self) -> Result<()> {
        let kernel = self.kernel.as_mut().ok_or(Error::InvalidConverter)?;
        if let Err(code) = kernel.reset() {
            return Err(self.fail(Error::kernel(code)));
        }
        self.last_ratio = None;
        self.last_error = ErrorCode::NO_ERROR;
        log::debug!("Reset {} converter", self.algorithm.name());
        Ok(())
    }

    pub fn channels(&self) -> Result<usize> {
        self.ensure_live()?;
        Ok(self.channels)
    }

    /// Last error code recorded by this converter (0 when none)
    pub fn error_no(&self) -> i32 {
        self.last_error.0
    }

    /// Release the interpolation history
    ///
    /// Every later call fails with `Error::InvalidConverter`. Dropping a
    /// converter releases the same resources.
    pub fn delete(&mut self) -> Result<()> {
        match self.kernel.take() {
            Some(_) => {
                log::debug!("Deleted {} converter", self.algorithm.name());
                Ok(())
            }
            None => Err(Error::TeardownFailure(
                "converter already destroyed".to_string(),
            )),
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.kernel.is_none()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    /// Ratio the previous `process` or `set_ratio` call left staged, if any
    pub fn current_ratio(&self) -> Option<f64> {
        self.last_ratio
    }

    fn ensure_live(&self) -> Result<()> {
        if self.kernel.is_none() {
            return Err(Error::InvalidConverter);
        }
        Ok(())
    }

    fn fail(&mut self, err: Error) -> Error {
        if let Some(code) = err.code() {
            self.last_error = code;
        }
        err
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("algorithm", &self.algorithm)
            .field("channels", &self.channels)
            .field("max_frames", &self.max_frames)
            .field("destroyed", &self.is_destroyed())
            .field("last_ratio", &self.last_ratio)
            .field("last_error", &self.last_error)
            .finish()
    }
}
