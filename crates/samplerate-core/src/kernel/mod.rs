//! Interpolation kernels
//!
//! A kernel owns the interpolation history of one stream and turns chunks of
//! interleaved input frames into output frames. The converter validates every
//! argument before a kernel sees it; kernels only report internal faults.

mod libsamplerate;

pub use libsamplerate::SrcKernel;

use crate::algorithm::Algorithm;
use crate::error::ErrorCode;
use crate::ratio::is_valid_ratio;

/// Ratios closer than this are treated as equal
pub const MIN_RATIO_DIFF: f64 = 1e-20;

/// Resampling capability behind a converter
pub trait Kernel: Send {
    /// Convert the frames in `input` and return the output frames
    ///
    /// With `end_of_input` set the kernel emits every frame it can derive from
    /// the data seen so far instead of holding part of it back.
    fn process(
        &mut self,
        input: &[f32],
        ramp: &RatioRamp,
        end_of_input: bool,
    ) -> Result<Vec<f32>, ErrorCode>;

    /// Return to the freshly created state
    fn reset(&mut self) -> Result<(), ErrorCode>;

    /// Stage the ratio the next call converts at
    fn set_ratio(&mut self, ratio: f64);

    fn channels(&self) -> usize;
}

/// Build the kernel for an algorithm
pub fn create(algorithm: Algorithm, channels: usize) -> Result<Box<dyn Kernel>, ErrorCode> {
    Ok(Box::new(SrcKernel::new(algorithm, channels)?))
}

/// Ratio schedule for one process call
///
/// The kernel moves from `start`, the ratio its previous call ended on, to
/// `target` across the call's output buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioRamp {
    start: f64,
    target: f64,
}

impl RatioRamp {
    pub fn constant(ratio: f64) -> Self {
        Self {
            start: ratio,
            target: ratio,
        }
    }

    pub fn new(start: f64, target: f64) -> Self {
        Self { start, target }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_constant(&self) -> bool {
        (self.target - self.start).abs() <= MIN_RATIO_DIFF
    }

    pub(crate) fn check(&self) -> Result<(), ErrorCode> {
        if is_valid_ratio(self.start) && is_valid_ratio(self.target) {
            Ok(())
        } else {
            Err(ErrorCode::BAD_INTERNAL_STATE)
        }
    }
}
