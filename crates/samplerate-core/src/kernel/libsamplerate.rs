//! Kernel backed by libsamplerate through the `samplerate` crate

use super::{Kernel, RatioRamp};
use crate::algorithm::Algorithm;
use crate::error::ErrorCode;
use samplerate::{ConverterType, Samplerate};

/// Largest rate denominator used to express a ratio as a rate pair
const MAX_RATE_DEN: u64 = 1 << 20;

/// Owns the libsamplerate state for one stream
struct State(Samplerate);

// The state is only touched through `&mut SrcKernel`, so it never crosses
// threads while in use.
unsafe impl Send for State {}

pub struct SrcKernel {
    state: State,
    channels: usize,
    sinc: bool,
    /// Set after an end-of-input call until the next reset
    ended: bool,
}

impl SrcKernel {
    pub fn new(algorithm: Algorithm, channels: usize) -> Result<Self, ErrorCode> {
        let state = Samplerate::new(converter_type(algorithm), 1, 1, channels).map_err(map_err)?;
        Ok(Self {
            state: State(state),
            channels,
            sinc: algorithm.is_sinc(),
            ended: false,
        })
    }

    fn apply_ratio(&mut self, ratio: f64) {
        let (from, to) = rate_pair(ratio);
        if self.state.0.from_rate() != from || self.state.0.to_rate() != to {
            log::trace!("Kernel rates {} -> {} for ratio {:.6}", from, to, ratio);
            self.state.0.set_from_rate(from);
            self.state.0.set_to_rate(to);
        }
    }
}

impl Kernel for SrcKernel {
    fn process(
        &mut self,
        input: &[f32],
        ramp: &RatioRamp,
        end_of_input: bool,
    ) -> Result<Vec<f32>, ErrorCode> {
        ramp.check()?;
        if self.sinc && self.ended {
            return Err(ErrorCode::BAD_SINC_STATE);
        }

        // libsamplerate ramps from the ratio of its previous call on its own
        self.apply_ratio(ramp.target());

        let output = if end_of_input {
            self.ended = true;
            self.state.0.process_last(input)
        } else {
            self.state.0.process(input)
        };
        output.map_err(map_err)
    }

    fn reset(&mut self) -> Result<(), ErrorCode> {
        self.ended = false;
        self.state.0.reset().map_err(map_err)
    }

    fn set_ratio(&mut self, ratio: f64) {
        self.apply_ratio(ratio);
    }

    fn channels(&self) -> usize {
        self.channels
    }
}

fn converter_type(algorithm: Algorithm) -> ConverterType {
    match algorithm {
        Algorithm::SincBest => ConverterType::SincBestQuality,
        Algorithm::SincMedium => ConverterType::SincMediumQuality,
        Algorithm::SincFastest => ConverterType::SincFastest,
        Algorithm::ZeroOrderHold => ConverterType::ZeroOrderHold,
        Algorithm::Linear => ConverterType::Linear,
    }
}

fn map_err(err: samplerate::Error) -> ErrorCode {
    ErrorCode(err.code() as i32)
}

/// Express `ratio` as `(from_rate, to_rate)` with `to_rate / from_rate == ratio`
///
/// Walks the continued fraction of `ratio` and keeps the last convergent whose
/// denominator stays within `MAX_RATE_DEN`.
pub(crate) fn rate_pair(ratio: f64) -> (u32, u32) {
    let (mut h_prev, mut h) = (0u64, 1u64);
    let (mut k_prev, mut k) = (1u64, 0u64);
    let mut x = ratio;

    loop {
        let a = x.floor();
        let whole = a as u64;
        let h_next = whole.saturating_mul(h).saturating_add(h_prev);
        let k_next = whole.saturating_mul(k).saturating_add(k_prev);
        if k_next > MAX_RATE_DEN || h_next > u32::MAX as u64 {
            break;
        }
        (h_prev, h) = (h, h_next);
        (k_prev, k) = (k, k_next);

        let frac = x - a;
        if h != 0 && h as f64 / k as f64 == ratio || frac <= f64::EPSILON {
            break;
        }
        x = 1.0 / frac;
    }

    if h == 0 || k == 0 {
        let den = MAX_RATE_DEN as f64;
        return (den as u32, (ratio * den).round().max(1.0) as u32);
    }
    (k as u32, h as u32)
}
