//! Exact and FFT-accelerated IIR filtering.
//!
//! Three entry points cover the common cases:
//!
//! * [`lfilter`] runs the filter recursion directly on one signal.
//! * [`fft_filter`] convolves one signal with the filter's truncated impulse
//!   response in the frequency domain, which is faster for long signals.
//! * [`lfilter_multi`] filters many independent channels in parallel.
//!
//! Each of them validates the coefficients into a [`filter::spec::FilterSpec`]
//! first. Callers that filter repeatedly with the same coefficients can build
//! the spec once and use the filter types directly.
//!
//! ```
//! let b = [0.06745527388907191, 0.13491054777814382, 0.06745527388907191];
//! let a = [1.0, -1.142980502539901, 0.41280159809618855];
//! let x: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.3).sin()).collect();
//!
//! let exact = iir_rs::lfilter(&b, &a, &x).unwrap();
//! let fast = iir_rs::fft_filter(&b, &a, &x, 1e-9).unwrap();
//! for (e, f) in exact.iter().zip(fast.iter()) {
//!     assert!((e - f).abs() < 1e-6);
//! }
//! ```

pub mod config;
pub mod error;
pub mod fft;
pub mod filter;
pub mod prelude;
pub mod util;

use crate::config::{FftFilterConfig, MultiChannelConfig};
use crate::error::FilterResult;
use crate::fft::convolve::FastConvolutionFilter;
use crate::filter::iir::DirectFormFilter;
use crate::filter::multi::MultiChannelFilter;
use crate::filter::spec::FilterSpec;

/// Filters `x` with the IIR filter `b`/`a`, starting from a zero state.
///
/// The output has the same length as `x`.
pub fn lfilter(b: &[f64], a: &[f64], x: &[f64]) -> FilterResult<Vec<f64>> {
    let spec = FilterSpec::new(b, a)?;
    DirectFormFilter::new(&spec).process(x)
}

/// Approximates `lfilter(b, a, x)` by FFT convolution with the impulse
/// response of `b`/`a` truncated at tolerance `epsilon`.
///
/// The impulse response length is capped at
/// [`config::DEFAULT_MAX_LENGTH`]; use [`fft_filter_with_config`] to change
/// it.
pub fn fft_filter(
    b: &[f64],
    a: &[f64],
    x: &[f64],
    epsilon: f64,
) -> FilterResult<Vec<f64>> {
    let config = FftFilterConfig::default().with_epsilon(epsilon);
    fft_filter_with_config(b, a, x, &config)
}

/// Same as [`fft_filter`], with every tunable taken from `config`.
pub fn fft_filter_with_config(
    b: &[f64],
    a: &[f64],
    x: &[f64],
    config: &FftFilterConfig,
) -> FilterResult<Vec<f64>> {
    let spec = FilterSpec::new(b, a)?;
    FastConvolutionFilter::new(&spec, config)?.process(x)
}

/// Filters every channel of `x` independently with `b`/`a`.
///
/// `x` is channel-major and every channel must have the same length.
pub fn lfilter_multi(
    b: &[f64],
    a: &[f64],
    x: &[Vec<f64>],
) -> FilterResult<Vec<Vec<f64>>> {
    let spec = FilterSpec::new(b, a)?;
    MultiChannelFilter::new(&spec, MultiChannelConfig::default()).process(x)
}
