//! Implementation of an infinite impulse response (IIR) filter.
//!
//! The recursion
//!
//! ```text
//! y[n] = b[0] x[n] + ... + b[N] x[n-N] - a[1] y[n-1] - ... - a[N] y[n-N]
//! ```
//!
//! is evaluated in transposed direct form II, which needs a delay line of
//! only `N` values and `O(N)` work per sample. Initial state is all zeros
//! unless provided by the caller.

use crate::error::{FilterError, FilterResult};
use crate::filter::spec::FilterSpec;
use crate::util::math;

/// Delay line of a transposed direct form II filter.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterState {
    z: Vec<f64>,
}

impl FilterState {
    /// Zeroed state for a filter of the given `order`.
    pub fn zeros(order: usize) -> FilterState {
        FilterState {
            z: vec![0.0; order],
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.z
    }

    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    pub fn reset(&mut self) {
        for v in self.z.iter_mut() {
            *v = 0.0;
        }
    }
}

/// Runs a batch of samples through the transposed direct form II recursion.
///
/// This is the inner loop shared by every filter in the crate. It does no
/// validation: `b` and `a` must be the same length `n` with `a[0] == 1`,
/// `state` must hold `n - 1` values and `output` must be as long as `input`.
///
/// # Arguments
///
/// * `input` - Input batch of samples to be filtered.
/// * `b` - Feed-forward coefficients, zero padded.
/// * `a` - Normalized feedback coefficients, zero padded.
/// * `state` - Delay line, updated in place.
/// * `output` - Filtered samples are written here.
///
/// # Examples
///
/// ```
/// use iir_rs::filter::iir::lfilter_df2t;
///
/// // One pole smoother: y[n] = 0.5 x[n] + 0.5 y[n-1]
/// let b = [0.5, 0.0];
/// let a = [1.0, -0.5];
/// let mut state = vec![0.0];
/// let mut output = vec![0.0; 3];
///
/// lfilter_df2t(&[1.0, 1.0, 1.0], &b, &a, &mut state, &mut output);
/// assert_eq!(output, vec![0.5, 0.75, 0.875]);
/// ```
pub fn lfilter_df2t(
    input: &[f64],
    b: &[f64],
    a: &[f64],
    state: &mut [f64],
    output: &mut [f64],
) {
    debug_assert_eq!(b.len(), a.len());
    debug_assert_eq!(state.len() + 1, b.len());
    debug_assert_eq!(input.len(), output.len());

    let n = b.len();
    if n == 1 {
        for (y, x) in output.iter_mut().zip(input) {
            *y = b[0] * x;
        }
        return;
    }

    for (y, &x) in output.iter_mut().zip(input) {
        let out = b[0] * x + state[0];
        for i in 0..n - 2 {
            state[i] = b[i + 1] * x + state[i + 1] - a[i + 1] * out;
        }
        state[n - 2] = b[n - 1] * x - a[n - 1] * out;
        *y = out;
    }
}

/// A single-channel IIR filter that keeps its delay line between calls.
///
/// Feeding a signal through `process` in several consecutive blocks gives
/// exactly the same result as feeding it in one call. Use `reset` to start
/// an unrelated signal.
///
/// # Examples
///
/// ```
/// use iir_rs::filter::iir::DirectFormFilter;
/// use iir_rs::filter::spec::FilterSpec;
///
/// let spec = FilterSpec::new(&[0.5], &[1.0, -0.5]).unwrap();
/// let mut filter = DirectFormFilter::new(&spec);
///
/// let first = filter.process(&[1.0, 0.0]).unwrap();
/// let second = filter.process(&[0.0]).unwrap();
/// assert_eq!(first, vec![0.5, 0.25]);
/// assert_eq!(second, vec![0.125]);
/// ```
#[derive(Clone, Debug)]
pub struct DirectFormFilter<'a> {
    spec: &'a FilterSpec,
    state: FilterState,
}

impl<'a> DirectFormFilter<'a> {
    /// Constructs a new `DirectFormFilter` with initial state set to zeros.
    pub fn new(spec: &'a FilterSpec) -> DirectFormFilter<'a> {
        DirectFormFilter {
            spec,
            state: FilterState::zeros(spec.order()),
        }
    }

    /// Constructs a new `DirectFormFilter` with user defined initial state.
    ///
    /// # Arguments
    ///
    /// * `spec` - Filter coefficients.
    /// * `state` - Initial delay line, `spec.order()` values long.
    pub fn with_state(
        spec: &'a FilterSpec,
        state: Vec<f64>,
    ) -> FilterResult<DirectFormFilter<'a>> {
        if state.len() != spec.order() {
            return Err(FilterError::InvalidArgument(format!(
                "initial state has {} values, filter of order {} needs {}",
                state.len(),
                spec.order(),
                spec.order()
            )));
        }
        math::check_finite(&state, None)?;
        Ok(DirectFormFilter {
            spec,
            state: FilterState { z: state },
        })
    }

    pub fn spec(&self) -> &FilterSpec {
        self.spec
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Clears the delay line, so the next call starts a fresh signal.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Filters `input`, continuing from the current state.
    ///
    /// Returns `FilterError::InvalidInput` if any sample is NaN or infinite;
    /// in that case the state is left untouched.
    pub fn process(&mut self, input: &[f64]) -> FilterResult<Vec<f64>> {
        let mut output = vec![0.0; input.len()];
        self.process_into(input, &mut output)?;
        Ok(output)
    }

    /// Same as `process`, but writes into a caller provided buffer of the
    /// same length as `input`.
    pub fn process_into(
        &mut self,
        input: &[f64],
        output: &mut [f64],
    ) -> FilterResult<()> {
        if input.len() != output.len() {
            return Err(FilterError::InvalidArgument(format!(
                "output buffer holds {} samples, input has {}",
                output.len(),
                input.len()
            )));
        }
        math::check_finite(input, None)?;
        let (b, a) = self.spec.padded();
        lfilter_df2t(input, b, a, &mut self.state.z, output);
        Ok(())
    }
}
