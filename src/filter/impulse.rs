//! Finite approximation of a filter's impulse response.
//!
//! An IIR filter rings forever in theory, but for a stable filter the ringing
//! decays geometrically and soon drops below any useful precision. The
//! estimator feeds a unit impulse through a fresh `DirectFormFilter` and keeps
//! the response up to the point where it has settled relative to its peak.

use tracing::{debug, warn};

use crate::config::ImpulseConfig;
use crate::error::{FilterError, FilterResult};
use crate::filter::iir::DirectFormFilter;
use crate::filter::spec::FilterSpec;
use crate::util::math;

/// A truncated impulse response and the tolerance it was truncated at.
#[derive(Clone, Debug, PartialEq)]
pub struct ImpulseResponse {
    taps: Vec<f64>,
    epsilon: f64,
    peak: f64,
}

impl ImpulseResponse {
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn into_taps(self) -> Vec<f64> {
        self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Always false, a truncated response keeps at least one tap.
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Largest magnitude seen in the response.
    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// Energy held in the kept taps.
    pub fn energy(&self) -> f64 {
        math::energy(&self.taps)
    }
}

/// Estimates the impulse response of `spec`, truncated according to
/// `config`.
///
/// Samples are generated until the response has stayed at or below
/// `epsilon * peak` for a run at least as long as both `config.settle_window`
/// and the part of the response kept so far (and at least `order + 1` samples
/// exist). Requiring the quiet run to match the kept length keeps a slow
/// oscillation from settling inside one of its zero crossings. The result is
/// cut right after the last sample above the threshold. Filters with no
/// feedback skip the simulation: their response is `b` itself with trailing
/// zeros dropped.
///
/// # Errors
///
/// * `InvalidArgument` for a non-positive or non-finite `epsilon`, or a zero
///   `max_length`/`settle_window`.
/// * `NonConvergent` when the response is still above the threshold at
///   `config.max_length` samples or grows without bound.
///
/// # Examples
///
/// ```
/// use iir_rs::config::ImpulseConfig;
/// use iir_rs::filter::impulse::estimate_impulse_response;
/// use iir_rs::filter::spec::FilterSpec;
///
/// let spec = FilterSpec::new(&[1.0], &[1.0, -0.5]).unwrap();
/// let config = ImpulseConfig::default().with_epsilon(1e-3);
/// let h = estimate_impulse_response(&spec, &config).unwrap();
///
/// // 0.5^9 is the last power of one half above 1e-3.
/// assert_eq!(h.len(), 10);
/// assert_eq!(h.taps()[3], 0.125);
/// ```
pub fn estimate_impulse_response(
    spec: &FilterSpec,
    config: &ImpulseConfig,
) -> FilterResult<ImpulseResponse> {
    config.validate()?;

    if spec.is_fir() {
        return Ok(fir_response(spec, config.epsilon));
    }

    let min_len = spec.order() + 1;
    let mut filter = DirectFormFilter::new(spec);
    let mut taps: Vec<f64> = Vec::with_capacity(config.max_length.min(4096));
    let mut peak = 0.0_f64;
    // Length of the response up to and including its last loud sample.
    let mut kept = 0;
    let mut quiet = 0;
    let mut sample = [1.0];
    let mut out = [0.0];

    loop {
        filter.process_into(&sample, &mut out)?;
        sample[0] = 0.0;

        let h = out[0];
        if !h.is_finite() {
            warn!(
                samples = taps.len(),
                "impulse response diverged, filter is unstable"
            );
            return Err(FilterError::NonConvergent {
                max_length: config.max_length,
            });
        }
        taps.push(h);

        peak = peak.max(h.abs());
        if h.abs() <= config.epsilon * peak {
            quiet += 1;
        } else if taps.len() > config.max_length {
            warn!(
                max_length = config.max_length,
                epsilon = config.epsilon,
                "impulse response did not settle"
            );
            return Err(FilterError::NonConvergent {
                max_length: config.max_length,
            });
        } else {
            quiet = 0;
            kept = taps.len();
        }

        if quiet >= config.settle_window.max(kept) && taps.len() >= min_len {
            break;
        }
    }

    let len = kept.max(1);
    taps.truncate(len);
    debug!(
        len,
        peak,
        epsilon = config.epsilon,
        "estimated impulse response"
    );
    Ok(ImpulseResponse {
        taps,
        epsilon: config.epsilon,
        peak,
    })
}

fn fir_response(spec: &FilterSpec, epsilon: f64) -> ImpulseResponse {
    let b = spec.b();
    let len = b.iter().rposition(|&x| x != 0.0).map_or(1, |i| i + 1);
    let taps = b[..len].to_vec();
    let peak = taps.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    debug!(len, "impulse response of FIR filter taken from coefficients");
    ImpulseResponse {
        taps,
        epsilon,
        peak,
    }
}
