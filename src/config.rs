//! Tunable parameters for the fast-convolution and multi-channel paths.
//!
//! All configuration types implement `Default` and derive serde's
//! `Serialize`/`Deserialize`, so they can be embedded in an application's own
//! configuration file. Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};

/// Default impulse response truncation tolerance.
pub const DEFAULT_EPSILON: f64 = 1e-12;
/// Default hard cap on the kept impulse response length.
pub const DEFAULT_MAX_LENGTH: usize = 10_000;
/// Default number of consecutive quiet samples required before the impulse
/// response is considered settled.
pub const DEFAULT_SETTLE_WINDOW: usize = 64;
/// Smallest transform used by the fast-convolution filter.
pub const MIN_FFT_SIZE: usize = 64;

/// Controls how an impulse response is truncated.
///
/// The estimator tracks the running peak magnitude `P` of the response and
/// stops once the samples at most `epsilon * P` form a run as long as both
/// `settle_window` and the response kept so far. The response is then cut
/// right after the last sample that exceeded that threshold. A sample above
/// the threshold past `max_length` fails the estimate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpulseConfig {
    pub epsilon: f64,
    pub max_length: usize,
    pub settle_window: usize,
}

impl Default for ImpulseConfig {
    fn default() -> Self {
        ImpulseConfig {
            epsilon: DEFAULT_EPSILON,
            max_length: DEFAULT_MAX_LENGTH,
            settle_window: DEFAULT_SETTLE_WINDOW,
        }
    }
}

impl ImpulseConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_settle_window(mut self, settle_window: usize) -> Self {
        self.settle_window = settle_window;
        self
    }

    /// Checks that the tolerance is a positive finite number and that the
    /// length bounds are non-zero.
    pub fn validate(&self) -> FilterResult<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(FilterError::InvalidArgument(format!(
                "epsilon must be positive and finite, got {}",
                self.epsilon
            )));
        }
        if self.max_length == 0 {
            return Err(FilterError::InvalidArgument(
                "max_length must be at least 1".to_string(),
            ));
        }
        if self.settle_window == 0 {
            return Err(FilterError::InvalidArgument(
                "settle_window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration of a `FastConvolutionFilter`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FftFilterConfig {
    pub impulse: ImpulseConfig,
    /// Transform blocks on the rayon thread pool.
    pub parallel: bool,
}

impl Default for FftFilterConfig {
    fn default() -> Self {
        FftFilterConfig {
            impulse: ImpulseConfig::default(),
            parallel: true,
        }
    }
}

impl FftFilterConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.impulse.epsilon = epsilon;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.impulse.max_length = max_length;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> FilterResult<()> {
        self.impulse.validate()
    }
}

/// Configuration of a `MultiChannelFilter`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiChannelConfig {
    /// Filter channels on the rayon thread pool.
    pub parallel: bool,
}

impl Default for MultiChannelConfig {
    fn default() -> Self {
        MultiChannelConfig { parallel: true }
    }
}

impl MultiChannelConfig {
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod test {
    use crate::config::*;
    use crate::error::FilterError;

    #[test]
    fn test_defaults() {
        let config = FftFilterConfig::default();
        assert_eq!(config.impulse.epsilon, 1e-12);
        assert_eq!(config.impulse.max_length, 10_000);
        assert_eq!(config.impulse.settle_window, 64);
        assert!(config.parallel);
        assert!(MultiChannelConfig::default().parallel);
    }

    #[test]
    fn test_validate_rejects_bad_epsilon() {
        for &eps in &[0.0, -1.0, std::f64::NAN, std::f64::INFINITY] {
            let config = ImpulseConfig::default().with_epsilon(eps);
            match config.validate() {
                Err(FilterError::InvalidArgument(_)) => (),
                other => panic!("epsilon {} gave {:?}", eps, other),
            }
        }
        assert!(ImpulseConfig::default().with_epsilon(1e-3).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_lengths() {
        assert!(ImpulseConfig::default()
            .with_max_length(0)
            .validate()
            .is_err());
        assert!(ImpulseConfig::default()
            .with_settle_window(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FftFilterConfig = serde_json::from_str(
            r#"{ "impulse": { "epsilon": 1e-6 }, "parallel": false }"#,
        )
        .unwrap();
        assert_eq!(config.impulse.epsilon, 1e-6);
        assert_eq!(config.impulse.max_length, DEFAULT_MAX_LENGTH);
        assert!(!config.parallel);
    }
}
