//! This module provides an easy single import for those using this crate.

pub use crate::config::{FftFilterConfig, ImpulseConfig, MultiChannelConfig};
pub use crate::error::{FilterError, FilterResult};
pub use crate::fft::convolve::FastConvolutionFilter;
pub use crate::filter::iir::{DirectFormFilter, FilterState};
pub use crate::filter::impulse::{estimate_impulse_response, ImpulseResponse};
pub use crate::filter::multi::MultiChannelFilter;
pub use crate::filter::spec::FilterSpec;
pub use crate::{fft_filter, fft_filter_with_config, lfilter, lfilter_multi};
