//! Filtering many independent channels with one set of coefficients.
//!
//! Every channel gets its own `DirectFormFilter`, and with it its own delay
//! line and output buffer. The only thing shared between channels is the
//! read-only `FilterSpec`, so channels are filtered on the rayon thread pool
//! without any locking.

use rayon::prelude::*;
use tracing::trace;

use crate::config::MultiChannelConfig;
use crate::error::{FilterError, FilterResult};
use crate::filter::iir::DirectFormFilter;
use crate::filter::spec::FilterSpec;
use crate::util::math;

/// Applies one IIR filter independently to each channel of a signal.
///
/// # Examples
///
/// ```
/// use iir_rs::config::MultiChannelConfig;
/// use iir_rs::filter::multi::MultiChannelFilter;
/// use iir_rs::filter::spec::FilterSpec;
///
/// let spec = FilterSpec::new(&[0.5, 0.5], &[1.0]).unwrap();
/// let filter = MultiChannelFilter::new(&spec, MultiChannelConfig::default());
///
/// let channels = vec![vec![2.0, 4.0, 6.0], vec![1.0, 0.0, -1.0]];
/// let output = filter.process(&channels).unwrap();
/// assert_eq!(output[0], vec![1.0, 3.0, 5.0]);
/// assert_eq!(output[1], vec![0.5, 0.5, -0.5]);
/// ```
#[derive(Clone, Debug)]
pub struct MultiChannelFilter<'a> {
    spec: &'a FilterSpec,
    config: MultiChannelConfig,
}

impl<'a> MultiChannelFilter<'a> {
    pub fn new(
        spec: &'a FilterSpec,
        config: MultiChannelConfig,
    ) -> MultiChannelFilter<'a> {
        MultiChannelFilter { spec, config }
    }

    pub fn spec(&self) -> &FilterSpec {
        self.spec
    }

    /// Filters each channel of `channels` from a zero initial state.
    ///
    /// All channels must have the same length, otherwise
    /// `FilterError::InvalidArgument` is returned. A NaN or infinite sample
    /// in any channel gives `FilterError::InvalidInput` naming the channel.
    /// Both checks run before any filtering, so no partial result is ever
    /// produced.
    pub fn process(
        &self,
        channels: &[Vec<f64>],
    ) -> FilterResult<Vec<Vec<f64>>> {
        let len = match channels.first() {
            Some(first) => first.len(),
            None => return Ok(Vec::new()),
        };
        for (ch, channel) in channels.iter().enumerate() {
            if channel.len() != len {
                return Err(FilterError::InvalidArgument(format!(
                    "channel {} has {} samples, channel 0 has {}",
                    ch,
                    channel.len(),
                    len
                )));
            }
            math::check_finite(channel, Some(ch))?;
        }

        trace!(
            channels = channels.len(),
            samples = len,
            parallel = self.config.parallel,
            "filtering multi-channel signal"
        );

        let spec = self.spec;
        let filter_channel = |channel: &Vec<f64>| -> FilterResult<Vec<f64>> {
            DirectFormFilter::new(spec).process(channel)
        };

        if self.config.parallel {
            channels.par_iter().map(filter_channel).collect()
        } else {
            channels.iter().map(filter_channel).collect()
        }
    }
}

#[cfg(test)]
mod test {
    use crate::config::MultiChannelConfig;
    use crate::error::FilterError;
    use crate::filter::iir::DirectFormFilter;
    use crate::filter::multi::MultiChannelFilter;
    use crate::filter::spec::FilterSpec;

    fn test_spec() -> FilterSpec {
        // 5th order Butterworth low pass, fc = 1 kHz, fs = 10 kHz.
        FilterSpec::new(
            &[
                0.0012825810789606849,
                0.006412905394803424,
                0.012825810789606849,
                0.012825810789606849,
                0.006412905394803424,
                0.0012825810789606849,
            ],
            &[
                1.0,
                -2.9754221097456828,
                3.8060181193204103,
                -2.5452528683304663,
                0.8811300754378364,
                -0.1254306221553556,
            ],
        )
        .unwrap()
    }

    fn channels(count: usize, len: usize) -> Vec<Vec<f64>> {
        (0..count)
            .map(|ch| {
                (0..len)
                    .map(|i| ((i * (ch + 3)) % 17) as f64 - 8.0 + ch as f64)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_each_channel_matches_single_filter() {
        let spec = test_spec();
        let x = channels(8, 500);
        for &parallel in &[true, false] {
            let config = MultiChannelConfig::default().with_parallel(parallel);
            let output =
                MultiChannelFilter::new(&spec, config).process(&x).unwrap();
            assert_eq!(output.len(), x.len());
            for (ch, out) in output.iter().enumerate() {
                let alone =
                    DirectFormFilter::new(&spec).process(&x[ch]).unwrap();
                assert_eq!(out, &alone);
            }
        }
    }

    #[test]
    fn test_channel_order_does_not_matter() {
        let spec = test_spec();
        let x = channels(5, 200);
        let mut reversed = x.clone();
        reversed.reverse();

        let filter =
            MultiChannelFilter::new(&spec, MultiChannelConfig::default());
        let forward = filter.process(&x).unwrap();
        let mut backward = filter.process(&reversed).unwrap();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_empty_inputs() {
        let spec = test_spec();
        let filter =
            MultiChannelFilter::new(&spec, MultiChannelConfig::default());
        assert!(filter.process(&[]).unwrap().is_empty());

        let output = filter.process(&[vec![], vec![]]).unwrap();
        assert_eq!(output, vec![Vec::<f64>::new(), Vec::new()]);
    }

    #[test]
    fn test_rejects_ragged_channels() {
        let spec = test_spec();
        let filter =
            MultiChannelFilter::new(&spec, MultiChannelConfig::default());
        let x = vec![vec![0.0; 10], vec![0.0; 10], vec![0.0; 9]];
        match filter.process(&x) {
            Err(FilterError::InvalidArgument(_)) => (),
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_finite_sample() {
        let spec = test_spec();
        let filter =
            MultiChannelFilter::new(&spec, MultiChannelConfig::default());
        let mut x = channels(4, 50);
        x[2][7] = std::f64::NEG_INFINITY;
        assert_eq!(
            filter.process(&x),
            Err(FilterError::InvalidInput {
                channel: Some(2),
                index: 7
            })
        );
    }
}
