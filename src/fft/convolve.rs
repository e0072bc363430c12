//! FFT-accelerated approximation of an IIR filter.
//!
//! The filter's impulse response is truncated once it has decayed below a
//! tolerance, and the signal is convolved with that kernel block by block in
//! the frequency domain (overlap-add). Each block of `B` input samples is
//! zero padded to a transform of `N >= B + L - 1` points, so the circular
//! convolution of the block with the `L` tap kernel equals the linear one.
//! The `L - 1` samples every block spills past its end are added into the
//! following block's region, and whatever spills past the end of the input is
//! carried into the next call.

use rayon::prelude::*;
use rustfft::num_complex::Complex;
use tracing::debug;

use crate::config::{FftFilterConfig, MIN_FFT_SIZE};
use crate::error::FilterResult;
use crate::fft::BatchFFT;
use crate::filter::impulse::{estimate_impulse_response, ImpulseResponse};
use crate::filter::spec::FilterSpec;
use crate::util::math;

/// Overlap-add FFT filter built from a truncated impulse response.
///
/// Like `DirectFormFilter`, the filter keeps state between calls: feeding a
/// signal in several consecutive blocks gives the same result as a single
/// call, up to floating point rounding.
///
/// # Examples
///
/// ```
/// use iir_rs::config::FftFilterConfig;
/// use iir_rs::fft::convolve::FastConvolutionFilter;
/// use iir_rs::filter::spec::FilterSpec;
///
/// let spec = FilterSpec::new(&[0.5], &[1.0, -0.5]).unwrap();
/// let config = FftFilterConfig::default().with_epsilon(1e-9);
/// let mut filter = FastConvolutionFilter::new(&spec, &config).unwrap();
///
/// let output = filter.process(&[1.0, 0.0, 0.0]).unwrap();
/// assert!((output[0] - 0.5).abs() < 1e-12);
/// assert!((output[1] - 0.25).abs() < 1e-12);
/// assert!((output[2] - 0.125).abs() < 1e-12);
/// ```
pub struct FastConvolutionFilter {
    kernel: ImpulseResponse,
    spectrum: Vec<Complex<f64>>,
    fft: BatchFFT,
    ifft: BatchFFT,
    block_size: usize,
    parallel: bool,
    // Convolution output that spilled past the end of the last input.
    tail: Vec<f64>,
}

impl FastConvolutionFilter {
    /// Estimates the truncated impulse response of `spec` and plans the
    /// transforms used to convolve with it.
    ///
    /// Fails with `InvalidArgument` or `NonConvergent` under the same
    /// conditions as `estimate_impulse_response`.
    pub fn new(
        spec: &FilterSpec,
        config: &FftFilterConfig,
    ) -> FilterResult<FastConvolutionFilter> {
        config.validate()?;
        let kernel = estimate_impulse_response(spec, &config.impulse)?;
        Ok(FastConvolutionFilter::from_impulse_response(
            kernel,
            config.parallel,
        ))
    }

    /// Builds the filter around an already estimated kernel.
    pub fn from_impulse_response(
        kernel: ImpulseResponse,
        parallel: bool,
    ) -> FastConvolutionFilter {
        let len = kernel.len();
        let fft_size = (2 * len).next_power_of_two().max(MIN_FFT_SIZE);
        let block_size = fft_size - len + 1;

        let fft = BatchFFT::new(fft_size, false);
        let ifft = BatchFFT::new(fft_size, true);
        let spectrum = fft.run_real(kernel.taps());

        debug!(
            kernel_len = len,
            fft_size, block_size, parallel, "planned fast convolution filter"
        );

        FastConvolutionFilter {
            kernel,
            spectrum,
            fft,
            ifft,
            block_size,
            parallel,
            tail: vec![0.0; len - 1],
        }
    }

    pub fn kernel(&self) -> &ImpulseResponse {
        &self.kernel
    }

    pub fn fft_size(&self) -> usize {
        self.fft.fft_size()
    }

    /// Number of input samples convolved per transform.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Drops the carried convolution tail, so the next call starts a fresh
    /// signal.
    pub fn reset(&mut self) {
        for v in self.tail.iter_mut() {
            *v = 0.0;
        }
    }

    /// Filters `input`, continuing from the tail left by the previous call.
    ///
    /// Returns `FilterError::InvalidInput` if any sample is NaN or infinite;
    /// in that case the carried tail is left untouched.
    pub fn process(&mut self, input: &[f64]) -> FilterResult<Vec<f64>> {
        math::check_finite(input, None)?;

        let fft_size = self.fft_size();
        let this = &*self;
        let blocks: Vec<Vec<f64>> = if this.parallel {
            input
                .par_chunks(this.block_size)
                .map(|block| this.convolve_block(block))
                .collect()
        } else {
            input
                .chunks(this.block_size)
                .map(|block| this.convolve_block(block))
                .collect()
        };

        // Full linear convolution of this call, plus the previous tail.
        let mut full = vec![0.0; input.len() + self.tail.len()];
        for (v, t) in full.iter_mut().zip(self.tail.iter()) {
            *v += t;
        }
        for (i, block) in blocks.iter().enumerate() {
            let start = i * self.block_size;
            let end = (start + fft_size).min(full.len());
            for (v, b) in full[start..end].iter_mut().zip(block.iter()) {
                *v += b;
            }
        }

        self.tail = full.split_off(input.len());
        Ok(full)
    }

    // Linear convolution of one block with the kernel, `fft_size` samples.
    fn convolve_block(&self, block: &[f64]) -> Vec<f64> {
        let mut spectrum = self.fft.run_real(block);
        for (s, h) in spectrum.iter_mut().zip(self.spectrum.iter()) {
            *s = *s * *h;
        }
        let scale = 1.0 / self.fft_size() as f64;
        self.ifft
            .run_fft(&spectrum)
            .iter()
            .map(|x| x.re * scale)
            .collect()
    }
}
