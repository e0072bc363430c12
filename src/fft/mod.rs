//! FFT helpers and FFT-based filtering.

pub mod convolve;

use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::{FFTplanner, FFT};
use std::sync::Arc;

/// Batch based wrapper of FFT implementation provided by
/// [RustFFT](https://github.com/awelkie/RustFFT).
///
/// Acts on a batch of `fft_size` samples at a time. The plan is shared behind
/// an `Arc`, so a `BatchFFT` can be used from several threads at once.
#[derive(Clone)]
pub struct BatchFFT {
    fft: Arc<dyn FFT<f64>>,
    fft_size: usize,
    inverse: bool,
}

impl BatchFFT {
    /// Creates a new `BatchFFT`, planning a transform of `fft_size` points.
    ///
    /// # Arguments
    ///
    /// * `fft_size` - Size of the FFT to be performed.
    /// * `inverse` - Plan an inverse transform instead of a forward one.
    ///
    /// # Examples
    ///
    /// ```
    /// use iir_rs::fft::BatchFFT;
    ///
    /// let batch_fft = BatchFFT::new(1024, false);
    /// assert_eq!(batch_fft.fft_size(), 1024);
    /// ```
    pub fn new(fft_size: usize, inverse: bool) -> BatchFFT {
        let mut planner = FFTplanner::new(inverse);
        let fft = planner.plan_fft(fft_size);
        BatchFFT {
            fft,
            fft_size,
            inverse,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    /// Runs the `BatchFFT` on complex samples.
    ///
    /// `data` is zero padded (or truncated) to `fft_size`. The output is not
    /// normalized; an inverse transform must be scaled by `1 / fft_size` by
    /// the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use iir_rs::fft::BatchFFT;
    /// use rustfft::num_complex::Complex;
    ///
    /// let batch_fft = BatchFFT::new(4, false);
    /// let result = batch_fft.run_fft(&[Complex::new(1.0, 0.0)]);
    /// assert_eq!(result, vec![Complex::new(1.0, 0.0); 4]);
    /// ```
    pub fn run_fft(&self, data: &[Complex<f64>]) -> Vec<Complex<f64>> {
        let mut input = vec![Complex::zero(); self.fft_size];
        let n = data.len().min(self.fft_size);
        input[..n].copy_from_slice(&data[..n]);
        let mut output = vec![Complex::zero(); self.fft_size];
        self.fft.process(&mut input, &mut output);
        output
    }

    /// Runs the `BatchFFT` on real samples, zero padded to `fft_size`.
    pub fn run_real(&self, data: &[f64]) -> Vec<Complex<f64>> {
        let mut input = vec![Complex::zero(); self.fft_size];
        for (slot, &x) in input.iter_mut().zip(data) {
            *slot = Complex::new(x, 0.0);
        }
        let mut output = vec![Complex::zero(); self.fft_size];
        self.fft.process(&mut input, &mut output);
        output
    }
}
