//! Recursive filtering of sampled signals.
//!
//! There are two primary categories of digital filters in signal processing:
//!
//! * Finite Impulse Response (FIR) Filters
//! * Infinite Impulse Response (IIR) Filters
//!
//! FIR filters are feedforward based systems: the output only depends on the
//! current and past inputs. IIR filters are feedback based systems, the output
//! also depends on past outputs, which lets a handful of coefficients produce
//! a very sharp response. Many times a design that requires an 81 tap FIR
//! filter could only require 9 taps from a well designed IIR filter
//! alternative.
//!
//! A filter here is described by its transfer function coefficients `b`
//! (feed-forward) and `a` (feedback), wrapped in a validated `FilterSpec`.
//! FIR filters are the special case `a == [1.0]` and go through the same
//! code. The filters in this module evaluate the recursion exactly; see
//! `crate::fft::convolve` for the FFT based approximation.
pub mod iir;
pub mod impulse;
pub mod multi;
pub mod spec;
