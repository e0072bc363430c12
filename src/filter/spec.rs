//! Validated, normalized filter coefficients.

use crate::error::{FilterError, FilterResult};

/// Transfer function coefficients of a linear time-invariant filter.
///
/// The numerator `b` holds the feed-forward taps and the denominator `a` the
/// feedback taps. On construction every coefficient is divided by `a[0]`, so
/// the stored denominator always starts with `1.0`. A `FilterSpec` is never
/// mutated afterwards and can be shared freely between threads.
///
/// # Examples
///
/// ```
/// use iir_rs::filter::spec::FilterSpec;
///
/// let spec = FilterSpec::new(&[2.0, 2.0], &[2.0, -1.0]).unwrap();
/// assert_eq!(spec.b(), &[1.0, 1.0]);
/// assert_eq!(spec.a(), &[1.0, -0.5]);
/// assert_eq!(spec.order(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FilterSpec {
    // Both padded with zeros to a common length.
    b: Vec<f64>,
    a: Vec<f64>,
    nb: usize,
    na: usize,
}

impl FilterSpec {
    /// Builds a `FilterSpec` from raw coefficients.
    ///
    /// # Arguments
    ///
    /// * `b` - Feed-forward (numerator) coefficients.
    /// * `a` - Feedback (denominator) coefficients, `a[0]` must be non-zero.
    pub fn new(b: &[f64], a: &[f64]) -> FilterResult<FilterSpec> {
        if a.is_empty() {
            return Err(FilterError::InvalidFilter(
                "feedback coefficients `a` are empty".to_string(),
            ));
        }
        if b.is_empty() {
            return Err(FilterError::InvalidFilter(
                "feed-forward coefficients `b` are empty".to_string(),
            ));
        }
        if let Some(i) = b.iter().position(|x| !x.is_finite()) {
            return Err(FilterError::InvalidFilter(format!(
                "b[{}] is not finite",
                i
            )));
        }
        if let Some(i) = a.iter().position(|x| !x.is_finite()) {
            return Err(FilterError::InvalidFilter(format!(
                "a[{}] is not finite",
                i
            )));
        }
        let a0 = a[0];
        if a0 == 0.0 {
            return Err(FilterError::InvalidFilter(
                "leading feedback coefficient a[0] is zero".to_string(),
            ));
        }

        let (nb, na) = (b.len(), a.len());
        let n = nb.max(na);
        let mut b: Vec<f64> = b.iter().map(|x| x / a0).collect();
        let mut a: Vec<f64> = a.iter().map(|x| x / a0).collect();
        // Dividing a tiny a[0] into large coefficients can still overflow.
        if b.iter().chain(a.iter()).any(|x| !x.is_finite()) {
            return Err(FilterError::InvalidFilter(
                "coefficients overflow when normalized by a[0]".to_string(),
            ));
        }
        b.resize(n, 0.0);
        a.resize(n, 0.0);
        Ok(FilterSpec { b, a, nb, na })
    }

    /// Normalized feed-forward coefficients.
    pub fn b(&self) -> &[f64] {
        &self.b[..self.nb]
    }

    /// Normalized feedback coefficients, `a()[0] == 1.0`.
    pub fn a(&self) -> &[f64] {
        &self.a[..self.na]
    }

    /// Filter order, `max(len(b), len(a)) - 1`.
    pub fn order(&self) -> usize {
        self.padded_len() - 1
    }

    /// Length both coefficient vectors are padded to when filtering.
    pub fn padded_len(&self) -> usize {
        self.b.len()
    }

    /// True when the filter has no feedback, i.e. its impulse response is
    /// exactly `b`.
    pub fn is_fir(&self) -> bool {
        self.a[1..].iter().all(|&x| x == 0.0)
    }

    /// `b` and `a` zero-padded to `padded_len()`.
    pub fn padded(&self) -> (&[f64], &[f64]) {
        (&self.b, &self.a)
    }
}
