use crate::error::{FilterError, FilterResult};

/// Index of the first NaN or infinite sample, if any.
pub fn first_non_finite(samples: &[f64]) -> Option<usize> {
    samples.iter().position(|x| !x.is_finite())
}

/// Rejects a signal holding non-finite samples. `channel` is carried into the
/// error so multi-channel callers can report where the bad sample lives.
pub fn check_finite(
    samples: &[f64],
    channel: Option<usize>,
) -> FilterResult<()> {
    match first_non_finite(samples) {
        Some(index) => Err(FilterError::InvalidInput { channel, index }),
        None => Ok(()),
    }
}

/// Sum of squares of a signal.
pub fn energy(samples: &[f64]) -> f64 {
    samples.iter().map(|x| x * x).sum()
}

#[cfg(test)]
mod test {
    use crate::error::FilterError;
    use crate::util::math;

    #[test]
    fn test_check_finite() {
        assert!(math::check_finite(&[0.0, 1.0, -2.5], None).is_ok());
        assert_eq!(
            math::check_finite(&[0.0, std::f64::NAN, 1.0], Some(4)),
            Err(FilterError::InvalidInput {
                channel: Some(4),
                index: 1
            })
        );
        assert_eq!(math::first_non_finite(&[std::f64::INFINITY]), Some(0));
    }

    #[test]
    fn test_energy() {
        assert_eq!(math::energy(&[3.0, -4.0]), 25.0);
        assert_eq!(math::energy(&[]), 0.0);
    }
}
