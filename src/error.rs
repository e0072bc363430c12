//! Error type shared by every filtering operation in the crate.

use std::error;
use std::fmt;

/// Convenience alias used throughout the crate.
pub type FilterResult<T> = Result<T, FilterError>;

#[derive(Clone, Debug, PartialEq)]
pub enum FilterError {
    /// The `b`/`a` coefficients can't describe a filter.
    InvalidFilter(String),
    /// A tolerance, configuration value or signal shape was rejected.
    InvalidArgument(String),
    /// Sample data contained a NaN or an infinity.
    InvalidInput {
        channel: Option<usize>,
        index: usize,
    },
    /// The impulse response didn't settle within `max_length` samples.
    NonConvergent { max_length: usize },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FilterError::InvalidFilter(ref why) => {
                write!(f, "Invalid filter: {}", why)
            }
            FilterError::InvalidArgument(ref why) => {
                write!(f, "Invalid argument: {}", why)
            }
            FilterError::InvalidInput {
                channel: Some(ch),
                index,
            } => write!(
                f,
                "Invalid input: non-finite sample at index {} of channel {}",
                index, ch
            ),
            FilterError::InvalidInput {
                channel: None,
                index,
            } => write!(
                f,
                "Invalid input: non-finite sample at index {}",
                index
            ),
            FilterError::NonConvergent { max_length } => write!(
                f,
                "Filter is non-convergent: impulse response did not settle \
                 within {} samples",
                max_length
            ),
        }
    }
}

impl error::Error for FilterError {
    fn cause(&self) -> Option<&dyn error::Error> {
        None
    }
}
