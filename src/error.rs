//! Error taxonomy for grid posterior construction and queries.
//!
//! All errors are local and synchronous: an operation either succeeds or
//! reports exactly what was inconsistent about its inputs. There is no retry
//! or fallback layer; this is offline numerical computation.

use std::error::Error;
use std::fmt;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GridBayesError>;

/// Unified error type for posterior construction and queries.
#[derive(Debug, Clone, PartialEq)]
pub enum GridBayesError {
    /// An observation reported more successes than trials.
    InvalidObservation { successes: u64, trials: u64 },

    /// Every log-joint-density entry was `-inf`: no grid point is consistent
    /// with the data, so normalization is undefined.
    DegenerateDistribution,

    /// Two arrays that must share a shape (grid vs. mass, grid vs. prior,
    /// design matrix vs. response) do not.
    GridMismatch { expected: usize, got: usize },

    /// A grid was not strictly increasing or contained a non-finite value.
    InvalidGrid { reason: &'static str },

    /// A sample run was constructed with no chains at all.
    EmptySampleRun,

    /// A parameter column index exceeds the dimensionality of the draws.
    ParameterIndexOutOfRange { index: usize, dim: usize },

    /// A binomial grid operation received a parameter value outside [0, 1].
    ParameterOutOfRange { value: f64 },
}

impl fmt::Display for GridBayesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridBayesError::InvalidObservation { successes, trials } => write!(
                f,
                "invalid observation: {successes} successes out of {trials} trials"
            ),
            GridBayesError::DegenerateDistribution => write!(
                f,
                "degenerate distribution: all log-joint densities are -inf, \
                 no grid point is consistent with the data"
            ),
            GridBayesError::GridMismatch { expected, got } => {
                write!(f, "grid mismatch: expected length {expected}, got {got}")
            }
            GridBayesError::InvalidGrid { reason } => write!(f, "invalid grid: {reason}"),
            GridBayesError::EmptySampleRun => {
                write!(f, "sample run contains no chains")
            }
            GridBayesError::ParameterIndexOutOfRange { index, dim } => write!(
                f,
                "parameter index {index} out of range for {dim}-dimensional draws"
            ),
            GridBayesError::ParameterOutOfRange { value } => {
                write!(f, "parameter value {value} outside [0, 1]")
            }
        }
    }
}

impl Error for GridBayesError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages_mention_offending_values() {
        let err = GridBayesError::InvalidObservation {
            successes: 11,
            trials: 10,
        };
        let msg = err.to_string();
        assert!(
            msg.contains("11") && msg.contains("10"),
            "Expected counts in message, got {msg:?}."
        );

        let err = GridBayesError::GridMismatch {
            expected: 101,
            got: 100,
        };
        let msg = err.to_string();
        assert!(
            msg.contains("101") && msg.contains("100"),
            "Expected shapes in message, got {msg:?}."
        );
    }
}
