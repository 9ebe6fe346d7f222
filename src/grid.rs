/*!
Parameter grids and count observations.

A [`Grid`] is the finite, strictly increasing discretization of one
continuous parameter; a grid posterior is a probability mass function over
its points. An [`Observation`] is a validated (successes, trials) pair;
invalid counts are rejected at construction so likelihood code never has to
re-check them.

# Examples

```rust
use grid_bayes::grid::{Grid, Observation};

let grid = Grid::linspace(0.0, 1.0, 101).unwrap();
assert_eq!(grid.len(), 101);

let obs = Observation::new(7, 10).unwrap();
assert_eq!(obs.failures(), 3);

// Counts can also be derived from raw Bernoulli outcomes.
let obs = Observation::from_outcomes(&[true, false, true]);
assert_eq!((obs.successes(), obs.trials()), (2, 3));
```
*/

use crate::error::{GridBayesError, Result};

/// A strictly increasing discretization of one parameter's support.
///
/// Immutable after construction. Binomial operations additionally require
/// values in `[0, 1]`; regression hyper-parameter grids may live anywhere
/// on the real line, so that check belongs to the operations, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    values: Vec<f64>,
}

impl Grid {
    /// Builds a grid of `n` evenly spaced points covering `[start, stop]`.
    pub fn linspace(start: f64, stop: f64, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(GridBayesError::InvalidGrid {
                reason: "linspace needs at least two points",
            });
        }
        if !start.is_finite() || !stop.is_finite() || start >= stop {
            return Err(GridBayesError::InvalidGrid {
                reason: "linspace needs finite start < stop",
            });
        }
        let step = (stop - start) / (n - 1) as f64;
        let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
        // Pin the endpoint so θ=1 boundary handling is exercised exactly.
        values[n - 1] = stop;
        Ok(Self { values })
    }

    /// Builds a grid from explicit values, which must be finite and strictly
    /// increasing.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(GridBayesError::InvalidGrid {
                reason: "grid must be non-empty",
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(GridBayesError::InvalidGrid {
                reason: "grid values must be finite",
            });
        }
        if values.windows(2).any(|w| w[0] >= w[1]) {
            return Err(GridBayesError::InvalidGrid {
                reason: "grid values must be strictly increasing",
            });
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when every grid point lies in `[0, 1]`, the support of a
    /// success-probability parameter.
    pub fn is_unit_interval(&self) -> bool {
        // Strictly increasing, so the ends bound everything.
        self.values[0] >= 0.0 && self.values[self.values.len() - 1] <= 1.0
    }
}

/// A validated (successes, trials) count pair.
///
/// Counts are unsigned, so negativity is unrepresentable; the only invalid
/// state is more successes than trials, rejected here once and for all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    successes: u64,
    trials: u64,
}

impl Observation {
    pub fn new(successes: u64, trials: u64) -> Result<Self> {
        if successes > trials {
            return Err(GridBayesError::InvalidObservation { successes, trials });
        }
        Ok(Self { successes, trials })
    }

    /// Derives counts from a sequence of i.i.d. Bernoulli outcomes.
    pub fn from_outcomes(outcomes: &[bool]) -> Self {
        Self {
            successes: outcomes.iter().filter(|&&y| y).count() as u64,
            trials: outcomes.len() as u64,
        }
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn failures(&self) -> u64 {
        self.trials - self.successes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints_exact() {
        let grid = Grid::linspace(0.0, 1.0, 11).unwrap();
        assert_eq!(grid.len(), 11);
        assert_eq!(grid.values()[0], 0.0);
        assert_eq!(grid.values()[10], 1.0);
        assert!((grid.values()[7] - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_rejects_degenerate_ranges() {
        assert!(Grid::linspace(0.0, 1.0, 1).is_err());
        assert!(Grid::linspace(1.0, 0.0, 11).is_err());
        assert!(Grid::linspace(0.0, f64::INFINITY, 11).is_err());
    }

    #[test]
    fn test_from_values_rejects_non_monotone() {
        assert!(Grid::from_values(vec![0.1, 0.1, 0.2]).is_err());
        assert!(Grid::from_values(vec![0.2, 0.1]).is_err());
        assert!(Grid::from_values(vec![]).is_err());
        assert!(Grid::from_values(vec![0.0, f64::NAN]).is_err());
        assert!(Grid::from_values(vec![0.0, 0.5, 1.0]).is_ok());
    }

    #[test]
    fn test_unit_interval_check() {
        assert!(Grid::linspace(0.0, 1.0, 11).unwrap().is_unit_interval());
        assert!(!Grid::linspace(-1.0, 1.0, 11).unwrap().is_unit_interval());
    }

    #[test]
    fn test_observation_rejects_excess_successes() {
        let err = Observation::new(11, 10).unwrap_err();
        assert_eq!(
            err,
            GridBayesError::InvalidObservation {
                successes: 11,
                trials: 10
            }
        );
    }

    #[test]
    fn test_observation_from_outcomes() {
        let obs = Observation::from_outcomes(&[true, true, false, true]);
        assert_eq!(obs.successes(), 3);
        assert_eq!(obs.trials(), 4);
        assert_eq!(obs.failures(), 1);

        let empty = Observation::from_outcomes(&[]);
        assert_eq!((empty.successes(), empty.trials()), (0, 0));
    }
}
