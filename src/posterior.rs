/*!
The log-space grid posterior engine.

Everything up to the final mass array happens in log space. Likelihood values
across a grid routinely differ by hundreds of log-units (a Binomial
likelihood with a thousand trials underflows `f64` almost everywhere), so
posteriors are produced exclusively by [`normalize`]: subtract the maximum,
exponentiate, and divide through the log-sum-exp normalizer. Naive
`exp`-then-divide is not offered anywhere.

# Examples

```rust
use grid_bayes::grid::{Grid, Observation};
use grid_bayes::posterior::Posterior1d;

let grid = Grid::linspace(0.0, 1.0, 11).unwrap();
let obs = Observation::new(7, 10).unwrap();
let posterior = Posterior1d::from_observation(&grid, obs).unwrap();

// Mass peaks at θ = 0.7 and sums to one.
assert_eq!(posterior.mode_index(), 7);
let total: f64 = posterior.mass().sum();
assert!((total - 1.0).abs() < 1e-9);
```
*/

use crate::error::{GridBayesError, Result};
use crate::grid::{Grid, Observation};
use crate::kernels::binomial_log_pmf;
use ndarray::{Array, Array1, Array2, Axis, Dimension};

/// Stable `ln(Σ exp(x_i))` over an array of any dimension.
///
/// Returns `-inf` for all-`-inf` input; the caller decides whether that is
/// an error (it is, for normalization).
pub fn log_sum_exp<D: Dimension>(values: &Array<f64, D>) -> f64 {
    let m = values.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    if m == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum = values.fold(0.0, |acc, &v| acc + (v - m).exp());
    m + sum.ln()
}

/// Normalizes an array of log-joint densities into a probability mass array.
///
/// Accepts log-prior-plus-log-likelihood values (for a uniform prior the
/// constant log-prior cancels and may be omitted). Works even when the raw
/// likelihood underflows to zero at every grid point, which is the defining
/// reason this lives in log space.
///
/// # Errors
///
/// [`GridBayesError::DegenerateDistribution`] when every entry is `-inf`,
/// i.e. no grid point is consistent with the data.
pub fn normalize<D: Dimension>(log_joint: &Array<f64, D>) -> Result<Array<f64, D>> {
    let log_z = log_sum_exp(log_joint);
    if log_z == f64::NEG_INFINITY {
        return Err(GridBayesError::DegenerateDistribution);
    }
    Ok(log_joint.mapv(|v| (v - log_z).exp()))
}

/// Binomial log-likelihood evaluated at every grid point.
///
/// # Errors
///
/// [`GridBayesError::ParameterOutOfRange`] when the grid leaves `[0, 1]`.
pub fn log_likelihood_grid(grid: &Grid, obs: Observation) -> Result<Array1<f64>> {
    if !grid.is_unit_interval() {
        let end = *grid.values().last().unwrap_or(&f64::NAN);
        let value = if grid.values()[0] < 0.0 {
            grid.values()[0]
        } else {
            end
        };
        return Err(GridBayesError::ParameterOutOfRange { value });
    }
    Ok(grid
        .values()
        .iter()
        .map(|&theta| binomial_log_pmf(obs.successes(), obs.trials(), theta))
        .collect())
}

/// Joint log-likelihood for two independent observations over a product
/// grid: the outer sum of the per-dimension log-likelihood vectors. Under
/// independence this sum IS the joint log-likelihood.
pub fn log_likelihood_grid_2d(
    grid_a: &Grid,
    obs_a: Observation,
    grid_b: &Grid,
    obs_b: Observation,
) -> Result<Array2<f64>> {
    let ll_a = log_likelihood_grid(grid_a, obs_a)?;
    let ll_b = log_likelihood_grid(grid_b, obs_b)?;
    let mut joint = Array2::zeros((ll_a.len(), ll_b.len()));
    for (i, &la) in ll_a.iter().enumerate() {
        for (j, &lb) in ll_b.iter().enumerate() {
            joint[[i, j]] = la + lb;
        }
    }
    Ok(joint)
}

/// A normalized posterior mass function over a 1D grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior1d {
    grid: Grid,
    mass: Array1<f64>,
}

impl Posterior1d {
    /// Posterior under a uniform prior.
    pub fn from_observation(grid: &Grid, obs: Observation) -> Result<Self> {
        let log_lik = log_likelihood_grid(grid, obs)?;
        Self::from_log_joint(grid, log_lik)
    }

    /// Posterior under an explicit prior, supplied as per-point log-weights.
    pub fn from_observation_with_prior(
        grid: &Grid,
        obs: Observation,
        log_prior: &Array1<f64>,
    ) -> Result<Self> {
        if log_prior.len() != grid.len() {
            return Err(GridBayesError::GridMismatch {
                expected: grid.len(),
                got: log_prior.len(),
            });
        }
        let log_joint = log_likelihood_grid(grid, obs)? + log_prior;
        Self::from_log_joint(grid, log_joint)
    }

    /// Normalizes an already-assembled log-joint-density vector.
    pub fn from_log_joint(grid: &Grid, log_joint: Array1<f64>) -> Result<Self> {
        if log_joint.len() != grid.len() {
            return Err(GridBayesError::GridMismatch {
                expected: grid.len(),
                got: log_joint.len(),
            });
        }
        Ok(Self {
            grid: grid.clone(),
            mass: normalize(&log_joint)?,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mass(&self) -> &Array1<f64> {
        &self.mass
    }

    /// Posterior mean `Σ θ_i · mass_i`.
    pub fn mean(&self) -> f64 {
        self.grid
            .values()
            .iter()
            .zip(self.mass.iter())
            .map(|(&theta, &m)| theta * m)
            .sum()
    }

    /// Index of the posterior mode; the first maximum on exact ties.
    pub fn mode_index(&self) -> usize {
        argmax_first(&self.mass)
    }

    /// Parameter value at the posterior mode.
    pub fn mode(&self) -> f64 {
        self.grid.values()[self.mode_index()]
    }
}

/// A normalized posterior mass function over a 2D product grid, row index
/// running over `grid_a`, column index over `grid_b`.
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior2d {
    grid_a: Grid,
    grid_b: Grid,
    mass: Array2<f64>,
}

impl Posterior2d {
    /// Joint posterior for two independent observations under uniform priors.
    pub fn from_observations(
        grid_a: &Grid,
        obs_a: Observation,
        grid_b: &Grid,
        obs_b: Observation,
    ) -> Result<Self> {
        let log_joint = log_likelihood_grid_2d(grid_a, obs_a, grid_b, obs_b)?;
        Self::from_log_joint(grid_a, grid_b, log_joint)
    }

    /// Normalizes an already-assembled log-joint-density matrix.
    pub fn from_log_joint(grid_a: &Grid, grid_b: &Grid, log_joint: Array2<f64>) -> Result<Self> {
        if log_joint.nrows() != grid_a.len() {
            return Err(GridBayesError::GridMismatch {
                expected: grid_a.len(),
                got: log_joint.nrows(),
            });
        }
        if log_joint.ncols() != grid_b.len() {
            return Err(GridBayesError::GridMismatch {
                expected: grid_b.len(),
                got: log_joint.ncols(),
            });
        }
        Ok(Self {
            grid_a: grid_a.clone(),
            grid_b: grid_b.clone(),
            mass: normalize(&log_joint)?,
        })
    }

    pub fn grid_a(&self) -> &Grid {
        &self.grid_a
    }

    pub fn grid_b(&self) -> &Grid {
        &self.grid_b
    }

    pub fn mass(&self) -> &Array2<f64> {
        &self.mass
    }

    /// Marginal over the first parameter: sums each row across columns.
    pub fn marginal_a(&self) -> Posterior1d {
        Posterior1d {
            grid: self.grid_a.clone(),
            mass: self.mass.sum_axis(Axis(1)),
        }
    }

    /// Marginal over the second parameter: sums each column across rows.
    pub fn marginal_b(&self) -> Posterior1d {
        Posterior1d {
            grid: self.grid_b.clone(),
            mass: self.mass.sum_axis(Axis(0)),
        }
    }
}

/// First index attaining the maximum; the crate-wide tie policy.
pub(crate) fn argmax_first(mass: &Array1<f64>) -> usize {
    let mut best = 0;
    let mut best_val = f64::NEG_INFINITY;
    for (i, &v) in mass.iter().enumerate() {
        if v > best_val {
            best = i;
            best_val = v;
        }
    }
    best
}
