/*!
Log-joint densities for the Bayesian regression models handed to an external
MCMC sampler.

Each model owns its data and prior scales and implements
[`TargetDistribution`], i.e. it is nothing but a pure function from a
parameter vector to an unnormalized log-density: Gaussian priors on every
unconstrained parameter plus the model's likelihood. Scales are kept
unconstrained in the parameter vector and pushed through [`softplus`] inside
the density, so the sampler roams all of ℝ and still only ever sees strictly
positive standard deviations.

Four variants:

- [`SimpleLinearRegression`]: `y ~ Normal(α + βx, σ)`.
- [`MultipleLinearRegression`]: `y ~ Normal(Xβ, σ)` against a design matrix.
- [`HeteroscedasticRegression`]: the noise scale itself depends on `x`,
  `σ_i = softplus(γ₀ + γ₁ x_i)`.
- [`RobustRegression`]: Cauchy likelihood, for data with outliers.
*/

use crate::error::{GridBayesError, Result};
use crate::kernels::{cauchy_log_density, gaussian_log_density, softplus};
use crate::sampler::TargetDistribution;
use ndarray::Array2;

/// Sum of independent Gaussian(0, `scale`) log-prior terms.
fn gaussian_prior(theta: &[f64], scale: f64) -> f64 {
    theta
        .iter()
        .map(|&t| gaussian_log_density(t, 0.0, scale))
        .sum()
}

/// `y ~ Normal(α + βx, σ)` with `θ = (α, β, s)`, `σ = softplus(s)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleLinearRegression {
    x: Vec<f64>,
    y: Vec<f64>,
    prior_scale: f64,
}

impl SimpleLinearRegression {
    pub fn new(x: Vec<f64>, y: Vec<f64>, prior_scale: f64) -> Result<Self> {
        if x.len() != y.len() {
            return Err(GridBayesError::GridMismatch {
                expected: x.len(),
                got: y.len(),
            });
        }
        Ok(Self { x, y, prior_scale })
    }
}

impl TargetDistribution for SimpleLinearRegression {
    fn unnorm_log_prob(&self, theta: &[f64]) -> f64 {
        assert_eq!(theta.len(), self.dim());
        let (alpha, beta, s) = (theta[0], theta[1], theta[2]);
        let sigma = softplus(s);
        let log_lik: f64 = self
            .x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| gaussian_log_density(y, alpha + beta * x, sigma))
            .sum();
        gaussian_prior(theta, self.prior_scale) + log_lik
    }

    fn dim(&self) -> usize {
        3
    }
}

/// `y ~ Normal(Xβ, σ)` with `θ = (β₀ … β_{p-1}, s)`, `σ = softplus(s)`.
///
/// The design matrix is `(n, p)`; an intercept, if wanted, is a column of
/// ones like any other predictor.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipleLinearRegression {
    design: Array2<f64>,
    y: Vec<f64>,
    prior_scale: f64,
}

impl MultipleLinearRegression {
    pub fn new(design: Array2<f64>, y: Vec<f64>, prior_scale: f64) -> Result<Self> {
        if design.nrows() != y.len() {
            return Err(GridBayesError::GridMismatch {
                expected: design.nrows(),
                got: y.len(),
            });
        }
        Ok(Self {
            design,
            y,
            prior_scale,
        })
    }
}

impl TargetDistribution for MultipleLinearRegression {
    fn unnorm_log_prob(&self, theta: &[f64]) -> f64 {
        assert_eq!(theta.len(), self.dim());
        let p = self.design.ncols();
        let (coeffs, rest) = theta.split_at(p);
        let sigma = softplus(rest[0]);
        let log_lik: f64 = self
            .design
            .rows()
            .into_iter()
            .zip(self.y.iter())
            .map(|(row, &y)| {
                let mu: f64 = row.iter().zip(coeffs.iter()).map(|(&x, &b)| x * b).sum();
                gaussian_log_density(y, mu, sigma)
            })
            .sum();
        gaussian_prior(theta, self.prior_scale) + log_lik
    }

    fn dim(&self) -> usize {
        self.design.ncols() + 1
    }
}

/// `y ~ Normal(α + βx, σ(x))` with `σ(x) = softplus(γ₀ + γ₁x)` and
/// `θ = (α, β, γ₀, γ₁)`: the noise level is itself a regression on `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeteroscedasticRegression {
    x: Vec<f64>,
    y: Vec<f64>,
    prior_scale: f64,
}

impl HeteroscedasticRegression {
    pub fn new(x: Vec<f64>, y: Vec<f64>, prior_scale: f64) -> Result<Self> {
        if x.len() != y.len() {
            return Err(GridBayesError::GridMismatch {
                expected: x.len(),
                got: y.len(),
            });
        }
        Ok(Self { x, y, prior_scale })
    }
}

impl TargetDistribution for HeteroscedasticRegression {
    fn unnorm_log_prob(&self, theta: &[f64]) -> f64 {
        assert_eq!(theta.len(), self.dim());
        let (alpha, beta, g0, g1) = (theta[0], theta[1], theta[2], theta[3]);
        let log_lik: f64 = self
            .x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| {
                let sigma = softplus(g0 + g1 * x);
                gaussian_log_density(y, alpha + beta * x, sigma)
            })
            .sum();
        gaussian_prior(theta, self.prior_scale) + log_lik
    }

    fn dim(&self) -> usize {
        4
    }
}

/// `y ~ Cauchy(α + βx, γ)` with `θ = (α, β, s)`, `γ = softplus(s)`.
///
/// The Cauchy's heavy tails keep a handful of wild observations from
/// dragging the fitted line, which is the point of the robust variant.
#[derive(Debug, Clone, PartialEq)]
pub struct RobustRegression {
    x: Vec<f64>,
    y: Vec<f64>,
    prior_scale: f64,
}

impl RobustRegression {
    pub fn new(x: Vec<f64>, y: Vec<f64>, prior_scale: f64) -> Result<Self> {
        if x.len() != y.len() {
            return Err(GridBayesError::GridMismatch {
                expected: x.len(),
                got: y.len(),
            });
        }
        Ok(Self { x, y, prior_scale })
    }
}

impl TargetDistribution for RobustRegression {
    fn unnorm_log_prob(&self, theta: &[f64]) -> f64 {
        assert_eq!(theta.len(), self.dim());
        let (alpha, beta, s) = (theta[0], theta[1], theta[2]);
        let gamma = softplus(s);
        let log_lik: f64 = self
            .x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| cauchy_log_density(y, alpha + beta * x, gamma))
            .sum();
        gaussian_prior(theta, self.prior_scale) + log_lik
    }

    fn dim(&self) -> usize {
        3
    }
}
