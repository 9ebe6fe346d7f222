/*!
Numerically safe log-likelihood kernels.

Every likelihood in this crate goes through these primitives. The load-bearing
contract is [`safe_xlogy`]: `x * ln(y)` with the convention `0 * ln(0) == 0`,
which is what makes Bernoulli/Binomial log-likelihoods finite at the grid
boundaries `θ = 0` and `θ = 1` when the matching count is zero. A naive
`x * y.ln()` produces `0 * -inf = NaN` there and poisons every downstream
normalization.

Binomial coefficients are computed through log-gamma, never factorials, so
counts in the thousands stay representable.

# Examples

```rust
use grid_bayes::kernels::{binomial_log_pmf, safe_xlogy};

// Two misses out of two trials on a coin that never lands heads: certainty.
assert_eq!(binomial_log_pmf(0, 2, 0.0), 0.0);

// The primitive underneath:
assert_eq!(safe_xlogy(0.0, 0.0), 0.0);
assert_eq!(safe_xlogy(3.0, 0.0), f64::NEG_INFINITY);
```
*/

use num_traits::Float;
use statrs::function::gamma::ln_gamma;
use std::f64::consts::PI;

/// Computes `x * ln(y)`, defining `0 * ln(0) == 0`.
///
/// For `x != 0` and `y == 0` the result is `-inf` (or `+inf` for negative
/// `x`), matching the limit of the underlying product.
pub fn safe_xlogy<T: Float>(x: T, y: T) -> T {
    if x == T::zero() {
        T::zero()
    } else {
        x * y.ln()
    }
}

/// Log of the binomial coefficient `C(n, k)` via log-gamma.
///
/// Stable for `n` well beyond 10,000; returns `-inf` when `k > n` (no way to
/// choose more items than exist, i.e. zero ways, log of which is `-inf`).
pub fn log_binomial_coefficient(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    if k == 0 || k == n {
        // Exactly one way; returning 0.0 outright keeps the θ-boundary
        // log-likelihoods exactly zero instead of log-gamma-roundoff-zero.
        return 0.0;
    }
    ln_gamma(n as f64 + 1.0) - ln_gamma(k as f64 + 1.0) - ln_gamma((n - k) as f64 + 1.0)
}

/// Log of the Binomial(n, θ) probability mass at `k` successes.
///
/// Finite at `θ = 0` with `k = 0` and at `θ = 1` with `k = n`; `-inf` when
/// the observation is impossible under `θ` (e.g. a success with `θ = 0`).
pub fn binomial_log_pmf(successes: u64, trials: u64, theta: f64) -> f64 {
    let k = successes as f64;
    let n = trials as f64;
    log_binomial_coefficient(trials, successes)
        + safe_xlogy(k, theta)
        + safe_xlogy(n - k, 1.0 - theta)
}

/// Log-likelihood of i.i.d. Bernoulli(θ) outcomes.
pub fn bernoulli_log_likelihood(outcomes: &[bool], theta: f64) -> f64 {
    outcomes
        .iter()
        .map(|&y| {
            let y = if y { 1.0 } else { 0.0 };
            safe_xlogy(y, theta) + safe_xlogy(1.0 - y, 1.0 - theta)
        })
        .sum()
}

/// Normalized Gaussian log-density with location `mean` and scale `std`.
pub fn gaussian_log_density(x: f64, mean: f64, std: f64) -> f64 {
    let z = (x - mean) / std;
    -0.5 * (2.0 * PI).ln() - std.ln() - 0.5 * z * z
}

/// Normalized Cauchy log-density with location `location` and scale `scale`.
///
/// The heavy tails make this the likelihood of choice for regression robust
/// to outliers: a single far-off point costs `O(ln)` instead of `O(square)`.
pub fn cauchy_log_density(x: f64, location: f64, scale: f64) -> f64 {
    let z = (x - location) / scale;
    -PI.ln() - scale.ln() - (1.0 + z * z).ln()
}

/// Softplus `ln(1 + exp(x))`, the link mapping an unconstrained sampler
/// parameter to a strictly positive scale.
///
/// Computed as `max(x, 0) + ln_1p(exp(-|x|))` so large `|x|` neither
/// overflows nor loses precision.
pub fn softplus<T: Float>(x: T) -> T {
    x.max(T::zero()) + (-x.abs()).exp().ln_1p()
}
