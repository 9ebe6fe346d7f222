/*!
Convergence diagnostics over materialized MCMC draws.

The sampler itself is an external collaborator; what this crate owns is the
math that turns its returned chains into the two numbers people actually
check: the potential scale reduction factor (R-hat, Gelman–Rubin) and the
effective sample size (Geyer initial-monotone-sequence estimator, as in the
STAN reference manual's effective-sample-size section).

Chains are `Array2<f64>` with shape `(n_steps, n_params)`, one per chain,
all the same shape.
*/

use crate::error::{GridBayesError, Result};
use ndarray::{Array1, Array2};
use ndarray_stats::QuantileExt;

/// Per-parameter within-chain variance `W` and the pooled variance estimate
/// `var+ = (n-1)/n · W + B/n`.
fn pooled_variances(chains: &[Array2<f64>]) -> Result<(Array1<f64>, Array1<f64>)> {
    assert!(!chains.is_empty(), "Requires at least one chain.");
    let m = chains.len();
    let (n, d) = chains[0].dim();
    for chain in chains {
        if chain.dim() != (n, d) {
            return Err(GridBayesError::GridMismatch {
                expected: n,
                got: chain.nrows(),
            });
        }
    }
    assert!(n >= 2, "Requires at least two steps per chain, got {n}.");

    let mut within = Array1::<f64>::zeros(d);
    let mut var_plus = Array1::<f64>::zeros(d);
    for p in 0..d {
        let means: Vec<f64> = chains
            .iter()
            .map(|c| c.column(p).iter().sum::<f64>() / n as f64)
            .collect();
        let vars: Vec<f64> = chains
            .iter()
            .zip(means.iter())
            .map(|(c, &mu)| {
                c.column(p).iter().map(|&x| (x - mu) * (x - mu)).sum::<f64>() / (n - 1) as f64
            })
            .collect();
        let w = vars.iter().sum::<f64>() / m as f64;
        let grand = means.iter().sum::<f64>() / m as f64;
        let between = if m > 1 {
            n as f64 * means.iter().map(|&mu| (mu - grand) * (mu - grand)).sum::<f64>()
                / (m - 1) as f64
        } else {
            0.0
        };
        within[p] = w;
        var_plus[p] = (n - 1) as f64 / n as f64 * w + between / n as f64;
    }
    Ok((within, var_plus))
}

/// Gelman–Rubin potential scale reduction factor, per parameter.
///
/// Values near 1 indicate the chains agree; anything above ~1.1 means they
/// have not mixed.
///
/// # Panics
///
/// Panics with fewer than two chains or fewer than two steps per chain.
pub fn rhat(chains: &[Array2<f64>]) -> Result<Array1<f64>> {
    assert!(
        chains.len() >= 2,
        "Requires at least two chains, got {}.",
        chains.len()
    );
    let (within, var_plus) = pooled_variances(chains)?;
    Ok((var_plus / within).mapv(f64::sqrt))
}

/// Largest per-parameter R-hat, the usual single go/no-go number.
pub fn max_rhat(chains: &[Array2<f64>]) -> Result<f64> {
    let all = rhat(chains)?;
    let max = all
        .max()
        .map_err(|_| GridBayesError::DegenerateDistribution)?;
    Ok(*max)
}

/// Effective sample size per parameter, combining all chains.
///
/// Uses the average per-chain autocovariance and Geyer's initial monotone
/// sequence: pair successive autocorrelations, keep pairs while they stay
/// positive and non-increasing, and sum them into the autocorrelation time.
pub fn ess(chains: &[Array2<f64>]) -> Result<Array1<f64>> {
    let (within, var_plus) = pooled_variances(chains)?;
    let m = chains.len();
    let (n, d) = chains[0].dim();
    let total = (m * n) as f64;

    let mut out = Array1::<f64>::zeros(d);
    for p in 0..d {
        if var_plus[p] == 0.0 {
            // A constant parameter: no autocorrelation structure to correct for.
            out[p] = total;
            continue;
        }
        let mut acov = vec![0.0; n];
        for chain in chains {
            let col = chain.column(p);
            let mu = col.iter().sum::<f64>() / n as f64;
            for (t, a) in acov.iter_mut().enumerate() {
                let mut s = 0.0;
                for i in 0..n - t {
                    s += (col[i] - mu) * (col[i + t] - mu);
                }
                *a += s / n as f64;
            }
        }
        for a in acov.iter_mut() {
            *a /= m as f64;
        }

        let rho: Vec<f64> = acov
            .iter()
            .map(|&a| 1.0 - (within[p] - a) / var_plus[p])
            .collect();

        let mut min = if rho.len() >= 2 { rho[0] + rho[1] } else { rho[0] };
        let mut sum = 0.0;
        for pair in rho.chunks_exact(2) {
            let mut p_t = pair[0] + pair[1];
            if p_t <= 0.0 {
                break;
            }
            if p_t > min {
                p_t = min;
            }
            min = p_t;
            sum += p_t;
        }
        let tau = -1.0 + 2.0 * sum;
        out[p] = if tau > 0.0 { total / tau } else { total };
    }
    Ok(out)
}
