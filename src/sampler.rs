/*!
The contract between this crate and an external MCMC engine.

This crate never implements a transition kernel. Regression posteriors are
sampled by a collaborator that takes a log-joint-density (a
[`TargetDistribution`]) and hands back materialized draws. Everything the
rest of the crate needs from that collaborator is captured here: the target
trait it evaluates, the [`PosteriorSampler`] entry point it implements, and
the [`SampleRun`] value it returns, which bundles the chains with their
convergence diagnostics.

# Examples

```rust
use grid_bayes::sampler::SampleRun;
use grid_bayes::region::RegionQuery;
use ndarray::arr2;

// Two chains of (θ_A, θ_B) draws, as a sampler would return them.
let chains = vec![
    arr2(&[[0.8, 0.7], [0.9, 0.6], [0.7, 0.8]]),
    arr2(&[[0.85, 0.65], [0.75, 0.7], [0.8, 0.75]]),
];
let run = SampleRun::new(chains).unwrap();
let p = run.pairs(0, 1).unwrap().region_probability(|a, b| a > b);
assert!((p - 5.0 / 6.0).abs() < 1e-12);
```
*/

use crate::error::{GridBayesError, Result};
use crate::region::EmpiricalPairs;
use crate::stats;
use ndarray::{Array1, Array2, Axis};

/// A target distribution known only through its unnormalized log-density.
///
/// Implementations must be pure: same `theta`, same result, no side effects.
/// The sampler owns all randomness.
pub trait TargetDistribution {
    /// The log of the unnormalized joint density at `theta`.
    fn unnorm_log_prob(&self, theta: &[f64]) -> f64;

    /// Number of parameters `theta` must carry.
    fn dim(&self) -> usize;
}

/// Convergence diagnostics reported alongside a sample run.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    /// Effective sample size per parameter.
    pub ess: Array1<f64>,
    /// Potential scale reduction factor per parameter.
    pub rhat: Array1<f64>,
}

/// The interface an external MCMC engine implements for this crate.
///
/// `warmup` draws per chain are the sampler's to discard; the returned run
/// contains only post-warmup draws.
pub trait PosteriorSampler {
    fn sample<T: TargetDistribution>(
        &mut self,
        target: &T,
        n_samples: usize,
        n_chains: usize,
        warmup: usize,
    ) -> Result<SampleRun>;
}

/// Materialized posterior draws: one `(n_steps, n_params)` matrix per chain,
/// plus diagnostics computed from them.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRun {
    chains: Vec<Array2<f64>>,
    diagnostics: Diagnostics,
}

impl SampleRun {
    /// Wraps sampler output, validating that all chains share one shape and
    /// computing ESS and R-hat.
    ///
    /// With a single chain R-hat is undefined and reported as 1 everywhere.
    pub fn new(chains: Vec<Array2<f64>>) -> Result<Self> {
        if chains.is_empty() {
            return Err(GridBayesError::EmptySampleRun);
        }
        let ess = stats::ess(&chains)?;
        let rhat = if chains.len() >= 2 {
            stats::rhat(&chains)?
        } else {
            Array1::ones(chains[0].ncols())
        };
        Ok(Self {
            chains,
            diagnostics: Diagnostics { ess, rhat },
        })
    }

    pub fn chains(&self) -> &[Array2<f64>] {
        &self.chains
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Total number of draws across chains.
    pub fn n_draws(&self) -> usize {
        self.chains.iter().map(|c| c.nrows()).sum()
    }

    /// All chains concatenated into one `(total_draws, n_params)` matrix.
    pub fn pooled(&self) -> Array2<f64> {
        let views: Vec<_> = self.chains.iter().map(|c| c.view()).collect();
        ndarray::concatenate(Axis(0), &views)
            .expect("Expected concatenating equally-shaped chains to succeed.")
    }

    /// Extracts two parameter columns as an empirical pair posterior, for
    /// region-probability queries.
    pub fn pairs(&self, param_a: usize, param_b: usize) -> Result<EmpiricalPairs> {
        let d = self.chains[0].ncols();
        for &idx in &[param_a, param_b] {
            if idx >= d {
                return Err(GridBayesError::ParameterIndexOutOfRange { index: idx, dim: d });
            }
        }
        let pooled = self.pooled();
        let draws = pooled
            .rows()
            .into_iter()
            .map(|row| (row[param_a], row[param_b]))
            .collect();
        Ok(EmpiricalPairs::new(draws))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    /// A stand-in collaborator: "samples" by evaluating the target on a
    /// fixed walk. Exists to pin down the trait contract, not to sample.
    struct FixedWalkSampler {
        walk: Vec<Vec<f64>>,
    }

    impl PosteriorSampler for FixedWalkSampler {
        fn sample<T: TargetDistribution>(
            &mut self,
            target: &T,
            n_samples: usize,
            n_chains: usize,
            warmup: usize,
        ) -> Result<SampleRun> {
            let d = target.dim();
            let chains = (0..n_chains)
                .map(|c| {
                    Array2::from_shape_fn((n_samples, d), |(i, j)| {
                        let step = self.walk[(warmup + i + c) % self.walk.len()].clone();
                        assert!(target.unnorm_log_prob(&step).is_finite());
                        step[j]
                    })
                })
                .collect();
            SampleRun::new(chains)
        }
    }

    struct Flat {
        d: usize,
    }

    impl TargetDistribution for Flat {
        fn unnorm_log_prob(&self, _theta: &[f64]) -> f64 {
            0.0
        }

        fn dim(&self) -> usize {
            self.d
        }
    }

    #[test]
    fn test_sampler_contract_round_trip() {
        let mut sampler = FixedWalkSampler {
            walk: vec![vec![0.0, 1.0], vec![1.0, 0.5], vec![0.5, 0.25], vec![0.2, 0.9]],
        };
        let run = sampler.sample(&Flat { d: 2 }, 3, 2, 1).unwrap();
        assert_eq!(run.chains().len(), 2);
        assert_eq!(run.n_draws(), 6);
        assert_eq!(run.diagnostics().ess.len(), 2);
        assert_eq!(run.diagnostics().rhat.len(), 2);
    }

    #[test]
    fn test_pooled_stacks_all_chains() {
        let chains = vec![
            arr2(&[[1.0, 2.0], [3.0, 4.0]]),
            arr2(&[[5.0, 6.0], [7.0, 8.0]]),
        ];
        let run = SampleRun::new(chains).unwrap();
        let pooled = run.pooled();
        assert_eq!(pooled.dim(), (4, 2));
        assert_eq!(pooled[[3, 1]], 8.0);
    }

    #[test]
    fn test_pairs_rejects_out_of_range_parameter() {
        let run = SampleRun::new(vec![arr2(&[[1.0, 2.0], [3.0, 4.0]])]).unwrap();
        let err = run.pairs(0, 2).unwrap_err();
        assert_eq!(
            err,
            GridBayesError::ParameterIndexOutOfRange { index: 2, dim: 2 }
        );
        let msg = err.to_string();
        assert!(
            msg.contains("parameter index 2"),
            "Expected the message to name the bad index, got {msg:?}."
        );
        assert!(run.pairs(0, 1).is_ok());
    }

    #[test]
    fn test_single_chain_rhat_defaults_to_one() {
        let run = SampleRun::new(vec![arr2(&[[1.0], [2.0], [3.0]])]).unwrap();
        assert_eq!(run.diagnostics().rhat[0], 1.0);
    }

    #[test]
    fn test_empty_run_rejected() {
        assert_eq!(
            SampleRun::new(vec![]).unwrap_err(),
            GridBayesError::EmptySampleRun
        );
    }
}
