/*!
Posterior probability of a region defined by a predicate over two parameters.

The same question — "what is `P(θ_A > θ_B | data)`?" — gets asked of two very
different posterior representations: a grid mass matrix and a bag of MCMC
draws. Both answer through [`RegionQuery`], so calling code never cares which
representation it holds. The grid sums cell masses whose coordinates satisfy
the predicate; the empirical version counts the satisfying fraction of draws.

# Examples

```rust
use grid_bayes::grid::{Grid, Observation};
use grid_bayes::posterior::Posterior2d;
use grid_bayes::region::RegionQuery;

let grid = Grid::linspace(0.0, 1.0, 51).unwrap();
let obs_a = Observation::new(8, 10).unwrap();
let obs_b = Observation::new(799, 1000).unwrap();
let joint = Posterior2d::from_observations(&grid, obs_a, &grid, obs_b).unwrap();

let p = joint.region_probability(|a, b| a > b);
assert!(p > 0.0 && p < 1.0);
```
*/

use crate::posterior::Posterior2d;

/// A posterior over a parameter pair that can be queried with an arbitrary
/// boolean predicate.
pub trait RegionQuery {
    /// Posterior probability that `pred(θ_A, θ_B)` holds. Always in `[0, 1]`.
    fn region_probability<F: Fn(f64, f64) -> bool>(&self, pred: F) -> f64;
}

impl RegionQuery for Posterior2d {
    fn region_probability<F: Fn(f64, f64) -> bool>(&self, pred: F) -> f64 {
        let mut total = 0.0;
        for (i, &theta_a) in self.grid_a().values().iter().enumerate() {
            for (j, &theta_b) in self.grid_b().values().iter().enumerate() {
                if pred(theta_a, theta_b) {
                    total += self.mass()[[i, j]];
                }
            }
        }
        total
    }
}

/// An empirical posterior over a parameter pair, backed by MCMC draws.
///
/// Each entry is one posterior draw of `(θ_A, θ_B)`; typically obtained via
/// [`crate::sampler::SampleRun::pairs`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalPairs {
    draws: Vec<(f64, f64)>,
}

impl EmpiricalPairs {
    pub fn new(draws: Vec<(f64, f64)>) -> Self {
        Self { draws }
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

impl RegionQuery for EmpiricalPairs {
    fn region_probability<F: Fn(f64, f64) -> bool>(&self, pred: F) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let hits = self.draws.iter().filter(|&&(a, b)| pred(a, b)).count();
        hits as f64 / self.draws.len() as f64
    }
}
