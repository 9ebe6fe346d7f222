/*!
Highest-probability-density-interval extraction over a discretized posterior.

The extractor greedily grows a contiguous index window outward from the mode,
at each step absorbing whichever neighboring grid point carries more mass,
until the window holds at least the requested coverage. For a unimodal mass
function this yields the minimal-width window.

The algorithm is only correct for unimodal input. A multimodal posterior has
a disconnected true HPD region, which a single contiguous window can only
approximate; [`hpdi`] detects extra local maxima above a noise threshold and
logs a warning rather than failing, since the window it returns is still a
valid (if possibly over-wide) credible interval.

# Examples

```rust
use grid_bayes::grid::{Grid, Observation};
use grid_bayes::posterior::Posterior1d;

let grid = Grid::linspace(0.0, 1.0, 101).unwrap();
let obs = Observation::new(7, 10).unwrap();
let posterior = Posterior1d::from_observation(&grid, obs).unwrap();

let interval = posterior.hpdi(0.9);
assert!(interval.mass >= 0.9);
let (lo, hi) = interval.bounds(posterior.grid());
assert!(lo < 0.7 && 0.7 < hi);
```
*/

use crate::grid::Grid;
use crate::posterior::{argmax_first, Posterior1d};
use log::warn;
use ndarray::Array1;

/// A contiguous index window `[low, high]` (both inclusive) into a grid,
/// plus the cumulative mass it actually achieved.
///
/// By construction `mass` is at least the requested coverage, except in the
/// degenerate case where the whole grid was exhausted first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HpdiResult {
    pub low: usize,
    pub high: usize,
    pub mass: f64,
}

impl HpdiResult {
    /// Number of grid points inside the window.
    pub fn width(&self) -> usize {
        self.high - self.low + 1
    }

    /// The window's bounds in parameter space.
    pub fn bounds(&self, grid: &Grid) -> (f64, f64) {
        (grid.values()[self.low], grid.values()[self.high])
    }
}

/// Extracts the HPDI at the given `coverage` from a 1D mass array.
///
/// Ties between the left and right candidate (`mass[l] == mass[r]` exactly)
/// expand left. This is an arbitrary but deterministic policy; fixture
/// expectations depend on it, so it must not be changed casually.
///
/// # Panics
///
/// Panics when `coverage` is outside `(0, 1)` or the mass array is empty.
pub fn hpdi(mass: &Array1<f64>, coverage: f64) -> HpdiResult {
    assert!(
        coverage > 0.0 && coverage < 1.0,
        "Requires coverage in (0, 1), got {coverage}."
    );
    assert!(!mass.is_empty(), "Requires a non-empty mass array.");

    if local_maxima_count(mass) > 1 {
        warn!(
            "hpdi: mass function has multiple local maxima; the contiguous \
             window returned approximates a disconnected HPD region"
        );
    }

    let n = mass.len() as isize;
    let idx = argmax_first(mass) as isize;
    let mut cum = mass[idx as usize];
    let mut l = idx - 1;
    let mut r = idx + 1;

    while cum < coverage {
        let left_in = l >= 0;
        let right_in = r < n;
        if !left_in && !right_in {
            // Requested coverage exceeds what the array holds (possible for
            // coverage near 1 with rounding, or unnormalized input). Return
            // the full grid rather than loop forever.
            break;
        }
        if left_in && (!right_in || mass[l as usize] >= mass[r as usize]) {
            cum += mass[l as usize];
            l -= 1;
        } else {
            cum += mass[r as usize];
            r += 1;
        }
    }

    HpdiResult {
        low: (l + 1) as usize,
        high: (r - 1) as usize,
        mass: cum,
    }
}

impl Posterior1d {
    /// The highest-probability-density interval of this posterior.
    pub fn hpdi(&self, coverage: f64) -> HpdiResult {
        hpdi(self.mass(), coverage)
    }
}

/// Counts strict local maxima carrying at least 1e-3 of the peak mass;
/// smaller bumps are treated as discretization noise.
fn local_maxima_count(mass: &Array1<f64>) -> usize {
    let peak = mass.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    let threshold = peak * 1e-3;
    let n = mass.len();
    (0..n)
        .filter(|&i| {
            mass[i] > threshold
                && (i == 0 || mass[i] > mass[i - 1])
                && (i == n - 1 || mass[i] > mass[i + 1])
        })
        .count()
}
