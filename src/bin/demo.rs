//! A small grid-inference demo: coin bias estimation with an HPDI, then a
//! two-seller comparison via a region-probability query.

use grid_bayes::grid::{Grid, Observation};
use grid_bayes::posterior::{Posterior1d, Posterior2d};
use grid_bayes::region::RegionQuery;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // --- Coin bias: 7 heads out of 10 tosses on a 101-point grid. ---
    let grid = Grid::linspace(0.0, 1.0, 101)?;
    let obs = Observation::new(7, 10)?;
    let posterior = Posterior1d::from_observation(&grid, obs)?;

    println!("Coin posterior (7 heads / 10 tosses):");
    println!("  mode: θ = {:.2}", posterior.mode());
    println!("  mean: θ = {:.4}", posterior.mean());

    let interval = posterior.hpdi(0.9);
    let (lo, hi) = interval.bounds(posterior.grid());
    println!(
        "  90% HPDI: [{:.2}, {:.2}] covering {:.4} of the mass",
        lo, hi, interval.mass
    );

    // --- Two sellers: 8/10 positive reviews vs. 799/1000. ---
    let obs_a = Observation::new(8, 10)?;
    let obs_b = Observation::new(799, 1000)?;
    let joint = Posterior2d::from_observations(&grid, obs_a, &grid, obs_b)?;

    let p_a_better = joint.region_probability(|a, b| a > b);
    println!("\nSeller comparison (8/10 vs. 799/1000):");
    println!("  P(θ_A > θ_B | data) = {:.4}", p_a_better);
    for k in [1.0, 1.05, 1.1] {
        let p = joint.region_probability(|a, b| a > k * b);
        println!("  P(θ_A > {k:.2}·θ_B | data) = {p:.4}");
    }

    Ok(())
}
