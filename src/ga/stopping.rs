//! Termination policy.
//!
//! A fixed-count run stops when the tick counter reaches the requested
//! count. An until-last-alive run stops at [`MAX_GENERATIONS`] or as soon as
//! every population has converged.

use super::config::{Generations, MAX_GENERATIONS};
use super::types::Population;
use std::collections::HashMap;

/// Share of a population that one rounded distance must reach to count as converged.
pub const CONVERGENCE_RATIO: f64 = 0.5;

/// Returns `true` when no further tick should be produced.
///
/// `tick` is the number of generations produced so far. Convergence is only
/// checked once at least one tick has run.
pub fn should_stop(generations: Generations, populations: &[Population], tick: usize) -> bool {
    match generations {
        Generations::Fixed(n) => tick >= n,
        Generations::UntilLastAlive => {
            tick > 0 && (tick >= MAX_GENERATIONS || all_converged(populations))
        }
    }
}

/// Every population has converged.
pub fn all_converged(populations: &[Population]) -> bool {
    populations.iter().all(is_converged)
}

/// The most frequent distance, rounded to two decimals, covers at least
/// [`CONVERGENCE_RATIO`] of the routes.
pub fn is_converged(population: &Population) -> bool {
    if population.routes.is_empty() {
        return false;
    }
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for route in &population.routes {
        *counts.entry(rounded_cents(route.distance)).or_default() += 1;
    }
    let max_count = counts.values().copied().max().unwrap_or(0);
    max_count as f64 / population.routes.len() as f64 >= CONVERGENCE_RATIO
}

/// Distance rounded to two decimals, as an integer bin key.
fn rounded_cents(distance: f64) -> i64 {
    (distance * 100.0).round() as i64
}
