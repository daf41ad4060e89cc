//! Elitist selection.
//!
//! The breeding pool of each tick is the top-k routes of the evaluated
//! population; parents are then drawn uniformly from that pool.

use super::types::Route;
use crate::error::{Result, TspError};
use rand::Rng;

/// Returns the `elite_size` lowest-distance routes, ascending.
///
/// `routes` must already be sorted ascending (see [`evaluate`](super::fitness::evaluate)).
///
/// # Errors
/// [`TspError::InvalidParameter`] if `elite_size` is zero or not strictly
/// less than the number of routes.
pub fn select_elite(routes: &[Route], elite_size: usize) -> Result<Vec<Route>> {
    if elite_size == 0 {
        return Err(TspError::InvalidParameter(
            "elite_size must be at least 1".into(),
        ));
    }
    if elite_size >= routes.len() {
        return Err(TspError::InvalidParameter(format!(
            "elite_size ({elite_size}) must be less than population size ({})",
            routes.len()
        )));
    }
    Ok(routes[..elite_size].to_vec())
}

/// Picks one parent uniformly at random (with replacement).
///
/// # Panics
/// Panics if `pool` is empty.
pub fn pick_parent<'a, R: Rng>(pool: &'a [Route], rng: &mut R) -> &'a Route {
    assert!(!pool.is_empty(), "cannot select from empty breeding pool");
    &pool[rng.random_range(0..pool.len())]
}
