//! Permutation-preserving genetic operators for tours.
//!
//! Both operators take a path of point ids and return a new path that is a
//! permutation of the same ids; inputs are never modified.
//!
//! - [`order_crossover`] (OX): Davis (1985) — preserves relative order
//! - [`swap_mutation`]: exchange two distinct positions with a given probability
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

use super::types::PointId;
use crate::error::{Result, TspError};
use rand::Rng;
use std::collections::HashSet;

// ============================================================================
// Crossover
// ============================================================================

/// Order Crossover (OX) for tours.
///
/// # Algorithm
///
/// 1. Pick `start` uniformly in `[0, n)` and `end` uniformly in `[start, n)`
/// 2. Copy `parent1[start..=end]` to the child at the same positions
/// 3. Fill the remaining positions left to right with `parent2`'s ids in
///    their original order, skipping ids already placed
///
/// # Complexity
/// O(n) expected time, O(n) space
///
/// # Errors
/// [`TspError::InvalidParameter`] if the parents have different lengths or
/// are not permutations of the same ids.
pub fn order_crossover<R: Rng>(
    parent1: &[PointId],
    parent2: &[PointId],
    rng: &mut R,
) -> Result<Vec<PointId>> {
    let n = parent1.len();
    if n != parent2.len() {
        return Err(not_permutations());
    }

    if n < 2 {
        return if parent1 == parent2 {
            Ok(parent1.to_vec())
        } else {
            Err(not_permutations())
        };
    }

    let (start, end) = random_segment(n, rng);
    ox_build_child(parent1, parent2, start, end)
}

/// Build one OX child: copy `[start, end]` from `template`, fill from `donor`.
fn ox_build_child(
    template: &[PointId],
    donor: &[PointId],
    start: usize,
    end: usize,
) -> Result<Vec<PointId>> {
    let members: HashSet<PointId> = template.iter().copied().collect();
    let donated: HashSet<PointId> = donor.iter().copied().collect();
    if members.len() != template.len() || donated.len() != donor.len() || members != donated {
        return Err(not_permutations());
    }

    let placed: HashSet<PointId> = template[start..=end].iter().copied().collect();
    let mut fill = donor.iter().copied().filter(|id| !placed.contains(id));

    Ok((0..template.len())
        .filter_map(|i| {
            if (start..=end).contains(&i) {
                Some(template[i])
            } else {
                fill.next()
            }
        })
        .collect())
}

fn not_permutations() -> TspError {
    TspError::InvalidParameter("parents must be permutations of the same ids".into())
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation applied with probability `mutation_rate`.
///
/// Draws `r` uniformly from `[0, 1)`; when `r < mutation_rate` two distinct
/// positions are swapped, otherwise the path is returned unchanged. A rate of
/// `0.0` therefore never mutates and `1.0` always does.
///
/// # Complexity
/// O(n) for the copy
pub fn swap_mutation<R: Rng>(path: &[PointId], mutation_rate: f64, rng: &mut R) -> Vec<PointId> {
    let mut mutated = path.to_vec();
    let r: f64 = rng.random_range(0.0..1.0);
    if r >= mutation_rate {
        return mutated;
    }

    let n = mutated.len();
    if n < 2 {
        return mutated;
    }
    let i = rng.random_range(0..n);
    // Shift past `i` so the second index is uniform over the others.
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    mutated.swap(i, j);
    mutated
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a segment `[start, end]` within `0..n`: `start` uniform over `0..n`,
/// then `end` uniform over `start..n`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let start = rng.random_range(0..n);
    let end = rng.random_range(start..n);
    (start, end)
}

// ============================================================================
// Tests
// ============================================================================
