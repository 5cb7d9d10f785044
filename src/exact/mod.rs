//! Exact TSP solvers.
//!
//! - [`held_karp`] — Held-Karp subset dynamic programming, O(n²·2ⁿ)
//! - [`brute_force`] — Exhaustive permutation enumeration, O(n!), for n ≤ 10

mod brute_force;
mod held_karp;

pub use brute_force::{brute_force, BRUTE_FORCE_MAX_CITIES};
pub use held_karp::{held_karp, HeldKarpSolver};

use crate::distance::DistanceMatrix;
use crate::error::{Result, SolveError};

/// Checks the preconditions shared by every exact solver and returns the
/// number of cities.
fn validate(distances: &DistanceMatrix, origin: usize) -> Result<usize> {
    let n = distances.size();
    if n == 0 {
        return Err(SolveError::shape("matrix has no cities"));
    }
    if origin >= n {
        return Err(SolveError::OriginOutOfRange { origin, size: n });
    }
    Ok(n)
}

/// Rejects matrices whose tour totals could overflow `f64`.
///
/// A tour leaves every city once, so the sum of each row's largest finite
/// off-diagonal cost bounds every partial path. If that bound is finite, no
/// sum formed by a solver can become infinite.
fn check_cost_range(distances: &DistanceMatrix) -> Result<()> {
    let n = distances.size();
    let mut bound = 0.0;
    for from in 0..n {
        let row_max = (0..n)
            .filter(|&to| to != from)
            .filter_map(|to| distances.edge(from, to))
            .fold(0.0, f64::max);
        bound += row_max;
    }
    if bound.is_finite() {
        Ok(())
    } else {
        Err(SolveError::capacity(n, "edge costs overflow the f64 tour total"))
    }
}

/// Iterates the cities set in `mask` in ascending index order.
fn members(mut mask: usize) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let city = mask.trailing_zeros() as usize;
        mask &= mask - 1;
        Some(city)
    })
}
