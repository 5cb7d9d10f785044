//! Exhaustive TSP search over all permutations.
//!
//! Enumerates the (n-1)! orderings of the non-origin cities in lexicographic
//! order and keeps the first strict minimum. Useful as an oracle for the
//! dynamic program on small instances.

use log::debug;

use super::{check_cost_range, validate};
use crate::distance::DistanceMatrix;
use crate::error::{Result, SolveError};
use crate::evaluation::cycle_cost;
use crate::models::Tour;

/// Largest instance the exhaustive search accepts (9! = 362 880 orderings).
pub const BRUTE_FORCE_MAX_CITIES: usize = 10;

/// Finds the optimal tour through `origin` by trying every ordering.
///
/// # Errors
///
/// Same validation as [`HeldKarpSolver::solve`](super::HeldKarpSolver::solve);
/// [`SolveError::Capacity`] above [`BRUTE_FORCE_MAX_CITIES`].
///
/// # Examples
///
/// ```
/// use held_karp::distance::DistanceMatrix;
/// use held_karp::exact::brute_force;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 2.0, 9.0],
///     vec![1.0, 0.0, 6.0],
///     vec![7.0, 3.0, 0.0],
/// ])
/// .unwrap();
/// let tour = brute_force(&dm, 0).unwrap();
/// assert_eq!(tour.cost(), 13.0);
/// assert_eq!(tour.route(), &[0, 2, 1]);
/// ```
pub fn brute_force(distances: &DistanceMatrix, origin: usize) -> Result<Tour> {
    let n = validate(distances, origin)?;
    if n > BRUTE_FORCE_MAX_CITIES {
        return Err(SolveError::capacity(
            n,
            format!("brute force is limited to {BRUTE_FORCE_MAX_CITIES} cities"),
        ));
    }
    check_cost_range(distances)?;

    let mut order: Vec<usize> = (0..n).filter(|&c| c != origin).collect();
    let mut route = Vec::with_capacity(n);
    let mut best: Option<(Vec<usize>, f64)> = None;
    let mut visited = 0usize;

    loop {
        route.clear();
        route.push(origin);
        route.extend_from_slice(&order);
        visited += 1;

        if let Some(cost) = cycle_cost(&route, distances) {
            if best.as_ref().map_or(true, |(_, b)| cost < *b) {
                best = Some((route.clone(), cost));
            }
        }

        if !next_permutation(&mut order) {
            break;
        }
    }

    debug!("brute force: {visited} orderings checked");
    let (route, cost) = best.ok_or(SolveError::Unreachable { origin })?;
    Ok(Tour::new(route, cost))
}

/// Advances `items` to the next lexicographic permutation.
///
/// Returns `false` (leaving `items` in descending order) once the last
/// permutation has been reached.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}
