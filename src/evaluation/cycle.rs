//! Closed-cycle cost evaluation.

use crate::distance::DistanceMatrix;

/// Computes the cost of the closed cycle through `route`.
///
/// Sums each consecutive leg plus the return leg from the last city to the
/// first. Returns `None` if any leg is a missing edge, so an infeasible
/// route never reports an infinite number.
///
/// # Examples
///
/// ```
/// use held_karp::distance::DistanceMatrix;
/// use held_karp::evaluation::cycle_cost;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 4.0],
///     vec![1.0, 0.0, 2.0],
///     vec![4.0, 2.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(cycle_cost(&[0, 1, 2], &dm), Some(7.0));
/// ```
pub fn cycle_cost(route: &[usize], distances: &DistanceMatrix) -> Option<f64> {
    let (&first, &last) = match (route.first(), route.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Some(0.0),
    };
    if route.len() == 1 {
        return Some(0.0);
    }
    let mut cost = 0.0;
    for w in route.windows(2) {
        cost += distances.edge(w[0], w[1])?;
    }
    cost += distances.edge(last, first)?;
    Some(cost)
}
