//! Held-Karp dynamic programming for the exact TSP.
//!
//! # Algorithm
//!
//! Let `C(S, c)` be the cheapest path that leaves the origin, visits exactly
//! the cities in `S` (origin included) and ends at `c`:
//!
//! ```text
//! C({o}, o) = 0
//! C(S, c)   = min_{p ∈ S \ {c}} C(S \ {c}, p) + d(p, c)      c ≠ o
//! tour      = min_{c ≠ o} C(V, c) + d(c, o)
//! ```
//!
//! Subsets are visited in increasing numeric order, so every `S \ {c}` is
//! final before `S` is read. The tour is recovered by walking back from the
//! best last city, re-deriving each predecessor from the table.
//!
//! Ties resolve to the lowest city index, both for the last city and for
//! every predecessor, so the route is reproducible.
//!
//! # Complexity
//!
//! O(n²·2ⁿ) time, O(n·2ⁿ) space.
//!
//! # Reference
//!
//! Held, M. & Karp, R.M. (1962). "A dynamic programming approach to
//! sequencing problems", *Journal of SIAM* 10(1), 196-210.

use log::{debug, trace};

use super::{check_cost_range, members, validate};
use crate::config::SolverConfig;
use crate::distance::DistanceMatrix;
use crate::error::{Result, SolveError};
use crate::models::Tour;

/// Sentinel for table cells no feasible path reaches.
const UNREACHED: f64 = f64::INFINITY;

/// Dense `[2ⁿ][n]` table of best path costs, indexed by (visit mask, end city).
struct DpTable {
    costs: Vec<f64>,
    cities: usize,
}

impl DpTable {
    fn new(cities: usize) -> Self {
        Self {
            costs: vec![UNREACHED; (1usize << cities) * cities],
            cities,
        }
    }

    /// Cost of the cell, or `None` if unreached. The sentinel never leaks
    /// into arithmetic.
    fn get(&self, mask: usize, city: usize) -> Option<f64> {
        let cost = self.costs[mask * self.cities + city];
        (cost != UNREACHED).then_some(cost)
    }

    fn set(&mut self, mask: usize, city: usize, cost: f64) {
        self.costs[mask * self.cities + city] = cost;
    }

    /// Cheapest way to extend a path over `prev` with the edge into `city`,
    /// as `(predecessor, cost)`. Scans predecessors in ascending order and
    /// keeps the first strict minimum.
    fn best_predecessor(
        &self,
        prev: usize,
        city: usize,
        distances: &DistanceMatrix,
    ) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for p in members(prev) {
            let (Some(base), Some(leg)) = (self.get(prev, p), distances.edge(p, city)) else {
                continue;
            };
            let cost = base + leg;
            if cost.is_finite() && best.map_or(true, |(_, b)| cost < b) {
                best = Some((p, cost));
            }
        }
        best
    }

    fn reached(&self) -> usize {
        self.costs.iter().filter(|&&c| c != UNREACHED).count()
    }
}

/// Exact TSP solver using Held-Karp subset dynamic programming.
///
/// The route in the returned [`Tour`] starts at the origin and lists it once;
/// the return leg is included in the cost.
///
/// # Examples
///
/// ```
/// use held_karp::distance::{DistanceMatrix, NO_EDGE};
/// use held_karp::exact::HeldKarpSolver;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, NO_EDGE, 1.0],
///     vec![1.0, 0.0, 1.0, 5.0],
///     vec![NO_EDGE, 1.0, 0.0, 1.0],
///     vec![1.0, 5.0, 1.0, 0.0],
/// ])
/// .unwrap();
///
/// let tour = HeldKarpSolver::default().solve(&dm, 0).unwrap();
/// assert_eq!(tour.cost(), 4.0);
/// assert_eq!(tour.route(), &[0, 3, 2, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeldKarpSolver {
    config: SolverConfig,
}

impl HeldKarpSolver {
    /// Creates a solver with the given capacity guard.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Returns the capacity guard in use.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Computes the minimum-cost Hamiltonian cycle through `origin`.
    ///
    /// # Errors
    ///
    /// * [`SolveError::Shape`] if the matrix has no cities
    /// * [`SolveError::OriginOutOfRange`] if `origin >= n`
    /// * [`SolveError::Capacity`] if the table exceeds the configuration, or
    ///   if edge costs are large enough to overflow a tour total
    /// * [`SolveError::Unreachable`] if missing edges rule out every cycle
    pub fn solve(&self, distances: &DistanceMatrix, origin: usize) -> Result<Tour> {
        let n = validate(distances, origin)?;
        if n == 1 {
            return Ok(Tour::new(vec![origin], 0.0));
        }
        self.config.check_capacity(n)?;
        check_cost_range(distances)?;

        debug!(
            "held-karp: {n} cities, origin {origin}, table {} cells",
            (1usize << n) * n
        );

        let table = self.fill_table(distances, origin);
        let full = (1usize << n) - 1;

        let mut closing: Option<(usize, f64)> = None;
        for city in (0..n).filter(|&c| c != origin) {
            let (Some(path), Some(back)) = (table.get(full, city), distances.edge(city, origin))
            else {
                continue;
            };
            let total = path + back;
            if total.is_finite() && closing.map_or(true, |(_, b)| total < b) {
                closing = Some((city, total));
            }
        }
        let (last, cost) = closing.ok_or(SolveError::Unreachable { origin })?;
        debug!("held-karp: optimal cost {cost}, last city {last}");

        let route = reconstruct(&table, distances, origin, last)?;
        Ok(Tour::new(route, cost))
    }

    /// Forward pass: fills every reachable (mask, city) cell.
    fn fill_table(&self, distances: &DistanceMatrix, origin: usize) -> DpTable {
        let n = distances.size();
        let origin_bit = 1usize << origin;
        let mut table = DpTable::new(n);
        table.set(origin_bit, origin, 0.0);

        for mask in 1..(1usize << n) {
            if mask & origin_bit == 0 {
                continue;
            }
            for city in members(mask & !origin_bit) {
                let prev = mask & !(1 << city);
                if let Some((_, cost)) = table.best_predecessor(prev, city, distances) {
                    table.set(mask, city, cost);
                }
            }
        }

        trace!("held-karp: {} reachable cells", table.reached());
        table
    }
}

/// Walks back from `(full mask, last)` to the origin and returns the route,
/// origin first.
fn reconstruct(
    table: &DpTable,
    distances: &DistanceMatrix,
    origin: usize,
    last: usize,
) -> Result<Vec<usize>> {
    let n = distances.size();
    let mut route = Vec::with_capacity(n);
    let mut mask = (1usize << n) - 1;
    let mut city = last;

    while city != origin {
        route.push(city);
        let prev = mask & !(1 << city);
        // Every reached cell was set from a reached predecessor.
        let (p, _) = table
            .best_predecessor(prev, city, distances)
            .ok_or(SolveError::Unreachable { origin })?;
        city = p;
        mask = prev;
    }
    route.push(origin);
    route.reverse();
    Ok(route)
}

/// Solves with the default [`SolverConfig`].
pub fn held_karp(distances: &DistanceMatrix, origin: usize) -> Result<Tour> {
    HeldKarpSolver::default().solve(distances, origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::NO_EDGE;
    use crate::evaluation::cycle_cost;
    use crate::exact::brute_force;
    use proptest::prelude::*;

    const X: f64 = NO_EDGE;

    /// Seven-city road network with missing links.
    fn seven_cities() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 12.0, 10.0, X, X, X, 12.0],
            vec![12.0, 0.0, 8.0, 12.0, X, X, X],
            vec![10.0, 8.0, 0.0, 11.0, 3.0, X, 9.0],
            vec![X, 12.0, 11.0, 0.0, 11.0, 10.0, X],
            vec![X, X, 3.0, 11.0, 0.0, 6.0, 7.0],
            vec![X, X, X, 10.0, 6.0, 0.0, 9.0],
            vec![12.0, X, 9.0, X, 7.0, 9.0, 0.0],
        ])
        .expect("valid")
    }

    fn uniform(n: usize, w: f64) -> DistanceMatrix {
        let mut dm = DistanceMatrix::new(n);
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    dm.set(i, j, w);
                }
            }
        }
        dm
    }

    fn assert_valid_tour(tour: &Tour, dm: &DistanceMatrix, origin: usize) {
        assert!(tour.is_permutation(dm.size()));
        assert_eq!(tour.origin(), Some(origin));
        assert_eq!(cycle_cost(tour.route(), dm), Some(tour.cost()));
    }

    #[test]
    fn test_seven_cities() {
        let dm = seven_cities();
        let tour = held_karp(&dm, 0).expect("solvable");
        assert_eq!(tour.cost(), 63.0);
        // The mirror tour 0,1,3,5,6,4,2 also costs 63; the lower last city wins.
        assert_eq!(tour.route(), &[0, 2, 4, 6, 5, 3, 1]);
        assert_eq!(tour.labels(), vec![1, 3, 5, 7, 6, 4, 2]);
        assert_valid_tour(&tour, &dm, 0);

        let oracle = brute_force(&dm, 0).expect("solvable");
        assert_eq!(oracle.cost(), tour.cost());
    }

    #[test]
    fn test_seven_cities_other_origin() {
        let dm = seven_cities();
        for origin in 0..dm.size() {
            let tour = held_karp(&dm, origin).expect("solvable");
            assert_eq!(tour.cost(), 63.0);
            assert_valid_tour(&tour, &dm, origin);
        }
    }

    #[test]
    fn test_single_city() {
        let dm = DistanceMatrix::from_rows(vec![vec![7.0]]).expect("valid");
        let tour = held_karp(&dm, 0).expect("trivial");
        assert_eq!(tour.route(), &[0]);
        assert_eq!(tour.cost(), 0.0);
    }

    #[test]
    fn test_two_cities_symmetric() {
        let dm = DistanceMatrix::from_rows(vec![vec![0.0, 4.5], vec![4.5, 0.0]]).expect("valid");
        let tour = held_karp(&dm, 1).expect("solvable");
        assert_eq!(tour.route(), &[1, 0]);
        assert_eq!(tour.cost(), 2.0 * 4.5);
    }

    #[test]
    fn test_two_cities_one_way() {
        let dm = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![X, 0.0]]).expect("valid");
        assert!(matches!(
            held_karp(&dm, 0),
            Err(SolveError::Unreachable { origin: 0 })
        ));
    }

    #[test]
    fn test_uniform_weights() {
        for n in 2..=7 {
            let dm = uniform(n, 3.0);
            for origin in 0..n {
                let tour = held_karp(&dm, origin).expect("solvable");
                assert_eq!(tour.cost(), n as f64 * 3.0);
                assert_valid_tour(&tour, &dm, origin);
            }
        }
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        // Every tour costs 4; the last city and each predecessor pick the
        // lowest eligible index, giving 1 last, then 2, then 3.
        let tour = held_karp(&uniform(4, 1.0), 0).expect("solvable");
        assert_eq!(tour.route(), &[0, 3, 2, 1]);

        let tour = held_karp(&uniform(4, 1.0), 2).expect("solvable");
        assert_eq!(tour.route(), &[2, 3, 1, 0]);
    }

    #[test]
    fn test_asymmetric_direction() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 1.0],
            vec![1.0, 0.0, 10.0],
            vec![10.0, 1.0, 0.0],
        ])
        .expect("valid");
        let tour = held_karp(&dm, 0).expect("solvable");
        assert_eq!(tour.route(), &[0, 2, 1]);
        assert_eq!(tour.cost(), 3.0);
    }

    #[test]
    fn test_isolated_city_is_unreachable() {
        let mut dm = seven_cities();
        for k in 0..dm.size() {
            if k != 3 {
                dm.set(3, k, X);
                dm.set(k, 3, X);
            }
        }
        assert!(matches!(
            held_karp(&dm, 0),
            Err(SolveError::Unreachable { origin: 0 })
        ));
    }

    #[test]
    fn test_path_graph_is_unreachable() {
        // 0 - 1 - 2 - 3 is Hamiltonian as a path but not as a cycle.
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, X, X],
            vec![1.0, 0.0, 1.0, X],
            vec![X, 1.0, 0.0, 1.0],
            vec![X, X, 1.0, 0.0],
        ])
        .expect("valid");
        for origin in 0..4 {
            assert!(matches!(
                held_karp(&dm, origin),
                Err(SolveError::Unreachable { .. })
            ));
        }
    }

    #[test]
    fn test_origin_out_of_range() {
        assert!(matches!(
            held_karp(&seven_cities(), 7),
            Err(SolveError::OriginOutOfRange { origin: 7, size: 7 })
        ));
    }

    #[test]
    fn test_empty_matrix() {
        let dm = DistanceMatrix::from_data(0, vec![]).expect("0x0");
        assert!(matches!(held_karp(&dm, 0), Err(SolveError::Shape(_))));
    }

    #[test]
    fn test_capacity_guard() {
        let solver = HeldKarpSolver::new(SolverConfig::default().with_max_cities(6));
        assert!(matches!(
            solver.solve(&seven_cities(), 0),
            Err(SolveError::Capacity { cities: 7, .. })
        ));

        let solver = HeldKarpSolver::new(SolverConfig::default().with_memory_budget(1024));
        assert!(matches!(
            solver.solve(&seven_cities(), 0),
            Err(SolveError::Capacity { .. })
        ));
    }

    #[test]
    fn test_overflowing_costs_are_not_unreachable() {
        let m = f64::MAX;
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, m, m],
            vec![m, 0.0, m],
            vec![m, m, 0.0],
        ])
        .expect("finite costs");
        assert!(matches!(
            held_karp(&dm, 0),
            Err(SolveError::Capacity { cities: 3, .. })
        ));

        // Large but summable costs still solve.
        let big = f64::MAX / 4.0;
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, big, big],
            vec![big, 0.0, big],
            vec![big, big, 0.0],
        ])
        .expect("finite costs");
        let tour = held_karp(&dm, 0).expect("solvable");
        assert!(tour.cost().is_finite());
        assert_eq!(tour.route(), &[0, 2, 1]);
    }

    #[test]
    fn test_diagonal_ignored() {
        let mut dm = uniform(4, 2.0);
        for i in 0..4 {
            dm.set(i, i, X);
        }
        assert_eq!(held_karp(&dm, 0).expect("solvable").cost(), 8.0);
    }

    fn matrix_strategy(max_n: usize) -> impl Strategy<Value = DistanceMatrix> {
        (1..=max_n).prop_flat_map(|n| {
            prop::collection::vec(1u32..=50, n * n).prop_map(move |costs| {
                let data = costs.into_iter().map(f64::from).collect();
                DistanceMatrix::from_data(n, data).expect("n * n entries")
            })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_matches_brute_force(dm in matrix_strategy(8), origin in 0usize..8) {
            let origin = origin % dm.size();
            let tour = held_karp(&dm, origin).expect("complete graph");
            let oracle = brute_force(&dm, origin).expect("complete graph");

            prop_assert_eq!(tour.cost(), oracle.cost());
            prop_assert!(tour.is_permutation(dm.size()));
            prop_assert_eq!(tour.origin(), Some(origin));
            prop_assert_eq!(cycle_cost(tour.route(), &dm), Some(tour.cost()));
        }

        #[test]
        fn prop_label_invariance(
            dm in matrix_strategy(7),
            a in 0usize..7,
            b in 0usize..7,
            origin in 0usize..7,
        ) {
            let n = dm.size();
            let (a, b, origin) = (a % n, b % n, origin % n);
            let mut relabelled = dm.clone();
            relabelled.swap_cities(a, b);
            let moved_origin = if origin == a {
                b
            } else if origin == b {
                a
            } else {
                origin
            };

            let before = held_karp(&dm, origin).expect("complete graph");
            let after = held_karp(&relabelled, moved_origin).expect("complete graph");
            prop_assert_eq!(before.cost(), after.cost());
        }
    }
}
