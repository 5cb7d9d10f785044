//! Tour type.

use std::fmt;

use serde::Serialize;

/// A Hamiltonian cycle: an ordered visiting sequence plus its total cost.
///
/// The route starts at the origin and lists every city exactly once. The
/// closing leg back to the origin is not repeated in the route but is
/// included in [`cost`](Tour::cost).
///
/// # Examples
///
/// ```
/// use held_karp::models::Tour;
///
/// let tour = Tour::new(vec![0, 2, 1], 9.0);
/// assert_eq!(tour.origin(), Some(0));
/// assert_eq!(tour.closed_route(), vec![0, 2, 1, 0]);
/// assert_eq!(tour.labels(), vec![1, 3, 2]);
/// assert_eq!(tour.to_string(), "1 > 3 > 2");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    route: Vec<usize>,
    cost: f64,
}

impl Tour {
    pub fn new(route: Vec<usize>, cost: f64) -> Self {
        Self { route, cost }
    }

    /// City indices in visit order, origin first.
    pub fn route(&self) -> &[usize] {
        &self.route
    }

    /// Total cost including the return leg to the origin.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn origin(&self) -> Option<usize> {
        self.route.first().copied()
    }

    pub fn len(&self) -> usize {
        self.route.len()
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// The route with the origin appended, making the cycle explicit.
    pub fn closed_route(&self) -> Vec<usize> {
        let mut closed = self.route.clone();
        if let Some(origin) = self.origin() {
            closed.push(origin);
        }
        closed
    }

    /// 1-indexed city labels in visit order.
    pub fn labels(&self) -> Vec<usize> {
        self.route.iter().map(|&c| c + 1).collect()
    }

    /// Returns `true` if the route visits each of `0..n` exactly once.
    pub fn is_permutation(&self, n: usize) -> bool {
        if self.route.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &c in &self.route {
            if c >= n || seen[c] {
                return false;
            }
            seen[c] = true;
        }
        true
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for label in self.labels() {
            if !first {
                f.write_str(" > ")?;
            }
            write!(f, "{label}")?;
            first = false;
        }
        Ok(())
    }
}
