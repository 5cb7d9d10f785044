//! Dense distance matrix.

use rand::Rng;

use crate::error::{Result, SolveError};

/// Cost marking an absent edge. No finite tour may use it.
pub const NO_EDGE: f64 = f64::INFINITY;

/// A dense n×n distance matrix stored in row-major order.
///
/// `get(i, j)` is the cost of travelling directly from city `i` to city `j`.
/// The matrix need not be symmetric; [`NO_EDGE`] marks a missing edge.
///
/// # Examples
///
/// ```
/// use held_karp::distance::{DistanceMatrix, NO_EDGE};
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, NO_EDGE],
///     vec![5.0, 0.0, 2.0],
///     vec![NO_EDGE, 2.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.size(), 3);
/// assert!(dm.has_edge(0, 1));
/// assert!(!dm.has_edge(0, 2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Builds a matrix from explicit rows, validating shape and costs.
    ///
    /// Fails with [`SolveError::Shape`] when the input is empty, ragged, or
    /// not square, and with [`SolveError::InvalidCost`] on NaN or negative
    /// entries. Diagonal entries are validated too but never read by the
    /// solvers.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(SolveError::shape("matrix has no rows"));
        }
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(SolveError::shape(format!(
                    "row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        let dm = Self { data, size };
        dm.validate_costs()?;
        Ok(dm)
    }

    /// Creates a distance matrix from an explicit row-major n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Generates a complete matrix with integer-valued costs in `[1, max_cost]`
    /// and a zero diagonal. Integer costs keep tour sums exact in `f64`.
    pub fn random<R: Rng + ?Sized>(size: usize, max_cost: u32, rng: &mut R) -> Self {
        let max_cost = max_cost.max(1);
        let mut dm = Self::new(size);
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    dm.set(i, j, f64::from(rng.random_range(1..=max_cost)));
                }
            }
        }
        dm
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `from -> to` has a finite cost.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_finite()
    }

    /// Returns the cost of `from -> to`, or `None` for a missing edge.
    pub fn edge(&self, from: usize, to: usize) -> Option<f64> {
        let d = self.get(from, to);
        d.is_finite().then_some(d)
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    ///
    /// Two missing edges count as equal.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a == b {
                    continue;
                }
                if (a - b).abs() > tol || a.is_nan() || b.is_nan() {
                    return false;
                }
            }
        }
        true
    }

    /// Relabels the cities by exchanging labels `a` and `b`.
    ///
    /// Swaps rows `a` and `b`, then columns `a` and `b`, so the graph is
    /// unchanged up to naming.
    pub fn swap_cities(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let n = self.size;
        for k in 0..n {
            self.data.swap(a * n + k, b * n + k);
        }
        for k in 0..n {
            self.data.swap(k * n + a, k * n + b);
        }
    }

    /// Rows as nested vectors, in the same layout [`from_rows`](Self::from_rows) takes.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size.max(1)).map(<[f64]>::to_vec).collect()
    }

    fn validate_costs(&self) -> Result<()> {
        for from in 0..self.size {
            for to in 0..self.size {
                let value = self.get(from, to);
                if value.is_nan() || value < 0.0 {
                    return Err(SolveError::InvalidCost { from, to, value });
                }
            }
        }
        Ok(())
    }
}
