//! Solver configuration.

use crate::error::{Result, SolveError};

/// Default upper bound on the number of cities the DP will accept.
pub const DEFAULT_MAX_CITIES: usize = 20;

/// Default memory budget for the DP table (2 GiB).
pub const DEFAULT_MEMORY_BUDGET_BYTES: usize = 2 << 30;

/// Capacity guard for [`HeldKarpSolver`](crate::exact::HeldKarpSolver).
///
/// The table holds `2^n * n` costs, so both the city count and the table's
/// byte size are bounded before anything is allocated.
///
/// # Examples
///
/// ```
/// use held_karp::SolverConfig;
///
/// let config = SolverConfig::default().with_max_cities(12);
/// assert!(config.check_capacity(12).is_ok());
/// assert!(config.check_capacity(13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Largest accepted number of cities.
    pub max_cities: usize,
    /// Largest accepted DP table size in bytes.
    pub memory_budget_bytes: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_cities: DEFAULT_MAX_CITIES,
            memory_budget_bytes: DEFAULT_MEMORY_BUDGET_BYTES,
        }
    }
}

impl SolverConfig {
    /// Sets the largest accepted number of cities.
    pub fn with_max_cities(mut self, max_cities: usize) -> Self {
        self.max_cities = max_cities;
        self
    }

    /// Sets the DP table budget in bytes.
    pub fn with_memory_budget(mut self, bytes: usize) -> Self {
        self.memory_budget_bytes = bytes;
        self
    }

    /// Bytes needed by the DP table for `cities` cities, or `None` on overflow.
    pub fn table_bytes(cities: usize) -> Option<usize> {
        if cities >= usize::BITS as usize {
            return None;
        }
        (1usize << cities)
            .checked_mul(cities)?
            .checked_mul(std::mem::size_of::<f64>())
    }

    /// Rejects instances whose DP table would exceed this configuration.
    pub fn check_capacity(&self, cities: usize) -> Result<()> {
        if cities > self.max_cities {
            return Err(SolveError::capacity(
                cities,
                format!("max {} cities", self.max_cities),
            ));
        }
        match Self::table_bytes(cities) {
            Some(bytes) if bytes <= self.memory_budget_bytes => Ok(()),
            Some(bytes) => Err(SolveError::capacity(
                cities,
                format!(
                    "table needs {bytes} bytes, budget is {}",
                    self.memory_budget_bytes
                ),
            )),
            None => Err(SolveError::capacity(cities, "table size overflows usize")),
        }
    }
}
