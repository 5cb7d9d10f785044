//! # held-karp
//!
//! Exact Traveling Salesman solver for small, fully specified graphs using
//! Held-Karp subset dynamic programming.
//!
//! ## Modules
//!
//! - [`distance`] — Dense, possibly asymmetric cost matrix with a missing-edge sentinel
//! - [`exact`] — Held-Karp solver and a brute-force oracle
//! - [`evaluation`] — Closed-cycle cost recomputation
//! - [`models`] — The [`Tour`](models::Tour) result type
//! - [`config`] — Capacity guard for the DP table
//! - [`error`] — Error taxonomy
//!
//! ## Example
//!
//! ```
//! use held_karp::distance::DistanceMatrix;
//! use held_karp::exact::held_karp;
//!
//! let dm = DistanceMatrix::from_rows(vec![
//!     vec![0.0, 2.0, 9.0, 10.0],
//!     vec![1.0, 0.0, 6.0, 4.0],
//!     vec![15.0, 7.0, 0.0, 8.0],
//!     vec![6.0, 3.0, 12.0, 0.0],
//! ])
//! .unwrap();
//!
//! let tour = held_karp(&dm, 0).unwrap();
//! assert_eq!(tour.cost(), 21.0);
//! assert_eq!(tour.route(), &[0, 2, 3, 1]);
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod exact;
pub mod models;

pub use config::SolverConfig;
pub use error::{Result, SolveError};
pub use exact::{held_karp, HeldKarpSolver};
