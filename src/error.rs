//! Error types for solver input validation and failure reporting.

use thiserror::Error;

/// Errors reported by the exact solvers and matrix constructors.
///
/// There is no partial-result mode: a solve either returns an optimal
/// [`Tour`](crate::models::Tour) or one of these.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The matrix is empty, not square, or has rows of differing length.
    #[error("matrix shape error: {0}")]
    Shape(String),
    /// The origin index is outside `[0, size)`.
    #[error("origin {origin} out of range for {size} cities")]
    OriginOutOfRange { origin: usize, size: usize },
    /// Missing edges make every Hamiltonian cycle through the origin impossible.
    #[error("no Hamiltonian cycle through city {origin} exists")]
    Unreachable { origin: usize },
    /// The instance exceeds the configured table budget.
    #[error("{cities} cities exceeds solver capacity ({limit})")]
    Capacity { cities: usize, limit: String },
    /// A matrix entry is NaN or negative.
    #[error("invalid cost {value} on edge {from} -> {to}")]
    InvalidCost { from: usize, to: usize, value: f64 },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SolveError>;

impl SolveError {
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    pub fn capacity(cities: usize, limit: impl Into<String>) -> Self {
        Self::Capacity {
            cities,
            limit: limit.into(),
        }
    }
}
