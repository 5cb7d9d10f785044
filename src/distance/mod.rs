//! Distance matrices.
//!
//! Provides a dense, possibly asymmetric cost matrix with an explicit
//! missing-edge sentinel and a JSON document form.

mod json;
mod matrix;

pub use matrix::{DistanceMatrix, NO_EDGE};
