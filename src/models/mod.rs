//! Result types for solved tours.

mod tour;

pub use tour::Tour;
