//! Tour cost evaluation.

mod cycle;

pub use cycle::cycle_cost;
