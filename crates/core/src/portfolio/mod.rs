//! Portfolio computations - allocation rollup and presentation rows.

pub mod allocation;

pub use allocation::*;
