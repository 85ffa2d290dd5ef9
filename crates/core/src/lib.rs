//! Driftfolio Core - allocation targets, holdings rollup, and drift engine.
//!
//! This crate contains the core business logic for tracking holdings across
//! accounts and comparing current allocations against configured targets.
//! It is storage-agnostic and defines repository traits that callers
//! implement; the engine is handed fully-loaded in-memory snapshots and
//! performs no I/O of its own.

pub mod accounts;
pub mod assets;
pub mod constants;
pub mod errors;
pub mod holdings;
pub mod market_data;
pub mod portfolio;
pub mod rebalancing;
pub mod strategies;
pub mod utils;

// Re-export the allocation engine types
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
