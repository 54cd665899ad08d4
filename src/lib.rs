//! baskettrack: weighted ticker basket performance tracker.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. The performance engine itself is
//! [`domain::performance::compute_performance`], a pure function.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
pub mod logging;
