//! Core domain types and logic.

pub mod price;
pub mod basket;
pub mod performance;
pub mod range;
pub mod ticker_list;
pub mod config_validation;
pub mod error;
