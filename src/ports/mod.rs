//! Port traits implemented by adapters.

pub mod config_port;
pub mod history_port;
pub mod basket_port;
pub mod report_port;
