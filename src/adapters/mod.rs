//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod csv_report_adapter;
pub mod config_basket_source;
pub mod file_config_adapter;
