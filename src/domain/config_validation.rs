//! Configuration validation.
//!
//! Rejects malformed basket definitions (unknown modes, negative or
//! non-numeric weights, duplicate tickers) before they reach the performance
//! engine, which does no validation of its own.

use crate::domain::basket::WeightMode;
use crate::domain::error::BasketError;
use crate::domain::ticker_list::{parse_ticker_list, TickerEntry};
use crate::ports::config_port::ConfigPort;

pub const DATA_SECTION: &str = "data";
pub const BASKET_SECTION_PREFIX: &str = "basket.";

/// Names of all `[basket.*]` sections.
pub fn basket_sections(config: &dyn ConfigPort) -> Vec<String> {
    config
        .sections()
        .into_iter()
        .filter(|s| s.starts_with(BASKET_SECTION_PREFIX) && s.len() > BASKET_SECTION_PREFIX.len())
        .collect()
}

pub fn validate_all(config: &dyn ConfigPort) -> Result<(), BasketError> {
    validate_data_config(config)?;
    for section in basket_sections(config) {
        validate_basket_config(config, &section)?;
    }
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), BasketError> {
    match config.get_string(DATA_SECTION, "dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(BasketError::ConfigMissing {
            section: DATA_SECTION.to_string(),
            key: "dir".to_string(),
        }),
    }
}

pub fn validate_basket_config(config: &dyn ConfigPort, section: &str) -> Result<(), BasketError> {
    let mode = parse_weight_mode(config, section)?;
    let entries = parse_tickers(config, section)?;

    if mode == WeightMode::Equal {
        return Ok(());
    }
    for entry in &entries {
        parse_amount(section, entry)?;
    }
    Ok(())
}

pub fn parse_weight_mode(config: &dyn ConfigPort, section: &str) -> Result<WeightMode, BasketError> {
    let raw = config
        .get_string(section, "mode")
        .ok_or_else(|| BasketError::ConfigMissing {
            section: section.to_string(),
            key: "mode".to_string(),
        })?;
    raw.parse().map_err(|reason| BasketError::ConfigInvalid {
        section: section.to_string(),
        key: "mode".to_string(),
        reason,
    })
}

pub fn parse_tickers(config: &dyn ConfigPort, section: &str) -> Result<Vec<TickerEntry>, BasketError> {
    let raw = match config.get_string(section, "tickers") {
        Some(s) if !s.trim().is_empty() => s,
        _ => {
            return Err(BasketError::ConfigMissing {
                section: section.to_string(),
                key: "tickers".to_string(),
            })
        }
    };
    parse_ticker_list(&raw).map_err(|e| BasketError::ConfigInvalid {
        section: section.to_string(),
        key: "tickers".to_string(),
        reason: e.to_string(),
    })
}

/// Weight or dollar amount attached to a ticker: must be present, finite and
/// non-negative.
pub fn parse_amount(section: &str, entry: &TickerEntry) -> Result<f64, BasketError> {
    let invalid = |reason: String| BasketError::ConfigInvalid {
        section: section.to_string(),
        key: "tickers".to_string(),
        reason,
    };

    let raw = entry
        .value
        .as_deref()
        .ok_or_else(|| invalid(format!("{} has no value", entry.ticker)))?;
    let value: f64 = raw
        .parse()
        .map_err(|_| invalid(format!("{}: '{}' is not a number", entry.ticker, raw)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!(
            "{}: value must be a non-negative number",
            entry.ticker
        )));
    }
    Ok(value)
}
