//! Basket definitions and weighting configuration.
//!
//! A [`Basket`] is the user-facing record (name, mode, items). The engine only
//! sees the [`BasketConfig`] derived from it, where each mode carries exactly
//! the parameters it needs.

use crate::domain::error::BasketError;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightMode {
    Equal,
    Custom,
    Dollar,
}

impl fmt::Display for WeightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WeightMode::Equal => "equal",
            WeightMode::Custom => "custom",
            WeightMode::Dollar => "dollar",
        };
        f.write_str(s)
    }
}

impl FromStr for WeightMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equal" => Ok(WeightMode::Equal),
            "custom" => Ok(WeightMode::Custom),
            "dollar" => Ok(WeightMode::Dollar),
            other => Err(format!(
                "unknown weight mode '{other}' (expected equal, custom or dollar)"
            )),
        }
    }
}

/// Weighting configuration consumed by the performance engine.
#[derive(Debug, Clone, PartialEq)]
pub enum BasketConfig {
    /// Every ticker contributes identical weight.
    Equal { tickers: BTreeSet<String> },
    /// Relative weights; need not sum to 100.
    Custom { entries: BTreeMap<String, f64> },
    /// Principal invested per ticker.
    Dollar { entries: BTreeMap<String, f64> },
}

impl BasketConfig {
    pub fn mode(&self) -> WeightMode {
        match self {
            BasketConfig::Equal { .. } => WeightMode::Equal,
            BasketConfig::Custom { .. } => WeightMode::Custom,
            BasketConfig::Dollar { .. } => WeightMode::Dollar,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            BasketConfig::Equal { tickers } => tickers.is_empty(),
            BasketConfig::Custom { entries } | BasketConfig::Dollar { entries } => {
                entries.is_empty()
            }
        }
    }

    /// Configured tickers in ascending symbol order.
    pub fn tickers(&self) -> Vec<&str> {
        match self {
            BasketConfig::Equal { tickers } => tickers.iter().map(String::as_str).collect(),
            BasketConfig::Custom { entries } | BasketConfig::Dollar { entries } => {
                entries.keys().map(String::as_str).collect()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasketItem {
    pub ticker: String,
    pub weight: Option<f64>,
    pub dollar_amount: Option<f64>,
}

impl BasketItem {
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            weight: None,
            dollar_amount: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_dollar_amount(mut self, amount: f64) -> Self {
        self.dollar_amount = Some(amount);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Basket {
    pub id: String,
    pub name: String,
    pub weight_mode: WeightMode,
    pub items: Vec<BasketItem>,
}

impl Basket {
    pub fn new(id: impl Into<String>, name: impl Into<String>, weight_mode: WeightMode) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weight_mode,
            items: Vec::new(),
        }
    }

    pub fn contains(&self, ticker: &str) -> bool {
        let ticker = ticker.trim().to_uppercase();
        self.items.iter().any(|i| i.ticker == ticker)
    }

    /// Add an item, upper-casing its ticker. Returns `false` and leaves the
    /// basket unchanged if the ticker is already present.
    pub fn add_item(&mut self, item: BasketItem) -> bool {
        let item = BasketItem {
            ticker: item.ticker.trim().to_uppercase(),
            ..item
        };
        if self.contains(&item.ticker) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn tickers(&self) -> Vec<String> {
        self.items.iter().map(|i| i.ticker.clone()).collect()
    }

    /// Build the engine configuration for this basket.
    pub fn config(&self) -> Result<BasketConfig, BasketError> {
        let section = format!("basket.{}", self.id);
        let missing = |what: &str, ticker: &str| BasketError::ConfigInvalid {
            section: section.clone(),
            key: "tickers".into(),
            reason: format!("{ticker} has no {what}"),
        };

        match self.weight_mode {
            WeightMode::Equal => Ok(BasketConfig::Equal {
                tickers: self.items.iter().map(|i| i.ticker.clone()).collect(),
            }),
            WeightMode::Custom => {
                let mut entries = BTreeMap::new();
                for item in &self.items {
                    let weight = item.weight.ok_or_else(|| missing("weight", &item.ticker))?;
                    entries.insert(item.ticker.clone(), weight);
                }
                Ok(BasketConfig::Custom { entries })
            }
            WeightMode::Dollar => {
                let mut entries = BTreeMap::new();
                for item in &self.items {
                    let amount = item
                        .dollar_amount
                        .ok_or_else(|| missing("dollar amount", &item.ticker))?;
                    entries.insert(item.ticker.clone(), amount);
                }
                Ok(BasketConfig::Dollar { entries })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_mode_parse_and_display() {
        assert_eq!("equal".parse::<WeightMode>().unwrap(), WeightMode::Equal);
        assert_eq!(" Custom ".parse::<WeightMode>().unwrap(), WeightMode::Custom);
        assert_eq!("DOLLAR".parse::<WeightMode>().unwrap(), WeightMode::Dollar);
        assert!("market_cap".parse::<WeightMode>().is_err());
        assert_eq!(WeightMode::Dollar.to_string(), "dollar");
    }

    #[test]
    fn new_basket_is_empty() {
        let b = Basket::new("tech", "Tech", WeightMode::Equal);
        assert!(b.items.is_empty());
        assert!(b.config().unwrap().is_empty());
    }

    #[test]
    fn add_item_uppercases() {
        let mut b = Basket::new("tech", "Tech", WeightMode::Equal);
        assert!(b.add_item(BasketItem::new("aapl")));
        assert_eq!(b.tickers(), vec!["AAPL"]);
    }

    #[test]
    fn add_item_prevents_duplicates() {
        let mut b = Basket::new("tech", "Tech", WeightMode::Equal);
        assert!(b.add_item(BasketItem::new("AAPL")));
        assert!(!b.add_item(BasketItem::new("aapl")));
        assert!(b.add_item(BasketItem::new("GOOG")));
        assert_eq!(b.items.len(), 2);
    }

    #[test]
    fn custom_config_carries_weights() {
        let mut b = Basket::new("tech", "Tech", WeightMode::Custom);
        b.add_item(BasketItem::new("AAPL").with_weight(75.0));
        b.add_item(BasketItem::new("GOOG").with_weight(25.0));

        match b.config().unwrap() {
            BasketConfig::Custom { entries } => {
                assert_eq!(entries.get("AAPL"), Some(&75.0));
                assert_eq!(entries.get("GOOG"), Some(&25.0));
            }
            other => panic!("expected custom config, got {other:?}"),
        }
    }

    #[test]
    fn custom_config_requires_weight() {
        let mut b = Basket::new("tech", "Tech", WeightMode::Custom);
        b.add_item(BasketItem::new("AAPL"));
        let err = b.config().unwrap_err();
        assert!(matches!(err, BasketError::ConfigInvalid { reason, .. } if reason.contains("AAPL")));
    }

    #[test]
    fn dollar_config_requires_amount() {
        let mut b = Basket::new("income", "Income", WeightMode::Dollar);
        b.add_item(BasketItem::new("T").with_weight(1.0));
        assert!(b.config().is_err());

        let mut b = Basket::new("income", "Income", WeightMode::Dollar);
        b.add_item(BasketItem::new("T").with_dollar_amount(500.0));
        assert_eq!(b.config().unwrap().mode(), WeightMode::Dollar);
    }

    #[test]
    fn config_tickers_sorted() {
        let config = BasketConfig::Equal {
            tickers: ["MSFT", "AAPL", "GOOG"].iter().map(|s| s.to_string()).collect(),
        };
        assert_eq!(config.tickers(), vec!["AAPL", "GOOG", "MSFT"]);
    }
}
