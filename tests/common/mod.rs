#![allow(dead_code)]

use baskettrack::domain::basket::BasketConfig;
use baskettrack::domain::error::BasketError;
pub use baskettrack::domain::price::{PricePoint, TickerSeries};
use baskettrack::domain::range::Interval;
use baskettrack::ports::history_port::PriceHistoryPort;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

pub struct MockHistoryPort {
    pub data: HashMap<String, TickerSeries>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<(String, NaiveDate, NaiveDate, Interval)>>,
}

impl MockHistoryPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_series(mut self, series: TickerSeries) -> Self {
        self.data.insert(series.symbol.clone(), series);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl PriceHistoryPort for MockHistoryPort {
    fn fetch_history(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        interval: Interval,
    ) -> Result<TickerSeries, BasketError> {
        self.requests
            .borrow_mut()
            .push((symbol.to_string(), start_date, end_date, interval));
        if let Some(reason) = self.errors.get(symbol) {
            return Err(BasketError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| TickerSeries::new(symbol, vec![])))
    }

    fn list_symbols(&self) -> Result<Vec<String>, BasketError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Series with one close per `YYYY-MM-DD` date string.
pub fn make_series(symbol: &str, closes: &[(&str, f64)]) -> TickerSeries {
    TickerSeries::new(
        symbol,
        closes
            .iter()
            .map(|&(d, c)| {
                let day = NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap();
                PricePoint::on(day, Some(c))
            })
            .collect(),
    )
}

/// The two-ticker fixture: A 100/110/105 and B 200/220/210 on Jan 1-3 2024.
pub fn sample_history() -> Vec<TickerSeries> {
    vec![
        make_series(
            "AAPL",
            &[("2024-01-01", 100.0), ("2024-01-02", 110.0), ("2024-01-03", 105.0)],
        ),
        make_series(
            "GOOG",
            &[("2024-01-01", 200.0), ("2024-01-02", 220.0), ("2024-01-03", 210.0)],
        ),
    ]
}

pub fn equal_config(tickers: &[&str]) -> BasketConfig {
    BasketConfig::Equal {
        tickers: tickers.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn custom_config(pairs: &[(&str, f64)]) -> BasketConfig {
    BasketConfig::Custom {
        entries: to_entries(pairs),
    }
}

pub fn dollar_config(pairs: &[(&str, f64)]) -> BasketConfig {
    BasketConfig::Dollar {
        entries: to_entries(pairs),
    }
}

fn to_entries(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|&(s, v)| (s.to_string(), v)).collect()
}
