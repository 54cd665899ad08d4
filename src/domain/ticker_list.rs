//! Parsing of basket ticker lists such as `AAPL:75, GOOG:25`.

use std::collections::HashSet;

/// One `TICKER[:value]` token.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerEntry {
    pub ticker: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TickerListError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

pub fn parse_ticker_list(input: &str) -> Result<Vec<TickerEntry>, TickerListError> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let (ticker, value) = match token.split_once(':') {
            Some((t, v)) => (t.trim(), Some(v.trim())),
            None => (token.trim(), None),
        };
        if ticker.is_empty() {
            return Err(TickerListError::EmptyToken);
        }
        let ticker = ticker.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(TickerListError::DuplicateTicker(ticker));
        }
        entries.push(TickerEntry {
            ticker,
            value: value.filter(|v| !v.is_empty()).map(str::to_string),
        });
    }

    Ok(entries)
}
