//! CSV file price history adapter.
//!
//! Reads `<base_path>/<SYMBOL>.csv`. The header row must name a `date` and a
//! `close` column; other columns (open, high, volume, ...) are ignored, so
//! plain OHLCV exports work unchanged. A blank, `null` or `NaN` close is a
//! missing price.

use crate::domain::error::BasketError;
use crate::domain::price::{parse_timestamp, resample_weekly, PricePoint, TickerSeries};
use crate::domain::range::Interval;
use crate::ports::history_port::PriceHistoryPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvHistoryAdapter {
    base_path: PathBuf,
}

impl CsvHistoryAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn column(headers: &csv::StringRecord, name: &str) -> Result<usize, BasketError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| BasketError::Data {
            reason: format!("missing {} column", name),
        })
}

/// Parse a close cell; `Ok(None)` for the markers exports use on holidays.
fn parse_close(raw: &str) -> Result<Option<f64>, BasketError> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") || raw.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    raw.parse::<f64>().map(Some).map_err(|e| BasketError::Data {
        reason: format!("invalid close value '{}': {}", raw, e),
    })
}

impl PriceHistoryPort for CsvHistoryAdapter {
    fn fetch_history(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        interval: Interval,
    ) -> Result<TickerSeries, BasketError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| BasketError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| BasketError::Data {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();
        let date_col = column(&headers, "date")?;
        let close_col = column(&headers, "close")?;

        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| BasketError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_col).unwrap_or_default();
            let timestamp = parse_timestamp(date_str).ok_or_else(|| BasketError::Data {
                reason: format!("invalid date '{}' in {}", date_str, path.display()),
            })?;

            let day = timestamp.date_naive();
            if day < start_date || day > end_date {
                continue;
            }

            let close = parse_close(record.get(close_col).unwrap_or_default())?;

            points.push(PricePoint::new(timestamp, close));
        }

        points.sort_by_key(|p| p.timestamp);
        if interval == Interval::Weekly {
            // the first week's Monday may precede the range start
            points = resample_weekly(&points)
                .into_iter()
                .map(|p| {
                    if p.trading_day() < start_date {
                        PricePoint::on(start_date, p.close)
                    } else {
                        p
                    }
                })
                .collect();
        }
        Ok(TickerSeries::new(symbol, points))
    }

    fn list_symbols(&self) -> Result<Vec<String>, BasketError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| BasketError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| BasketError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
