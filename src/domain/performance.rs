//! Basket performance aggregation.
//!
//! Aligns per-ticker closing prices onto a unified calendar, picks each
//! ticker's baseline (first recorded price on the axis) and blends the tickers
//! into one series according to the [`BasketConfig`].
//!
//! The computation is total: missing tickers, sparse series and empty inputs
//! degrade to zero contribution, never to an error. A ticker without a price
//! on a given date is left out of that date's aggregate; its last known price
//! is not carried forward.

use crate::domain::basket::BasketConfig;
use crate::domain::price::{PricePoint, TickerSeries};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Closes for one symbol keyed by calendar day.
#[derive(Debug, Clone, Default)]
pub struct PriceIndex {
    // (raw timestamp, close); the timestamp resolves duplicate days
    closes: HashMap<NaiveDate, (DateTime<Utc>, f64)>,
}

impl PriceIndex {
    /// Insert a point. A later raw timestamp on the same day replaces an
    /// earlier one; equal timestamps resolve to the last inserted.
    pub fn insert(&mut self, point: &PricePoint) {
        let Some(close) = point.usable_close() else {
            return;
        };
        let day = point.trading_day();
        match self.closes.get(&day) {
            Some(&(seen, _)) if point.timestamp < seen => {}
            _ => {
                self.closes.insert(day, (point.timestamp, close));
            }
        }
    }

    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.closes.get(&date).map(|&(_, close)| close)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.closes.keys().copied()
    }
}

/// Index every series by symbol. Series sharing a symbol are merged.
pub fn index_history(history: &[TickerSeries]) -> HashMap<&str, PriceIndex> {
    let mut indexes: HashMap<&str, PriceIndex> = HashMap::new();
    for series in history {
        let index = indexes.entry(series.symbol.as_str()).or_default();
        for point in &series.points {
            index.insert(point);
        }
    }
    indexes
}

/// Sorted union of every indexed date.
pub fn build_date_axis(indexes: &HashMap<&str, PriceIndex>) -> Vec<NaiveDate> {
    let unique: BTreeSet<NaiveDate> = indexes.values().flat_map(|index| index.dates()).collect();
    unique.into_iter().collect()
}

/// First price on the axis for each configured ticker.
///
/// A ticker with no price, or whose first price is zero, gets no baseline and
/// is excluded from every later step.
pub fn select_baselines<'a>(
    tickers: &[&'a str],
    indexes: &HashMap<&str, PriceIndex>,
    axis: &[NaiveDate],
) -> HashMap<&'a str, f64> {
    let mut baselines = HashMap::new();
    for &ticker in tickers {
        let Some(index) = indexes.get(ticker) else {
            continue;
        };
        let first = axis.iter().find_map(|&date| index.close_on(date));
        if let Some(price) = first.filter(|&p| p != 0.0) {
            baselines.insert(ticker, price);
        }
    }
    baselines
}

/// Round half away from zero to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the basket's value (dollar mode) or weighted percentage return
/// (equal/custom mode) for every date in the union of the input series.
pub fn compute_performance(history: &[TickerSeries], config: &BasketConfig) -> Vec<PerformancePoint> {
    if history.is_empty() || config.is_empty() {
        return Vec::new();
    }

    let indexes = index_history(history);
    let axis = build_date_axis(&indexes);
    if axis.is_empty() {
        return Vec::new();
    }

    let tickers = config.tickers();
    let baselines = select_baselines(&tickers, &indexes, &axis);

    // (ticker, baseline, index) for every ticker that can contribute at all
    let legs: Vec<(&str, f64, &PriceIndex)> = tickers
        .iter()
        .filter_map(|&t| Some((t, *baselines.get(t)?, indexes.get(t)?)))
        .collect();

    axis.iter()
        .map(|&date| {
            let value = match config {
                BasketConfig::Dollar { entries } => {
                    let total: f64 = legs
                        .iter()
                        .filter_map(|&(ticker, base, index)| {
                            let current = index.close_on(date).filter(|&p| p != 0.0)?;
                            let amount = entries.get(ticker)?;
                            Some(amount * (current / base))
                        })
                        .sum();
                    round_cents(total)
                }
                BasketConfig::Equal { .. } | BasketConfig::Custom { .. } => {
                    let mut weighted_sum = 0.0;
                    let mut weight_sum = 0.0;
                    for &(ticker, base, index) in &legs {
                        let Some(current) = index.close_on(date).filter(|&p| p != 0.0) else {
                            continue;
                        };
                        let weight = match config {
                            BasketConfig::Custom { entries } => match entries.get(ticker) {
                                Some(&w) => w,
                                None => continue,
                            },
                            _ => 1.0,
                        };
                        let pct_return = (current - base) / base * 100.0;
                        weighted_sum += pct_return * weight;
                        weight_sum += weight;
                    }
                    // a zero or negative total weight reports no return
                    if weight_sum > 0.0 {
                        round_cents(weighted_sum / weight_sum)
                    } else {
                        0.0
                    }
                }
            };
            PerformancePoint { date, value }
        })
        .collect()
}
