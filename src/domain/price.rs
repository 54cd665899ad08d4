//! Raw per-ticker price history as delivered by a history provider.

use crate::domain::performance::round_cents;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: Option<f64>,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, close: Option<f64>) -> Self {
        Self { timestamp, close }
    }

    /// A point stamped at midnight UTC on `date`.
    pub fn on(date: NaiveDate, close: Option<f64>) -> Self {
        Self {
            timestamp: date.and_time(chrono::NaiveTime::MIN).and_utc(),
            close,
        }
    }

    /// Calendar-day key: the UTC date with time-of-day dropped.
    pub fn trading_day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// The close, if present and finite.
    pub fn usable_close(&self) -> Option<f64> {
        self.close.filter(|c| c.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickerSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl TickerSeries {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// First and last trading day with a usable close.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut days = self
            .points
            .iter()
            .filter(|p| p.usable_close().is_some())
            .map(PricePoint::trading_day);
        let first = days.next()?;
        Some(days.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}

/// Latest close with its move against the previous close.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub date: NaiveDate,
    pub price: f64,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
}

/// Quote from the last two usable closes of `series`, by timestamp.
///
/// `None` when the series has no usable close. With a single close, or a
/// zero previous close, the change fields are `None`. Changes are rounded
/// to cents.
pub fn latest_quote(series: &TickerSeries) -> Option<Quote> {
    let mut usable: Vec<(DateTime<Utc>, f64)> = series
        .points
        .iter()
        .filter_map(|p| Some((p.timestamp, p.usable_close()?)))
        .collect();
    usable.sort_by_key(|&(ts, _)| ts);

    let &(timestamp, price) = usable.last()?;
    let previous = usable.len().checked_sub(2).map(|i| usable[i].1);
    let change = previous.map(|prev| round_cents(price - prev));
    let change_percent = previous
        .filter(|&prev| prev != 0.0)
        .map(|prev| round_cents((price - prev) / prev * 100.0));

    Some(Quote {
        symbol: series.symbol.clone(),
        date: timestamp.date_naive(),
        price,
        change,
        change_percent,
    })
}

/// Parse a provider timestamp: either `YYYY-MM-DD` (midnight UTC) or RFC 3339.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Collapse points into one per ISO week, dated at the week's Monday and
/// carrying the latest usable close observed in that week.
///
/// Points without a usable close are dropped.
pub fn resample_weekly(points: &[PricePoint]) -> Vec<PricePoint> {
    let mut weeks: BTreeMap<NaiveDate, (DateTime<Utc>, f64)> = BTreeMap::new();

    for point in points {
        let Some(close) = point.usable_close() else {
            continue;
        };
        let key = week_start(point.trading_day());
        let entry = weeks.entry(key).or_insert((point.timestamp, close));
        if point.timestamp >= entry.0 {
            *entry = (point.timestamp, close);
        }
    }

    weeks
        .into_iter()
        .map(|(monday, (_, close))| PricePoint::on(monday, Some(close)))
        .collect()
}
