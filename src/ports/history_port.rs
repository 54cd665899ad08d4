//! Price history access port trait.

use crate::domain::error::BasketError;
use crate::domain::price::TickerSeries;
use crate::domain::range::Interval;
use chrono::NaiveDate;

pub trait PriceHistoryPort {
    /// Closing prices for `symbol` between `start_date` and `end_date`
    /// inclusive, sampled at `interval`.
    fn fetch_history(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        interval: Interval,
    ) -> Result<TickerSeries, BasketError>;

    fn list_symbols(&self) -> Result<Vec<String>, BasketError>;
}
