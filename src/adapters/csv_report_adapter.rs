//! CSV report adapter implementing ReportPort.
//!
//! Writes one `date,value` row per performance point, and quote tables for
//! the `quotes` command.

use serde::Serialize;
use std::fs::File;
use std::io::Write;

use crate::domain::basket::Basket;
use crate::domain::error::BasketError;
use crate::domain::performance::PerformancePoint;
use crate::domain::price::Quote;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize `points` as CSV into any writer.
    pub fn write_to<W: Write>(&self, writer: W, points: &[PerformancePoint]) -> Result<(), BasketError> {
        write_rows(writer, points)
    }

    /// `symbol,date,price,change,change_percent` rows; unknown changes are blank.
    pub fn write_quotes_to<W: Write>(&self, writer: W, quotes: &[Quote]) -> Result<(), BasketError> {
        write_rows(writer, quotes)
    }
}

fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), BasketError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row).map_err(|e| BasketError::Data {
            reason: format!("CSV write error: {}", e),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        basket: &Basket,
        points: &[PerformancePoint],
        output_path: &str,
    ) -> Result<(), BasketError> {
        let file = File::create(output_path)?;
        self.write_to(file, points)?;
        tracing::debug!(
            basket = %basket.id,
            rows = points.len(),
            path = output_path,
            "performance report written"
        );
        Ok(())
    }
}
