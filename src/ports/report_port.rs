//! Report generation port trait.

use crate::domain::basket::Basket;
use crate::domain::error::BasketError;
use crate::domain::performance::PerformancePoint;

/// Port for writing basket performance reports.
pub trait ReportPort {
    fn write(
        &self,
        basket: &Basket,
        points: &[PerformancePoint],
        output_path: &str,
    ) -> Result<(), BasketError>;
}
