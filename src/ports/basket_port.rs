//! Read-only basket definition source.

use crate::domain::basket::Basket;
use crate::domain::error::BasketError;

pub trait BasketSource {
    fn list_baskets(&self) -> Result<Vec<Basket>, BasketError>;

    /// Default implementation: linear scan over `list_baskets`.
    fn get_basket(&self, id: &str) -> Result<Option<Basket>, BasketError> {
        Ok(self.list_baskets()?.into_iter().find(|b| b.id == id))
    }
}
