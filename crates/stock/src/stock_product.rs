//! Warehouse-product association rows and transfer types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockyard_core::{Entity, ProductId, StockId, StockProductId};

/// The quantity of one concrete product held at one warehouse.
///
/// At most one row exists per (stock, product) pair. A `None` quantity is
/// persisted as given and counts as zero for availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockProduct {
    pub id: StockProductId,
    pub stock_id: StockId,
    pub product_id: ProductId,
    pub quantity: Option<Decimal>,
    pub is_never_out_of_stock: bool,
}

impl StockProduct {
    /// Quantity counted toward availability sums; `None` is zero.
    pub fn available_quantity(&self) -> Decimal {
        self.quantity.unwrap_or(Decimal::ZERO)
    }

    /// Positive-availability check: positive quantity or the override flag.
    pub fn is_available(&self) -> bool {
        self.is_never_out_of_stock || self.available_quantity() > Decimal::ZERO
    }
}

impl Entity for StockProduct {
    type Id = StockProductId;

    fn id(&self) -> &StockProductId {
        &self.id
    }
}

/// Insert payload for a stock-product row; the id is storage-generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockProduct {
    pub stock_id: StockId,
    pub product_id: ProductId,
    pub quantity: Option<Decimal>,
    pub is_never_out_of_stock: bool,
}

/// Caller-facing stock entry keyed by names instead of ids.
///
/// Writers resolve `sku` and `stock_type` to ids; readers fill them back in
/// when mapping rows out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockProductEntry {
    pub id: Option<StockProductId>,
    pub sku: String,
    pub stock_type: String,
    pub stock_id: Option<StockId>,
    pub quantity: Option<Decimal>,
    pub is_never_out_of_stock: bool,
}

impl StockProductEntry {
    pub fn new(sku: impl Into<String>, stock_type: impl Into<String>) -> Self {
        Self {
            id: None,
            sku: sku.into(),
            stock_type: stock_type.into(),
            stock_id: None,
            quantity: None,
            is_never_out_of_stock: false,
        }
    }

    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn never_out_of_stock(mut self) -> Self {
        self.is_never_out_of_stock = true;
        self
    }
}

/// A concrete product together with its stock entries, as exchanged with
/// catalog-expansion and collection-persist callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWithStocks {
    pub product_id: ProductId,
    pub sku: String,
    pub stocks: Vec<StockProductEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(quantity: Option<Decimal>, is_never_out_of_stock: bool) -> StockProduct {
        StockProduct {
            id: StockProductId::new(1),
            stock_id: StockId::new(1),
            product_id: ProductId::new(1),
            quantity,
            is_never_out_of_stock,
        }
    }

    #[test]
    fn null_quantity_counts_as_zero() {
        assert_eq!(row(None, false).available_quantity(), Decimal::ZERO);
    }

    #[test]
    fn availability_requires_positive_quantity_or_flag() {
        assert!(row(Some(dec!(0.001)), false).is_available());
        assert!(row(None, true).is_available());
        assert!(!row(Some(Decimal::ZERO), false).is_available());
        assert!(!row(Some(dec!(-4)), false).is_available());
        assert!(!row(None, false).is_available());
    }
}
