//! Total-stock aggregation.
//!
//! All sums use exact decimal addition over active-warehouse rows; rows of
//! inactive warehouses are excluded from the sum entirely, and a `None`
//! quantity contributes zero.

use rust_decimal::Decimal;

use stockyard_core::StockResult;

use crate::product_reader::StockProductReader;
use crate::repository::StockRepository;
use crate::stock_product::StockProduct;

/// Aggregates total available quantity per product.
pub struct StockCalculator<R> {
    product_reader: StockProductReader<R>,
}

impl<R> Clone for StockCalculator<R> {
    fn clone(&self) -> Self {
        Self {
            product_reader: self.product_reader.clone(),
        }
    }
}

impl<R> StockCalculator<R>
where
    R: StockRepository,
{
    pub fn new(product_reader: StockProductReader<R>) -> Self {
        Self { product_reader }
    }

    /// Total quantity of the concrete product across active warehouses.
    /// `Decimal::ZERO` when no rows exist.
    pub fn stock_for_product(&self, sku: &str) -> StockResult<Decimal> {
        let rows = self.product_reader.stocks_for_product(sku)?;
        Ok(Self::sum(&rows))
    }

    /// Total quantity of the concrete product across active warehouses
    /// related to the store.
    pub fn product_stock_for_store(&self, sku: &str, store_name: &str) -> Decimal {
        Self::sum(&self.product_reader.product_stocks_for_store(sku, store_name))
    }

    /// Total quantity over every concrete product under the abstract sku,
    /// across active warehouses related to the store.
    pub fn abstract_product_stock_for_store(
        &self,
        abstract_sku: &str,
        store_name: &str,
    ) -> Decimal {
        Self::sum(
            &self
                .product_reader
                .abstract_product_stocks_for_store(abstract_sku, store_name),
        )
    }

    fn sum(rows: &[StockProduct]) -> Decimal {
        rows.iter()
            .fold(Decimal::ZERO, |total, row| total + row.available_quantity())
    }
}
