//! Persistence seam for stock records.
//!
//! Reads go through [`StockRepository`] snapshot queries; writes only happen
//! inside [`StockRepository::transaction`], against the object-safe
//! [`StockTxn`] surface. A transaction commits everything or nothing — an
//! `Err` from the closure must leave no observable write behind.
//!
//! Unique constraints (stock name, (stock, product) pair) are enforced by
//! the storage layer and surface as [`StockError::UniqueViolation`]
//! (`stockyard_core::StockError`), so callers can treat a violation as
//! "another writer created it concurrently" and re-read.

use uuid::Uuid;

use stockyard_core::{ProductId, StockId, StockProductId, StockResult, StoreId};

use crate::stock::{Stock, StockCriteria};
use crate::stock_product::{NewStockProduct, StockProduct};

/// Transaction-scoped view: the reads needed for resolution plus all writes.
pub trait StockTxn {
    fn find_stock_by_id(&self, id: StockId) -> Option<Stock>;

    fn find_stock_by_name(&self, name: &str) -> Option<Stock>;

    fn store_relation(&self, stock_id: StockId) -> Vec<StoreId>;

    fn find_stock_product(
        &self,
        stock_id: StockId,
        product_id: ProductId,
    ) -> Option<StockProduct>;

    fn stock_product_by_id(&self, id: StockProductId) -> Option<StockProduct>;

    /// Insert a stock row. Fails with `UniqueViolation` when the name is
    /// already taken.
    fn insert_stock(
        &mut self,
        name: &str,
        is_active: bool,
        uuid: Option<Uuid>,
    ) -> StockResult<Stock>;

    /// Overwrite name/active/uuid of an existing stock row. Fails with
    /// `UniqueViolation` when renaming onto another stock's name.
    fn update_stock(&mut self, stock: &Stock) -> StockResult<()>;

    /// Add join rows for the given stores (already-related stores are a
    /// no-op).
    fn add_store_relations(&mut self, stock_id: StockId, store_ids: &[StoreId]) -> StockResult<()>;

    /// Remove join rows for the given stores.
    fn remove_store_relations(
        &mut self,
        stock_id: StockId,
        store_ids: &[StoreId],
    ) -> StockResult<()>;

    /// Insert a stock-product row. Fails with `UniqueViolation` when a row
    /// for the (stock, product) pair already exists.
    fn insert_stock_product(&mut self, new: NewStockProduct) -> StockResult<StockProduct>;

    /// Overwrite an existing stock-product row.
    fn update_stock_product(&mut self, row: &StockProduct) -> StockResult<()>;
}

/// Snapshot read surface plus the transaction boundary.
///
/// Reads outside a transaction may observe state mid-mutation by another
/// caller, subject to the backing store's isolation; this seam adds no
/// consistency of its own.
pub trait StockRepository: Send + Sync {
    fn find_stock_by_id(&self, id: StockId) -> Option<Stock>;

    fn find_stock_by_name(&self, name: &str) -> Option<Stock>;

    /// Stocks passing the criteria filters, ordered by id.
    fn stocks_by_criteria(&self, criteria: &StockCriteria) -> Vec<Stock>;

    fn store_relation(&self, stock_id: StockId) -> Vec<StoreId>;

    /// All rows for the product, regardless of warehouse state.
    fn stock_products_by_product(&self, product_id: ProductId) -> Vec<StockProduct>;

    fn find_stock_product(
        &self,
        stock_id: StockId,
        product_id: ProductId,
    ) -> Option<StockProduct>;

    fn stock_product_by_id(&self, id: StockProductId) -> Option<StockProduct>;

    /// Stores related to any stock that holds a row for the product.
    fn store_ids_with_product_stock(&self, product_id: ProductId) -> Vec<StoreId>;

    /// Run `f` atomically. On `Ok` all writes commit; on `Err` none do.
    fn transaction<T>(
        &self,
        f: impl FnOnce(&mut dyn StockTxn) -> StockResult<T>,
    ) -> StockResult<T>
    where
        Self: Sized;
}
