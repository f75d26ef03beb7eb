//! Pluggable extension hooks.
//!
//! Each extension point is one narrow trait. Registered hooks run
//! synchronously in registration order; a failing hook propagates its error
//! and aborts the surrounding transaction — there is no isolation between
//! hooks.

use stockyard_core::StockResult;

use crate::stock::Stock;

/// Runs after a stock-product create/update, keyed by the product's sku.
pub trait StockUpdateHandler: Send + Sync {
    fn handle(&self, sku: &str) -> StockResult<()>;
}

/// Runs after a stock has been created, inside the same transaction.
pub trait StockPostCreateHook: Send + Sync {
    fn post_create(&self, stock: &Stock) -> StockResult<()>;
}

/// Runs after a stock has been updated, inside the same transaction.
pub trait StockPostUpdateHook: Send + Sync {
    fn post_update(&self, stock: &Stock) -> StockResult<()>;
}

/// Decorates stock collections on their way out of reader queries.
pub trait StockCollectionExpander: Send + Sync {
    fn expand(&self, stocks: Vec<Stock>) -> Vec<Stock>;
}
