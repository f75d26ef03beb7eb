//! Write-side stock mutations.
//!
//! Every public operation runs as one transaction: resolve identifiers,
//! validate preconditions, mutate, persist, signal invalidation, run hooks.
//! Touch signals are buffered while the transaction is open and delivered
//! to the sink only after commit, so a rollback leaves no signal observable
//! and every committed mutation delivers exactly one signal per record.

use std::sync::Arc;

use rust_decimal::Decimal;

use stockyard_catalog::ProductCatalog;
use stockyard_core::{ProductId, StockError, StockId, StockProductId, StockResult};

use crate::hooks::StockUpdateHandler;
use crate::product_reader::StockProductReader;
use crate::repository::{StockRepository, StockTxn};
use crate::stock_product::{NewStockProduct, ProductWithStocks, StockProduct, StockProductEntry};
use crate::touch::{TouchKind, TouchRecord, TouchSink};

/// Transactional create/update/increment/decrement of stock-product records.
pub struct StockWriter<R> {
    repository: Arc<R>,
    products: Arc<dyn ProductCatalog>,
    touch: Arc<dyn TouchSink>,
    update_handlers: Vec<Arc<dyn StockUpdateHandler>>,
    product_reader: StockProductReader<R>,
}

impl<R> StockWriter<R>
where
    R: StockRepository,
{
    pub fn new(
        repository: Arc<R>,
        products: Arc<dyn ProductCatalog>,
        touch: Arc<dyn TouchSink>,
        update_handlers: Vec<Arc<dyn StockUpdateHandler>>,
        product_reader: StockProductReader<R>,
    ) -> Self {
        Self {
            repository,
            products,
            touch,
            update_handlers,
            product_reader,
        }
    }

    /// Legacy find-or-create of a warehouse by name. Touches the record
    /// whether it was found or freshly created.
    pub fn create_stock_type(&self, name: &str) -> StockResult<StockId> {
        tracing::debug!(name, "creating stock type");
        self.run_mutation(|txn, touches| {
            let stock = match txn.find_stock_by_name(name) {
                Some(stock) => stock,
                None => match txn.insert_stock(name, true, None) {
                    Ok(stock) => stock,
                    // Another writer created it concurrently; re-read.
                    Err(StockError::UniqueViolation(_)) => txn
                        .find_stock_by_name(name)
                        .ok_or_else(|| StockError::unknown_stock_type(name))?,
                    Err(e) => return Err(e),
                },
            };
            touches.push(TouchRecord {
                kind: TouchKind::StockType,
                id: stock.id.get(),
            });
            Ok(stock.id)
        })
    }

    /// Create a stock-product row for the entry's (sku, stock type) pair.
    /// A second row for the same pair is a hard error.
    pub fn create_stock_product(&self, entry: &StockProductEntry) -> StockResult<StockProductId> {
        tracing::debug!(sku = %entry.sku, stock_type = %entry.stock_type, "creating stock product");
        self.run_mutation(|txn, touches| {
            let stock_id = resolve_stock_id(&*txn, &entry.stock_type)?;
            let product_id = self.resolve_product_id(&entry.sku)?;
            if txn.find_stock_product(stock_id, product_id).is_some() {
                return Err(StockError::StockProductAlreadyExists);
            }

            let row = txn.insert_stock_product(NewStockProduct {
                stock_id,
                product_id,
                quantity: entry.quantity,
                is_never_out_of_stock: entry.is_never_out_of_stock,
            })?;
            touches.push(TouchRecord {
                kind: TouchKind::StockProduct,
                id: row.id.get(),
            });
            self.run_update_handlers(&entry.sku)?;
            Ok(row.id)
        })
    }

    /// Overwrite an existing stock-product row (all four mutable fields).
    pub fn update_stock_product(&self, entry: &StockProductEntry) -> StockResult<StockProductId> {
        let id = entry
            .id
            .ok_or_else(|| StockError::validation("stock product id is required for update"))?;
        tracing::debug!(sku = %entry.sku, stock_type = %entry.stock_type, %id, "updating stock product");
        self.run_mutation(|txn, touches| {
            let product_id = self.resolve_product_id(&entry.sku)?;
            let stock_id = resolve_stock_id(&*txn, &entry.stock_type)?;
            let mut row = txn
                .stock_product_by_id(id)
                .ok_or_else(|| StockError::StockProductNotFound(format!("id {id}")))?;

            row.stock_id = stock_id;
            row.product_id = product_id;
            row.quantity = entry.quantity;
            row.is_never_out_of_stock = entry.is_never_out_of_stock;
            txn.update_stock_product(&row)?;

            touches.push(TouchRecord {
                kind: TouchKind::StockProduct,
                id: row.id.get(),
            });
            self.run_update_handlers(&entry.sku)?;
            Ok(row.id)
        })
    }

    /// Add `amount` to the pair's quantity, creating the row on first touch.
    pub fn increment_stock(
        &self,
        sku: &str,
        stock_type: &str,
        amount: Decimal,
    ) -> StockResult<()> {
        tracing::debug!(sku, stock_type, %amount, "incrementing stock");
        self.adjust_stock(sku, stock_type, amount)
    }

    /// Subtract `amount` from the pair's quantity, creating the row on first
    /// touch. No floor: the result may go negative.
    pub fn decrement_stock(
        &self,
        sku: &str,
        stock_type: &str,
        amount: Decimal,
    ) -> StockResult<()> {
        tracing::debug!(sku, stock_type, %amount, "decrementing stock");
        self.adjust_stock(sku, stock_type, -amount)
    }

    /// Create-or-update every stock entry attached to the product. Each
    /// entry is its own atomic unit; an error stops the iteration.
    pub fn persist_stock_product_collection(
        &self,
        product: &ProductWithStocks,
    ) -> StockResult<ProductWithStocks> {
        let mut persisted = product.clone();
        for entry in &mut persisted.stocks {
            match self.product_reader.stock_product_id(&entry.sku, &entry.stock_type) {
                Ok(id) => {
                    entry.id.get_or_insert(id);
                    self.update_stock_product(entry)?;
                }
                Err(StockError::StockProductNotFound(_)) => {
                    let id = self.create_stock_product(entry)?;
                    entry.id = Some(id);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(persisted)
    }

    fn adjust_stock(&self, sku: &str, stock_type: &str, delta: Decimal) -> StockResult<()> {
        self.run_mutation(|txn, touches| {
            let product_id = self.resolve_product_id(sku)?;
            let stock_id = resolve_stock_id(&*txn, stock_type)?;
            let mut row = find_or_create_stock_product(txn, stock_id, product_id)?;

            row.quantity = Some(row.available_quantity() + delta);
            txn.update_stock_product(&row)?;

            touches.push(TouchRecord {
                kind: TouchKind::StockProduct,
                id: row.id.get(),
            });
            Ok(())
        })
    }

    fn resolve_product_id(&self, sku: &str) -> StockResult<ProductId> {
        self.products
            .find_concrete_id_by_sku(sku)
            .ok_or_else(|| StockError::missing_product(sku))
    }

    fn run_update_handlers(&self, sku: &str) -> StockResult<()> {
        for handler in &self.update_handlers {
            handler.handle(sku)?;
        }
        Ok(())
    }

    /// Run a transaction, then deliver the touches it buffered. Nothing is
    /// delivered when the transaction rolls back.
    fn run_mutation<T>(
        &self,
        f: impl FnOnce(&mut dyn StockTxn, &mut Vec<TouchRecord>) -> StockResult<T>,
    ) -> StockResult<T> {
        let mut touches = Vec::new();
        let result = self.repository.transaction(|txn| f(txn, &mut touches))?;
        for record in touches {
            self.touch.touch_active(record.kind, record.id);
        }
        Ok(result)
    }
}

fn resolve_stock_id(txn: &dyn StockTxn, stock_type: &str) -> StockResult<StockId> {
    txn.find_stock_by_name(stock_type)
        .map(|stock| stock.id)
        .ok_or_else(|| StockError::unknown_stock_type(stock_type))
}

/// Load-or-default-construct under the open transaction. An insert losing
/// to a concurrent writer's unique constraint is resolved by re-reading.
fn find_or_create_stock_product(
    txn: &mut dyn StockTxn,
    stock_id: StockId,
    product_id: ProductId,
) -> StockResult<StockProduct> {
    if let Some(row) = txn.find_stock_product(stock_id, product_id) {
        return Ok(row);
    }
    match txn.insert_stock_product(NewStockProduct {
        stock_id,
        product_id,
        quantity: Some(Decimal::ZERO),
        is_never_out_of_stock: false,
    }) {
        Ok(row) => Ok(row),
        Err(StockError::UniqueViolation(_)) => txn
            .find_stock_product(stock_id, product_id)
            .ok_or_else(|| {
                StockError::StockProductNotFound(format!(
                    "stock {stock_id}, product {product_id}"
                ))
            }),
        Err(e) => Err(e),
    }
}
