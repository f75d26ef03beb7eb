//! Warehouse lifecycle: create and update.
//!
//! Business validation failures (duplicate name, unknown id) come back as a
//! failed [`StockResponse`], not as raised errors; hook failures abort the
//! transaction and propagate. The store-relation set on update is fully
//! replaceable: the desired set is diffed against the current one and both
//! the add-set and the remove-set are applied.

use std::collections::BTreeSet;
use std::sync::Arc;

use stockyard_core::{StockError, StockResult, StoreId};

use crate::hooks::{StockPostCreateHook, StockPostUpdateHook};
use crate::repository::{StockRepository, StockTxn};
use crate::stock::{NewStock, StockData, StockResponse};
use crate::touch::{TouchKind, TouchRecord, TouchSink};

/// Create/update of warehouse entities including store-relationship
/// synchronization and post-mutation hooks.
pub struct StockLifecycleManager<R> {
    repository: Arc<R>,
    touch: Arc<dyn TouchSink>,
    post_create_hooks: Vec<Arc<dyn StockPostCreateHook>>,
    post_update_hooks: Vec<Arc<dyn StockPostUpdateHook>>,
}

impl<R> StockLifecycleManager<R>
where
    R: StockRepository,
{
    pub fn new(
        repository: Arc<R>,
        touch: Arc<dyn TouchSink>,
        post_create_hooks: Vec<Arc<dyn StockPostCreateHook>>,
        post_update_hooks: Vec<Arc<dyn StockPostUpdateHook>>,
    ) -> Self {
        Self {
            repository,
            touch,
            post_create_hooks,
            post_update_hooks,
        }
    }

    /// Persist a new warehouse with its store relations.
    pub fn create_stock(&self, new: &NewStock) -> StockResult<StockResponse> {
        if new.name.trim().is_empty() {
            return Ok(StockResponse::failure(vec![
                "stock name cannot be empty".to_string(),
            ]));
        }

        tracing::info!(name = %new.name, "creating stock");
        let result = self.run_mutation(|txn, touches| {
            let stock = txn.insert_stock(&new.name, new.is_active, new.uuid)?;
            txn.add_store_relations(stock.id, &new.store_ids)?;
            touches.push(TouchRecord {
                kind: TouchKind::StockType,
                id: stock.id.get(),
            });
            for hook in &self.post_create_hooks {
                hook.post_create(&stock)?;
            }
            Ok(stock)
        });

        match result {
            Ok(stock) => Ok(StockResponse::success(stock, new.store_ids.clone())),
            Err(StockError::UniqueViolation(_)) => Ok(StockResponse::failure(vec![format!(
                "stock name '{}' is already in use",
                new.name
            )])),
            Err(e) => Err(e),
        }
    }

    /// Persist changes to name/active flag and replace the store relation
    /// set when one is provided.
    pub fn update_stock(&self, data: &StockData) -> StockResult<StockResponse> {
        if self.repository.find_stock_by_id(data.id).is_none() {
            return Ok(StockResponse::failure(vec![format!(
                "stock {} does not exist",
                data.id
            )]));
        }

        tracing::info!(id = %data.id, name = %data.name, "updating stock");
        let result = self.run_mutation(|txn, touches| {
            let mut stock = txn.find_stock_by_id(data.id).ok_or_else(|| {
                StockError::validation(format!("stock {} disappeared mid-update", data.id))
            })?;
            stock.name = data.name.clone();
            stock.is_active = data.is_active;
            txn.update_stock(&stock)?;

            let store_ids = match &data.store_relation {
                Some(desired) => {
                    replace_store_relation(txn, &stock, desired)?;
                    desired.clone()
                }
                None => txn.store_relation(stock.id),
            };

            touches.push(TouchRecord {
                kind: TouchKind::StockType,
                id: stock.id.get(),
            });
            for hook in &self.post_update_hooks {
                hook.post_update(&stock)?;
            }
            Ok((stock, store_ids))
        });

        match result {
            Ok((stock, store_ids)) => Ok(StockResponse::success(stock, store_ids)),
            Err(StockError::UniqueViolation(_)) => Ok(StockResponse::failure(vec![format!(
                "stock name '{}' is already in use",
                data.name
            )])),
            Err(e) => Err(e),
        }
    }

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

/// Diff the current relation set against the desired one and apply the
/// add-set and remove-set.
fn replace_store_relation(
    txn: &mut dyn StockTxn,
    stock: &crate::stock::Stock,
    desired: &[StoreId],
) -> StockResult<()> {
    let current: BTreeSet<StoreId> = txn.store_relation(stock.id).into_iter().collect();
    let desired: BTreeSet<StoreId> = desired.iter().copied().collect();

    let to_add: Vec<StoreId> = desired.difference(&current).copied().collect();
    let to_remove: Vec<StoreId> = current.difference(&desired).copied().collect();

    txn.add_store_relations(stock.id, &to_add)?;
    txn.remove_store_relations(stock.id, &to_remove)?;
    Ok(())
}
