//! In-memory stock repository.
//!
//! - No IO / no async
//! - Unique constraints enforced on insert/update, surfaced as
//!   `UniqueViolation`
//! - Transactions run against a cloned state; commit swaps the clone in,
//!   an error drops it — no partial write is ever observable

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use uuid::Uuid;

use stockyard_core::{ProductId, StockError, StockId, StockProductId, StockResult, StoreId};
use stockyard_stock::repository::{StockRepository, StockTxn};
use stockyard_stock::stock::{Stock, StockCriteria};
use stockyard_stock::stock_product::{NewStockProduct, StockProduct};

#[derive(Debug, Clone, Default)]
struct State {
    stocks: BTreeMap<StockId, Stock>,
    stock_products: BTreeMap<StockProductId, StockProduct>,
    relations: BTreeMap<StockId, BTreeSet<StoreId>>,
    last_stock_id: i64,
    last_stock_product_id: i64,
}

impl State {
    fn find_stock_by_name(&self, name: &str) -> Option<Stock> {
        self.stocks.values().find(|s| s.name == name).cloned()
    }

    fn relation(&self, stock_id: StockId) -> Vec<StoreId> {
        self.relations
            .get(&stock_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    fn find_stock_product(
        &self,
        stock_id: StockId,
        product_id: ProductId,
    ) -> Option<StockProduct> {
        self.stock_products
            .values()
            .find(|row| row.stock_id == stock_id && row.product_id == product_id)
            .cloned()
    }
}

/// Mutex-guarded tables with monotonic id assignment.
#[derive(Debug, Default)]
pub struct InMemoryStockRepository {
    state: Mutex<State>,
}

impl InMemoryStockRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

struct Txn<'a> {
    state: &'a mut State,
}

impl StockTxn for Txn<'_> {
    fn find_stock_by_id(&self, id: StockId) -> Option<Stock> {
        self.state.stocks.get(&id).cloned()
    }

    fn find_stock_by_name(&self, name: &str) -> Option<Stock> {
        self.state.find_stock_by_name(name)
    }

    fn store_relation(&self, stock_id: StockId) -> Vec<StoreId> {
        self.state.relation(stock_id)
    }

    fn find_stock_product(
        &self,
        stock_id: StockId,
        product_id: ProductId,
    ) -> Option<StockProduct> {
        self.state.find_stock_product(stock_id, product_id)
    }

    fn stock_product_by_id(&self, id: StockProductId) -> Option<StockProduct> {
        self.state.stock_products.get(&id).cloned()
    }

    fn insert_stock(
        &mut self,
        name: &str,
        is_active: bool,
        uuid: Option<Uuid>,
    ) -> StockResult<Stock> {
        if self.state.find_stock_by_name(name).is_some() {
            return Err(StockError::unique_violation(format!(
                "stock name '{name}'"
            )));
        }
        self.state.last_stock_id += 1;
        let stock = Stock {
            id: StockId::new(self.state.last_stock_id),
            name: name.to_string(),
            is_active,
            uuid,
        };
        self.state.stocks.insert(stock.id, stock.clone());
        Ok(stock)
    }

    fn update_stock(&mut self, stock: &Stock) -> StockResult<()> {
        if !self.state.stocks.contains_key(&stock.id) {
            return Err(StockError::validation(format!(
                "stock {} does not exist",
                stock.id
            )));
        }
        let name_taken = self
            .state
            .stocks
            .values()
            .any(|s| s.id != stock.id && s.name == stock.name);
        if name_taken {
            return Err(StockError::unique_violation(format!(
                "stock name '{}'",
                stock.name
            )));
        }
        self.state.stocks.insert(stock.id, stock.clone());
        Ok(())
    }

    fn add_store_relations(
        &mut self,
        stock_id: StockId,
        store_ids: &[StoreId],
    ) -> StockResult<()> {
        self.state
            .relations
            .entry(stock_id)
            .or_default()
            .extend(store_ids.iter().copied());
        Ok(())
    }

    fn remove_store_relations(
        &mut self,
        stock_id: StockId,
        store_ids: &[StoreId],
    ) -> StockResult<()> {
        if let Some(set) = self.state.relations.get_mut(&stock_id) {
            for store_id in store_ids {
                set.remove(store_id);
            }
        }
        Ok(())
    }

    fn insert_stock_product(&mut self, new: NewStockProduct) -> StockResult<StockProduct> {
        if self
            .state
            .find_stock_product(new.stock_id, new.product_id)
            .is_some()
        {
            return Err(StockError::unique_violation(format!(
                "stock {} / product {}",
                new.stock_id, new.product_id
            )));
        }
        self.state.last_stock_product_id += 1;
        let row = StockProduct {
            id: StockProductId::new(self.state.last_stock_product_id),
            stock_id: new.stock_id,
            product_id: new.product_id,
            quantity: new.quantity,
            is_never_out_of_stock: new.is_never_out_of_stock,
        };
        self.state.stock_products.insert(row.id, row.clone());
        Ok(row)
    }

    fn update_stock_product(&mut self, row: &StockProduct) -> StockResult<()> {
        if !self.state.stock_products.contains_key(&row.id) {
            return Err(StockError::validation(format!(
                "stock product {} does not exist",
                row.id
            )));
        }
        self.state.stock_products.insert(row.id, row.clone());
        Ok(())
    }
}

impl StockRepository for InMemoryStockRepository {
    fn find_stock_by_id(&self, id: StockId) -> Option<Stock> {
        let state = self.state.lock().ok()?;
        state.stocks.get(&id).cloned()
    }

    fn find_stock_by_name(&self, name: &str) -> Option<Stock> {
        let state = self.state.lock().ok()?;
        state.find_stock_by_name(name)
    }

    fn stocks_by_criteria(&self, criteria: &StockCriteria) -> Vec<Stock> {
        let Ok(state) = self.state.lock() else {
            return Vec::new();
        };
        state
            .stocks
            .values()
            .filter(|stock| criteria.matches(stock, &state.relation(stock.id)))
            .cloned()
            .collect()
    }

    fn store_relation(&self, stock_id: StockId) -> Vec<StoreId> {
        match self.state.lock() {
            Ok(state) => state.relation(stock_id),
            Err(_) => Vec::new(),
        }
    }

    fn stock_products_by_product(&self, product_id: ProductId) -> Vec<StockProduct> {
        let Ok(state) = self.state.lock() else {
            return Vec::new();
        };
        state
            .stock_products
            .values()
            .filter(|row| row.product_id == product_id)
            .cloned()
            .collect()
    }

    fn find_stock_product(
        &self,
        stock_id: StockId,
        product_id: ProductId,
    ) -> Option<StockProduct> {
        let state = self.state.lock().ok()?;
        state.find_stock_product(stock_id, product_id)
    }

    fn stock_product_by_id(&self, id: StockProductId) -> Option<StockProduct> {
        let state = self.state.lock().ok()?;
        state.stock_products.get(&id).cloned()
    }

    fn store_ids_with_product_stock(&self, product_id: ProductId) -> Vec<StoreId> {
        let Ok(state) = self.state.lock() else {
            return Vec::new();
        };
        let mut store_ids = BTreeSet::new();
        for row in state.stock_products.values() {
            if row.product_id == product_id {
                store_ids.extend(state.relation(row.stock_id));
            }
        }
        store_ids.into_iter().collect()
    }

    fn transaction<T>(
        &self,
        f: impl FnOnce(&mut dyn StockTxn) -> StockResult<T>,
    ) -> StockResult<T> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| StockError::validation("stock repository lock poisoned"))?;
        let mut working = guard.clone();
        let result = f(&mut Txn {
            state: &mut working,
        })?;
        *guard = working;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn insert_assigns_monotonic_ids() {
        let repo = InMemoryStockRepository::new();
        let (first, second) = repo
            .transaction(|txn| {
                let first = txn.insert_stock("A", true, None)?;
                let second = txn.insert_stock("B", true, None)?;
                Ok((first.id, second.id))
            })
            .unwrap();
        assert_eq!(first, StockId::new(1));
        assert_eq!(second, StockId::new(2));
    }

    #[test]
    fn duplicate_stock_name_is_a_unique_violation() {
        let repo = InMemoryStockRepository::new();
        repo.transaction(|txn| txn.insert_stock("Main", true, None))
            .unwrap();
        let err = repo
            .transaction(|txn| txn.insert_stock("Main", false, None))
            .unwrap_err();
        assert!(matches!(err, StockError::UniqueViolation(_)));
    }

    #[test]
    fn duplicate_pair_is_a_unique_violation() {
        let repo = InMemoryStockRepository::new();
        let err = repo
            .transaction(|txn| {
                let stock = txn.insert_stock("Main", true, None)?;
                let new = NewStockProduct {
                    stock_id: stock.id,
                    product_id: ProductId::new(5),
                    quantity: Some(dec!(1)),
                    is_never_out_of_stock: false,
                };
                txn.insert_stock_product(new.clone())?;
                txn.insert_stock_product(new)
            })
            .unwrap_err();
        assert!(matches!(err, StockError::UniqueViolation(_)));
    }

    #[test]
    fn failed_transaction_leaves_no_writes_behind() {
        let repo = InMemoryStockRepository::new();
        let err = repo
            .transaction(|txn| {
                txn.insert_stock("Main", true, None)?;
                Err::<(), _>(StockError::validation("forced failure"))
            })
            .unwrap_err();
        assert!(matches!(err, StockError::Validation(_)));
        assert!(repo.find_stock_by_name("Main").is_none());
    }

    #[test]
    fn renaming_onto_existing_name_is_rejected() {
        let repo = InMemoryStockRepository::new();
        let second = repo
            .transaction(|txn| {
                txn.insert_stock("A", true, None)?;
                txn.insert_stock("B", true, None)
            })
            .unwrap();
        let err = repo
            .transaction(|txn| {
                let mut stock = second.clone();
                stock.name = "A".to_string();
                txn.update_stock(&stock)
            })
            .unwrap_err();
        assert!(matches!(err, StockError::UniqueViolation(_)));
    }
}
