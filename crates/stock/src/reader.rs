//! Warehouse-side read operations.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use stockyard_catalog::StoreDirectory;
use stockyard_core::{StockError, StockId, StockResult};

use crate::hooks::StockCollectionExpander;
use crate::repository::StockRepository;
use crate::stock::{Stock, StockCriteria};

/// Resolves warehouse names and ids, lists available warehouses, and builds
/// the warehouse↔store mapping indexes.
pub struct StockReader<R> {
    repository: Arc<R>,
    stores: Arc<dyn StoreDirectory>,
    expanders: Vec<Arc<dyn StockCollectionExpander>>,
}

impl<R> Clone for StockReader<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            stores: Arc::clone(&self.stores),
            expanders: self.expanders.clone(),
        }
    }
}

impl<R> StockReader<R>
where
    R: StockRepository,
{
    pub fn new(
        repository: Arc<R>,
        stores: Arc<dyn StoreDirectory>,
        expanders: Vec<Arc<dyn StockCollectionExpander>>,
    ) -> Self {
        Self {
            repository,
            stores,
            expanders,
        }
    }

    /// Resolve a warehouse name to its id.
    pub fn stock_id_by_name(&self, name: &str) -> StockResult<StockId> {
        self.repository
            .find_stock_by_name(name)
            .map(|stock| stock.id)
            .ok_or_else(|| StockError::unknown_stock_type(name))
    }

    pub fn find_stock_by_id(&self, id: StockId) -> Option<Stock> {
        self.repository.find_stock_by_id(id)
    }

    pub fn find_stock_by_name(&self, name: &str) -> Option<Stock> {
        self.repository.find_stock_by_name(name)
    }

    /// Active warehouse names, as a name → name mapping.
    pub fn available_stock_types(&self) -> BTreeMap<String, String> {
        self.names_mapping(&StockCriteria::active())
    }

    /// Active warehouse names related to the given store. Unknown store
    /// names yield an empty mapping.
    pub fn stock_types_for_store(&self, store_name: &str) -> BTreeMap<String, String> {
        let Some(store) = self.stores.find_store_by_name(store_name) else {
            return BTreeMap::new();
        };
        self.names_mapping(&StockCriteria::active().with_store_id(store.id))
    }

    /// Stocks passing the criteria, run through the collection expanders.
    pub fn stocks_by_criteria(&self, criteria: &StockCriteria) -> Vec<Stock> {
        self.expand(self.repository.stocks_by_criteria(criteria))
    }

    /// Active warehouses related to the given store, expanded.
    pub fn available_warehouses_for_store(&self, store_name: &str) -> Vec<Stock> {
        let Some(store) = self.stores.find_store_by_name(store_name) else {
            return Vec::new();
        };
        self.stocks_by_criteria(&StockCriteria::active().with_store_id(store.id))
    }

    /// Warehouse name → set of related store names, over active warehouses.
    pub fn warehouse_to_store_mapping(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut mapping = BTreeMap::new();
        for stock in self.repository.stocks_by_criteria(&StockCriteria::active()) {
            let store_names = self.store_names_for(stock.id);
            mapping.insert(stock.name, store_names);
        }
        mapping
    }

    /// Store name → set of related active warehouse names.
    pub fn store_to_warehouse_mapping(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut mapping: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for stock in self.repository.stocks_by_criteria(&StockCriteria::active()) {
            for store_name in self.store_names_for(stock.id) {
                mapping
                    .entry(store_name)
                    .or_default()
                    .insert(stock.name.clone());
            }
        }
        mapping
    }

    fn names_mapping(&self, criteria: &StockCriteria) -> BTreeMap<String, String> {
        self.repository
            .stocks_by_criteria(criteria)
            .into_iter()
            .map(|stock| (stock.name.clone(), stock.name))
            .collect()
    }

    fn store_names_for(&self, stock_id: StockId) -> BTreeSet<String> {
        self.repository
            .store_relation(stock_id)
            .into_iter()
            .filter_map(|store_id| self.stores.find_store_by_id(store_id))
            .map(|store| store.name)
            .collect()
    }

    fn expand(&self, mut stocks: Vec<Stock>) -> Vec<Stock> {
        for expander in &self.expanders {
            stocks = expander.expand(stocks);
        }
        stocks
    }
}
