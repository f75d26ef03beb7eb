//! Product-side read operations over stock-product rows.
//!
//! Every listing here excludes rows whose warehouse is inactive — silently,
//! not as an error. Store-scoped variants additionally require the warehouse
//! to be related to the store.

use std::sync::Arc;

use stockyard_catalog::{ProductCatalog, Store, StoreDirectory};
use stockyard_core::{ProductId, StockError, StockId, StockProductId, StockResult, StoreId};

use crate::repository::StockRepository;
use crate::stock_product::{ProductWithStocks, StockProduct, StockProductEntry};

/// Resolves skus, fetches and validates stock-product associations, and
/// expands product records with stock information.
pub struct StockProductReader<R> {
    repository: Arc<R>,
    products: Arc<dyn ProductCatalog>,
    stores: Arc<dyn StoreDirectory>,
}

impl<R> Clone for StockProductReader<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            products: Arc::clone(&self.products),
            stores: Arc::clone(&self.stores),
        }
    }
}

impl<R> StockProductReader<R>
where
    R: StockRepository,
{
    pub fn new(
        repository: Arc<R>,
        products: Arc<dyn ProductCatalog>,
        stores: Arc<dyn StoreDirectory>,
    ) -> Self {
        Self {
            repository,
            products,
            stores,
        }
    }

    /// Resolve a sku to its concrete product id.
    pub fn concrete_product_id_by_sku(&self, sku: &str) -> StockResult<ProductId> {
        self.products
            .find_concrete_id_by_sku(sku)
            .ok_or_else(|| StockError::missing_product(sku))
    }

    /// Load a stock-product row by id.
    pub fn stock_product_by_id(&self, id: StockProductId) -> StockResult<StockProduct> {
        self.repository
            .stock_product_by_id(id)
            .ok_or_else(|| StockError::StockProductNotFound(format!("id {id}")))
    }

    /// Guard used before every create: fails when a row for the pair exists.
    pub fn check_stock_does_not_exist(
        &self,
        stock_id: StockId,
        product_id: ProductId,
    ) -> StockResult<()> {
        match self.repository.find_stock_product(stock_id, product_id) {
            Some(_) => Err(StockError::StockProductAlreadyExists),
            None => Ok(()),
        }
    }

    /// Positive-availability check: true iff a row exists for the resolved
    /// (sku, stock type) pair with positive quantity or the never-out-of-
    /// stock flag. Unknown skus and stock types answer false.
    pub fn has_stock_product(&self, sku: &str, stock_type: &str) -> bool {
        let Some(product_id) = self.products.find_concrete_id_by_sku(sku) else {
            return false;
        };
        let Some(stock) = self.repository.find_stock_by_name(stock_type) else {
            return false;
        };
        self.repository
            .find_stock_product(stock.id, product_id)
            .is_some_and(|row| row.is_available())
    }

    /// Row id for a (sku, stock type) pair.
    pub fn stock_product_id(&self, sku: &str, stock_type: &str) -> StockResult<StockProductId> {
        let product_id = self.concrete_product_id_by_sku(sku)?;
        let stock = self
            .repository
            .find_stock_by_name(stock_type)
            .ok_or_else(|| StockError::unknown_stock_type(stock_type))?;
        self.repository
            .find_stock_product(stock.id, product_id)
            .map(|row| row.id)
            .ok_or_else(|| {
                StockError::StockProductNotFound(format!("sku {sku}, stock type {stock_type}"))
            })
    }

    /// Rows for the product across active warehouses, as entries.
    pub fn stock_products_by_product_id(&self, product_id: ProductId) -> Vec<StockProductEntry> {
        let sku = self.products.find_sku_by_concrete_id(product_id);
        self.active_rows_for_product(product_id)
            .into_iter()
            .map(|(row, stock_name)| self.to_entry(row, stock_name, sku.clone()))
            .collect()
    }

    /// Rows for the product across active warehouses related to the store.
    pub fn stock_products_by_product_id_for_store(
        &self,
        product_id: ProductId,
        store_name: &str,
    ) -> Vec<StockProductEntry> {
        let Some(store) = self.stores.find_store_by_name(store_name) else {
            return Vec::new();
        };
        let sku = self.products.find_sku_by_concrete_id(product_id);
        self.active_rows_for_product(product_id)
            .into_iter()
            .filter(|(row, _)| self.is_related(row.stock_id, store.id))
            .map(|(row, stock_name)| self.to_entry(row, stock_name, sku.clone()))
            .collect()
    }

    /// Raw rows for a sku across active warehouses. Unknown skus fail with
    /// `MissingProduct`; a known sku with no rows yields an empty list.
    pub fn stocks_for_product(&self, sku: &str) -> StockResult<Vec<StockProduct>> {
        let product_id = self.concrete_product_id_by_sku(sku)?;
        Ok(self
            .active_rows_for_product(product_id)
            .into_iter()
            .map(|(row, _)| row)
            .collect())
    }

    /// Raw rows for a sku across active warehouses related to the store.
    /// Unknown skus and stores yield an empty list.
    pub fn product_stocks_for_store(&self, sku: &str, store_name: &str) -> Vec<StockProduct> {
        let Some(product_id) = self.products.find_concrete_id_by_sku(sku) else {
            return Vec::new();
        };
        let Some(store) = self.stores.find_store_by_name(store_name) else {
            return Vec::new();
        };
        self.active_rows_for_product(product_id)
            .into_iter()
            .filter(|(row, _)| self.is_related(row.stock_id, store.id))
            .map(|(row, _)| row)
            .collect()
    }

    /// Raw rows for every concrete product under the abstract sku, across
    /// active warehouses related to the store.
    pub fn abstract_product_stocks_for_store(
        &self,
        abstract_sku: &str,
        store_name: &str,
    ) -> Vec<StockProduct> {
        self.products
            .concrete_products_by_abstract_sku(abstract_sku)
            .into_iter()
            .flat_map(|product| self.product_stocks_for_store(&product.sku, store_name))
            .collect()
    }

    /// True iff any active-warehouse row for the sku has the override flag.
    pub fn is_never_out_of_stock(&self, sku: &str) -> bool {
        let Some(product_id) = self.products.find_concrete_id_by_sku(sku) else {
            return false;
        };
        self.active_rows_for_product(product_id)
            .iter()
            .any(|(row, _)| row.is_never_out_of_stock)
    }

    /// Store-scoped variant of [`Self::is_never_out_of_stock`].
    pub fn is_never_out_of_stock_for_store(&self, sku: &str, store_name: &str) -> bool {
        self.product_stocks_for_store(sku, store_name)
            .iter()
            .any(|row| row.is_never_out_of_stock)
    }

    /// True iff any concrete product under the abstract sku is never out of
    /// stock in the given store.
    pub fn is_abstract_never_out_of_stock_for_store(
        &self,
        abstract_sku: &str,
        store_name: &str,
    ) -> bool {
        self.abstract_product_stocks_for_store(abstract_sku, store_name)
            .iter()
            .any(|row| row.is_never_out_of_stock)
    }

    /// Attach active-warehouse stock entries to a product record.
    pub fn expand_product_with_stocks(&self, mut product: ProductWithStocks) -> ProductWithStocks {
        product.stocks = self
            .active_rows_for_product(product.product_id)
            .into_iter()
            .map(|(row, stock_name)| self.to_entry(row, stock_name, Some(product.sku.clone())))
            .collect();
        product
    }

    /// Batch expansion; each product succeeds or ends up with an empty
    /// stock list independently of the others.
    pub fn expand_products_with_stocks(
        &self,
        products: Vec<ProductWithStocks>,
    ) -> Vec<ProductWithStocks> {
        products
            .into_iter()
            .map(|product| self.expand_product_with_stocks(product))
            .collect()
    }

    /// Stores related to any warehouse holding stock of the sku. Unknown
    /// skus yield an empty list.
    pub fn stores_with_product_stock(&self, sku: &str) -> Vec<Store> {
        let Some(product_id) = self.products.find_concrete_id_by_sku(sku) else {
            return Vec::new();
        };
        self.repository
            .store_ids_with_product_stock(product_id)
            .into_iter()
            .filter_map(|store_id| self.stores.find_store_by_id(store_id))
            .collect()
    }

    /// Rows for the product whose warehouse exists and is active, paired
    /// with the warehouse name.
    fn active_rows_for_product(&self, product_id: ProductId) -> Vec<(StockProduct, String)> {
        self.repository
            .stock_products_by_product(product_id)
            .into_iter()
            .filter_map(|row| {
                let stock = self.repository.find_stock_by_id(row.stock_id)?;
                stock.is_active.then_some((row, stock.name))
            })
            .collect()
    }

    fn is_related(&self, stock_id: StockId, store_id: StoreId) -> bool {
        self.repository.store_relation(stock_id).contains(&store_id)
    }

    fn to_entry(
        &self,
        row: StockProduct,
        stock_name: String,
        sku: Option<String>,
    ) -> StockProductEntry {
        StockProductEntry {
            id: Some(row.id),
            sku: sku.unwrap_or_default(),
            stock_type: stock_name,
            stock_id: Some(row.stock_id),
            quantity: row.quantity,
            is_never_out_of_stock: row.is_never_out_of_stock,
        }
    }
}
