//! Facade: the composition point and public call surface.
//!
//! All collaborators arrive through the constructor — repository, product
//! catalog, store directory, touch sink, and the hook stacks. No ambient
//! lookup happens inside components.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rust_decimal::Decimal;

use stockyard_catalog::{ProductCatalog, Store, StoreDirectory};
use stockyard_core::{ProductId, StockId, StockProductId, StockResult};

use crate::calculator::StockCalculator;
use crate::hooks::{
    StockCollectionExpander, StockPostCreateHook, StockPostUpdateHook, StockUpdateHandler,
};
use crate::lifecycle::StockLifecycleManager;
use crate::product_reader::StockProductReader;
use crate::reader::StockReader;
use crate::repository::StockRepository;
use crate::stock::{NewStock, Stock, StockCriteria, StockData, StockResponse};
use crate::stock_product::{ProductWithStocks, StockProductEntry};
use crate::touch::TouchSink;
use crate::writer::StockWriter;

/// Hook stacks, in registration order.
#[derive(Default)]
pub struct StockHooks {
    pub update_handlers: Vec<Arc<dyn StockUpdateHandler>>,
    pub post_create: Vec<Arc<dyn StockPostCreateHook>>,
    pub post_update: Vec<Arc<dyn StockPostUpdateHook>>,
    pub collection_expanders: Vec<Arc<dyn StockCollectionExpander>>,
}

/// The public surface of the stock core.
pub struct StockFacade<R> {
    reader: StockReader<R>,
    product_reader: StockProductReader<R>,
    calculator: StockCalculator<R>,
    writer: StockWriter<R>,
    lifecycle: StockLifecycleManager<R>,
}

impl<R> StockFacade<R>
where
    R: StockRepository,
{
    pub fn new(
        repository: Arc<R>,
        products: Arc<dyn ProductCatalog>,
        stores: Arc<dyn StoreDirectory>,
        touch: Arc<dyn TouchSink>,
        hooks: StockHooks,
    ) -> Self {
        let reader = StockReader::new(
            Arc::clone(&repository),
            Arc::clone(&stores),
            hooks.collection_expanders,
        );
        let product_reader = StockProductReader::new(
            Arc::clone(&repository),
            Arc::clone(&products),
            Arc::clone(&stores),
        );
        let calculator = StockCalculator::new(product_reader.clone());
        let writer = StockWriter::new(
            Arc::clone(&repository),
            Arc::clone(&products),
            Arc::clone(&touch),
            hooks.update_handlers,
            product_reader.clone(),
        );
        let lifecycle = StockLifecycleManager::new(
            repository,
            touch,
            hooks.post_create,
            hooks.post_update,
        );

        Self {
            reader,
            product_reader,
            calculator,
            writer,
            lifecycle,
        }
    }

    pub fn reader(&self) -> &StockReader<R> {
        &self.reader
    }

    pub fn product_reader(&self) -> &StockProductReader<R> {
        &self.product_reader
    }

    // Never-out-of-stock checks

    pub fn is_never_out_of_stock(&self, sku: &str) -> bool {
        self.product_reader.is_never_out_of_stock(sku)
    }

    pub fn is_never_out_of_stock_for_store(&self, sku: &str, store_name: &str) -> bool {
        self.product_reader
            .is_never_out_of_stock_for_store(sku, store_name)
    }

    pub fn is_product_abstract_never_out_of_stock_for_store(
        &self,
        abstract_sku: &str,
        store_name: &str,
    ) -> bool {
        self.product_reader
            .is_abstract_never_out_of_stock_for_store(abstract_sku, store_name)
    }

    // Aggregation

    pub fn calculate_stock_for_product(&self, sku: &str) -> StockResult<Decimal> {
        self.calculator.stock_for_product(sku)
    }

    pub fn calculate_product_stock_for_store(&self, sku: &str, store_name: &str) -> Decimal {
        self.calculator.product_stock_for_store(sku, store_name)
    }

    pub fn calculate_product_abstract_stock_for_store(
        &self,
        abstract_sku: &str,
        store_name: &str,
    ) -> Decimal {
        self.calculator
            .abstract_product_stock_for_store(abstract_sku, store_name)
    }

    // Mutation

    pub fn create_stock_type(&self, name: &str) -> StockResult<StockId> {
        self.writer.create_stock_type(name)
    }

    pub fn create_stock_product(&self, entry: &StockProductEntry) -> StockResult<StockProductId> {
        self.writer.create_stock_product(entry)
    }

    pub fn update_stock_product(&self, entry: &StockProductEntry) -> StockResult<StockProductId> {
        self.writer.update_stock_product(entry)
    }

    pub fn increment_stock_product(
        &self,
        sku: &str,
        stock_type: &str,
        amount: Decimal,
    ) -> StockResult<()> {
        self.writer.increment_stock(sku, stock_type, amount)
    }

    pub fn decrement_stock_product(
        &self,
        sku: &str,
        stock_type: &str,
        amount: Decimal,
    ) -> StockResult<()> {
        self.writer.decrement_stock(sku, stock_type, amount)
    }

    pub fn persist_stock_product_collection(
        &self,
        product: &ProductWithStocks,
    ) -> StockResult<ProductWithStocks> {
        self.writer.persist_stock_product_collection(product)
    }

    // Existence and expansion

    pub fn has_stock_product(&self, sku: &str, stock_type: &str) -> bool {
        self.product_reader.has_stock_product(sku, stock_type)
    }

    pub fn expand_product_with_stocks(&self, product: ProductWithStocks) -> ProductWithStocks {
        self.product_reader.expand_product_with_stocks(product)
    }

    pub fn expand_products_with_stocks(
        &self,
        products: Vec<ProductWithStocks>,
    ) -> Vec<ProductWithStocks> {
        self.product_reader.expand_products_with_stocks(products)
    }

    // Warehouse listings and mappings

    pub fn available_stock_types(&self) -> BTreeMap<String, String> {
        self.reader.available_stock_types()
    }

    pub fn stock_types_for_store(&self, store_name: &str) -> BTreeMap<String, String> {
        self.reader.stock_types_for_store(store_name)
    }

    pub fn stock_products_by_product_id(&self, product_id: ProductId) -> Vec<StockProductEntry> {
        self.product_reader.stock_products_by_product_id(product_id)
    }

    pub fn stock_products_by_product_id_for_store(
        &self,
        product_id: ProductId,
        store_name: &str,
    ) -> Vec<StockProductEntry> {
        self.product_reader
            .stock_products_by_product_id_for_store(product_id, store_name)
    }

    pub fn warehouse_to_store_mapping(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.reader.warehouse_to_store_mapping()
    }

    pub fn store_to_warehouse_mapping(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.reader.store_to_warehouse_mapping()
    }

    pub fn find_stock_by_id(&self, id: StockId) -> Option<Stock> {
        self.reader.find_stock_by_id(id)
    }

    pub fn find_stock_by_name(&self, name: &str) -> Option<Stock> {
        self.reader.find_stock_by_name(name)
    }

    pub fn stocks_by_criteria(&self, criteria: &StockCriteria) -> Vec<Stock> {
        self.reader.stocks_by_criteria(criteria)
    }

    pub fn available_warehouses_for_store(&self, store_name: &str) -> Vec<Stock> {
        self.reader.available_warehouses_for_store(store_name)
    }

    pub fn stores_with_product_stock(&self, sku: &str) -> Vec<Store> {
        self.product_reader.stores_with_product_stock(sku)
    }

    // Lifecycle

    pub fn create_stock(&self, new: &NewStock) -> StockResult<StockResponse> {
        self.lifecycle.create_stock(new)
    }

    pub fn update_stock(&self, data: &StockData) -> StockResult<StockResponse> {
        self.lifecycle.update_stock(data)
    }
}
