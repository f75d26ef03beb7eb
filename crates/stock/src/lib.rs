//! `stockyard-stock` — per-warehouse stock management core.
//!
//! Warehouses ("stocks") hold quantities of concrete products; this crate
//! owns the read-side aggregation (total stock per product/store, never-out-
//! of-stock checks) and the write-side mutation (create/update/increment/
//! decrement with touch signaling and extension hooks). Persistence sits
//! behind the [`repository::StockRepository`] seam; product and store
//! identity resolution behind the `stockyard-catalog` traits.

pub mod calculator;
pub mod facade;
pub mod hooks;
pub mod lifecycle;
pub mod product_reader;
pub mod reader;
pub mod repository;
pub mod stock;
pub mod stock_product;
pub mod touch;
pub mod writer;

pub use calculator::StockCalculator;
pub use facade::{StockFacade, StockHooks};
pub use hooks::{
    StockCollectionExpander, StockPostCreateHook, StockPostUpdateHook, StockUpdateHandler,
};
pub use lifecycle::StockLifecycleManager;
pub use product_reader::StockProductReader;
pub use reader::StockReader;
pub use repository::{StockRepository, StockTxn};
pub use stock::{NewStock, Stock, StockCriteria, StockData, StockResponse};
pub use stock_product::{NewStockProduct, ProductWithStocks, StockProduct, StockProductEntry};
pub use touch::{InMemoryTouchSink, TouchKind, TouchRecord, TouchSink};
pub use writer::StockWriter;
