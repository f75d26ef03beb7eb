//! `stockyard-catalog` — external collaborator seams.
//!
//! The stock core reads product and store identifiers but does not own them.
//! This crate defines the lookup traits plus in-memory implementations for
//! tests/dev.

pub mod product;
pub mod store;

pub use product::{InMemoryProductCatalog, ProductCatalog, ProductConcrete};
pub use store::{InMemoryStoreDirectory, Store, StoreDirectory};
