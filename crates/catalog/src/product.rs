//! Product catalog lookup seam.
//!
//! The catalog owns products; the stock core only resolves identifiers
//! through this trait. Concrete products belong to at most one abstract
//! product, identified by its own sku.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use stockyard_core::ProductId;

/// A concrete product as seen by the stock core: id + sku + owning abstract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConcrete {
    pub id: ProductId,
    pub sku: String,
    pub abstract_id: Option<ProductId>,
}

/// Read-only product identifier resolution.
///
/// Misses are `None`; mapping a miss to an error is the caller's decision
/// (the stock product reader raises `MissingProduct`, `has_stock_product`
/// answers false).
pub trait ProductCatalog: Send + Sync {
    /// Resolve a concrete product id by its sku.
    fn find_concrete_id_by_sku(&self, sku: &str) -> Option<ProductId>;

    /// Resolve an abstract product id by its sku.
    fn find_abstract_id_by_sku(&self, abstract_sku: &str) -> Option<ProductId>;

    /// All concrete products belonging to the abstract product with this sku.
    fn concrete_products_by_abstract_sku(&self, abstract_sku: &str) -> Vec<ProductConcrete>;

    /// Reverse lookup: sku of a concrete product id.
    fn find_sku_by_concrete_id(&self, id: ProductId) -> Option<String>;
}

/// In-memory product catalog.
///
/// - No IO / no async
/// - Intended for tests and dev wiring
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    by_sku: Mutex<BTreeMap<String, ProductConcrete>>,
    abstracts: Mutex<BTreeMap<String, ProductId>>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an abstract product under its sku.
    pub fn add_abstract(&self, abstract_sku: impl Into<String>, id: ProductId) {
        if let Ok(mut abstracts) = self.abstracts.lock() {
            abstracts.insert(abstract_sku.into(), id);
        }
    }

    /// Register a concrete product, optionally under an abstract product.
    pub fn add_concrete(
        &self,
        sku: impl Into<String>,
        id: ProductId,
        abstract_id: Option<ProductId>,
    ) {
        let sku = sku.into();
        if let Ok(mut by_sku) = self.by_sku.lock() {
            by_sku.insert(
                sku.clone(),
                ProductConcrete {
                    id,
                    sku,
                    abstract_id,
                },
            );
        }
    }
}

impl ProductCatalog for InMemoryProductCatalog {
    fn find_concrete_id_by_sku(&self, sku: &str) -> Option<ProductId> {
        self.by_sku.lock().ok()?.get(sku).map(|p| p.id)
    }

    fn find_abstract_id_by_sku(&self, abstract_sku: &str) -> Option<ProductId> {
        self.abstracts.lock().ok()?.get(abstract_sku).copied()
    }

    fn concrete_products_by_abstract_sku(&self, abstract_sku: &str) -> Vec<ProductConcrete> {
        let Some(abstract_id) = self.find_abstract_id_by_sku(abstract_sku) else {
            return Vec::new();
        };
        let Ok(by_sku) = self.by_sku.lock() else {
            return Vec::new();
        };
        by_sku
            .values()
            .filter(|p| p.abstract_id == Some(abstract_id))
            .cloned()
            .collect()
    }

    fn find_sku_by_concrete_id(&self, id: ProductId) -> Option<String> {
        let by_sku = self.by_sku.lock().ok()?;
        by_sku.values().find(|p| p.id == id).map(|p| p.sku.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryProductCatalog {
        let catalog = InMemoryProductCatalog::new();
        catalog.add_abstract("shirt", ProductId::new(1));
        catalog.add_concrete("shirt-red-m", ProductId::new(10), Some(ProductId::new(1)));
        catalog.add_concrete("shirt-blue-l", ProductId::new(11), Some(ProductId::new(1)));
        catalog.add_concrete("mug", ProductId::new(20), None);
        catalog
    }

    #[test]
    fn resolves_concrete_sku() {
        let catalog = catalog();
        assert_eq!(
            catalog.find_concrete_id_by_sku("shirt-red-m"),
            Some(ProductId::new(10)),
        );
        assert_eq!(catalog.find_concrete_id_by_sku("unknown"), None);
    }

    #[test]
    fn lists_concretes_under_abstract_sku() {
        let catalog = catalog();
        let concretes = catalog.concrete_products_by_abstract_sku("shirt");
        assert_eq!(concretes.len(), 2);
        assert!(concretes.iter().all(|p| p.abstract_id == Some(ProductId::new(1))));
    }

    #[test]
    fn unknown_abstract_sku_yields_empty_list() {
        assert!(catalog().concrete_products_by_abstract_sku("pants").is_empty());
    }

    #[test]
    fn reverse_lookup_finds_sku() {
        assert_eq!(
            catalog().find_sku_by_concrete_id(ProductId::new(20)),
            Some("mug".to_string()),
        );
    }
}
