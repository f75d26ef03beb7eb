//! Store (sales channel) lookup seam.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use stockyard_core::StoreId;

/// A store as seen by the stock core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
}

/// Read-only store resolution and enumeration.
pub trait StoreDirectory: Send + Sync {
    fn find_store_by_name(&self, name: &str) -> Option<Store>;

    fn find_store_by_id(&self, id: StoreId) -> Option<Store>;

    /// All known stores, ordered by name.
    fn stores(&self) -> Vec<Store>;
}

/// In-memory store directory.
///
/// - No IO / no async
/// - Intended for tests and dev wiring
#[derive(Debug, Default)]
pub struct InMemoryStoreDirectory {
    by_name: Mutex<BTreeMap<String, Store>>,
}

impl InMemoryStoreDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_store(&self, name: impl Into<String>, id: StoreId) {
        let name = name.into();
        if let Ok(mut by_name) = self.by_name.lock() {
            by_name.insert(name.clone(), Store { id, name });
        }
    }
}

impl StoreDirectory for InMemoryStoreDirectory {
    fn find_store_by_name(&self, name: &str) -> Option<Store> {
        self.by_name.lock().ok()?.get(name).cloned()
    }

    fn find_store_by_id(&self, id: StoreId) -> Option<Store> {
        let by_name = self.by_name.lock().ok()?;
        by_name.values().find(|s| s.id == id).cloned()
    }

    fn stores(&self) -> Vec<Store> {
        match self.by_name.lock() {
            Ok(by_name) => by_name.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_name_and_id() {
        let directory = InMemoryStoreDirectory::new();
        directory.add_store("DE", StoreId::new(1));
        directory.add_store("AT", StoreId::new(2));

        assert_eq!(
            directory.find_store_by_name("DE").map(|s| s.id),
            Some(StoreId::new(1)),
        );
        assert_eq!(
            directory.find_store_by_id(StoreId::new(2)).map(|s| s.name),
            Some("AT".to_string()),
        );
        assert_eq!(directory.find_store_by_name("US"), None);
    }

    #[test]
    fn stores_are_ordered_by_name() {
        let directory = InMemoryStoreDirectory::new();
        directory.add_store("US", StoreId::new(3));
        directory.add_store("AT", StoreId::new(2));

        let names: Vec<_> = directory.stores().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["AT", "US"]);
    }
}
