//! Warehouse ("stock") records and payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockyard_core::{Entity, StockId, StoreId};

/// A named inventory location. Never hard-deleted; deactivated instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: StockId,
    /// Unique across all stocks.
    pub name: String,
    pub is_active: bool,
    pub uuid: Option<Uuid>,
}

impl Entity for Stock {
    type Id = StockId;

    fn id(&self) -> &StockId {
        &self.id
    }
}

/// Payload for creating a stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStock {
    pub name: String,
    pub is_active: bool,
    pub uuid: Option<Uuid>,
    /// Stores this stock serves from the start.
    pub store_ids: Vec<StoreId>,
}

impl NewStock {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_active: true,
            uuid: None,
            store_ids: Vec::new(),
        }
    }
}

/// Payload for updating a stock.
///
/// `store_relation` is all-or-nothing: `None` leaves the relation set
/// untouched, `Some(set)` makes that set authoritative (adds and removes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockData {
    pub id: StockId,
    pub name: String,
    pub is_active: bool,
    pub store_relation: Option<Vec<StoreId>>,
}

/// Filter set for stock collection queries. Empty lists mean "no filter";
/// filters compose with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCriteria {
    pub stock_ids: Vec<StockId>,
    pub uuids: Vec<Uuid>,
    pub stock_names: Vec<String>,
    pub store_ids: Vec<StoreId>,
    pub is_active: Option<bool>,
}

impl StockCriteria {
    pub fn active() -> Self {
        Self {
            is_active: Some(true),
            ..Self::default()
        }
    }

    pub fn with_store_id(mut self, store_id: StoreId) -> Self {
        self.store_ids.push(store_id);
        self
    }

    pub fn with_stock_name(mut self, name: impl Into<String>) -> Self {
        self.stock_names.push(name.into());
        self
    }

    pub fn with_stock_id(mut self, id: StockId) -> Self {
        self.stock_ids.push(id);
        self
    }

    /// Whether `stock` (related to `related_stores`) passes every filter.
    pub fn matches(&self, stock: &Stock, related_stores: &[StoreId]) -> bool {
        if !self.stock_ids.is_empty() && !self.stock_ids.contains(&stock.id) {
            return false;
        }
        if !self.uuids.is_empty() {
            match stock.uuid {
                Some(uuid) if self.uuids.contains(&uuid) => {}
                _ => return false,
            }
        }
        if !self.stock_names.is_empty() && !self.stock_names.contains(&stock.name) {
            return false;
        }
        if let Some(is_active) = self.is_active {
            if stock.is_active != is_active {
                return false;
            }
        }
        if !self.store_ids.is_empty()
            && !related_stores.iter().any(|id| self.store_ids.contains(id))
        {
            return false;
        }
        true
    }
}

/// Outcome of a stock create/update.
///
/// Business validation failures (duplicate name, unknown id) come back here
/// as `is_successful = false` plus errors; they are not raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockResponse {
    pub is_successful: bool,
    pub stock: Option<Stock>,
    /// Stores related to the stock after the operation.
    pub store_ids: Vec<StoreId>,
    pub errors: Vec<String>,
}

impl StockResponse {
    pub fn success(stock: Stock, store_ids: Vec<StoreId>) -> Self {
        Self {
            is_successful: true,
            stock: Some(stock),
            store_ids,
            errors: Vec::new(),
        }
    }

    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            is_successful: false,
            stock: None,
            store_ids: Vec::new(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(id: i64, name: &str, is_active: bool) -> Stock {
        Stock {
            id: StockId::new(id),
            name: name.to_string(),
            is_active,
            uuid: None,
        }
    }

    #[test]
    fn empty_criteria_matches_everything() {
        let criteria = StockCriteria::default();
        assert!(criteria.matches(&stock(1, "Main", true), &[]));
        assert!(criteria.matches(&stock(2, "Backup", false), &[]));
    }

    #[test]
    fn active_criteria_excludes_inactive_stocks() {
        let criteria = StockCriteria::active();
        assert!(criteria.matches(&stock(1, "Main", true), &[]));
        assert!(!criteria.matches(&stock(2, "Backup", false), &[]));
    }

    #[test]
    fn store_filter_requires_overlap_with_relations() {
        let criteria = StockCriteria::default().with_store_id(StoreId::new(7));
        assert!(criteria.matches(&stock(1, "Main", true), &[StoreId::new(7), StoreId::new(8)]));
        assert!(!criteria.matches(&stock(1, "Main", true), &[StoreId::new(8)]));
        assert!(!criteria.matches(&stock(1, "Main", true), &[]));
    }

    #[test]
    fn name_and_id_filters_compose_with_and() {
        let criteria = StockCriteria::default()
            .with_stock_name("Main")
            .with_stock_id(StockId::new(2));
        assert!(!criteria.matches(&stock(1, "Main", true), &[]));
        assert!(!criteria.matches(&stock(2, "Backup", true), &[]));
        assert!(criteria.matches(&stock(2, "Main", true), &[]));
    }

    #[test]
    fn uuid_filter_skips_stocks_without_uuid() {
        let uuid = Uuid::from_u128(42);
        let criteria = StockCriteria {
            uuids: vec![uuid],
            ..StockCriteria::default()
        };
        let mut with_uuid = stock(1, "Main", true);
        with_uuid.uuid = Some(uuid);
        assert!(criteria.matches(&with_uuid, &[]));
        assert!(!criteria.matches(&stock(2, "Backup", true), &[]));
    }
}
