//! Cache-invalidation ("touch") signaling.
//!
//! Every successful create/update of a stock or stock-product record emits
//! exactly one active-touch signal carrying the record kind and id. Delivery
//! is a side effect consumed by a downstream cache/search-index refresher;
//! the sink seam keeps the transport out of this crate.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Record kind tag carried by a touch signal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchKind {
    StockType,
    StockProduct,
}

impl TouchKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TouchKind::StockType => "stock-type",
            TouchKind::StockProduct => "stock-product",
        }
    }
}

impl core::fmt::Display for TouchKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One buffered touch signal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchRecord {
    pub kind: TouchKind,
    pub id: i64,
}

/// Invalidation-signal sink.
///
/// Implementations must tolerate being called once per mutated record;
/// batching or deduplication happens downstream, not here.
pub trait TouchSink: Send + Sync {
    fn touch_active(&self, kind: TouchKind, id: i64);
}

impl<T> TouchSink for Arc<T>
where
    T: TouchSink + ?Sized,
{
    fn touch_active(&self, kind: TouchKind, id: i64) {
        (**self).touch_active(kind, id)
    }
}

/// In-memory recording sink.
///
/// - No IO / no async
/// - Intended for tests and dev wiring
#[derive(Debug, Default)]
pub struct InMemoryTouchSink {
    records: Mutex<Vec<TouchRecord>>,
}

impl InMemoryTouchSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All signals received so far, in delivery order.
    pub fn touched(&self) -> Vec<TouchRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(_) => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

impl TouchSink for InMemoryTouchSink {
    fn touch_active(&self, kind: TouchKind, id: i64) {
        if let Ok(mut records) = self.records.lock() {
            records.push(TouchRecord { kind, id });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_match_the_wire_contract() {
        assert_eq!(TouchKind::StockType.as_str(), "stock-type");
        assert_eq!(TouchKind::StockProduct.as_str(), "stock-product");
    }

    #[test]
    fn recording_sink_keeps_delivery_order() {
        let sink = InMemoryTouchSink::new();
        sink.touch_active(TouchKind::StockType, 3);
        sink.touch_active(TouchKind::StockProduct, 9);

        let touched = sink.touched();
        assert_eq!(
            touched,
            vec![
                TouchRecord {
                    kind: TouchKind::StockType,
                    id: 3,
                },
                TouchRecord {
                    kind: TouchKind::StockProduct,
                    id: 9,
                },
            ],
        );

        sink.clear();
        assert!(sink.touched().is_empty());
    }
}
