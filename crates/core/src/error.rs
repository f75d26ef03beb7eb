//! Domain error model.

use thiserror::Error;

/// Result type used across the stock domain.
pub type StockResult<T> = Result<T, StockError>;

/// Stock-domain error.
///
/// Raised errors are programmer/precondition failures; business validation
/// failures on stock create/update are returned as response data instead
/// (see `StockResponse`), never as a variant here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    /// Referenced warehouse name does not exist.
    #[error("stock type unknown: {0}")]
    UnknownStockType(String),

    /// Referenced sku does not resolve to a product.
    #[error("missing product for sku {0}")]
    MissingProduct(String),

    /// Referenced stock-product row does not exist. Carries a description
    /// of the key that missed (row id, or sku + stock type pair).
    #[error("stock product not found: {0}")]
    StockProductNotFound(String),

    /// A row for this (stock, product) pair already exists.
    ///
    /// The message is a contract; callers surface it verbatim.
    #[error("Cannot duplicate entry: this stock type is already set for this product")]
    StockProductAlreadyExists,

    /// A storage-level unique constraint rejected a write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// An input failed an internal precondition.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl StockError {
    pub fn unknown_stock_type(name: impl Into<String>) -> Self {
        Self::UnknownStockType(name.into())
    }

    pub fn missing_product(sku: impl Into<String>) -> Self {
        Self::MissingProduct(sku.into())
    }

    pub fn unique_violation(msg: impl Into<String>) -> Self {
        Self::UniqueViolation(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_entry_message_is_stable() {
        assert_eq!(
            StockError::StockProductAlreadyExists.to_string(),
            "Cannot duplicate entry: this stock type is already set for this product",
        );
    }

    #[test]
    fn unknown_stock_type_names_the_type() {
        let err = StockError::unknown_stock_type("EU-North");
        assert_eq!(err.to_string(), "stock type unknown: EU-North");
    }
}
