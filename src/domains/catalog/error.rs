//! Catalog-specific error types.

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while querying or modifying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The question had no usable content after trimming.
    #[error("Query is empty: ask about sales, revenue, a product type, category or name")]
    EmptyQuery,

    /// No product exists with the given identifier.
    #[error("Product not found: {0}")]
    NotFound(i64),

    /// A field value violates the product invariants.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failure reported by the underlying SQLite store.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Create a new "invalid input" error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error is caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyQuery | Self::InvalidInput(_))
    }
}
