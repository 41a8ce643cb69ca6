//! Catalog domain module.
//!
//! Owns the product table and the sales logic built on top of it:
//!
//! - `model.rs` - Product records, write shapes and listing filters
//! - `store.rs` - SQLite persistence
//! - `seed.rs` - Sample products for an empty catalog
//! - `query.rs` - Free-text question interpreter
//! - `aggregate.rs` - Sales, revenue and per-type statistics
//! - `service.rs` - Facade used by both the MCP tools and the REST API

pub mod aggregate;
mod error;
pub mod model;
pub mod query;
pub mod seed;
mod service;
pub mod store;

pub use aggregate::{LineItem, SalesSummary, TypeStat, compute_line_items, compute_type_statistics};
pub use error::{CatalogError, CatalogResult};
pub use model::{NewProduct, Product, ProductFilter, ProductType, ProductUpdate};
pub use query::{InterpretedRequest, Period, Scope, interpret};
pub use service::{CatalogService, SalesReport};
pub use store::CatalogStore;
