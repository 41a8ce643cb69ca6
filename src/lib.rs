//! Product catalog server.
//!
//! A small catalog of hair, perfume and skin products stored in SQLite,
//! with a natural-language sales interpreter on top. The same catalog is
//! exposed as MCP tools and resources (STDIO or JSON-RPC over HTTP) and as
//! a REST API with a browser UI.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **catalog**: products, storage, question interpreter and sales aggregation
//!   - **tools**: MCP tools over the catalog
//!   - **resources**: read-only MCP resources over the catalog
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_mcp_server::domains::catalog::CatalogService;
//!
//! fn main() -> anyhow::Result<()> {
//!     let catalog = CatalogService::in_memory_with_samples()?;
//!     let report = catalog.answer("weekly sales for hair")?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
