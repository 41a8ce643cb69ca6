//! Tools domain module.
//!
//! Catalog operations exposed as MCP tools. Every tool is a thin adapter
//! over `CatalogService`, so the MCP surface and the REST API answer the
//! same question the same way.
//!
//! ## Architecture
//!
//! - `definitions/` - One file per tool (params, execute, metadata, route)
//! - `router.rs` - rmcp ToolRouter for the STDIO transport
//! - `registry.rs` - Tool listing and JSON-RPC dispatch for HTTP
//! - `error.rs` - Dispatch errors
//!
//! ## Adding a New Tool
//!
//! 1. Create a file in `definitions/` with params, `execute()`, `http_handler()`,
//!    `to_tool()` and `create_route()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs`
//! 4. Register it in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
