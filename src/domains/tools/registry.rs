//! Tool Registry - listing and HTTP dispatch for the catalog tools.

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

#[cfg(feature = "http")]
use super::ToolError;
use super::definitions::{
    AddProductTool, DeleteProductTool, ListProductsTool, ProductStatsTool, QuerySalesTool,
    UpdateProductTool,
};
use crate::domains::catalog::CatalogService;

/// Tool registry bound to one catalog.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    catalog: Arc<CatalogService>,
}

impl ToolRegistry {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self { catalog }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            QuerySalesTool::NAME,
            ListProductsTool::NAME,
            AddProductTool::NAME,
            UpdateProductTool::NAME,
            DeleteProductTool::NAME,
            ProductStatsTool::NAME,
        ]
    }

    /// Metadata for every tool, in the order clients see them.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            QuerySalesTool::to_tool(),
            ListProductsTool::to_tool(),
            AddProductTool::to_tool(),
            UpdateProductTool::to_tool(),
            DeleteProductTool::to_tool(),
            ProductStatsTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// Blocks on SQLite; callers on the async runtime should run this on
    /// the blocking pool.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let catalog = self.catalog.as_ref();
        match name {
            QuerySalesTool::NAME => QuerySalesTool::http_handler(arguments, catalog),
            ListProductsTool::NAME => ListProductsTool::http_handler(arguments, catalog),
            AddProductTool::NAME => AddProductTool::http_handler(arguments, catalog),
            UpdateProductTool::NAME => UpdateProductTool::http_handler(arguments, catalog),
            DeleteProductTool::NAME => DeleteProductTool::http_handler(arguments, catalog),
            ProductStatsTool::NAME => ProductStatsTool::http_handler(arguments, catalog),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
