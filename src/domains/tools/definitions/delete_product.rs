//! Delete product tool definition.

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{catalog_error_result, catalog_route, product_line, structured_result};
use crate::domains::catalog::{CatalogService, Product};

/// Parameters for the delete product tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteProductParams {
    /// Identifier of the product to delete.
    pub id: i64,
}

/// Delete product tool - removes a product from the catalog.
pub struct DeleteProductTool;

impl DeleteProductTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "delete_product";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Delete a product by id. Returns the deleted product.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(id = params.id))]
    pub fn execute(params: &DeleteProductParams, catalog: &CatalogService) -> CallToolResult {
        info!("Delete product tool called");

        match catalog.delete_product(params.id) {
            Ok(product) => structured_result(format!("Deleted {}", product_line(&product)), &product),
            Err(e) => catalog_error_result(&e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        catalog: &CatalogService,
    ) -> Result<serde_json::Value, crate::domains::tools::ToolError> {
        super::common::http_call(arguments, catalog, Self::execute)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DeleteProductParams>(),
            annotations: None,
            output_schema: Some(schema_for_type::<Product>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(catalog: Arc<CatalogService>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        catalog_route(Self::to_tool(), catalog, Self::execute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_then_missing() {
        let catalog = CatalogService::in_memory_with_samples().unwrap();
        let params = DeleteProductParams { id: 3 };

        let first = DeleteProductTool::execute(&params, &catalog);
        assert_eq!(first.is_error, Some(false));
        assert_eq!(first.structured_content.unwrap()["name"], "Gucci Bloom");

        let second = DeleteProductTool::execute(&params, &catalog);
        assert!(second.is_error.unwrap_or(false));
        assert_eq!(catalog.product_count().unwrap(), 5);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_delete_http_handler_missing_id() {
        let catalog = CatalogService::in_memory_with_samples().unwrap();
        let result = DeleteProductTool::http_handler(serde_json::json!({}), &catalog);
        assert!(result.is_err());
    }
}
