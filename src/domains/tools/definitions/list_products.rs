//! List products tool definition.

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{catalog_error_result, catalog_route, product_line, structured_result};
use crate::domains::catalog::{CatalogService, Product, ProductFilter, ProductType};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the list products tool. All filters are optional and
/// combined with AND.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListProductsParams {
    /// Case-insensitive substring of the product name.
    #[serde(default)]
    pub name: Option<String>,

    /// Exact product type: hair, perfume or skin.
    #[serde(default, rename = "type")]
    pub product_type: Option<ProductType>,

    /// Exact category, e.g. "shampoo" or "body_lotion".
    #[serde(default)]
    pub category: Option<String>,
}

impl From<&ListProductsParams> for ProductFilter {
    fn from(params: &ListProductsParams) -> Self {
        ProductFilter {
            name: params.name.clone().filter(|n| !n.trim().is_empty()),
            product_type: params.product_type,
            category: params.category.clone().filter(|c| !c.trim().is_empty()),
        }
    }
}

// ============================================================================
// Output Structure
// ============================================================================

/// Products matching a listing filter, ordered by name.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ProductListResult {
    pub count: usize,
    pub products: Vec<Product>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// List products tool - filtered catalog listing.
pub struct ListProductsTool;

impl ListProductsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_products";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List catalog products ordered by name. Optionally filter by name substring \
        (case-insensitive), exact type (hair, perfume, skin) and exact category; filters are combined with AND.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(params: &ListProductsParams, catalog: &CatalogService) -> CallToolResult {
        let filter = ProductFilter::from(params);
        info!(?filter, "Listing products");

        match catalog.list_products(&filter) {
            Ok(products) => {
                let mut summary = format!("Found {} product(s)", products.len());
                for product in &products {
                    summary.push_str("\n- ");
                    summary.push_str(&product_line(product));
                }

                let result = ProductListResult {
                    count: products.len(),
                    products,
                };
                structured_result(summary, &result)
            }
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
            input_schema: cached_schema_for_type::<ListProductsParams>(),
            annotations: None,
            output_schema: Some(schema_for_type::<ProductListResult>().into()),
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

// ============================================================================
// Tests
// ============================================================================
