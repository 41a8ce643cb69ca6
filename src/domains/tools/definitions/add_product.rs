//! Add product tool definition.

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{catalog_error_result, catalog_route, product_line, structured_result};
use crate::domains::catalog::{CatalogService, NewProduct, Product, ProductType};

/// Parameters for the add product tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddProductParams {
    /// Product name.
    pub name: String,

    /// Product type: hair, perfume or skin.
    #[serde(rename = "type")]
    pub product_type: ProductType,

    /// Category in snake_case, e.g. "shampoo" or "victoria_secret".
    pub category: String,

    /// Unit cost, must be zero or more.
    pub cost: f64,

    /// Average units sold per day, must be zero or more.
    pub sales_per_day: f64,
}

impl From<&AddProductParams> for NewProduct {
    fn from(params: &AddProductParams) -> Self {
        NewProduct {
            name: params.name.clone(),
            product_type: params.product_type,
            category: params.category.clone(),
            cost: params.cost,
            sales_per_day: params.sales_per_day,
        }
    }
}

/// Add product tool - inserts a product into the catalog.
pub struct AddProductTool;

impl AddProductTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add_product";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add a product to the catalog. Requires name, type (hair, perfume, skin), \
        category, cost and sales_per_day. Returns the stored product with its assigned id.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(name = %params.name))]
    pub fn execute(params: &AddProductParams, catalog: &CatalogService) -> CallToolResult {
        info!("Add product tool called");

        match catalog.add_product(NewProduct::from(params)) {
            Ok(product) => structured_result(format!("Added {}", product_line(&product)), &product),
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
            input_schema: cached_schema_for_type::<AddProductParams>(),
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
    use crate::domains::catalog::ProductFilter;

    fn params(name: &str, cost: f64) -> AddProductParams {
        AddProductParams {
            name: name.to_string(),
            product_type: ProductType::Skin,
            category: "serum".to_string(),
            cost,
            sales_per_day: 4.0,
        }
    }

    #[test]
    fn test_add_product() {
        let catalog = CatalogService::in_memory_with_samples().unwrap();
        let result = AddProductTool::execute(&params("Night Serum", 30.0), &catalog);
        assert_eq!(result.is_error, Some(false));

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["name"], "Night Serum");
        assert_eq!(structured["type"], "skin");
        assert_eq!(structured["id"], 7);

        let found = catalog.list_products(&ProductFilter::by_name("night")).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_add_product_negative_cost() {
        let catalog = CatalogService::in_memory_with_samples().unwrap();
        let result = AddProductTool::execute(&params("Bad", -1.0), &catalog);
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(catalog.product_count().unwrap(), 6);
    }
}
