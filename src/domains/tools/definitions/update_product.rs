//! Update product tool definition.

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{catalog_error_result, catalog_route, product_line, structured_result};
use crate::domains::catalog::{CatalogService, Product, ProductType, ProductUpdate};

/// Parameters for the update product tool. Omitted fields are unchanged.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateProductParams {
    /// Identifier of the product to update.
    pub id: i64,

    /// New product name.
    #[serde(default)]
    pub name: Option<String>,

    /// New product type: hair, perfume or skin.
    #[serde(default, rename = "type")]
    pub product_type: Option<ProductType>,

    /// New category.
    #[serde(default)]
    pub category: Option<String>,

    /// New unit cost.
    #[serde(default)]
    pub cost: Option<f64>,

    /// New average units sold per day.
    #[serde(default)]
    pub sales_per_day: Option<f64>,
}

impl From<&UpdateProductParams> for ProductUpdate {
    fn from(params: &UpdateProductParams) -> Self {
        ProductUpdate {
            name: params.name.clone(),
            product_type: params.product_type,
            category: params.category.clone(),
            cost: params.cost,
            sales_per_day: params.sales_per_day,
        }
    }
}

/// Update product tool - partial update of an existing product.
pub struct UpdateProductTool;

impl UpdateProductTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "update_product";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Update an existing product by id. Only the supplied fields \
        (name, type, category, cost, sales_per_day) are changed.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(id = params.id))]
    pub fn execute(params: &UpdateProductParams, catalog: &CatalogService) -> CallToolResult {
        let update = ProductUpdate::from(params);
        if update.is_empty() {
            info!("Update called without fields, refreshing timestamp only");
        }

        match catalog.update_product(params.id, update) {
            Ok(product) => structured_result(format!("Updated {}", product_line(&product)), &product),
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
            input_schema: cached_schema_for_type::<UpdateProductParams>(),
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
    fn test_update_sales() {
        let catalog = CatalogService::in_memory_with_samples().unwrap();
        let params: UpdateProductParams =
            serde_json::from_value(serde_json::json!({ "id": 1, "sales_per_day": 40 })).unwrap();

        let result = UpdateProductTool::execute(&params, &catalog);
        assert_eq!(result.is_error, Some(false));

        let product = catalog.get_product(1).unwrap();
        assert_eq!(product.sales_per_day, 40.0);
        assert_eq!(product.name, "Luxury Shampoo");
    }

    #[test]
    fn test_update_unknown_id() {
        let catalog = CatalogService::in_memory_with_samples().unwrap();
        let params: UpdateProductParams =
            serde_json::from_value(serde_json::json!({ "id": 404, "cost": 1.0 })).unwrap();

        let result = UpdateProductTool::execute(&params, &catalog);
        assert!(result.is_error.unwrap_or(false));
    }
}
