//! Per-type statistics tool definition.

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

use super::common::{catalog_error_result, catalog_route, structured_result};
use crate::domains::catalog::{CatalogService, TypeStat};

/// The statistics tool takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ProductStatsParams {}

/// Statistics for every product type present in the catalog.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ProductStatsResult {
    pub types: Vec<TypeStat>,
}

/// Product statistics tool - count and cost spread per product type.
pub struct ProductStatsTool;

impl ProductStatsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "product_stats";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Per product type: number of products, average/min/max cost \
        and total units sold per day. Types without products are omitted.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(_params: &ProductStatsParams, catalog: &CatalogService) -> CallToolResult {
        match catalog.type_statistics() {
            Ok(types) => {
                let mut summary = format!("Statistics for {} product type(s)", types.len());
                for stat in &types {
                    summary.push_str(&format!(
                        "\n- {}: {} product(s), cost avg {:.2} (min {:.2}, max {:.2}), {} sold per day",
                        stat.product_type,
                        stat.count,
                        stat.avg_cost,
                        stat.min_cost,
                        stat.max_cost,
                        stat.total_sales_per_day
                    ));
                }
                structured_result(summary, &ProductStatsResult { types })
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
        // Clients may send null or omit arguments entirely
        let arguments = if arguments.is_null() {
            serde_json::json!({})
        } else {
            arguments
        };
        super::common::http_call(arguments, catalog, Self::execute)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ProductStatsParams>(),
            annotations: None,
            output_schema: Some(schema_for_type::<ProductStatsResult>().into()),
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
    fn test_stats_over_samples() {
        let catalog = CatalogService::in_memory_with_samples().unwrap();
        let result = ProductStatsTool::execute(&ProductStatsParams::default(), &catalog);
        assert_eq!(result.is_error, Some(false));

        let structured = result.structured_content.unwrap();
        let types = structured["types"].as_array().unwrap();
        assert_eq!(types.len(), 3);
        assert_eq!(types[0]["type"], "hair");
        assert_eq!(types[0]["count"], 2);
        assert_eq!(types[1]["type"], "perfume");
    }

    #[test]
    fn test_stats_skip_empty_types() {
        let catalog = CatalogService::in_memory_with_samples().unwrap();
        catalog.delete_product(3).unwrap();
        catalog.delete_product(4).unwrap();

        let result = ProductStatsTool::execute(&ProductStatsParams::default(), &catalog);
        let structured = result.structured_content.unwrap();
        let kinds: Vec<_> = structured["types"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["type"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds, vec!["hair", "skin"]);
    }
}
