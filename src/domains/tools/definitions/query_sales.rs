//! Sales question tool definition.
//!
//! Answers free-text questions such as "weekly sales for perfume" by
//! interpreting the question and aggregating the matching products.

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{catalog_error_result, catalog_route, structured_result};
use crate::domains::catalog::{CatalogService, SalesReport};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the sales question tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QuerySalesParams {
    /// Question about sales or revenue, e.g. "weekly sales for hair",
    /// "daily revenue of gucci", "how many Bombshell per day".
    pub question: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Sales question tool - natural-language sales and revenue lookup.
pub struct QuerySalesTool;

impl QuerySalesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "query_sales";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Answer a sales or revenue question about the product catalog. \
        Mention 'week'/'weekly' for weekly figures (default is per day), and a product type (hair, perfume, skin), \
        a category (shampoo, conditioner, gucci, victoria secret, body lotion, moisturizer) or part of a product name \
        to narrow the scope. Returns per-product sales and revenue plus totals.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(question = %params.question))]
    pub fn execute(params: &QuerySalesParams, catalog: &CatalogService) -> CallToolResult {
        info!("Sales question received");

        match catalog.answer(&params.question) {
            Ok(report) => structured_result(render(&report), &report),
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
            input_schema: cached_schema_for_type::<QuerySalesParams>(),
            annotations: None,
            output_schema: Some(schema_for_type::<SalesReport>().into()),
            icons: None,
            meta: None,
            title: Some("Sales Question".into()),
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

fn render(report: &SalesReport) -> String {
    let mut text = report.summary();
    for item in &report.items {
        text.push_str(&format!(
            "\n- {} ({}): {:.2} sold, {:.2} revenue",
            item.name, item.category, item.scoped_sales, item.scoped_revenue
        ));
    }
    text
}

// ============================================================================
// Tests
// ============================================================================
