//! Common utilities shared across catalog tools.
//!
//! Result builders, argument parsing and the blocking route adapter every
//! tool uses to reach the SQLite-backed catalog from async handlers.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Content, Tool},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

use crate::domains::catalog::{CatalogError, CatalogService, Product};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Map a catalog failure to a tool error result.
///
/// Validation and not-found failures are reported to the caller as tool
/// errors so the assistant can correct its input.
pub fn catalog_error_result(error: &CatalogError) -> CallToolResult {
    let message = match error {
        CatalogError::EmptyQuery | CatalogError::NotFound(_) | CatalogError::InvalidInput(_) => {
            error.to_string()
        }
        other => format!("Catalog operation failed: {}", other),
    };
    error_result(&message)
}

/// Create a success result carrying a text summary and structured JSON.
pub fn structured_result<T: Serialize>(summary: String, data: &T) -> CallToolResult {
    match serde_json::to_value(data) {
        Ok(structured) => CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => error_result(&format!("Failed to serialize result: {}", e)),
    }
}

/// One display line for a product.
pub fn product_line(product: &Product) -> String {
    format!(
        "#{} {} ({}/{}) - cost {:.2}, {} sold per day",
        product.id,
        product.name,
        product.product_type,
        product.category,
        product.cost,
        product.sales_per_day
    )
}

/// Deserialize tool arguments into a parameter struct.
pub fn parse_arguments<P: DeserializeOwned>(
    args: serde_json::Map<String, serde_json::Value>,
) -> Result<P, McpError> {
    serde_json::from_value(serde_json::Value::Object(args))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Build a route that parses arguments and runs `execute` on the blocking pool.
pub fn catalog_route<S, P>(
    tool: Tool,
    catalog: Arc<CatalogService>,
    execute: fn(&P, &CatalogService) -> CallToolResult,
) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    P: DeserializeOwned + Send + 'static,
{
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let catalog = catalog.clone();
        async move {
            let params: P = parse_arguments(args)?;
            tokio::task::spawn_blocking(move || execute(&params, &catalog))
                .await
                .map_err(|e| McpError::internal_error(format!("Task failed: {}", e), None))
        }
        .boxed()
    })
}

/// Run a tool for the HTTP JSON-RPC transport.
///
/// Serializes the full `CallToolResult` so `structuredContent` and
/// `isError` reach the client unchanged.
#[cfg(feature = "http")]
pub fn http_call<P: DeserializeOwned>(
    arguments: serde_json::Value,
    catalog: &CatalogService,
    execute: fn(&P, &CatalogService) -> CallToolResult,
) -> Result<serde_json::Value, ToolError> {
    let params: P = serde_json::from_value(arguments)
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

    let result = execute(&params, catalog);
    serde_json::to_value(&result).map_err(|e| ToolError::internal(e.to_string()))
}
