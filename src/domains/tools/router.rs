//! Tool Router - builds the rmcp ToolRouter for the STDIO transport.
//!
//! Each tool creates its own route; all of them share one catalog handle.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    AddProductTool, DeleteProductTool, ListProductsTool, ProductStatsTool, QuerySalesTool,
    UpdateProductTool,
};
use crate::domains::catalog::CatalogService;

/// Build the tool router with all catalog tools.
pub fn build_tool_router<S>(catalog: Arc<CatalogService>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(QuerySalesTool::create_route(catalog.clone()))
        .with_route(ListProductsTool::create_route(catalog.clone()))
        .with_route(AddProductTool::create_route(catalog.clone()))
        .with_route(UpdateProductTool::create_route(catalog.clone()))
        .with_route(DeleteProductTool::create_route(catalog.clone()))
        .with_route(ProductStatsTool::create_route(catalog))
}
