//! MCP Server implementation and lifecycle management.
//!
//! `McpServer` owns the shared catalog and hands it to the tool router and
//! the resource service. The STDIO transport drives it through rmcp's
//! `ServerHandler`; the HTTP transport calls the inherent methods below.
//!
//! Every catalog access goes through SQLite and blocks, so async entry
//! points move that work onto tokio's blocking pool.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::catalog::CatalogService;
use crate::domains::resources::{ResourceError, ResourceService};
use crate::domains::tools::build_tool_router;

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// Instructions sent to clients on initialize.
pub const INSTRUCTIONS: &str = "Product catalog server. Ask sales or revenue questions in plain English with \
    query_sales (e.g. 'weekly sales for hair', 'daily revenue of gucci'), browse with list_products, \
    and maintain the catalog with add_product, update_product and delete_product. \
    product_stats summarizes cost and sales per product type.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared product catalog.
    catalog: Arc<CatalogService>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server over an already opened catalog.
    pub fn new(config: Config, catalog: CatalogService) -> Self {
        let config = Arc::new(config);
        let catalog = Arc::new(catalog);

        let resource_service = Arc::new(ResourceService::new(
            config.server.clone(),
            catalog.clone(),
        ));

        Self {
            tool_router: build_tool_router::<Self>(catalog.clone()),
            config,
            catalog,
            resource_service,
        }
    }

    /// Open the configured catalog (seeding it if asked) and build the server.
    pub fn bootstrap(config: Config) -> crate::Result<Self> {
        let catalog = CatalogService::open(&config.catalog)?;
        info!("Catalog ready with {} product(s)", catalog.product_count()?);
        Ok(Self::new(config, catalog))
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the shared catalog (used by the REST API).
    pub fn catalog(&self) -> &Arc<CatalogService> {
        &self.catalog
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "title": t.title,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "outputSchema": t.output_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> crate::Result<serde_json::Value> {
        let registry = ToolRegistry::new(self.catalog.clone());
        let name = name.to_string();
        let result =
            tokio::task::spawn_blocking(move || registry.call_tool(&name, arguments)).await??;
        Ok(result)
    }

    /// List all available resources (for HTTP transport).
    pub fn list_resources(&self) -> Vec<serde_json::Value> {
        self.resource_service
            .list_resources()
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// List all available resource templates (for HTTP transport).
    pub fn list_resource_templates(&self) -> Vec<serde_json::Value> {
        self.resource_service
            .list_resource_templates()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "uriTemplate": t.raw.uri_template,
                    "name": t.raw.name,
                    "title": t.raw.title,
                    "description": t.raw.description,
                    "mimeType": t.raw.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> crate::Result<serde_json::Value> {
        let result = self.read_resource_blocking(uri.to_string()).await?;
        Ok(serde_json::json!({
            "contents": result.contents
        }))
    }

    async fn read_resource_blocking(&self, uri: String) -> crate::Result<ReadResourceResult> {
        let service = self.resource_service.clone();
        let result = tokio::task::spawn_blocking(move || service.read_resource(&uri)).await??;
        Ok(result)
    }
}

fn resource_error_to_mcp(error: crate::Error) -> McpError {
    match error {
        crate::Error::Resource(ResourceError::NotFound(uri)) => {
            McpError::resource_not_found(format!("Resource not found: {}", uri), None)
        }
        crate::Error::Resource(ResourceError::InvalidUri(uri)) => {
            McpError::invalid_params(format!("Invalid URI: {}", uri), None)
        }
        other => McpError::internal_error(other.to_string(), None),
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        Ok(ListResourcesResult {
            resources: self.resource_service.list_resources(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        Ok(ListResourceTemplatesResult {
            resource_templates: self.resource_service.list_resource_templates(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.read_resource_blocking(request.uri)
            .await
            .map_err(resource_error_to_mcp)
    }
}
