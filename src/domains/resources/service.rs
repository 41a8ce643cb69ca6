//! Resource service implementation.
//!
//! Keeps the registry of catalog resources and answers list/read requests.
//! Dynamic resources and the product template are resolved against the
//! catalog on every read, so they always reflect the current table.
//!
//! Reads touch SQLite and block; async callers should use the blocking pool.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::ResourceError;
use super::registry::{PRODUCT_URI_PREFIX, get_all_resource_templates, get_all_resources};
use crate::core::config::ServerConfig;
use crate::domains::catalog::{CatalogError, CatalogService};

/// Service for listing and reading catalog resources.
pub struct ResourceService {
    server: ServerConfig,
    catalog: Arc<CatalogService>,

    /// Key: resource URI.
    resources: BTreeMap<String, ResourceEntry>,

    templates: Vec<ResourceTemplate>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Content computed from the catalog on each read.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicResourceType {
    /// Server name, version and product count.
    ServerInfo,

    /// Per-type product statistics.
    TypeStats,
}

impl ResourceService {
    pub fn new(server: ServerConfig, catalog: Arc<CatalogService>) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            server,
            catalog,
            resources: BTreeMap::new(),
            templates: get_all_resource_templates(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }

        service
    }

    fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources, ordered by URI.
    pub fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// List all available resource templates.
    pub fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Read a resource by URI.
    pub fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let content = match self.resources.get(uri) {
            Some(entry) => match &entry.content {
                ResourceContent::Text(text) => ResourceContents::text(text, uri),
                ResourceContent::Dynamic(dynamic_type) => {
                    self.resolve_dynamic_content(uri, *dynamic_type)?
                }
            },
            None => match uri.strip_prefix(PRODUCT_URI_PREFIX) {
                Some(id) => self.read_product(uri, id)?,
                None => return Err(ResourceError::not_found(uri)),
            },
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    fn resolve_dynamic_content(
        &self,
        uri: &str,
        dynamic_type: DynamicResourceType,
    ) -> Result<ResourceContents, ResourceError> {
        match dynamic_type {
            DynamicResourceType::ServerInfo => {
                let info = serde_json::json!({
                    "server": self.server.name,
                    "version": self.server.version,
                    "product_count": self.catalog.product_count()?,
                });
                json_contents(uri, &info)
            }
            DynamicResourceType::TypeStats => {
                json_contents(uri, &self.catalog.type_statistics()?)
            }
        }
    }

    fn read_product(&self, uri: &str, id: &str) -> Result<ResourceContents, ResourceError> {
        let id: i64 = id
            .parse()
            .map_err(|_| ResourceError::invalid_uri(format!("{} (product id must be an integer)", uri)))?;

        match self.catalog.get_product(id) {
            Ok(product) => json_contents(uri, &product),
            Err(CatalogError::NotFound(_)) => Err(ResourceError::not_found(uri)),
            Err(e) => Err(e.into()),
        }
    }
}

fn json_contents<T: Serialize>(uri: &str, value: &T) -> Result<ResourceContents, ResourceError> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| ResourceError::internal(e.to_string()))?;
    Ok(ResourceContents::text(text, uri))
}
