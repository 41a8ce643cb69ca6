//! Resources domain module.
//!
//! Read-only catalog views for MCP clients: the question vocabulary,
//! per-type statistics, server information and single products by id.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `registry.rs` - Central resource and template registration
//! - `service.rs` - Listing and reading, resolving dynamic content against the catalog

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::{PRODUCT_URI_PREFIX, get_all_resource_templates, get_all_resources};
pub use service::{DynamicResourceType, ResourceContent, ResourceEntry, ResourceService};
