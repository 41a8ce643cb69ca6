//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resources()`

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, ResourceTemplate};

use super::definitions::{
    ResourceDefinition, ServerInfoResource, TypeStatsResource, VocabularyResource,
};
use super::service::ResourceEntry;

/// URI prefix of the single-product template, followed by the product id.
pub const PRODUCT_URI_PREFIX: &str = "catalog://products/";

fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: R::content(),
    }
}

/// Get all registered resources as ResourceEntries.
pub fn get_all_resources() -> Vec<ResourceEntry> {
    vec![
        build_resource::<VocabularyResource>(),
        build_resource::<TypeStatsResource>(),
        build_resource::<ServerInfoResource>(),
    ]
}

/// Get all registered resource templates (RFC 6570 URI templates).
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![
        RawResourceTemplate {
            uri_template: format!("{}{{id}}", PRODUCT_URI_PREFIX),
            name: "Product".to_string(),
            title: Some("Product by Id".to_string()),
            description: Some("A single catalog product, looked up by its numeric id".to_string()),
            mime_type: Some("application/json".to_string()),
        }
        .no_annotation(),
    ]
}
