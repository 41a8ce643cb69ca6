//! Per-type statistics resource.

use super::ResourceDefinition;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Count and cost spread per product type (dynamic).
pub struct TypeStatsResource;

impl ResourceDefinition for TypeStatsResource {
    const URI: &'static str = "catalog://stats/types";
    const NAME: &'static str = "Product Type Statistics";
    const DESCRIPTION: &'static str =
        "Number of products, average/min/max cost and daily sales for each product type";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::TypeStats)
    }
}
