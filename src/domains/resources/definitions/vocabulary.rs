//! Question vocabulary resource.
//!
//! Publishes the keyword tables the sales question interpreter uses, so a
//! client can phrase questions the interpreter understands.

use serde_json::json;

use super::ResourceDefinition;
use crate::domains::catalog::query::{CATEGORY_KEYWORDS, PERIOD_RULES, STOP_PHRASES, TYPE_KEYWORDS};
use crate::domains::resources::service::ResourceContent;

/// Interpreter vocabulary (static).
pub struct VocabularyResource;

impl ResourceDefinition for VocabularyResource {
    const URI: &'static str = "catalog://vocabulary";
    const NAME: &'static str = "Question Vocabulary";
    const DESCRIPTION: &'static str =
        "Period, type and category keywords recognized in sales questions, plus the filler words ignored when matching product names";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        let periods: Vec<_> = PERIOD_RULES
            .iter()
            .map(|(keyword, period)| json!({ "keyword": keyword, "period": period.as_str() }))
            .collect();
        let types: Vec<_> = TYPE_KEYWORDS
            .iter()
            .map(|(keyword, product_type)| json!({ "keyword": keyword, "type": product_type.as_str() }))
            .collect();

        let vocabulary = json!({
            "default_period": "day",
            "periods": periods,
            "types": types,
            "categories": CATEGORY_KEYWORDS,
            "ignored_phrases": STOP_PHRASES,
        });

        ResourceContent::Text(format!("{:#}", vocabulary))
    }
}
