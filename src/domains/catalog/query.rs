//! Keyword-driven interpretation of free-text sales questions.
//!
//! A question resolves to a reporting [`Period`] and at most one [`Scope`].
//! Every decision is made by walking an ordered rule table; there is no
//! tokenization beyond substring search.
//!
//! - Period rules are all evaluated in declared order and the last match wins,
//!   so "daily" beats "today" which beats "week".
//! - Scope rules form a priority chain: type keywords, then category keywords,
//!   then a name fragment left over after removing stop-phrases.
//!
//! A question naming both a type and a category (e.g. "hair gucci") resolves
//! to the type. Compound scopes are not supported.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{CatalogError, CatalogResult};
use super::model::{ProductFilter, ProductType};

/// Reporting period for sales and revenue figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

/// Which products a question is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Scope {
    Unscoped,
    ByType(ProductType),
    ByCategory(String),
    ByNamePattern(String),
}

impl Scope {
    /// The catalog filter that selects the products in this scope.
    pub fn to_filter(&self) -> ProductFilter {
        match self {
            Self::Unscoped => ProductFilter::default(),
            Self::ByType(t) => ProductFilter::by_type(*t),
            Self::ByCategory(c) => ProductFilter::by_category(c.clone()),
            Self::ByNamePattern(p) => ProductFilter::by_name(p.clone()),
        }
    }

    /// Short human-readable description, used in tool summaries.
    pub fn describe(&self) -> String {
        match self {
            Self::Unscoped => "all products".to_string(),
            Self::ByType(t) => format!("type '{}'", t),
            Self::ByCategory(c) => format!("category '{}'", c),
            Self::ByNamePattern(p) => format!("names matching '{}'", p),
        }
    }
}

/// The structured form of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InterpretedRequest {
    pub period: Period,
    pub scope: Scope,
}

/// Period keywords in evaluation order. Every matching rule overrides the
/// previous result.
pub const PERIOD_RULES: &[(&str, Period)] = &[
    ("week", Period::Week),
    ("weekly", Period::Week),
    ("this week", Period::Week),
    ("today", Period::Day),
    ("per day", Period::Day),
    ("daily", Period::Day),
];

/// Type keywords, checked first. The first match wins.
pub const TYPE_KEYWORDS: &[(&str, ProductType)] = &[
    ("hair", ProductType::Hair),
    ("perfume", ProductType::Perfume),
    ("skin", ProductType::Skin),
];

/// Category phrases, checked after types. The first match wins.
pub const CATEGORY_KEYWORDS: &[&str] = &[
    "shampoo",
    "conditioner",
    "gucci",
    "victoria secret",
    "victoria_secret",
    "body lotion",
    "body_lotion",
    "moisturizer",
];

/// Phrases removed before the remainder is used as a name fragment.
/// Removal is by plain substring, in this order, so "sales" must precede "sale".
pub const STOP_PHRASES: &[&str] = &[
    "sales",
    "sale",
    "revenue",
    "for",
    "of",
    "what",
    "show",
    "get",
    "how many",
    "how much",
    "today",
    "weekly",
    "this week",
    "per day",
];

/// Interpret a free-text question.
///
/// Fails with [`CatalogError::EmptyQuery`] when nothing but whitespace was
/// supplied.
pub fn interpret(text: &str) -> CatalogResult<InterpretedRequest> {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(CatalogError::EmptyQuery);
    }

    let request = InterpretedRequest {
        period: resolve_period(&normalized),
        scope: resolve_scope(&normalized),
    };
    debug!(question = %normalized, ?request, "Interpreted question");

    Ok(request)
}

fn resolve_period(text: &str) -> Period {
    PERIOD_RULES
        .iter()
        .fold(Period::Day, |current, (keyword, period)| {
            if text.contains(keyword) { *period } else { current }
        })
}

fn resolve_scope(text: &str) -> Scope {
    if let Some((_, product_type)) = TYPE_KEYWORDS.iter().find(|(kw, _)| text.contains(kw)) {
        return Scope::ByType(*product_type);
    }

    if let Some(phrase) = CATEGORY_KEYWORDS.iter().find(|kw| text.contains(*kw)) {
        return Scope::ByCategory(normalize_category(phrase));
    }

    let remainder = strip_stop_phrases(text);
    if remainder.is_empty() {
        Scope::Unscoped
    } else {
        Scope::ByNamePattern(remainder)
    }
}

/// Collapse whitespace runs into single underscores ("body lotion" -> "body_lotion").
fn normalize_category(phrase: &str) -> String {
    phrase.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Remove every stop-phrase occurrence and trim what is left.
///
/// Connectors outside the list ("does", "the") are kept, so the fragment may
/// carry noise words.
pub fn strip_stop_phrases(text: &str) -> String {
    let lowered = text.to_lowercase();
    STOP_PHRASES
        .iter()
        .fold(lowered, |acc, phrase| acc.replace(phrase, ""))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_question_rejected() {
        assert!(matches!(interpret(""), Err(CatalogError::EmptyQuery)));
        assert!(matches!(interpret("   "), Err(CatalogError::EmptyQuery)));
        assert!(matches!(interpret("\n\t"), Err(CatalogError::EmptyQuery)));
    }

    #[test]
    fn test_weekly_type_question() {
        let request = interpret("weekly hair sales").unwrap();
        assert_eq!(request.period, Period::Week);
        assert_eq!(request.scope, Scope::ByType(ProductType::Hair));
    }

    #[test]
    fn test_daily_category_question() {
        let request = interpret("daily sales for shampoo").unwrap();
        assert_eq!(request.period, Period::Day);
        assert_eq!(request.scope, Scope::ByCategory("shampoo".to_string()));
    }

    #[test]
    fn test_period_defaults_to_day() {
        assert_eq!(interpret("perfume revenue").unwrap().period, Period::Day);
    }

    #[test]
    fn test_period_override_order() {
        assert_eq!(interpret("sales this week").unwrap().period, Period::Week);
        assert_eq!(interpret("this week or today?").unwrap().period, Period::Day);
        assert_eq!(interpret("weekly sales per day").unwrap().period, Period::Day);
        assert_eq!(interpret("daily numbers for the week").unwrap().period, Period::Day);
    }

    #[test]
    fn test_question_is_case_insensitive() {
        let request = interpret("WEEKLY Perfume Revenue").unwrap();
        assert_eq!(request.period, Period::Week);
        assert_eq!(request.scope, Scope::ByType(ProductType::Perfume));
    }

    #[test]
    fn test_type_beats_category() {
        let request = interpret("hair gucci sales").unwrap();
        assert_eq!(request.scope, Scope::ByType(ProductType::Hair));
    }

    #[test]
    fn test_type_keyword_order() {
        // "perfume" precedes "skin" in the keyword table
        let request = interpret("skin and perfume").unwrap();
        assert_eq!(request.scope, Scope::ByType(ProductType::Perfume));
    }

    #[test]
    fn test_category_phrase_normalized() {
        let request = interpret("weekly victoria secret revenue").unwrap();
        assert_eq!(request.scope, Scope::ByCategory("victoria_secret".to_string()));

        let request = interpret("body lotion").unwrap();
        assert_eq!(request.scope, Scope::ByCategory("body_lotion".to_string()));
    }

    #[test]
    fn test_category_keyword_order() {
        // Table order decides, not position in the question
        let request = interpret("gucci shampoo").unwrap();
        assert_eq!(request.scope, Scope::ByCategory("shampoo".to_string()));

        let request = interpret("moisturizer or conditioner").unwrap();
        assert_eq!(request.scope, Scope::ByCategory("conditioner".to_string()));
    }

    #[test]
    fn test_underscore_category_keywords() {
        let request = interpret("weekly victoria_secret").unwrap();
        assert_eq!(request.period, Period::Week);
        assert_eq!(request.scope, Scope::ByCategory("victoria_secret".to_string()));

        let request = interpret("body_lotion per day").unwrap();
        assert_eq!(request.period, Period::Day);
        assert_eq!(request.scope, Scope::ByCategory("body_lotion".to_string()));
    }

    #[test]
    fn test_category_in_product_name_resolves_to_category() {
        let request = interpret("how much does Luxury Shampoo sell").unwrap();
        assert_eq!(request.scope, Scope::ByCategory("shampoo".to_string()));
    }

    #[test]
    fn test_name_pattern_keeps_unlisted_words() {
        let request = interpret("how much does Rose Garden sell").unwrap();
        assert_eq!(
            request.scope,
            Scope::ByNamePattern("does rose garden sell".to_string())
        );
    }

    #[test]
    fn test_name_pattern_after_stop_phrases() {
        let request = interpret("show sales for Bombshell").unwrap();
        assert_eq!(request.scope, Scope::ByNamePattern("bombshell".to_string()));
    }

    #[test]
    fn test_only_stop_phrases_is_unscoped() {
        let request = interpret("what sales today").unwrap();
        assert_eq!(request.period, Period::Day);
        assert_eq!(request.scope, Scope::Unscoped);

        let request = interpret("weekly revenue").unwrap();
        assert_eq!(request.period, Period::Week);
        assert_eq!(request.scope, Scope::Unscoped);
    }

    #[test]
    fn test_stop_phrases_removed_as_substrings() {
        assert_eq!(strip_stop_phrases("SALES of comfort"), "comt");
        assert_eq!(strip_stop_phrases("how many per day"), "");
    }

    #[test]
    fn test_scope_to_filter() {
        assert_eq!(Scope::Unscoped.to_filter(), ProductFilter::default());
        assert_eq!(
            Scope::ByType(ProductType::Skin).to_filter(),
            ProductFilter::by_type(ProductType::Skin)
        );
        assert_eq!(
            Scope::ByNamePattern("bloom".into()).to_filter(),
            ProductFilter::by_name("bloom")
        );
    }

    #[test]
    fn test_request_serialization() {
        let request = interpret("weekly gucci").unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["period"], "week");
        assert_eq!(json["scope"]["kind"], "by_category");
        assert_eq!(json["scope"]["value"], "gucci");
    }
}
