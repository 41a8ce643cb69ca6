//! Product records and the write/filter shapes used against the store.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{CatalogError, CatalogResult};

/// The closed set of product types.
///
/// Declaration order matches the lexical order of the stored values, so the
/// derived `Ord` sorts types the same way the database does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Hair,
    Perfume,
    Skin,
}

impl ProductType {
    /// All product types, in ascending order.
    pub const ALL: [ProductType; 3] = [Self::Hair, Self::Perfume, Self::Skin];

    /// The stored and serialized form of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hair => "hair",
            Self::Perfume => "perfume",
            Self::Skin => "skin",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hair" => Ok(Self::Hair),
            "perfume" => Ok(Self::Perfume),
            "skin" => Ok(Self::Skin),
            other => Err(CatalogError::invalid_input(format!(
                "unknown product type '{}', expected one of: hair, perfume, skin",
                other
            ))),
        }
    }
}

/// A product row as persisted in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub category: String,
    pub cost: f64,
    pub sales_per_day: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a product. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NewProduct {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub category: String,
    pub cost: f64,
    pub sales_per_day: f64,
}

impl NewProduct {
    /// Check the product invariants and return a trimmed copy.
    pub fn validated(self) -> CatalogResult<Self> {
        Ok(Self {
            name: non_blank("name", self.name)?,
            product_type: self.product_type,
            category: non_blank("category", self.category)?,
            cost: non_negative("cost", self.cost)?,
            sales_per_day: non_negative("sales_per_day", self.sales_per_day)?,
        })
    }
}

/// A partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProductUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub product_type: Option<ProductType>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub sales_per_day: Option<f64>,
}

impl ProductUpdate {
    /// Check the supplied fields against the product invariants.
    pub fn validated(self) -> CatalogResult<Self> {
        Ok(Self {
            name: self.name.map(|v| non_blank("name", v)).transpose()?,
            product_type: self.product_type,
            category: self.category.map(|v| non_blank("category", v)).transpose()?,
            cost: self.cost.map(|v| non_negative("cost", v)).transpose()?,
            sales_per_day: self
                .sales_per_day
                .map(|v| non_negative("sales_per_day", v))
                .transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.product_type.is_none()
            && self.category.is_none()
            && self.cost.is_none()
            && self.sales_per_day.is_none()
    }
}

/// Listing filter. Name is a case-insensitive substring, type and category
/// are exact; supplied criteria are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProductFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub product_type: Option<ProductType>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn by_type(product_type: ProductType) -> Self {
        Self {
            product_type: Some(product_type),
            ..Default::default()
        }
    }

    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Default::default()
        }
    }

    /// Whether a product satisfies every supplied criterion.
    pub fn matches(&self, product: &Product) -> bool {
        let name_ok = self.name.as_deref().is_none_or(|needle| {
            product
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        let type_ok = self
            .product_type
            .is_none_or(|t| product.product_type == t);
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| product.category == c);

        name_ok && type_ok && category_ok
    }
}

fn non_blank(field: &str, value: String) -> CatalogResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::invalid_input(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn non_negative(field: &str, value: f64) -> CatalogResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CatalogError::invalid_input(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, product_type: ProductType, category: &str) -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            name: name.to_string(),
            product_type,
            category: category.to_string(),
            cost: 1.0,
            sales_per_day: 1.0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_product_type_parse() {
        assert_eq!("hair".parse::<ProductType>().unwrap(), ProductType::Hair);
        assert_eq!(" Perfume ".parse::<ProductType>().unwrap(), ProductType::Perfume);
        assert!("nails".parse::<ProductType>().is_err());
    }

    #[test]
    fn test_product_type_ordering_matches_strings() {
        let mut names: Vec<_> = ProductType::ALL.iter().map(|t| t.as_str()).collect();
        names.sort();
        let ordered: Vec<_> = ProductType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, ordered);
    }

    #[test]
    fn test_product_serializes_type_field() {
        let json = serde_json::to_value(sample("A", ProductType::Skin, "moisturizer")).unwrap();
        assert_eq!(json["type"], "skin");
        assert!(json.get("product_type").is_none());
    }

    #[test]
    fn test_new_product_rejects_negative_cost() {
        let new = NewProduct {
            name: "Oil".to_string(),
            product_type: ProductType::Hair,
            category: "oil".to_string(),
            cost: -1.0,
            sales_per_day: 3.0,
        };
        assert!(matches!(new.validated(), Err(CatalogError::InvalidInput(_))));
    }

    #[test]
    fn test_new_product_trims_and_rejects_blank_name() {
        let new = NewProduct {
            name: "   ".to_string(),
            product_type: ProductType::Hair,
            category: "oil".to_string(),
            cost: 1.0,
            sales_per_day: 3.0,
        };
        assert!(new.validated().is_err());

        let new = NewProduct {
            name: "  Argan Oil ".to_string(),
            product_type: ProductType::Hair,
            category: "oil".to_string(),
            cost: 1.0,
            sales_per_day: 3.0,
        };
        assert_eq!(new.validated().unwrap().name, "Argan Oil");
    }

    #[test]
    fn test_update_rejects_nan_sales() {
        let update = ProductUpdate {
            sales_per_day: Some(f64::NAN),
            ..Default::default()
        };
        assert!(update.validated().is_err());
        assert!(ProductUpdate::default().is_empty());
    }

    #[test]
    fn test_filter_matches_with_and_semantics() {
        let product = sample("Luxury Shampoo", ProductType::Hair, "shampoo");

        assert!(ProductFilter::default().matches(&product));
        assert!(ProductFilter::by_name("SHAMP").matches(&product));
        assert!(ProductFilter::by_type(ProductType::Hair).matches(&product));
        assert!(!ProductFilter::by_category("Shampoo").matches(&product));

        let both = ProductFilter {
            name: Some("luxury".to_string()),
            product_type: Some(ProductType::Perfume),
            category: None,
        };
        assert!(!both.matches(&product));
    }
}
