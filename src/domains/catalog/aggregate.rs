//! Sales and cost aggregation over catalog rows.
//!
//! Everything here is a pure function of its input. Totals are accumulated
//! left to right in item order so repeated runs produce identical floats.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::model::{Product, ProductType};
use super::query::Period;

/// Days in the weekly reporting period.
pub const DAYS_PER_WEEK: f64 = 7.0;

/// One product's figures for a reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineItem {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub category: String,
    pub cost: f64,
    pub sales_per_day: f64,
    pub weekly_sales: f64,
    pub scoped_sales: f64,
    pub scoped_revenue: f64,
}

impl LineItem {
    pub fn from_product(product: &Product, period: Period) -> Self {
        let weekly_sales = product.sales_per_day * DAYS_PER_WEEK;
        let scoped_sales = match period {
            Period::Week => weekly_sales,
            Period::Day => product.sales_per_day,
        };

        Self {
            id: product.id,
            name: product.name.clone(),
            product_type: product.product_type,
            category: product.category.clone(),
            cost: product.cost,
            sales_per_day: product.sales_per_day,
            weekly_sales,
            scoped_sales,
            scoped_revenue: scoped_sales * product.cost,
        }
    }
}

/// Line items plus their roll-up totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SalesSummary {
    pub items: Vec<LineItem>,
    pub total_sales: f64,
    pub total_revenue: f64,
}

impl SalesSummary {
    /// Reorder items by descending weekly sales, ties by name.
    ///
    /// Totals are left untouched; they were summed in input order.
    pub fn sort_by_weekly_sales_desc(&mut self) {
        self.items.sort_by(|a, b| {
            b.weekly_sales
                .partial_cmp(&a.weekly_sales)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
    }
}

/// Per-type rollup of cost and sales volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TypeStat {
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub count: usize,
    pub avg_cost: f64,
    pub min_cost: f64,
    pub max_cost: f64,
    pub total_sales_per_day: f64,
}

/// Compute line items and totals for `products` over `period`.
pub fn compute_line_items(products: &[Product], period: Period) -> SalesSummary {
    let items: Vec<LineItem> = products
        .iter()
        .map(|p| LineItem::from_product(p, period))
        .collect();

    let (total_sales, total_revenue) = items.iter().fold((0.0, 0.0), |(sales, revenue), item| {
        (sales + item.scoped_sales, revenue + item.scoped_revenue)
    });

    SalesSummary {
        items,
        total_sales,
        total_revenue,
    }
}

/// Group products by type. Only observed types are reported, in ascending
/// type order.
pub fn compute_type_statistics(products: &[Product]) -> Vec<TypeStat> {
    let mut groups: BTreeMap<ProductType, Vec<&Product>> = BTreeMap::new();
    for product in products {
        groups.entry(product.product_type).or_default().push(product);
    }

    groups
        .into_iter()
        .map(|(product_type, members)| {
            let count = members.len();
            let total_cost: f64 = members.iter().map(|p| p.cost).sum();
            let min_cost = members.iter().map(|p| p.cost).fold(f64::INFINITY, f64::min);
            let max_cost = members
                .iter()
                .map(|p| p.cost)
                .fold(f64::NEG_INFINITY, f64::max);

            TypeStat {
                product_type,
                count,
                avg_cost: total_cost / count as f64,
                min_cost,
                max_cost,
                total_sales_per_day: members.iter().map(|p| p.sales_per_day).sum(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: i64, name: &str, product_type: ProductType, cost: f64, sales: f64) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: name.to_string(),
            product_type,
            category: "misc".to_string(),
            cost,
            sales_per_day: sales,
            created_at: now,
            updated_at: now,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Alpha", ProductType::Hair, 12.99, 15.0),
            product(2, "Beta", ProductType::Hair, 14.99, 12.0),
            product(3, "Gamma", ProductType::Perfume, 89.99, 5.5),
            product(4, "Delta", ProductType::Skin, 9.99, 20.25),
        ]
    }

    #[test]
    fn test_empty_input_yields_zero_totals() {
        let summary = compute_line_items(&[], Period::Week);
        assert!(summary.items.is_empty());
        assert_eq!(summary.total_sales, 0.0);
        assert_eq!(summary.total_revenue, 0.0);
        assert!(compute_type_statistics(&[]).is_empty());
    }

    #[test]
    fn test_line_item_derivation() {
        let p = product(1, "Alpha", ProductType::Hair, 2.5, 4.0);

        let day = LineItem::from_product(&p, Period::Day);
        assert_eq!(day.weekly_sales, 28.0);
        assert_eq!(day.scoped_sales, 4.0);
        assert_eq!(day.scoped_revenue, 10.0);

        let week = LineItem::from_product(&p, Period::Week);
        assert_eq!(week.scoped_sales, 28.0);
        assert_eq!(week.scoped_revenue, 70.0);
    }

    #[test]
    fn test_totals_match_sales_sum() {
        let products = catalog();
        let daily_sum: f64 = products.iter().map(|p| p.sales_per_day).sum();

        let week = compute_line_items(&products, Period::Week);
        assert!((week.total_sales - daily_sum * 7.0).abs() < 1e-9);

        let day = compute_line_items(&products, Period::Day);
        assert!((day.total_sales - daily_sum).abs() < 1e-9);
    }

    #[test]
    fn test_revenue_total_is_sum_of_items() {
        let summary = compute_line_items(&catalog(), Period::Week);
        let expected = 15.0 * 7.0 * 12.99 + 12.0 * 7.0 * 14.99 + 5.5 * 7.0 * 89.99 + 20.25 * 7.0 * 9.99;
        assert!((summary.total_revenue - expected).abs() < 1e-6);
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let products = catalog();
        let first = compute_line_items(&products, Period::Week);
        let second = compute_line_items(&products, Period::Week);
        assert_eq!(first.total_sales.to_bits(), second.total_sales.to_bits());
        assert_eq!(first.total_revenue.to_bits(), second.total_revenue.to_bits());
        assert_eq!(first, second);
        assert_eq!(compute_type_statistics(&products), compute_type_statistics(&products));
    }

    #[test]
    fn test_sort_by_weekly_sales_desc() {
        let mut summary = compute_line_items(&catalog(), Period::Day);
        let totals = (summary.total_sales, summary.total_revenue);
        summary.sort_by_weekly_sales_desc();

        let names: Vec<_> = summary.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Delta", "Alpha", "Beta", "Gamma"]);
        assert_eq!((summary.total_sales, summary.total_revenue), totals);
    }

    #[test]
    fn test_sort_ties_break_by_name() {
        let products = vec![
            product(1, "Zed", ProductType::Hair, 1.0, 3.0),
            product(2, "Amy", ProductType::Hair, 1.0, 3.0),
        ];
        let mut summary = compute_line_items(&products, Period::Week);
        summary.sort_by_weekly_sales_desc();
        assert_eq!(summary.items[0].name, "Amy");
    }

    #[test]
    fn test_type_statistics_example() {
        let products = vec![
            product(1, "P", ProductType::Perfume, 5.0, 1.0),
            product(2, "H1", ProductType::Hair, 10.0, 2.0),
            product(3, "H2", ProductType::Hair, 20.0, 3.0),
        ];
        let stats = compute_type_statistics(&products);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].product_type, ProductType::Hair);
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].avg_cost, 15.0);
        assert_eq!(stats[0].min_cost, 10.0);
        assert_eq!(stats[0].max_cost, 20.0);
        assert_eq!(stats[0].total_sales_per_day, 5.0);

        assert_eq!(stats[1].product_type, ProductType::Perfume);
        assert_eq!(stats[1].count, 1);
        assert_eq!(stats[1].avg_cost, 5.0);
        assert_eq!(stats[1].min_cost, 5.0);
        assert_eq!(stats[1].max_cost, 5.0);
    }

    #[test]
    fn test_line_item_serialization() {
        let summary = compute_line_items(&catalog()[..1], Period::Week);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["items"][0]["type"], "hair");
        assert_eq!(json["items"][0]["weekly_sales"], 105.0);
        assert!(json["total_revenue"].is_number());
    }
}
