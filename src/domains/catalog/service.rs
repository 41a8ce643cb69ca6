//! Catalog service - the facade shared by the MCP tools and the REST API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::aggregate::{LineItem, TypeStat, compute_line_items, compute_type_statistics};
use super::error::CatalogResult;
use super::model::{NewProduct, Product, ProductFilter, ProductUpdate};
use super::query::{InterpretedRequest, Period, Scope, interpret};
use super::seed::seed_if_empty;
use super::store::CatalogStore;
use crate::core::config::CatalogConfig;

/// Response payload for a sales question or a direct sales report.
///
/// Answers to questions carry the interpreted `request`; direct reports carry
/// the listing `filter` they were computed over instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SalesReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub period: Period,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<InterpretedRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<ProductFilter>,
    pub count: usize,
    pub total_sales: f64,
    pub total_revenue: f64,
    pub items: Vec<LineItem>,
}

impl SalesReport {
    /// One-line summary used as the text content of tool results.
    pub fn summary(&self) -> String {
        format!(
            "{} sales for {}: {:.2} units, {:.2} revenue across {} product(s)",
            match self.period {
                Period::Day => "Daily",
                Period::Week => "Weekly",
            },
            self.scope_description(),
            self.total_sales,
            self.total_revenue,
            self.count
        )
    }

    fn scope_description(&self) -> String {
        match (&self.request, &self.filter) {
            (Some(request), _) => request.scope.describe(),
            (None, Some(filter)) => describe_filter(filter),
            (None, None) => "all products".to_string(),
        }
    }
}

fn describe_filter(filter: &ProductFilter) -> String {
    let mut parts = Vec::new();
    if let Some(product_type) = &filter.product_type {
        parts.push(format!("type '{}'", product_type));
    }
    if let Some(category) = &filter.category {
        parts.push(format!("category '{}'", category));
    }
    if let Some(name) = &filter.name {
        parts.push(format!("names matching '{}'", name));
    }

    if parts.is_empty() {
        "all products".to_string()
    } else {
        parts.join(" and ")
    }
}

/// Operations on the product catalog.
pub struct CatalogService {
    store: CatalogStore,
}

impl CatalogService {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    /// Open the configured database, seeding it when requested.
    pub fn open(config: &CatalogConfig) -> CatalogResult<Self> {
        let store = match &config.database_path {
            Some(path) => CatalogStore::open(path)?,
            None => {
                warn!("MCP_DATABASE_PATH not set - catalog changes will not survive a restart");
                CatalogStore::open_in_memory()?
            }
        };

        if config.seed_sample_data {
            seed_if_empty(&store)?;
        }

        Ok(Self::new(store))
    }

    /// In-memory catalog holding the sample products.
    pub fn in_memory_with_samples() -> CatalogResult<Self> {
        let store = CatalogStore::open_in_memory()?;
        seed_if_empty(&store)?;
        Ok(Self::new(store))
    }

    pub fn product_count(&self) -> CatalogResult<i64> {
        self.store.count()
    }

    pub fn list_products(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
        self.store.list(filter)
    }

    pub fn get_product(&self, id: i64) -> CatalogResult<Product> {
        self.store.get(id)
    }

    #[instrument(skip_all, fields(name = %new.name))]
    pub fn add_product(&self, new: NewProduct) -> CatalogResult<Product> {
        let product = self.store.insert(&new.validated()?)?;
        info!(id = product.id, "Added product");
        Ok(product)
    }

    #[instrument(skip(self, update))]
    pub fn update_product(&self, id: i64, update: ProductUpdate) -> CatalogResult<Product> {
        let product = self.store.update(id, &update.validated()?)?;
        info!("Updated product");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub fn delete_product(&self, id: i64) -> CatalogResult<Product> {
        let product = self.store.delete(id)?;
        info!(name = %product.name, "Deleted product");
        Ok(product)
    }

    /// Answer a free-text sales question.
    #[instrument(skip(self))]
    pub fn answer(&self, question: &str) -> CatalogResult<SalesReport> {
        let request = interpret(question)?;
        let mut report = self.report(request)?;
        report.question = Some(question.trim().to_string());

        info!(
            count = report.count,
            total_sales = report.total_sales,
            "Answered sales question"
        );
        Ok(report)
    }

    /// Sales report for an already-structured request.
    pub fn report(&self, request: InterpretedRequest) -> CatalogResult<SalesReport> {
        let products = self.store.list(&request.scope.to_filter())?;
        let mut summary = compute_line_items(&products, request.period);

        if matches!(request.scope, Scope::ByType(_)) {
            summary.sort_by_weekly_sales_desc();
        }

        Ok(SalesReport {
            success: true,
            question: None,
            period: request.period,
            request: Some(request),
            filter: None,
            count: summary.items.len(),
            total_sales: summary.total_sales,
            total_revenue: summary.total_revenue,
            items: summary.items,
        })
    }

    /// Sales report over a direct listing filter, kept in listing order.
    pub fn sales_report(&self, filter: &ProductFilter, period: Period) -> CatalogResult<SalesReport> {
        let products = self.store.list(filter)?;
        let summary = compute_line_items(&products, period);

        Ok(SalesReport {
            success: true,
            question: None,
            period,
            request: None,
            filter: Some(filter.clone()),
            count: summary.items.len(),
            total_sales: summary.total_sales,
            total_revenue: summary.total_revenue,
            items: summary.items,
        })
    }

    /// Per-type statistics over the whole catalog.
    pub fn type_statistics(&self) -> CatalogResult<Vec<TypeStat>> {
        let products = self.store.list(&ProductFilter::default())?;
        Ok(compute_type_statistics(&products))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::error::CatalogError;
    use crate::domains::catalog::model::ProductType;

    fn service() -> CatalogService {
        CatalogService::in_memory_with_samples().unwrap()
    }

    #[test]
    fn test_open_without_path_is_in_memory() {
        let config = CatalogConfig::default();
        assert!(config.database_path.is_none());

        let service = CatalogService::open(&config).unwrap();
        assert_eq!(service.product_count().unwrap(), 6);
    }

    #[test]
    fn test_open_with_path_skips_seed_when_disabled() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = CatalogConfig {
            database_path: Some(temp_dir.path().join("catalog.db")),
            seed_sample_data: false,
        };

        let service = CatalogService::open(&config).unwrap();
        assert_eq!(service.product_count().unwrap(), 0);
        assert!(temp_dir.path().join("catalog.db").exists());
    }

    #[test]
    fn test_weekly_hair_question() {
        let report = service().answer("weekly sales for hair").unwrap();

        assert!(report.success);
        assert_eq!(report.period, Period::Week);
        let request = report.request.as_ref().unwrap();
        assert_eq!(request.scope, Scope::ByType(ProductType::Hair));
        assert!(report.filter.is_none());
        assert_eq!(report.count, 2);
        assert!((report.total_sales - 189.0).abs() < 1e-9);

        let expected_revenue = 15.0 * 7.0 * 12.99 + 12.0 * 7.0 * 14.99;
        assert!((report.total_revenue - expected_revenue).abs() < 1e-9);
    }

    #[test]
    fn test_type_scope_orders_by_weekly_sales() {
        let report = service().answer("skin sales").unwrap();
        let names: Vec<_> = report.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Hydrating Body Lotion", "Daily Moisturizer"]);
    }

    #[test]
    fn test_unscoped_keeps_name_order() {
        let report = service().answer("what sales today").unwrap();
        assert_eq!(report.count, 6);
        assert_eq!(report.items[0].name, "Daily Moisturizer");
        assert!((report.total_sales - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_question() {
        let report = service().answer("daily sales for shampoo").unwrap();
        assert_eq!(report.count, 1);
        assert_eq!(report.items[0].name, "Luxury Shampoo");
        assert_eq!(report.total_sales, 15.0);
        assert_eq!(report.question.as_deref(), Some("daily sales for shampoo"));
    }

    #[test]
    fn test_name_pattern_question() {
        let report = service().answer("weekly revenue of bombshell").unwrap();
        assert_eq!(
            report.request.as_ref().unwrap().scope,
            Scope::ByNamePattern("bombshell".into())
        );
        assert_eq!(report.count, 1);
        assert!((report.total_sales - 56.0).abs() < 1e-9);
    }

    #[test]
    fn test_unmatched_name_pattern_is_empty_report() {
        let report = service().answer("how much does the unicorn sell").unwrap();
        assert_eq!(report.count, 0);
        assert_eq!(report.total_sales, 0.0);
        assert_eq!(report.total_revenue, 0.0);
    }

    #[test]
    fn test_empty_question() {
        assert!(matches!(service().answer("  "), Err(CatalogError::EmptyQuery)));
    }

    #[test]
    fn test_added_product_visible_to_queries() {
        let service = service();
        service
            .add_product(NewProduct {
                name: "Argan Hair Oil".to_string(),
                product_type: ProductType::Hair,
                category: "oil".to_string(),
                cost: 20.0,
                sales_per_day: 30.0,
            })
            .unwrap();

        let report = service.answer("hair").unwrap();
        assert_eq!(report.count, 3);
        assert_eq!(report.items[0].name, "Argan Hair Oil");
    }

    #[test]
    fn test_invalid_add_rejected() {
        let result = service().add_product(NewProduct {
            name: "".to_string(),
            product_type: ProductType::Skin,
            category: "x".to_string(),
            cost: 1.0,
            sales_per_day: 1.0,
        });
        assert!(matches!(result, Err(CatalogError::InvalidInput(_))));
    }

    #[test]
    fn test_update_and_delete_round_trip() {
        let service = service();
        let bloom = service.list_products(&ProductFilter::by_name("bloom")).unwrap().remove(0);

        let updated = service
            .update_product(
                bloom.id,
                ProductUpdate {
                    sales_per_day: Some(6.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.sales_per_day, 6.0);

        let deleted = service.delete_product(bloom.id).unwrap();
        assert_eq!(deleted.id, bloom.id);
        assert!(matches!(service.get_product(bloom.id), Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_sales_report_with_filter() {
        let filter = ProductFilter {
            name: Some("o".to_string()),
            product_type: Some(ProductType::Perfume),
            category: None,
        };
        let report = service().sales_report(&filter, Period::Week).unwrap();
        let names: Vec<_> = report.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Gucci Bloom", "Victoria Secret Bombshell"]);

        assert_eq!(report.period, Period::Week);
        assert!(report.request.is_none());
        assert_eq!(report.filter.as_ref(), Some(&filter));
        assert!(
            report
                .summary()
                .starts_with("Weekly sales for type 'perfume' and names matching 'o'")
        );
    }

    #[test]
    fn test_name_question_folds_non_ascii_case() {
        let service = service();
        service
            .add_product(NewProduct {
                name: "ÉCLAT Serum".to_string(),
                product_type: ProductType::Skin,
                category: "serum".to_string(),
                cost: 30.0,
                sales_per_day: 2.0,
            })
            .unwrap();

        let report = service.answer("weekly Éclat").unwrap();
        assert_eq!(
            report.request.as_ref().unwrap().scope,
            Scope::ByNamePattern("éclat".into())
        );
        assert_eq!(report.count, 1);
        assert_eq!(report.items[0].name, "ÉCLAT Serum");
        assert!((report.total_sales - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_type_statistics_over_samples() {
        let stats = service().type_statistics().unwrap();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].product_type, ProductType::Hair);
        assert_eq!(stats[0].min_cost, 12.99);
        assert_eq!(stats[0].max_cost, 14.99);
        assert_eq!(stats[0].total_sales_per_day, 27.0);
        assert_eq!(stats[2].product_type, ProductType::Skin);
    }

    #[test]
    fn test_summary_text() {
        let report = service().answer("weekly hair").unwrap();
        let summary = report.summary();
        assert!(summary.starts_with("Weekly sales for type 'hair'"));
        assert!(summary.contains("189.00"));
    }
}
