//! Sample products loaded into an empty catalog.

use tracing::info;

use super::error::CatalogResult;
use super::model::{NewProduct, ProductType};
use super::store::CatalogStore;

/// (name, type, category, cost, sales per day)
const SAMPLE_PRODUCTS: &[(&str, ProductType, &str, f64, f64)] = &[
    ("Luxury Shampoo", ProductType::Hair, "shampoo", 12.99, 15.0),
    ("Silk Conditioner", ProductType::Hair, "conditioner", 14.99, 12.0),
    ("Gucci Bloom", ProductType::Perfume, "gucci", 89.99, 5.0),
    ("Victoria Secret Bombshell", ProductType::Perfume, "victoria_secret", 59.99, 8.0),
    ("Hydrating Body Lotion", ProductType::Skin, "body_lotion", 9.99, 20.0),
    ("Daily Moisturizer", ProductType::Skin, "moisturizer", 24.99, 10.0),
];

pub fn sample_products() -> Vec<NewProduct> {
    SAMPLE_PRODUCTS
        .iter()
        .map(|(name, product_type, category, cost, sales_per_day)| NewProduct {
            name: name.to_string(),
            product_type: *product_type,
            category: category.to_string(),
            cost: *cost,
            sales_per_day: *sales_per_day,
        })
        .collect()
}

/// Insert the sample products when the table is empty.
///
/// Returns the number of rows inserted.
pub fn seed_if_empty(store: &CatalogStore) -> CatalogResult<usize> {
    if store.count()? > 0 {
        info!("Catalog already populated, skipping sample data");
        return Ok(0);
    }

    let products = sample_products();
    for product in &products {
        store.insert(product)?;
    }
    info!("Seeded catalog with {} sample products", products.len());

    Ok(products.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::model::ProductFilter;

    #[test]
    fn test_seed_only_once() {
        let store = CatalogStore::open_in_memory().unwrap();
        assert_eq!(seed_if_empty(&store).unwrap(), 6);
        assert_eq!(seed_if_empty(&store).unwrap(), 0);
        assert_eq!(store.count().unwrap(), 6);
    }

    #[test]
    fn test_sample_covers_every_type() {
        let store = CatalogStore::open_in_memory().unwrap();
        seed_if_empty(&store).unwrap();
        for product_type in ProductType::ALL {
            let rows = store.list(&ProductFilter::by_type(product_type)).unwrap();
            assert_eq!(rows.len(), 2, "expected two {} products", product_type);
        }
    }
}
