//! SQLite-backed product store.
//!
//! A single connection guarded by a mutex. Every write is one statement and
//! every read goes through the same connection, so reads observe all writes
//! completed before them.

use chrono::{DateTime, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use super::error::{CatalogError, CatalogResult};
use super::model::{NewProduct, Product, ProductFilter, ProductUpdate};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    type TEXT NOT NULL CHECK (type IN ('hair', 'perfume', 'skin')),
    category TEXT NOT NULL,
    cost REAL NOT NULL CHECK (cost >= 0),
    sales_per_day REAL NOT NULL CHECK (sales_per_day >= 0),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_products_type ON products(type);
CREATE INDEX IF NOT EXISTS idx_products_category ON products(category);
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, name, type, category, cost, sales_per_day, created_at, updated_at FROM products";

/// Product table handle.
pub struct CatalogStore {
    conn: Mutex<Connection>,
}

impl CatalogStore {
    /// Open or create a database file and apply the schema.
    pub fn open(path: &Path) -> CatalogResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                CatalogError::internal(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;
        info!("Opened catalog database at {}", path.display());

        Self::with_connection(conn)
    }

    /// Open a private in-memory database and apply the schema.
    pub fn open_in_memory() -> CatalogResult<Self> {
        debug!("Opening in-memory catalog database");
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> CatalogResult<Self> {
        register_functions(&conn)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Create the products table and its indexes if missing.
    pub fn migrate(&self) -> CatalogResult<()> {
        self.lock()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn lock(&self) -> CatalogResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CatalogError::internal("catalog connection lock poisoned"))
    }

    /// Number of products in the table.
    pub fn count(&self) -> CatalogResult<i64> {
        let conn = self.lock()?;
        let count = conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count)
    }

    /// List products matching `filter`, ordered by name then id.
    pub fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
        let conn = self.lock()?;

        let mut sql = format!("{} WHERE 1=1", SELECT_COLUMNS);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![];

        if let Some(name) = &filter.name {
            sql.push_str(" AND instr(unicode_lower(name), unicode_lower(?)) > 0");
            params.push(Box::new(name.clone()));
        }

        if let Some(product_type) = &filter.product_type {
            sql.push_str(" AND type = ?");
            params.push(Box::new(product_type.as_str().to_string()));
        }

        if let Some(category) = &filter.category {
            sql.push_str(" AND category = ?");
            params.push(Box::new(category.clone()));
        }

        sql.push_str(" ORDER BY name ASC, id ASC");

        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let products = stmt
            .query_map(params_refs.as_slice(), row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    /// Fetch one product.
    pub fn get(&self, id: i64) -> CatalogResult<Product> {
        let conn = self.lock()?;
        Self::find(&conn, id)?.ok_or(CatalogError::NotFound(id))
    }

    fn find(conn: &Connection, id: i64) -> CatalogResult<Option<Product>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let product = conn.query_row(&sql, [id], row_to_product).optional()?;
        Ok(product)
    }

    /// Insert a product, assigning id and timestamps.
    pub fn insert(&self, new: &NewProduct) -> CatalogResult<Product> {
        let conn = self.lock()?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO products (name, type, category, cost, sales_per_day, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                new.name,
                new.product_type.as_str(),
                new.category,
                new.cost,
                new.sales_per_day,
                now,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, name = %new.name, "Inserted product");
        Self::find(&conn, id)?
            .ok_or_else(|| CatalogError::internal(format!("inserted product {} vanished", id)))
    }

    /// Apply the supplied fields and refresh `updated_at`.
    pub fn update(&self, id: i64, update: &ProductUpdate) -> CatalogResult<Product> {
        let conn = self.lock()?;

        let mut assignments = vec!["updated_at = ?"];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(Utc::now().to_rfc3339())];

        if let Some(name) = &update.name {
            assignments.push("name = ?");
            params.push(Box::new(name.clone()));
        }
        if let Some(product_type) = &update.product_type {
            assignments.push("type = ?");
            params.push(Box::new(product_type.as_str().to_string()));
        }
        if let Some(category) = &update.category {
            assignments.push("category = ?");
            params.push(Box::new(category.clone()));
        }
        if let Some(cost) = update.cost {
            assignments.push("cost = ?");
            params.push(Box::new(cost));
        }
        if let Some(sales_per_day) = update.sales_per_day {
            assignments.push("sales_per_day = ?");
            params.push(Box::new(sales_per_day));
        }

        let sql = format!("UPDATE products SET {} WHERE id = ?", assignments.join(", "));
        params.push(Box::new(id));

        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let changed = conn.execute(&sql, params_refs.as_slice())?;
        if changed == 0 {
            return Err(CatalogError::NotFound(id));
        }

        debug!(id, "Updated product");
        Self::find(&conn, id)?.ok_or(CatalogError::NotFound(id))
    }

    /// Delete a product and return the removed row.
    pub fn delete(&self, id: i64) -> CatalogResult<Product> {
        let conn = self.lock()?;
        let product = Self::find(&conn, id)?.ok_or(CatalogError::NotFound(id))?;

        conn.execute("DELETE FROM products WHERE id = ?1", [id])?;
        debug!(id, "Deleted product");

        Ok(product)
    }
}

/// SQLite's built-in `lower()` only folds ASCII.
fn register_functions(conn: &Connection) -> CatalogResult<()> {
    conn.create_scalar_function(
        "unicode_lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: String = ctx.get(0)?;
            Ok(value.to_lowercase())
        },
    )?;
    Ok(())
}

fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
    let type_str: String = row.get("type")?;
    let product_type = type_str.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Product {
        id: row.get("id")?,
        name: row.get("name")?,
        product_type,
        category: row.get("category")?,
        cost: row.get("cost")?,
        sales_per_day: row.get("sales_per_day")?,
        created_at: parse_timestamp(row, "created_at", 6)?,
        updated_at: parse_timestamp(row, "updated_at", 7)?,
    })
}

fn parse_timestamp(row: &Row, column: &str, index: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::model::ProductType;
    use tempfile::TempDir;

    fn new_product(name: &str, product_type: ProductType, category: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            product_type,
            category: category.to_string(),
            cost: 10.0,
            sales_per_day: 2.0,
        }
    }

    fn store_with_rows() -> CatalogStore {
        let store = CatalogStore::open_in_memory().unwrap();
        store.insert(&new_product("Silk Conditioner", ProductType::Hair, "conditioner")).unwrap();
        store.insert(&new_product("Luxury Shampoo", ProductType::Hair, "shampoo")).unwrap();
        store.insert(&new_product("Gucci Bloom", ProductType::Perfume, "gucci")).unwrap();
        store.insert(&new_product("ÉCLAT Serum", ProductType::Skin, "serum")).unwrap();
        store
    }

    #[test]
    fn test_insert_assigns_ids_and_timestamps() {
        let store = CatalogStore::open_in_memory().unwrap();
        let first = store.insert(&new_product("A", ProductType::Skin, "x")).unwrap();
        let second = store.insert(&new_product("B", ProductType::Skin, "x")).unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.created_at, first.updated_at);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_list_orders_by_name() {
        let store = store_with_rows();
        let names: Vec<_> = store
            .list(&ProductFilter::default())
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            vec!["Gucci Bloom", "Luxury Shampoo", "Silk Conditioner", "ÉCLAT Serum"]
        );
    }

    #[test]
    fn test_list_name_filter_is_case_insensitive_substring() {
        let store = store_with_rows();
        let found = store.list(&ProductFilter::by_name("SHAM")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Luxury Shampoo");

        // LIKE wildcards are not special in a name filter
        assert!(store.list(&ProductFilter::by_name("%")).unwrap().is_empty());
    }

    #[test]
    fn test_list_name_filter_folds_non_ascii_case() {
        let store = store_with_rows();
        let found = store.list(&ProductFilter::by_name("éclat")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "ÉCLAT Serum");
    }

    #[test]
    fn test_list_combines_filters_with_and() {
        let store = store_with_rows();

        let hair = store.list(&ProductFilter::by_type(ProductType::Hair)).unwrap();
        assert_eq!(hair.len(), 2);

        let filter = ProductFilter {
            name: Some("silk".to_string()),
            product_type: Some(ProductType::Hair),
            category: Some("shampoo".to_string()),
        };
        assert!(store.list(&filter).unwrap().is_empty());

        let exact = store.list(&ProductFilter::by_category("Gucci")).unwrap();
        assert!(exact.is_empty());
    }

    #[test]
    fn test_sql_filter_agrees_with_in_memory_filter() {
        let store = store_with_rows();
        let all = store.list(&ProductFilter::default()).unwrap();

        let filters = [
            ProductFilter::by_name("o"),
            ProductFilter::by_name("BLOOM"),
            ProductFilter::by_name("éclat"),
            ProductFilter::by_name("Éclat SERUM"),
            ProductFilter::by_type(ProductType::Hair),
            ProductFilter::by_category("conditioner"),
            ProductFilter {
                name: Some("s".to_string()),
                product_type: Some(ProductType::Hair),
                category: None,
            },
        ];

        for filter in filters {
            let expected: Vec<_> = all.iter().filter(|p| filter.matches(p)).cloned().collect();
            assert_eq!(store.list(&filter).unwrap(), expected, "filter {:?}", filter);
        }
    }

    #[test]
    fn test_update_partial_fields() {
        let store = store_with_rows();
        let original = store.list(&ProductFilter::by_name("bloom")).unwrap().remove(0);

        let update = ProductUpdate {
            cost: Some(99.5),
            ..Default::default()
        };
        let updated = store.update(original.id, &update).unwrap();

        assert_eq!(updated.cost, 99.5);
        assert_eq!(updated.name, original.name);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = store_with_rows();
        let result = store.update(9999, &ProductUpdate::default());
        assert!(matches!(result, Err(CatalogError::NotFound(9999))));
    }

    #[test]
    fn test_delete_returns_row() {
        let store = store_with_rows();
        let target = store.list(&ProductFilter::by_name("silk")).unwrap().remove(0);

        let deleted = store.delete(target.id).unwrap();
        assert_eq!(deleted, target);
        assert!(matches!(store.get(target.id), Err(CatalogError::NotFound(_))));
        assert!(matches!(store.delete(target.id), Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_check_constraint_rejects_negative_cost() {
        let store = CatalogStore::open_in_memory().unwrap();
        let mut bad = new_product("Bad", ProductType::Hair, "x");
        bad.cost = -5.0;
        assert!(matches!(store.insert(&bad), Err(CatalogError::Database(_))));
    }

    #[test]
    fn test_file_database_persists_between_opens() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("catalog.db");

        {
            let store = CatalogStore::open(&path).unwrap();
            store.insert(&new_product("Kept", ProductType::Skin, "moisturizer")).unwrap();
        }

        let reopened = CatalogStore::open(&path).unwrap();
        let products = reopened.list(&ProductFilter::default()).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Kept");
    }
}
