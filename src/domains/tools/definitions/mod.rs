//! Tool definitions module.
//!
//! One file per catalog tool; `common.rs` holds the shared result builders
//! and the blocking route adapter.

pub mod add_product;
pub mod common;
pub mod delete_product;
pub mod list_products;
pub mod product_stats;
pub mod query_sales;
pub mod update_product;

pub use add_product::{AddProductParams, AddProductTool};
pub use delete_product::{DeleteProductParams, DeleteProductTool};
pub use list_products::{ListProductsParams, ListProductsTool, ProductListResult};
pub use product_stats::{ProductStatsParams, ProductStatsResult, ProductStatsTool};
pub use query_sales::{QuerySalesParams, QuerySalesTool};
pub use update_product::{UpdateProductParams, UpdateProductTool};
