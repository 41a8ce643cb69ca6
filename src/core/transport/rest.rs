//! REST API and browser UI served next to the JSON-RPC endpoint.
//!
//! Handlers are thin: parse the request, run the catalog call on the
//! blocking pool, wrap the result in a `{"success": true, ...}` envelope.
//! Failures render as `{"success": false, "error": ...}` with a status
//! derived from the catalog error.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::core::McpServer;
use crate::domains::catalog::{
    CatalogError, CatalogResult, CatalogService, NewProduct, Period, ProductFilter, ProductType,
    ProductUpdate,
};

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Error rendered as a JSON body with a matching status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(status = %self.status, "{}", self.message);
        }
        (
            self.status,
            Json(json!({ "success": false, "error": self.message })),
        )
            .into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match &e {
            CatalogError::NotFound(_) => ApiError::not_found(e.to_string()),
            _ if e.is_client_error() => ApiError::bad_request(e.to_string()),
            _ => ApiError::internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// State shared by the REST handlers.
#[derive(Clone)]
struct RestState {
    catalog: Arc<CatalogService>,
    name: String,
    version: String,
}

impl RestState {
    /// Run a catalog call on the blocking pool.
    async fn run<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&CatalogService) -> CatalogResult<T> + Send + 'static,
    {
        let catalog = self.catalog.clone();
        tokio::task::spawn_blocking(move || f(&catalog))
            .await
            .map_err(|e| ApiError::internal(format!("Task failed: {}", e)))?
            .map_err(ApiError::from)
    }
}

/// Build the REST and UI routes for a server's catalog.
pub fn router(server: &McpServer) -> Router {
    let state = RestState {
        catalog: server.catalog().clone(),
        name: server.name().to_string(),
        version: server.version().to_string(),
    };

    Router::new()
        .route("/", get(index))
        .route("/api", get(api_info))
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/api/query", get(query_get).post(query_post))
        .route("/api/sales", get(sales))
        .route("/api/stats", get(stats))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api
async fn api_info(State(state): State<RestState>) -> Json<Value> {
    Json(json!({
        "name": state.name,
        "version": state.version,
        "endpoints": {
            "products": "/api/products",
            "product": "/api/products/{id}",
            "query": "/api/query?q=...",
            "sales": "/api/sales?type=&category=&name=&period=day|week",
            "stats": "/api/stats",
            "health": "/health"
        }
    }))
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    name: Option<String>,
    #[serde(rename = "type")]
    product_type: Option<String>,
    category: Option<String>,
}

impl ListParams {
    fn into_filter(self) -> CatalogResult<ProductFilter> {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Ok(ProductFilter {
            name: non_blank(self.name),
            product_type: non_blank(self.product_type)
                .map(|t| t.parse::<ProductType>())
                .transpose()?,
            category: non_blank(self.category),
        })
    }
}

/// GET /api/products?name=silk&type=hair&category=conditioner
#[instrument(skip_all)]
async fn list_products(
    State(state): State<RestState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let filter = params.into_filter()?;
    let products = state.run(move |c| c.list_products(&filter)).await?;

    Ok(Json(json!({
        "success": true,
        "count": products.len(),
        "products": products
    })))
}

/// POST /api/products
async fn create_product(
    State(state): State<RestState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(new) = payload?;
    let product = state.run(move |c| c.add_product(new)).await?;
    info!(id = product.id, "Product created via REST");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "product": product })),
    ))
}

/// GET /api/products/{id}
async fn get_product(
    State(state): State<RestState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let product = state.run(move |c| c.get_product(id)).await?;
    Ok(Json(json!({ "success": true, "product": product })))
}

/// PUT /api/products/{id}
async fn update_product(
    State(state): State<RestState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductUpdate>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Json(update) = payload?;
    let product = state.run(move |c| c.update_product(id, update)).await?;
    Ok(Json(json!({ "success": true, "product": product })))
}

/// DELETE /api/products/{id}
async fn delete_product(
    State(state): State<RestState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let product = state.run(move |c| c.delete_product(id)).await?;
    info!(id, "Product deleted via REST");
    Ok(Json(json!({ "success": true, "product": product })))
}

#[derive(Debug, Deserialize)]
struct QueryParams {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Deserialize)]
struct QuestionBody {
    #[serde(default)]
    question: String,
}

/// GET /api/query?q=weekly+sales+for+hair
async fn query_get(
    State(state): State<RestState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Value>, ApiError> {
    answer(&state, params.q).await
}

/// POST /api/query {"question": "..."}
async fn query_post(
    State(state): State<RestState>,
    payload: Result<Json<QuestionBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    answer(&state, body.question).await
}

#[instrument(skip(state))]
async fn answer(state: &RestState, question: String) -> Result<Json<Value>, ApiError> {
    let report = state.run(move |c| c.answer(&question)).await?;
    let body = serde_json::to_value(&report).map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(body))
}

#[derive(Debug, Default, Deserialize)]
struct SalesParams {
    #[serde(flatten)]
    filter: ListParams,
    period: Option<String>,
}

fn parse_period(value: Option<&str>) -> CatalogResult<Period> {
    match value.map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("") | Some("day") => Ok(Period::Day),
        Some("week") => Ok(Period::Week),
        Some(other) => Err(CatalogError::invalid_input(format!(
            "unknown period '{}', expected day or week",
            other
        ))),
    }
}

/// GET /api/sales?type=perfume&period=week
///
/// Structured counterpart of `/api/query`; items stay in name order.
#[instrument(skip_all)]
async fn sales(
    State(state): State<RestState>,
    Query(params): Query<SalesParams>,
) -> Result<Json<Value>, ApiError> {
    let period = parse_period(params.period.as_deref())?;
    let filter = params.filter.into_filter()?;
    let report = state.run(move |c| c.sales_report(&filter, period)).await?;
    let body = serde_json::to_value(&report).map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(body))
}

/// GET /api/stats
async fn stats(State(state): State<RestState>) -> Result<Json<Value>, ApiError> {
    let types = state.run(|c| c.type_statistics()).await?;
    Ok(Json(json!({ "success": true, "types": types })))
}
