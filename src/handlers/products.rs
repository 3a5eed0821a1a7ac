//! Product CRUD handlers.
//!
//! # Endpoints
//!
//! - `GET /api/products` - List with optional filtering, search, and pagination
//! - `GET /api/products/{id}` - Fetch one product
//! - `POST /api/products` - Create a product (auth + validation)
//! - `PUT /api/products/{id}` - Update a product (auth + validation)
//! - `DELETE /api/products/{id}` - Delete a product (auth)
//!
//! Create and update receive their body as an already-validated
//! [`ProductPayload`] placed in the request extensions by
//! [`ValidateProduct`](crate::middleware::ValidateProduct).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use tracing::{info, instrument};

use crate::error::AppResult;
use crate::metrics::{self, Mutation};
use crate::models::{DeleteProductResponse, ListProductsQuery, Product, ProductPayload};
use crate::pagination::Pagination;
use crate::state::AppState;
use crate::store::ProductFilter;

/// List products.
///
/// # Query Parameters
///
/// - `category` - Case-insensitive exact category match
/// - `inStock` - `true` for in-stock products, any other value for out-of-stock
/// - `search` - Case-insensitive substring of name or description
/// - `page` - 1-based page number (default: 1)
/// - `limit` - Page size (default: 10)
///
/// Filters apply in that order, then pagination. An out-of-range page is an
/// empty array, never an error. A repeated parameter keeps its first value.
///
/// # Example
///
/// ```bash
/// curl "http://localhost:3000/api/products?category=electronics&inStock=true&page=1&limit=5"
/// ```
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<Product>> {
    let query = ListProductsQuery::from_pairs(pairs);
    let filter = ProductFilter::from_query(&query);
    let pagination = Pagination::from_query(query.page.as_deref(), query.limit.as_deref());

    Json(state.store.list(&filter, pagination).await)
}

/// Get a single product by id.
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    Ok(Json(state.store.get(&id).await?))
}

/// Create a new product with a server-assigned id.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Desk Lamp",
///   "price": 39.99,
///   "description": "LED, dimmable",
///   "category": "home",
///   "inStock": true
/// }
/// ```
///
/// Only `name` and `price` are required; `description` defaults to `""`,
/// `category` to `"general"`, and `inStock` to `true`.
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(payload): Extension<ProductPayload>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state.store.insert(Product::from_payload(payload)).await?;

    info!(id = %product.id, name = %product.name, "Product created");
    metrics::record_mutation(Mutation::Created, state.store.len().await);

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update an existing product.
///
/// Submitted fields overwrite the stored ones; omitted or `null` fields are
/// kept. A client-supplied `id` is ignored.
#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(payload): Extension<ProductPayload>,
) -> AppResult<Json<Product>> {
    let product = state.store.update(&id, payload).await?;

    info!(id = %product.id, "Product updated");
    metrics::record_mutation(Mutation::Updated, state.store.len().await);

    Ok(Json(product))
}

/// Delete a product, returning the removed record.
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteProductResponse>> {
    let product = state.store.remove(&id).await?;

    info!(id = %product.id, "Product deleted");
    metrics::record_mutation(Mutation::Deleted, state.store.len().await);

    Ok(Json(DeleteProductResponse::new(product)))
}
