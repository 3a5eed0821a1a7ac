//! In-memory product store.
//!
//! The store is an ordered `Vec<Product>` behind a `tokio::sync::RwLock`.
//! Insertion order is preserved and a delete removes exactly one record.
//! Every read-modify-write happens under a single lock acquisition, so a
//! handler never observes a half-applied change from another request.
//!
//! Nothing is persisted: a fresh store (see [`ProductStore::seeded`]) starts
//! from the same three sample records on every process start.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{ListProductsQuery, Product, ProductPayload};
use crate::pagination::Pagination;

/// Message returned when a product id does not exist.
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Filters applied by the list operation.
///
/// All string comparisons are case-insensitive. Empty `category` or `search`
/// values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Lowercased category that must match exactly
    pub category: Option<String>,
    /// Required stock status
    pub in_stock: Option<bool>,
    /// Lowercased substring to find in name or description
    pub search: Option<String>,
}

impl ProductFilter {
    /// Build a filter from list query parameters.
    pub fn from_query(query: &ListProductsQuery) -> Self {
        Self {
            category: non_empty_lowercase(query.category.as_deref()),
            in_stock: query.in_stock.as_deref().map(|v| v == "true"),
            search: non_empty_lowercase(query.search.as_deref()),
        }
    }

    /// Check whether a product passes every active filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category.to_lowercase() != *category
        {
            return false;
        }

        if let Some(in_stock) = self.in_stock
            && product.in_stock != in_stock
        {
            return false;
        }

        if let Some(search) = &self.search
            && !product.matches_search(search)
        {
            return false;
        }

        true
    }
}

fn non_empty_lowercase(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_lowercase)
}

/// Shared, clonable handle to the product collection.
#[derive(Clone, Default)]
pub struct ProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl ProductStore {
    /// Create a store holding `products` in the given order.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Create a store pre-populated with the sample catalog.
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Whether the store holds no products.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    /// Filtered, paginated snapshot of the collection.
    pub async fn list(&self, filter: &ProductFilter, pagination: Pagination) -> Vec<Product> {
        let products = self.products.read().await;
        let matching: Vec<Product> = products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        debug!(
            total = products.len(),
            matching = matching.len(),
            "Listing products"
        );

        pagination.apply(matching)
    }

    /// Look up a product by exact id.
    pub async fn get(&self, id: &str) -> AppResult<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    /// Append a product to the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the id is already taken.
    pub async fn insert(&self, product: Product) -> AppResult<Product> {
        let mut products = self.products.write().await;

        if products.iter().any(|p| p.id == product.id) {
            return Err(AppError::Internal(format!(
                "duplicate product id {}",
                product.id
            )));
        }

        products.push(product.clone());
        Ok(product)
    }

    /// Merge `payload` into the product with the given id.
    pub async fn update(&self, id: &str, payload: ProductPayload) -> AppResult<Product> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(not_found)?;

        product.apply(payload);
        Ok(product.clone())
    }

    /// Remove and return the product with the given id.
    pub async fn remove(&self, id: &str) -> AppResult<Product> {
        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(not_found)?;

        Ok(products.remove(index))
    }
}

fn not_found() -> AppError {
    AppError::NotFound(PRODUCT_NOT_FOUND.to_string())
}

/// The sample catalog loaded at startup.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "Laptop".to_string(),
            description: "High-performance laptop with 16GB RAM".to_string(),
            price: Decimal::from(1200),
            category: "electronics".to_string(),
            in_stock: true,
        },
        Product {
            id: "2".to_string(),
            name: "Smartphone".to_string(),
            description: "Latest model with 128GB storage".to_string(),
            price: Decimal::from(800),
            category: "electronics".to_string(),
            in_stock: true,
        },
        Product {
            id: "3".to_string(),
            name: "Coffee Maker".to_string(),
            description: "Programmable coffee maker with timer".to_string(),
            price: Decimal::from(50),
            category: "kitchen".to_string(),
            in_stock: false,
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> ProductPayload {
        serde_json::from_value(value).unwrap()
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    fn query(pairs: &[(&str, &str)]) -> ListProductsQuery {
        ListProductsQuery::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    async fn list(store: &ProductStore, pairs: &[(&str, &str)]) -> Vec<Product> {
        let q = query(pairs);
        store
            .list(
                &ProductFilter::from_query(&q),
                Pagination::from_query(q.page.as_deref(), q.limit.as_deref()),
            )
            .await
    }

    #[tokio::test]
    async fn test_seeded_store_lists_all() {
        let store = ProductStore::seeded();
        let products = list(&store, &[]).await;

        assert_eq!(names(&products), ["Laptop", "Smartphone", "Coffee Maker"]);
    }

    #[tokio::test]
    async fn test_category_filter_is_case_insensitive() {
        let store = ProductStore::seeded();
        let products = list(&store, &[("category", "KITCHEN")]).await;

        assert_eq!(names(&products), ["Coffee Maker"]);
    }

    #[tokio::test]
    async fn test_empty_category_is_ignored() {
        let store = ProductStore::seeded();
        assert_eq!(list(&store, &[("category", "")]).await.len(), 3);
    }

    #[tokio::test]
    async fn test_in_stock_filter() {
        let store = ProductStore::seeded();

        let in_stock = list(&store, &[("inStock", "true")]).await;
        assert_eq!(names(&in_stock), ["Laptop", "Smartphone"]);

        // Anything other than "true" means out of stock
        let out_of_stock = list(&store, &[("inStock", "yes")]).await;
        assert_eq!(names(&out_of_stock), ["Coffee Maker"]);
    }

    #[tokio::test]
    async fn test_search_matches_name_or_description() {
        let store = ProductStore::seeded();

        assert_eq!(
            names(&list(&store, &[("search", "PHONE")]).await),
            ["Smartphone"]
        );
        assert_eq!(
            names(&list(&store, &[("search", "timer")]).await),
            ["Coffee Maker"]
        );
        assert!(list(&store, &[("search", "tablet")]).await.is_empty());
    }

    #[tokio::test]
    async fn test_combined_filters() {
        let store = ProductStore::seeded();
        let products = list(&store, &[("category", "electronics"), ("inStock", "true")]).await;

        assert_eq!(names(&products), ["Laptop", "Smartphone"]);
    }

    #[tokio::test]
    async fn test_pagination_after_filtering() {
        let store = ProductStore::seeded();

        let page = list(
            &store,
            &[("category", "electronics"), ("page", "2"), ("limit", "1")],
        )
        .await;
        assert_eq!(names(&page), ["Smartphone"]);

        assert!(list(&store, &[("page", "2")]).await.is_empty());
    }

    #[tokio::test]
    async fn test_get_existing_and_missing() {
        let store = ProductStore::seeded();

        assert_eq!(store.get("2").await.unwrap().name, "Smartphone");

        let err = store.get("99").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == PRODUCT_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_insert_appends() {
        let store = ProductStore::seeded();
        let created = store
            .insert(Product::from_payload(payload(json!({"name": "Toaster", "price": 30}))))
            .await
            .unwrap();

        let products = list(&store, &[]).await;
        assert_eq!(products.len(), 4);
        assert_eq!(products.last().unwrap(), &created);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = ProductStore::seeded();
        let duplicate = Product::with_id("1", payload(json!({"name": "Clone", "price": 1})));

        let err = store.insert(duplicate).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_update_merges_in_place() {
        let store = ProductStore::seeded();
        let updated = store
            .update("3", payload(json!({"name": "Espresso Machine", "price": 250})))
            .await
            .unwrap();

        assert_eq!(updated.id, "3");
        assert_eq!(updated.name, "Espresso Machine");
        assert_eq!(updated.category, "kitchen");
        assert!(!updated.in_stock);

        // Position is unchanged
        let products = list(&store, &[]).await;
        assert_eq!(products.get(2).unwrap(), &updated);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let store = ProductStore::seeded();
        let err = store
            .update("nope", payload(json!({"name": "X", "price": 1})))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_exactly_one() {
        let store = ProductStore::seeded();
        let removed = store.remove("2").await.unwrap();

        assert_eq!(removed.name, "Smartphone");
        assert_eq!(names(&list(&store, &[]).await), ["Laptop", "Coffee Maker"]);
        assert!(store.remove("2").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = ProductStore::default();
        assert!(store.is_empty().await);
        assert!(list(&store, &[]).await.is_empty());
    }
}
