use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category assigned to products created without one.
pub const DEFAULT_CATEGORY: &str = "general";

/// A product record held in the catalog.
///
/// Serialized with camelCase field names (`inStock`), prices as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier, immutable once created
    pub id: String,
    /// Product name (never empty)
    pub name: String,
    /// Free-form description, empty when not provided
    pub description: String,
    /// Unit price, always strictly positive
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Category label (default: "general")
    pub category: String,
    /// Whether the product is currently in stock
    pub in_stock: bool,
}

impl Product {
    /// Build a new product from a validated payload with a fresh UUID.
    pub fn from_payload(payload: ProductPayload) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), payload)
    }

    /// Build a product with a known id, applying defaults for omitted fields.
    ///
    /// Empty `description`/`category` strings fall back to their defaults,
    /// matching the treatment of missing fields.
    pub fn with_id(id: impl Into<String>, payload: ProductPayload) -> Self {
        Self {
            id: id.into(),
            name: payload.name,
            description: payload.description.unwrap_or_default(),
            price: payload.price,
            category: payload
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            in_stock: payload.in_stock.unwrap_or(true),
        }
    }

    /// Overwrite this product's fields with those present in `payload`.
    ///
    /// Fields absent from the payload (or sent as `null`) keep their
    /// current value. The id is never touched.
    pub fn apply(&mut self, payload: ProductPayload) {
        self.name = payload.name;
        self.price = payload.price;
        if let Some(description) = payload.description {
            self.description = description;
        }
        if let Some(category) = payload.category {
            self.category = category;
        }
        if let Some(in_stock) = payload.in_stock {
            self.in_stock = in_stock;
        }
    }

    /// Case-insensitive substring match against name or description.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Fields accepted when creating or updating a product.
///
/// `name` and `price` are required; the body validator guarantees both are
/// present and well-formed before this is decoded. Unknown fields, including
/// any client-supplied `id`, are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub in_stock: Option<bool>,
}
