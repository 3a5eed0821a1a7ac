use serde::{Deserialize, Serialize};

use super::Product;

/// Query parameters accepted by `GET /api/products`.
///
/// Everything is kept as raw strings: `inStock` compares against the literal
/// `"true"` and `page`/`limit` are parsed leniently by the pagination code.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListProductsQuery {
    /// Case-insensitive exact category filter
    pub category: Option<String>,
    /// Stock filter: `"true"` keeps in-stock products, anything else out-of-stock
    pub in_stock: Option<String>,
    /// Case-insensitive substring search on name and description
    pub search: Option<String>,
    /// 1-based page number (default: 1)
    pub page: Option<String>,
    /// Page size (default: 10)
    pub limit: Option<String>,
}

impl ListProductsQuery {
    /// Build the query from decoded `key=value` pairs.
    ///
    /// A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut query.category,
                "inStock" => &mut query.in_stock,
                "search" => &mut query.search,
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }

        query
    }
}

/// Response body for a successful delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteProductResponse {
    pub message: String,
    pub product: Product,
}

impl DeleteProductResponse {
    pub fn new(product: Product) -> Self {
        Self {
            message: "Product deleted".to_string(),
            product,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_list_query_reads_camel_case() {
        let query = ListProductsQuery::from_pairs(pairs(&[("inStock", "true"), ("page", "2")]));

        assert_eq!(query.in_stock.as_deref(), Some("true"));
        assert_eq!(query.page.as_deref(), Some("2"));
        assert!(query.category.is_none());
        assert!(query.limit.is_none());
    }

    #[test]
    fn test_repeated_key_keeps_first_value() {
        let query =
            ListProductsQuery::from_pairs(pairs(&[("search", "lap"), ("search", "phone")]));

        assert_eq!(query.search.as_deref(), Some("lap"));
    }

    #[test]
    fn test_unknown_and_snake_case_keys_ignored() {
        let query = ListProductsQuery::from_pairs(pairs(&[("in_stock", "true"), ("sort", "asc")]));

        assert_eq!(query, ListProductsQuery::default());
    }
}
