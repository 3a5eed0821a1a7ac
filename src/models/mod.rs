mod api;
mod product;

pub use api::{DeleteProductResponse, ListProductsQuery};
pub use product::{DEFAULT_CATEGORY, Product, ProductPayload};
