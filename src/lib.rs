//! # Product Catalog
//!
//! A small REST API over an in-memory product catalog, built on Axum:
//!
//! - **Reads**: list with category/stock/search filters and pagination, get by id
//! - **Writes**: create, update, and delete guarded by a shared bearer token
//! - **Validation**: name and price checks before any write reaches the store
//! - **Observability**: per-request logging with request IDs, optional Prometheus metrics
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum HTTP Server                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Middleware (Request Log → Catch Panic → Auth → Validate)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Handlers (list, get, create, update, delete)               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ProductStore (RwLock<Vec<Product>>, seeded at startup)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use product_catalog::{AppState, Config, build_router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let addr = config.server_addr();
//!     let app = build_router(AppState::seeded(config));
//!
//!     let listener = tokio::net::TcpListener::bind(addr).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Authentication
//!
//! Writes require `Authorization: Bearer <API_TOKEN>`:
//! ```bash
//! API_TOKEN=your-secret cargo run
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;
pub mod validation;

// Re-exports for convenience
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::Product;
pub use routes::build_router;
pub use state::AppState;
pub use store::ProductStore;
