//! HTTP middleware for logging, authentication, validation, and fault handling.
//!
//! # Architecture
//!
//! ```text
//! Request → Request Log → Catch Panic → [Bearer Auth → Validate Product] → Handler
//!               ↓                              ↓               ↓
//!        X-Request-Id header             401 Unauth      400 Bad Request
//! ```
//!
//! The request logger and panic catcher wrap every route. Bearer auth is
//! attached to create, update, and delete; product validation to create and
//! update only.

pub mod auth;
pub mod panic;
pub mod request_log;
pub mod validate;

pub use auth::BearerAuth;
pub use panic::handle_panic;
pub use request_log::{REQUEST_ID_HEADER, RequestLogLayer};
pub use validate::ValidateProduct;
