//! Root and fallback endpoints.

use axum::http::Uri;
use tracing::instrument;

use crate::error::{AppError, AppResult};

/// Plain-text banner served at `GET /`.
pub const WELCOME_MESSAGE: &str = "this is my first Express.js API set up!!.";

/// Root endpoint, confirms the server is reachable.
pub async fn index() -> &'static str {
    WELCOME_MESSAGE
}

/// Fallback for paths that match no route.
#[instrument]
pub async fn not_found(uri: Uri) -> AppResult<()> {
    Err(AppError::NotFound("Route not found".to_string()))
}
