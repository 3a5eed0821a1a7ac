//! Last-resort handler for panics raised inside request handlers.
//!
//! Plugged into `tower_http::catch_panic::CatchPanicLayer`. The panic payload
//! is logged server-side; the client only ever sees the generic 500 body.

use std::any::Any;

use axum::body::Body;
use axum::http::Response;
use axum::response::IntoResponse;
use tracing::error;

use crate::error::AppError;

/// Convert a caught panic into a generic 500 response.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(panic = %detail, "Handler panicked");

    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}
