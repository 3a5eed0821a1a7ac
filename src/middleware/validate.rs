//! Product body validation middleware for create and update routes.
//!
//! Buffers the request body (bounded by the configured size limit), runs the
//! name and price checks from [`crate::validation`], and on success stores the
//! decoded [`ProductPayload`] in the request extensions for the handler to
//! pick up with `Extension<ProductPayload>`. On failure the request is
//! answered with 400 (or 413 for oversized bodies) and the handler is skipped.

use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, Response};
use axum::response::IntoResponse;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::metrics;
use crate::models::ProductPayload;
use crate::validation::parse_product_body;

/// Layer that validates product bodies before they reach a handler.
#[derive(Clone, Copy, Debug)]
pub struct ValidateProduct {
    /// Maximum number of body bytes to buffer
    body_limit: usize,
}

impl ValidateProduct {
    /// Create a validation layer that buffers at most `body_limit` bytes.
    pub fn new(body_limit: usize) -> Self {
        Self { body_limit }
    }
}

impl<S> Layer<S> for ValidateProduct {
    type Service = ValidateProductService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ValidateProductService {
            inner,
            body_limit: self.body_limit,
        }
    }
}

/// Product validation service wrapper.
#[derive(Clone)]
pub struct ValidateProductService<S> {
    inner: S,
    body_limit: usize,
}

impl<S> Service<Request<Body>> for ValidateProductService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let body_limit = self.body_limit;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let (mut parts, body) = req.into_parts();

            let bytes = match axum::body::to_bytes(body, body_limit).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(error = %e, limit = body_limit, "Failed to buffer request body");
                    metrics::record_rejection("payload_too_large");
                    return Ok(AppError::PayloadTooLarge { limit: body_limit }.into_response());
                }
            };

            match parse_product_body(&bytes) {
                Ok(payload) => {
                    debug!(name = %payload.name, "Product body accepted");
                    parts.extensions.insert::<ProductPayload>(payload);
                    inner.call(Request::from_parts(parts, Body::from(bytes))).await
                }
                Err(err) => {
                    warn!(
                        method = %parts.method,
                        path = %parts.uri.path(),
                        error = %err,
                        "Rejected invalid product body"
                    );
                    metrics::record_rejection("invalid_body");
                    Ok(err.into_response())
                }
            }
        })
    }
}
