//! Bearer token authentication for mutating endpoints.
//!
//! Requests must carry exactly `Authorization: Bearer <API_TOKEN>`. Anything
//! else (missing header, other scheme, wrong token, non-ASCII bytes) is
//! rejected with 401 and the downstream handler is never called.
//!
//! The layer is attached per route (create, update, delete) rather than to
//! the whole router, so reads stay public:
//!
//! ```bash
//! curl -X DELETE -H "Authorization: Bearer mysecrettoken" \
//!     http://localhost:3000/api/products/1
//! ```

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Request, Response};
use axum::response::IntoResponse;
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::metrics;

/// Bearer token authentication layer.
#[derive(Clone)]
pub struct BearerAuth {
    /// Full expected header value, e.g. "Bearer mysecrettoken"
    expected: Arc<String>,
}

impl BearerAuth {
    /// Create a layer expecting `Authorization: Bearer <token>`.
    pub fn new(token: &str) -> Self {
        Self::from_header_value(format!("Bearer {token}"))
    }

    /// Create a layer expecting this exact `Authorization` header value.
    pub fn from_header_value(expected: impl Into<String>) -> Self {
        Self {
            expected: Arc::new(expected.into()),
        }
    }
}

impl<S> Layer<S> for BearerAuth {
    type Service = BearerAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BearerAuthService {
            inner,
            expected: self.expected.clone(),
        }
    }
}

/// Bearer token authentication service wrapper.
#[derive(Clone)]
pub struct BearerAuthService<S> {
    inner: S,
    expected: Arc<String>,
}

impl<S> Service<Request<Body>> for BearerAuthService<S>
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
        let expected = self.expected.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let provided = extract_authorization(&req);
            let header_present = provided.is_some();
            let authorized = provided.is_some_and(|value| constant_time_eq(value, &expected));

            if authorized {
                debug!("Bearer token accepted");
                return inner.call(req).await;
            }

            warn!(
                method = %req.method(),
                path = %req.uri().path(),
                header_present,
                "Rejected request with invalid or missing bearer token"
            );
            metrics::record_rejection("unauthorized");
            Ok(AppError::Unauthorized.into_response())
        })
    }
}

/// Read the `Authorization` header as a string, if present and valid ASCII.
fn extract_authorization<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Perform constant-time comparison of two strings.
///
/// Prevents timing attacks that recover the token byte by byte.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
