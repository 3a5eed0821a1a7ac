//! Request logging middleware.
//!
//! Runs first for every request and never rejects anything. For each request it:
//!
//! 1. Reuses the incoming `X-Request-Id` header or generates a UUIDv4
//! 2. Logs the arrival timestamp, method, and path (with query string)
//! 3. Echoes the request id back in the `X-Request-Id` response header
//! 4. Logs the response status and latency at `debug`
//!
//! Clients can provide their own request ID for correlation:
//!
//! ```bash
//! curl -H "X-Request-Id: my-correlation-id" http://localhost:3000/api/products
//! ```

use std::task::{Context, Poll};
use std::time::Instant;

use axum::body::Body;
use axum::http::header::HeaderValue;
use axum::http::{Request, Response};
use chrono::{SecondsFormat, Utc};
use tower::{Layer, Service};
use tracing::{debug, info};
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Fallback header value when request ID parsing fails.
static UNKNOWN_REQUEST_ID: HeaderValue = HeaderValue::from_static("unknown");

/// Request logging layer for the Tower middleware stack.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestLogLayer;

impl RequestLogLayer {
    /// Create a new request logging layer.
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestLogLayer {
    type Service = RequestLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogService { inner }
    }
}

/// Request logging service wrapper.
#[derive(Clone)]
pub struct RequestLogService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestLogService<S>
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

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let started = Instant::now();
        let request_id = extract_or_generate_request_id(&req);
        let header_value = HeaderValue::from_str(&request_id)
            .unwrap_or_else(|_| UNKNOWN_REQUEST_ID.clone());

        // Make the id visible to downstream layers and handlers
        req.headers_mut()
            .insert(REQUEST_ID_HEADER, header_value.clone());

        let method = req.method().clone();
        let path = request_target(&req);

        info!(
            timestamp = %Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            request_id = %request_id,
            method = %method,
            path = %path,
            "Incoming request"
        );

        let mut inner = self.inner.clone();

        Box::pin(async move {
            let mut response = inner.call(req).await?;

            response
                .headers_mut()
                .insert(REQUEST_ID_HEADER, header_value);

            debug!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = response.status().as_u16(),
                latency_ms = started.elapsed().as_millis() as u64,
                "Request completed"
            );

            Ok(response)
        })
    }
}

/// Path plus query string, as the client sent it.
fn request_target<B>(req: &Request<B>) -> String {
    req.uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}

/// Extract request ID from headers or generate a new one.
fn extract_or_generate_request_id<B>(req: &Request<B>) -> String {
    if let Some(header_value) = req.headers().get(REQUEST_ID_HEADER)
        && let Ok(value) = header_value.to_str()
        && !value.is_empty()
    {
        return value.to_string();
    }

    Uuid::new_v4().to_string()
}
