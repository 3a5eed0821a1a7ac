//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │   Request Log    │ ← timestamp, method, path; X-Request-Id
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │     Tracing      │ ← HTTP spans
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │       CORS       │ ← Cross-origin headers
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │   Catch Panic    │ ← 500 with generic message
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │   Bearer Auth    │ ← 401 (POST, PUT, DELETE only)
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │ Validate Product │ ← 400/413 (POST, PUT only)
//! └────────┬─────────┘
//!          ▼
//!      Handler
//! ```
//!
//! # Routes
//!
//! - `GET /` - Plain-text banner
//! - `GET /api/products`, `GET /api/products/{id}` - Public reads
//! - `POST /api/products`, `PUT /api/products/{id}` - Authenticated, validated writes
//! - `DELETE /api/products/{id}` - Authenticated delete

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::handlers;
use crate::middleware::{BearerAuth, RequestLogLayer, ValidateProduct, handle_panic};
use crate::state::AppState;

/// Build the application router with all routes and middleware configured.
///
/// Authentication and validation are attached with `route_layer`, so they
/// only run for the methods they guard and never for unmatched paths.
pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    let auth = BearerAuth::from_header_value(config.bearer_token());
    let validate = ValidateProduct::new(config.max_request_body_size);

    let router = Router::new()
        .route("/", get(handlers::index))
        // Public reads
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/{id}", get(handlers::get_product))
        // Authenticated writes; validation runs after auth
        .route(
            "/api/products",
            post(handlers::create_product)
                .route_layer(validate)
                .route_layer(auth.clone()),
        )
        .route(
            "/api/products/{id}",
            put(handlers::update_product)
                .route_layer(validate)
                .route_layer(auth.clone()),
        )
        .route(
            "/api/products/{id}",
            delete(handlers::delete_product).route_layer(auth),
        )
        .fallback(handlers::not_found);

    info!(
        max_body_bytes = config.max_request_body_size,
        "Product body size limit configured"
    );

    let router = apply_middleware(router, config);
    router.with_state(state)
}

/// Wrap every route in the shared middleware stack.
///
/// Layers added last run first: request log, trace, CORS, then catch-panic
/// closest to the routes.
fn apply_middleware<S>(router: Router<S>, config: &Config) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(build_cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(RequestLogLayer::new())
}

/// Build CORS layer from configuration.
///
/// `*` allows any origin; otherwise only the listed origins are allowed.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_any = allowed_origins.iter().any(|o| o == "*");

    if allow_any {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::error::{ErrorResponse, INTERNAL_ERROR_MESSAGE};
    use crate::middleware::REQUEST_ID_HEADER;

    fn app() -> Router {
        build_router(AppState::seeded(Config::default()))
    }

    #[test]
    fn test_build_cors_layer_any() {
        let _layer = build_cors_layer(&["*".to_string()]);
    }

    #[test]
    fn test_build_cors_layer_specific() {
        let _layer = build_cors_layer(&[
            "https://example.com".to_string(),
            "https://app.example.com".to_string(),
        ]);
    }

    #[tokio::test]
    async fn test_root_is_plain_text() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(bytes, handlers::WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn test_auth_runs_before_validation() {
        // Invalid body and no token: auth must answer first
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/products")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_delete_skips_validation() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/products/1")
                    .header("authorization", "Bearer mysecrettoken")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/api/products/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_panicking_route_returns_generic_500() {
        let router: Router = apply_middleware(
            Router::new().route(
                "/boom",
                get(|| async {
                    let product: Option<String> = None;
                    product.unwrap()
                }),
            ),
            &Config::default(),
        );

        let response = router
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Request log wraps the panic layer, so the id is still echoed
        assert!(response.headers().get(REQUEST_ID_HEADER).is_some());

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
    }
}
