use axum::http::StatusCode;
use axum::http::header::WWW_AUTHENTICATE;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned to clients for any unexpected server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong!";

/// Message returned when the bearer token is missing or wrong.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Invalid or missing token";

/// Application-wide error types with appropriate HTTP status codes.
///
/// Client errors (401, 400, 404, 413) carry a user-facing message. Server
/// errors are logged in full but only a generic message reaches the caller.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: invalid or missing bearer token")]
    Unauthorized,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Error response body for API endpoints.
///
/// Every error the API produces has this shape: `{"message": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::SerializationError(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to show to the client.
    fn client_message(&self) -> String {
        match self {
            AppError::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            // Serde errors can mention internal type names, so sanitize them
            AppError::SerializationError(e) => sanitize_serde_error(e),
            AppError::PayloadTooLarge { limit } => {
                format!("Request body too large (limit is {limit} bytes)")
            }
            AppError::Internal(_) | AppError::ConfigError(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Full detail stays in the server log
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = axum::Json(ErrorResponse::new(self.client_message()));

        if matches!(self, AppError::Unauthorized) {
            return (status, [(WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }

        (status, body).into_response()
    }
}

/// Sanitize serde error messages to avoid leaking internal type information.
///
/// Serde errors can contain internal struct/field names which shouldn't be
/// exposed to external clients. This function extracts the useful parts.
fn sanitize_serde_error(e: &serde_json::Error) -> String {
    let msg = e.to_string();

    if msg.contains("missing field")
        && let Some(start) = msg.find('`')
        && let Some(end) = msg[start + 1..].find('`')
    {
        let field = &msg[start + 1..start + 1 + end];
        return format!("Missing required field: {field}");
    }

    if msg.contains("invalid type") || msg.contains("invalid value") {
        return "Invalid data type in request body".to_string();
    }

    if e.is_syntax() || e.is_eof() {
        return "Malformed JSON in request body".to_string();
    }

    "Invalid request format".to_string()
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    async fn body_message(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        body.message
    }

    #[tokio::test]
    async fn test_unauthorized_response() {
        let response = AppError::Unauthorized.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        assert_eq!(body_message(response).await, UNAUTHORIZED_MESSAGE);
    }

    #[tokio::test]
    async fn test_not_found_keeps_message() {
        let response = AppError::NotFound("Product not found".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_message(response).await, "Product not found");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response =
            AppError::Internal("lock poisoned at store.rs:42".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_message(response).await, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_sanitize_invalid_type() {
        let err = serde_json::from_str::<bool>("\"yes\"").unwrap_err();
        assert_eq!(sanitize_serde_error(&err), "Invalid data type in request body");
    }

    #[test]
    fn test_sanitize_malformed_json() {
        let err = serde_json::from_str::<serde_json::Value>("{\"name\": ").unwrap_err();
        assert_eq!(sanitize_serde_error(&err), "Malformed JSON in request body");
    }

    #[test]
    fn test_payload_too_large_status() {
        let err = AppError::PayloadTooLarge { limit: 16 };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
