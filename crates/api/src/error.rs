use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vuement_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses,
/// and is the only place error kinds become status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vuement_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A request that could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matches the request path.
    #[error("No route for {0}")]
    RouteNotFound(String),

    /// The path exists but not for this method.
    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(_) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    core.to_string(),
                ),
                CoreError::InvalidIdentifier(raw) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_IDENTIFIER",
                    format!("'{raw}' is not a valid identifier"),
                ),
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::NothingDeleted { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOTHING_DELETED",
                    format!("No {entity} with id {id} to delete"),
                ),
                CoreError::Timeout => (
                    StatusCode::GATEWAY_TIMEOUT,
                    "TIMEOUT",
                    "The operation timed out".to_string(),
                ),
                CoreError::Cancelled => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CANCELLED",
                    "The operation was cancelled".to_string(),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::InsertError(_) | CoreError::Store(_) | CoreError::Internal(_) => {
                    tracing::error!(error = %core, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No route for {path}"),
            ),
            AppError::MethodNotAllowed(method) => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                format!("Method {method} not allowed"),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let AppError::Core(core @ CoreError::Validation(_)) = &self {
            body["fields"] = json!(core.violated_fields());
        }

        (status, axum::Json(body)).into_response()
    }
}
