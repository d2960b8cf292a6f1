//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkout::CheckoutError;
use order_store::StoreError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Checkout workflow error.
    Checkout(CheckoutError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Checkout(err) => checkout_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, String) {
    match &err {
        CheckoutError::BasketNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        CheckoutError::EmptyBasket(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        CheckoutError::Build(_) => {
            // Basket/catalog mismatch: data corruption, not a client mistake
            tracing::error!(error = %err, "integrity failure during checkout");
            (StatusCode::CONFLICT, err.to_string())
        }
        CheckoutError::BasketService(_)
        | CheckoutError::CatalogService(_)
        | CheckoutError::Store(_)
        | CheckoutError::QueuePublish(_)
        | CheckoutError::DeliveryNotify(_) => (StatusCode::BAD_GATEWAY, err.to_string()),
        CheckoutError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Checkout(CheckoutError::Store(err))
    }
}
