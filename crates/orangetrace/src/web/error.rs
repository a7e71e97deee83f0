//! HTTP error responses.
//!
//! Every handler returns `Result<_, ApiError>`. Domain errors convert into an `ApiError`
//! carrying the status, a machine-readable code and the user-facing message:
//!
//! ```json
//! { "error": "Insufficient stock for NG2024001: requested 6, available 5", "code": "INSUFFICIENT_STOCK" }
//! ```

use crate::batch_actor::InventoryError;
use crate::cart_actor::CartError;
use crate::order_actor::OrderError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Error returned by web handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "AUTHENTICATION_REQUIRED",
            "User not authenticated",
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, code, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, code = self.code, message = %self.message, "Request failed");
        } else {
            tracing::debug!(status = %self.status, code = self.code, message = %self.message, "Request rejected");
        }

        let body = ErrorBody {
            error: &self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<InventoryError> for ApiError {
    fn from(e: InventoryError) -> Self {
        let message = e.to_string();
        match e {
            InventoryError::BatchNotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "BATCH_NOT_FOUND", message)
            }
            InventoryError::InsufficientStock { .. } => {
                Self::conflict("INSUFFICIENT_STOCK", message)
            }
            InventoryError::AlreadyRegistered(_) => Self::conflict("ALREADY_REGISTERED", message),
            InventoryError::Forbidden(_) => Self::forbidden(message),
            InventoryError::ValidationError(_) => Self::validation(message),
            InventoryError::ActorCommunicationError(_) => Self::internal(message),
        }
    }
}

impl From<CartError> for ApiError {
    fn from(e: CartError) -> Self {
        let message = e.to_string();
        match e {
            CartError::ItemNotFound(_) => Self::not_found(message),
            CartError::QuantityOutOfRange { .. } => Self::validation(message),
            CartError::ActorCommunicationError(_) => Self::internal(message),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Inventory(inner) => inner.into(),
            OrderError::Cart(inner) => inner.into(),
            OrderError::NotFound(_) => Self::not_found("Order not found"),
            OrderError::Forbidden(_) => Self::forbidden("Access denied"),
            OrderError::ValidationError(_) => Self::validation(e.to_string()),
            OrderError::InvalidTransition { .. } => {
                Self::conflict("INVALID_TRANSITION", e.to_string())
            }
            OrderError::ActorCommunicationError(_) => Self::internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_JSON", rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_errors_are_conflicts() {
        let err = ApiError::from(OrderError::Inventory(InventoryError::InsufficientStock {
            batch_id: "NG2024001".into(),
            requested: 6,
            available: 5,
        }));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "INSUFFICIENT_STOCK");

        let err = ApiError::from(InventoryError::BatchNotFound("NG2099999".into()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "BATCH_NOT_FOUND");
    }

    #[test]
    fn order_errors_map_to_statuses() {
        let cases = [
            (OrderError::NotFound("o1".into()), StatusCode::NOT_FOUND),
            (OrderError::Forbidden("o1".into()), StatusCode::FORBIDDEN),
            (
                OrderError::ValidationError("total".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                OrderError::Cart(CartError::ActorCommunicationError("closed".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
    }
}
