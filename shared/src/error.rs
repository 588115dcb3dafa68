//! Error types for the shared crate
//!
//! Standardized error types that can be used across the entire framework

use crate::{
    http::{Response, StatusCode},
    response::ApiResponse,
};
use thiserror::Error;

/// Standard API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Success
    Success,
    /// Validation error (400)
    Validation,
    /// Resource not found (404)
    NotFound,
    /// Illegal item/order state transition (422)
    InvalidTransition,
    /// Operation on a served/cancelled order (409)
    OrderClosed,
    /// Priority level outside the enumerated set (400)
    InvalidPriority,
    /// Printer or notification gateway unavailable (503)
    DownstreamUnavailable,
    /// Internal server error (500)
    Internal,
    /// Invalid request (400)
    Invalid,
}

impl ApiErrorCode {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidTransition => StatusCode::UNPROCESSABLE_ENTITY,
            Self::OrderClosed => StatusCode::CONFLICT,
            Self::InvalidPriority => StatusCode::BAD_REQUEST,
            Self::DownstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Invalid => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the default message for this error
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Validation => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::InvalidTransition => "Invalid state transition",
            Self::OrderClosed => "Order is closed",
            Self::InvalidPriority => "Invalid priority level",
            Self::DownstreamUnavailable => "Downstream service unavailable",
            Self::Internal => "Internal server error",
            Self::Invalid => "Invalid request",
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::Validation => "E0002",
            Self::NotFound => "E0003",
            Self::InvalidTransition => "E1001",
            Self::OrderClosed => "E1002",
            Self::InvalidPriority => "E1003",
            Self::DownstreamUnavailable => "E9403",
            Self::Internal => "E9001",
            Self::Invalid => "E0006",
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unified error type for the framework
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation error
    #[error("{message}")]
    Validation { message: String },

    /// Resource not found
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Illegal item/order state transition
    #[error("Invalid transition: {message}")]
    InvalidTransition { message: String },

    /// Operation attempted on a served/cancelled order
    #[error("Order closed: {order_id}")]
    OrderClosed { order_id: String },

    /// Priority level outside the enumerated set
    #[error("Invalid priority: {value}")]
    InvalidPriority { value: String },

    /// Printer or notification gateway unavailable
    #[error("Downstream unavailable: {message}")]
    DownstreamUnavailable { message: String },

    /// Internal server error
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Invalid request
    #[error("Invalid request: {message}")]
    Invalid { message: String },
}

impl ApiError {
    // ========== Convenient constructors ==========

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an InvalidTransition error
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::InvalidTransition {
            message: message.into(),
        }
    }

    /// Create an OrderClosed error
    pub fn order_closed(order_id: impl Into<String>) -> Self {
        Self::OrderClosed {
            order_id: order_id.into(),
        }
    }

    /// Create an InvalidPriority error
    pub fn invalid_priority(value: impl Into<String>) -> Self {
        Self::InvalidPriority {
            value: value.into(),
        }
    }

    /// Create a DownstreamUnavailable error
    pub fn downstream_unavailable(message: impl Into<String>) -> Self {
        Self::DownstreamUnavailable {
            message: message.into(),
        }
    }

    /// Create an Invalid error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    // ========== Error inspection methods ==========

    /// Get the error code for this error
    pub fn error_code(&self) -> ApiErrorCode {
        match self {
            Self::Validation { .. } => ApiErrorCode::Validation,
            Self::NotFound { .. } => ApiErrorCode::NotFound,
            Self::InvalidTransition { .. } => ApiErrorCode::InvalidTransition,
            Self::OrderClosed { .. } => ApiErrorCode::OrderClosed,
            Self::InvalidPriority { .. } => ApiErrorCode::InvalidPriority,
            Self::DownstreamUnavailable { .. } => ApiErrorCode::DownstreamUnavailable,
            Self::Internal { .. } => ApiErrorCode::Internal,
            Self::Invalid { .. } => ApiErrorCode::Invalid,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::NotFound { resource } => format!("{} not found", resource),
            Self::InvalidTransition { message } => message.clone(),
            Self::OrderClosed { order_id } => format!("Order {} is closed", order_id),
            Self::InvalidPriority { value } => format!("Invalid priority level: {}", value),
            Self::DownstreamUnavailable { message } => message.clone(),
            Self::Internal { message } => message.clone(),
            Self::Invalid { message } => message.clone(),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> Response<axum::body::Body> {
        let code = self.error_code();
        let status = code.status_code();
        let message = self.message();

        let body = ApiResponse::<()>::error(code.code(), message);
        let json_body = serde_json::to_string(&body).unwrap_or_default();

        let body = json_body.into();

        http::Response::builder()
            .status(status)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap_or_else(|_| {
                let body = "Internal error".into();
                http::Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(body)
                    .unwrap()
            })
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
