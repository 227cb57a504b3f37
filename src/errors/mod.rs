//! Error handling module for the boards service.
//!
//! Provides centralized error types with mapping to HTTP status codes and error pages.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::render::escape_html;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const STORE_ERROR: &str = "STORE_ERROR";
    pub const RENDER_ERROR: &str = "RENDER_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Unknown board or unmatched path
    NotFound(String),
    /// Field-length violation on a submitted form
    Validation(String),
    /// Value outside the domain of an operation (e.g. negative counter)
    InvalidArgument(String),
    /// Malformed request (missing form field)
    BadRequest(String),
    /// Key-value store failure
    Store(String),
    /// Template rendering failure
    Render(String),
    /// Invalid configuration
    Config(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::InvalidArgument(_) => codes::INVALID_ARGUMENT,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::Store(_) => codes::STORE_ERROR,
            AppError::Render(_) => codes::RENDER_ERROR,
            AppError::Config(_) => codes::CONFIG_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidArgument(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Store(msg) => msg.clone(),
            AppError::Render(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Store error: {:?}", err);
        AppError::Store(format!("Store error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("View-model serialization error: {:?}", err);
        AppError::Render(format!("View-model serialization error: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Server-side failures are logged, not shown.
        let detail = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            "Something went wrong on our side.".to_string()
        } else {
            self.message()
        };

        let title = format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Error")
        );
        let body = format!(
            "<!doctype html>\n<html><head><title>{title}</title></head>\
             <body><h1>{title}</h1><p>{detail}</p><p><a href=\"/\">All boards</a></p></body></html>\n",
            title = escape_html(&title),
            detail = escape_html(&detail),
        );

        (status, Html(body)).into_response()
    }
}
