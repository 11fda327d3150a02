//! JSON envelope returned by every endpoint: `{ success, data?, message? }`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Response envelope carrying a payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), message: None }
    }

    /// Failure that still carries a payload, such as a degraded health report.
    #[must_use]
    pub fn failed(data: T, message: impl Into<String>) -> Self {
        Self { success: false, data: Some(data), message: Some(message.into()) }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Failure envelope; `success` is always `false` and `data` is absent.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorBody {
    pub success: bool,
    pub message: String,
}

impl ApiErrorBody {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }

    /// Pairs the body with an HTTP status.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}
