//! # Error Handling Middleware
//!
//! Maps the slot engine's errors to HTTP status codes and JSON error bodies so every
//! endpoint reports failures the same way.
//!
//! | Error | Status |
//! |---|---|
//! | `InvalidRange`, `InvalidWindow`, `InvalidSlotBoundary` | 400 |
//! | `WindowUnavailable`, `NotFound` | 404 |
//! | `SlotAlreadyBooked` | 409 |
//! | `StorageUnavailable` | 503 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use opdslot_core::errors::SlotError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use opdslot_api::middleware::error_handling::AppError;
/// use opdslot_core::errors::SlotError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(SlotError::NotFound("Booking not found".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SlotError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SlotError::InvalidRange(_) => StatusCode::BAD_REQUEST,
            SlotError::InvalidWindow(_) => StatusCode::BAD_REQUEST,
            SlotError::InvalidSlotBoundary(_) => StatusCode::BAD_REQUEST,
            SlotError::WindowUnavailable(_) => StatusCode::NOT_FOUND,
            SlotError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotError::SlotAlreadyBooked(_) => StatusCode::CONFLICT,
            SlotError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `SlotResult` inside handlers.
impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}

/// Store calls made directly by handlers fail as `StorageUnavailable`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SlotError::StorageUnavailable(err))
    }
}

/// Maps a SlotError to an HTTP response
pub fn map_error(err: SlotError) -> Response {
    AppError(err).into_response()
}
