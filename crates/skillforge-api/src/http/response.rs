//! Envelope response format for successful API responses.
//!
//! ```json
//! { "success": true, "data": { ... } }
//! ```

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Envelope wrapping all successful API payloads.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
