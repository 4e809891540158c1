use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;
use vidinfo_core::error::GatewayError;

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
///
/// Bodies are plain text. Internal failures are logged here with their full
/// diagnostic; the client only gets [`GatewayError::public_message`].
#[derive(Debug)]
pub struct AppError(pub GatewayError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if self.0.is_internal() {
            error!(error = %self.0, "request failed");
        }
        (status, self.0.public_message()).into_response()
    }
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        Self(e)
    }
}
