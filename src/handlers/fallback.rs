use crate::core::error::HelpCenterError;
use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};
use tracing::debug;

pub async fn fallback_handler(uri: Uri) -> Response {
    debug!(path = %uri.path(), "Unknown endpoint");

    HelpCenterError::NotFound(format!("Endpoint {}", uri.path())).into_response()
}
