use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use fragments_convert::ConvertError;
use fragments_model::FragmentError;

/// Errors that can occur when running the fragments server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A fragment lifecycle error surfaced through the API.
    #[error(transparent)]
    Fragment(#[from] FragmentError),

    /// A conversion error surfaced through the API.
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// The request itself is malformed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request body exceeds the configured limit.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Authentication failed (missing or invalid credentials).
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Config(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Fragment(e) => match e {
                FragmentError::NotFound(_) => StatusCode::NOT_FOUND,
                FragmentError::UnsupportedType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                FragmentError::InvalidKey(_) => StatusCode::BAD_REQUEST,
                FragmentError::DeleteFailed(_)
                | FragmentError::Io(_)
                | FragmentError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Convert(e) => match e {
                ConvertError::Unsupported { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ConvertError::Conversion(_) => StatusCode::BAD_REQUEST,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Body shared by every error response.
pub fn error_body(status: StatusCode, message: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "error",
        "error": { "code": status.as_u16(), "message": message },
    })
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "request failed");
        }

        let mut response = (status, axum::Json(error_body(status, &message))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Basic realm=\"fragments\""),
            );
        }

        response
    }
}
