// src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Reasons a delivery is rejected. Each maps to one status and a short
/// plain-text message.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Secret not set")]
    SecretNotSet,

    #[error("{0}")]
    BodyUnreadable(String),

    #[error("Signature not set")]
    SignatureMissing,

    #[error("Malformed signature")]
    SignatureMalformed,

    #[error("Unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid signature")]
    SignatureMismatch,

    #[error("{0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::SecretNotSet => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SignatureMismatch => StatusCode::UNAUTHORIZED,
            Self::BodyUnreadable(_)
            | Self::SignatureMissing
            | Self::SignatureMalformed
            | Self::UnsupportedAlgorithm(_)
            | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
