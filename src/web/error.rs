//! Unified page error handling.
//!
//! Every failure here is terminal for the request: the full error is logged
//! server-side and the client gets a static message with a 500 status.
//! Validation and auth failures never pass through this type; they render
//! inline alert pages with a 200 status instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("file upload error: {0}")]
    Upload(#[from] std::io::Error),

    #[error("multipart decode error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("password hashing error: {0}")]
    Hash(argon2::password_hash::Error),
}

impl From<argon2::password_hash::Error> for PageError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::Hash(err)
    }
}

impl PageError {
    fn public_message(&self) -> &'static str {
        match self {
            Self::Database(_) => "A database error occurred.",
            Self::Upload(_) => "Error storing uploaded file.",
            Self::Multipart(_) => "Error reading submitted form.",
            Self::Hash(_) => "Error processing credentials.",
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.public_message()).into_response()
    }
}
