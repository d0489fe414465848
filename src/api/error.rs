use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::spotify::SpotifyError;

/// Failures reported back to the HTTP client.
///
/// Needing to re-authenticate is not an error; handlers redirect instead.
#[derive(Debug)]
pub enum ApiError {
    /// The request itself is incomplete (400).
    ClientInput(String),
    /// Spotify failed or answered with something unusable (502).
    Upstream(String),
    /// Nothing matched the request (404).
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ClientInput(msg) | ApiError::Upstream(msg) | ApiError::NotFound(msg) => {
                write!(f, "{}", msg)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<SpotifyError> for ApiError {
    fn from(err: SpotifyError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::ClientInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, self.to_string()).into_response()
    }
}
