//! # Spotify Integration Module
//!
//! This module is the only place that talks to Spotify. It wraps the Accounts
//! service (authorization and token endpoints) and the handful of Web API
//! endpoints the backend needs, and turns every HTTP exchange into an explicit
//! `Result` so that callers decide how a failure is reported.
//!
//! ## Architecture
//!
//! ```text
//! HTTP Handlers (api)
//!          ↓
//! Session & Token Management (management)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorize URL, code exchange, refresh, validation)
//!     ├── Search (single best track match)
//!     └── Playlist (append one track)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Accounts / Web API
//! ```
//!
//! ## API Coverage
//!
//! - `GET  /authorize` - User authorization (redirect target only)
//! - `POST /api/token` - Authorization code exchange and token refresh
//! - `GET  /me` - Token validation
//! - `GET  /search` - Track lookup
//! - `POST /playlists/{playlist_id}/tracks` - Append tracks
//!
//! ## Error Handling
//!
//! Every call returns [`SpotifyError`] on failure. Transport problems, non-2xx
//! statuses, unparseable bodies and token responses without an access token are
//! distinct variants. There are no retries.
//!
//! ## Configuration
//!
//! All endpoint URLs come from [`Config`](crate::config::Config), so the client
//! can be pointed at a local fake in tests.

use std::{fmt, sync::Arc};

use reqwest::{Client, Response, StatusCode};

use crate::config::Config;

pub mod auth;
pub mod playlist;
pub mod search;

/// Requested permissions. Fixed for every authorization request.
pub const SCOPES: [&str; 2] = ["playlist-modify-public", "playlist-modify-private"];

#[derive(Debug)]
pub enum SpotifyError {
    Transport(reqwest::Error),
    Status { status: StatusCode, body: String },
    Malformed(String),
    MissingAccessToken(String),
}

impl fmt::Display for SpotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotifyError::Transport(e) => write!(f, "Failed to reach Spotify: {}", e),
            SpotifyError::Status { status, body } => {
                write!(f, "Spotify responded with {}: {}", status, body)
            }
            SpotifyError::Malformed(reason) => {
                write!(f, "Malformed response from Spotify: {}", reason)
            }
            SpotifyError::MissingAccessToken(body) => {
                write!(f, "Access token missing from Spotify response: {}", body)
            }
        }
    }
}

impl std::error::Error for SpotifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpotifyError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SpotifyError {
    fn from(err: reqwest::Error) -> Self {
        SpotifyError::Transport(err)
    }
}

/// Client for the Spotify Accounts service and Web API.
///
/// Cheap to clone: the underlying connection pool and configuration are shared.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    config: Arc<Config>,
}

impl SpotifyClient {
    pub fn new(config: Arc<Config>) -> Self {
        SpotifyClient {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Drains a failed response into [`SpotifyError::Status`], keeping the body
/// for diagnostics.
async fn status_error(res: Response) -> SpotifyError {
    let status = res.status();
    match res.text().await {
        Ok(body) => SpotifyError::Status { status, body },
        Err(e) => SpotifyError::Transport(e),
    }
}
