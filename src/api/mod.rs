//! # API Module
//!
//! This module provides the HTTP endpoints of the playlist backend. The
//! handlers are thin: they load the session from its cookie, delegate to the
//! [`crate::management`] layer and translate the outcome into a response.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`index`] - Entry point. Redirects unauthenticated browsers to Spotify's
//!   authorization page, otherwise reports that the backend is ready.
//! - [`callback`] - OAuth redirect target. Exchanges the authorization code for
//!   a token pair and stores it in the session.
//!
//! ### Playlist
//!
//! - [`add_song`] - Accepts a form field `track` (urlencoded or multipart),
//!   searches Spotify and appends the best match to the configured playlist.
//!
//! ### Monitoring
//!
//! - [`health`] - Returns application status and version information.
//!
//! ## Error Responses
//!
//! Failures are expressed as [`ApiError`]:
//!
//! | Variant | Status | Cause |
//! |---|---|---|
//! | `ClientInput` | 400 | Missing code or track, denied authorization |
//! | `NotFound` | 404 | Search returned no track |
//! | `Upstream` | 502 | Spotify failed or returned an unusable body |
//!
//! A request that needs Spotify access but has no usable token is redirected
//! to `/`, which restarts the authorization flow.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::{get, post}};
//! use playlist_backend::api;
//!
//! let app = Router::new()
//!     .route("/", get(api::index))
//!     .route("/callback", get(api::callback))
//!     .route("/add_song", post(api::add_song))
//!     .route("/health", get(api::health))
//!     .with_state(state);
//! ```

mod add_song;
mod callback;
mod error;
mod health;
mod index;

pub use add_song::{TrackField, add_song};
pub use callback::callback;
pub use error::ApiError;
pub use health::health;
pub use index::index;
