//! Configuration management for the playlist backend.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files. All values are read once at startup into a [`Config`]
//! which is then shared, read-only, by every request handler.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. A `.env` file given on the command line, in the working directory, or in
//!    the local data directory
//! 3. Application defaults (where applicable)

use std::{env, fmt, path::Path, path::PathBuf};

/// Default Spotify OAuth authorization endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";

/// Default Spotify OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Default Spotify Web API base URL.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Port used when neither `SERVER_ADDRESS` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { name: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} must be set", name),
            ConfigError::Invalid { name, reason } => write!(f, "{} is invalid: {}", name, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration of the backend.
///
/// Built with [`Config::from_env`] in production. Tests construct it directly
/// so the Spotify endpoints can point at a local fake.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub playlist_id: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
    pub session_secret: Option<String>,
    /// Front-end origins allowed to call the backend from a browser.
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for the first required variable that is
    /// unset or empty, and [`ConfigError::Invalid`] if `PORT` is not a number.
    ///
    /// # Example
    ///
    /// ```
    /// config::load_env(None)?;
    /// let config = Config::from_env()?;
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let server_addr = match get("SERVER_ADDRESS") {
            Some(addr) => addr,
            None => {
                let port = match get("PORT") {
                    Some(p) => p.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                        name: "PORT",
                        reason: e.to_string(),
                    })?,
                    None => DEFAULT_PORT,
                };
                format!("0.0.0.0:{}", port)
            }
        };

        Ok(Config {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            playlist_id: required("SPOTIFY_PLAYLIST_ID")?,
            auth_url: get("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            server_addr,
            session_secret: get("SESSION_SECRET"),
            cors_origins: get("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().trim_end_matches('/').to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Whether session cookies should carry the `Secure` attribute.
    ///
    /// Derived from the redirect URI: a backend reachable over https only ever
    /// receives its callback over https.
    pub fn secure_cookies(&self) -> bool {
        self.redirect_uri.starts_with("https://")
    }

    /// Spotify Web API base URL without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

/// Loads environment variables from a `.env` file.
///
/// When `explicit` is given, that file must exist and parse. Otherwise the
/// function tries `./.env` and then the platform-specific local data
/// directory under `spotify-playlist-backend/.env`:
/// - Linux: `~/.local/share/spotify-playlist-backend/.env`
/// - macOS: `~/Library/Application Support/spotify-playlist-backend/.env`
/// - Windows: `%LOCALAPPDATA%/spotify-playlist-backend/.env`
///
/// Missing implicit files are not an error, since hosted deployments usually
/// provide the variables directly.
///
/// # Errors
///
/// Returns an error string if the explicit file cannot be read or parsed, or
/// if an implicit file exists but is malformed.
pub fn load_env(explicit: Option<&Path>) -> Result<(), String> {
    if let Some(path) = explicit {
        return dotenv::from_path(path)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e));
    }

    let local = PathBuf::from(".env");
    if local.is_file() {
        return dotenv::from_path(&local).map_err(|e| e.to_string());
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotify-playlist-backend/.env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    Ok(())
}
