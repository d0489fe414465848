//! Spotify Playlist Backend Library
//!
//! This library provides a small web backend that lets a front-end add a song
//! to a shared Spotify playlist on behalf of an end user. It implements the
//! Spotify OAuth 2.0 authorization-code flow, keeps the resulting tokens in an
//! encrypted per-browser session cookie and refreshes them transparently when
//! Spotify stops accepting the access token.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local web surface
//! - `config` - Configuration management and environment variables
//! - `management` - Session state, token supply and the playlist append operation
//! - `server` - Router construction and the HTTP listener
//! - `spotify` - Spotify Accounts and Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use playlist_backend::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> playlist_backend::Res<()> {
//!     config::load_env(None)?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for process-level operations that may fail.
///
/// Request handling uses the typed errors of the [`spotify`] and [`api`]
/// modules; this alias is reserved for startup plumbing such as loading the
/// configuration and binding the listener, where any error is fatal.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Track {} added to playlist", uri);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// This macro terminates the process with exit code 1. It is only meant for
/// startup failures; request handlers must never call it.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a rejected token refresh or a failed
/// provider call that is reported back to the client.
///
/// # Example
///
/// ```
/// warning!("Token refresh failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
