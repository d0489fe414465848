mod auth;
mod playlist;
mod session;

pub use auth::TokenManager;
pub use auth::complete_authorization;
pub use playlist::AppendOutcome;
pub use playlist::append_track;
pub use session::SESSION_COOKIE_NAME;
pub use session::Session;
