use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};

use crate::{types::TokenPair, warning};

pub const SESSION_COOKIE_NAME: &str = "spotify_session";

/// Per-browser session state.
///
/// Lives in an encrypted cookie: loaded at the start of a request, mutated by
/// the token management code and written back into the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

impl Session {
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Session {
            access_token,
            refresh_token,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Stores a freshly issued token pair.
    ///
    /// The access token is always replaced. The refresh token is only replaced
    /// when the provider supplied a new one.
    pub fn store(&mut self, tokens: TokenPair) {
        self.access_token = Some(tokens.access_token);
        if let Some(refresh_token) = tokens.refresh_token {
            self.refresh_token = Some(refresh_token);
        }
    }

    /// Reads the session from the request cookies.
    ///
    /// A missing cookie is an empty session. Cookies that fail to decrypt are
    /// already dropped by the jar; a payload that decrypts but does not parse is
    /// also treated as empty.
    pub fn load(jar: &PrivateCookieJar) -> Self {
        let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
            return Session::default();
        };

        match serde_json::from_str(cookie.value()) {
            Ok(session) => session,
            Err(e) => {
                warning!("Discarding unreadable session cookie: {}", e);
                Session::default()
            }
        }
    }

    /// Writes the session into the response cookies.
    ///
    /// Secure cookies use `SameSite=None` so a front-end on another site can
    /// submit songs with them; browsers reject `None` without `Secure`, so
    /// plain-http development falls back to `Lax`.
    pub fn save(&self, jar: PrivateCookieJar, secure: bool) -> PrivateCookieJar {
        let value = match serde_json::to_string(self) {
            Ok(value) => value,
            Err(e) => {
                warning!("Failed to encode session: {}", e);
                return jar;
            }
        };

        let same_site = if secure {
            SameSite::None
        } else {
            SameSite::Lax
        };

        let cookie = Cookie::build((SESSION_COOKIE_NAME, value))
            .http_only(true)
            .secure(secure)
            .same_site(same_site)
            .path("/")
            .build();

        jar.add(cookie)
    }
}
