use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

/// Derives the session cookie key from a configured secret.
///
/// SHA-512 stretches secrets of any length to the 64 bytes the cookie key
/// needs. The same secret always yields the same key, so sessions survive a
/// restart when `SESSION_SECRET` is set.
pub fn derive_cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Returns the session cookie key, generating a random one when no secret is
/// configured.
pub fn cookie_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) => derive_cookie_key(secret),
        None => Key::generate(),
    }
}
