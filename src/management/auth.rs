use crate::{
    info,
    management::Session,
    spotify::{SpotifyClient, SpotifyError},
    types::TokenStatus,
    warning,
};

/// Supplies a usable access token for one request.
///
/// Borrows the request's session mutably so that a refreshed token is written
/// back before it is handed out.
pub struct TokenManager<'a> {
    spotify: &'a SpotifyClient,
    session: &'a mut Session,
}

impl<'a> TokenManager<'a> {
    pub fn new(spotify: &'a SpotifyClient, session: &'a mut Session) -> Self {
        TokenManager { spotify, session }
    }

    /// Returns an access token Spotify accepts, or `None` if the user has to
    /// authorize again.
    ///
    /// The stored token is checked first. If Spotify rejects it, or its status
    /// cannot be confirmed, a single refresh is attempted and the result is
    /// stored in the session.
    pub async fn get_valid_token(&mut self) -> Option<String> {
        let access_token = self.session.access_token()?.to_string();

        if self.spotify.check_token(&access_token).await == TokenStatus::Valid {
            return Some(access_token);
        }

        let refresh_token = self.session.refresh_token()?.to_string();

        match self.spotify.refresh_token(&refresh_token).await {
            Ok(tokens) => {
                let new_token = tokens.access_token.clone();
                self.session.store(tokens);
                info!("Access token refreshed");
                Some(new_token)
            }
            Err(e) => {
                warning!("Token refresh failed: {}", e);
                None
            }
        }
    }
}

/// Completes the authorization-code flow and stores the tokens in the session.
pub async fn complete_authorization(
    spotify: &SpotifyClient,
    session: &mut Session,
    code: &str,
) -> Result<(), SpotifyError> {
    let tokens = spotify.exchange_code(code).await?;
    session.store(tokens);
    Ok(())
}
