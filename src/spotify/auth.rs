use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::{
    spotify::{SCOPES, SpotifyClient, SpotifyError, status_error},
    types::{TokenPair, TokenStatus},
};

impl SpotifyClient {
    /// Builds the Spotify authorization URL the user is redirected to.
    ///
    /// The URL carries `response_type=code`, the client ID, the fixed playlist
    /// scopes (space-joined) and the configured redirect URI, all URL-encoded.
    /// The result only depends on configuration, so repeated calls return the
    /// same URL.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError::Malformed`] if the configured authorization URL
    /// cannot be parsed.
    ///
    /// # Example
    ///
    /// ```
    /// let url = spotify.authorize_url()?;
    /// // https://accounts.spotify.com/authorize?response_type=code&client_id=...
    /// ```
    pub fn authorize_url(&self) -> Result<Url, SpotifyError> {
        let config = self.config();
        let scope = SCOPES.join(" ");
        Url::parse_with_params(
            &config.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", config.client_id.as_str()),
                ("scope", scope.as_str()),
                ("redirect_uri", config.redirect_uri.as_str()),
            ],
        )
        .map_err(|e| SpotifyError::Malformed(format!("authorization URL: {}", e)))
    }

    /// Exchanges an authorization code for an access/refresh token pair.
    ///
    /// Completes the authorization-code flow with a form-encoded
    /// `grant_type=authorization_code` request carrying the code, the redirect
    /// URI and the client credentials.
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::Transport`] - Spotify could not be reached
    /// - [`SpotifyError::Status`] - Spotify answered with a non-2xx status
    /// - [`SpotifyError::Malformed`] - The body is not JSON
    /// - [`SpotifyError::MissingAccessToken`] - The JSON has no access token
    pub async fn exchange_code(&self, code: &str) -> Result<TokenPair, SpotifyError> {
        let config = self.config();
        let res = self
            .http
            .post(&config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", config.redirect_uri.as_str()),
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
            ])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(status_error(res).await);
        }

        parse_token_pair(&res.text().await?)
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// Only an HTTP 200 counts as success. Spotify may or may not rotate the
    /// refresh token; the returned pair carries a new one only when supplied.
    ///
    /// # Errors
    ///
    /// Same variants as [`SpotifyClient::exchange_code`]. Any status other than
    /// 200 is reported as [`SpotifyError::Status`].
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, SpotifyError> {
        let config = self.config();
        let res = self
            .http
            .post(&config.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
            ])
            .send()
            .await?;

        if res.status() != StatusCode::OK {
            return Err(status_error(res).await);
        }

        parse_token_pair(&res.text().await?)
    }

    /// Asks Spotify whether the access token is currently accepted.
    ///
    /// Issues `GET /me` with the token: 200 is [`TokenStatus::Valid`], 401 is
    /// [`TokenStatus::Invalid`], anything else, including a transport failure,
    /// is [`TokenStatus::Unknown`].
    pub async fn check_token(&self, access_token: &str) -> TokenStatus {
        let url = format!("{}/me", self.config().api_base());
        match self.http.get(&url).bearer_auth(access_token).send().await {
            Ok(res) => match res.status() {
                StatusCode::OK => TokenStatus::Valid,
                StatusCode::UNAUTHORIZED => TokenStatus::Invalid,
                _ => TokenStatus::Unknown,
            },
            Err(_) => TokenStatus::Unknown,
        }
    }
}

fn parse_token_pair(body: &str) -> Result<TokenPair, SpotifyError> {
    let json: Value =
        serde_json::from_str(body).map_err(|e| SpotifyError::Malformed(e.to_string()))?;

    let access_token = match json["access_token"].as_str() {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => return Err(SpotifyError::MissingAccessToken(body.to_string())),
    };

    let refresh_token = json["refresh_token"]
        .as_str()
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}
