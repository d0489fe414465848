use crate::{
    spotify::{SpotifyClient, SpotifyError, status_error},
    types::{SearchResponse, Track},
};

impl SpotifyClient {
    /// Searches the Spotify catalog and returns the single best track match.
    ///
    /// Requests exactly one result (`type=track&limit=1`). A successful response
    /// without any items, without a `tracks` object at all, or whose first item
    /// carries no URI, yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::Transport`] - Network error
    /// - [`SpotifyError::Status`] - Non-2xx response, body kept for diagnostics
    /// - [`SpotifyError::Malformed`] - Body could not be decoded
    pub async fn search_track(
        &self,
        access_token: &str,
        query: &str,
    ) -> Result<Option<Track>, SpotifyError> {
        let url = format!("{}/search", self.config().api_base());
        let res = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("q", query), ("type", "track"), ("limit", "1")])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(status_error(res).await);
        }

        let body = res.text().await?;
        let search: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SpotifyError::Malformed(e.to_string()))?;

        Ok(search
            .tracks
            .and_then(|t| t.items.into_iter().next())
            .filter(|track| !track.uri.is_empty()))
    }
}
