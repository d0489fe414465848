use reqwest::StatusCode;

use crate::{
    spotify::{SpotifyClient, SpotifyError, status_error},
    types::{AddTrackToPlaylistRequest, AddTrackToPlaylistResponse},
};

impl SpotifyClient {
    /// Appends a single track to a playlist.
    ///
    /// Sends `{"uris": [track_uri]}` to `/playlists/{playlist_id}/tracks`.
    /// Only `201 Created` counts as success; the returned snapshot ID is
    /// `None` when Spotify omits it.
    ///
    /// # Errors
    ///
    /// Any other status becomes [`SpotifyError::Status`] with the response body.
    pub async fn add_track(
        &self,
        access_token: &str,
        playlist_id: &str,
        track_uri: &str,
    ) -> Result<Option<String>, SpotifyError> {
        let url = format!(
            "{api}/playlists/{playlist_id}/tracks",
            api = self.config().api_base(),
            playlist_id = playlist_id
        );

        let res = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .json(&AddTrackToPlaylistRequest {
                uris: vec![track_uri.to_string()],
            })
            .send()
            .await?;

        if res.status() != StatusCode::CREATED {
            return Err(status_error(res).await);
        }

        let snapshot = res
            .json::<AddTrackToPlaylistResponse>()
            .await
            .ok()
            .map(|r| r.snapshot_id);

        Ok(snapshot)
    }
}
