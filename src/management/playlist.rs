use crate::{
    management::{Session, TokenManager},
    spotify::SpotifyClient,
    success, warning,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The track with this URI was added to the playlist.
    Added(String),
    NotFound,
    /// Spotify failed the search or the append; carries its diagnostic text.
    UpstreamError(String),
    NeedsAuth,
}

/// Searches for `query` and appends the best match to the configured playlist.
///
/// The session may be updated along the way if the access token had to be
/// refreshed, so callers must persist it regardless of the outcome.
pub async fn append_track(
    spotify: &SpotifyClient,
    session: &mut Session,
    query: &str,
) -> AppendOutcome {
    let Some(token) = TokenManager::new(spotify, session).get_valid_token().await else {
        return AppendOutcome::NeedsAuth;
    };

    let track = match spotify.search_track(&token, query).await {
        Ok(Some(track)) => track,
        Ok(None) => return AppendOutcome::NotFound,
        Err(e) => {
            warning!("Track search failed: {}", e);
            return AppendOutcome::UpstreamError(e.to_string());
        }
    };

    let playlist_id = &spotify.config().playlist_id;
    match spotify.add_track(&token, playlist_id, &track.uri).await {
        Ok(snapshot) => {
            success!(
                "Added {} ({}) to playlist {} [snapshot {}]",
                track.name,
                track.uri,
                playlist_id,
                snapshot.as_deref().unwrap_or("-")
            );
            AppendOutcome::Added(track.uri)
        }
        Err(e) => {
            warning!("Failed to add track to playlist: {}", e);
            AppendOutcome::UpstreamError(e.to_string())
        }
    }
}
