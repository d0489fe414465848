use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::{api::ApiError, management::Session, server::AppState};

/// Entry point of the authorization flow.
///
/// Unauthenticated browsers are sent to Spotify to grant the playlist scopes.
/// Authenticated ones get a short status page.
pub async fn index(State(state): State<AppState>, jar: PrivateCookieJar) -> Response {
    if Session::load(&jar).is_authenticated() {
        return Html("<h2>Backend ready.</h2><p>You can go back to the playlist page.</p>")
            .into_response();
    }

    match state.spotify.authorize_url() {
        Ok(url) => Redirect::to(url.as_str()).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
