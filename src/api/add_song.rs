use axum::{
    Form,
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;

use crate::{
    api::ApiError,
    management::{AppendOutcome, Session, append_track},
    server::AppState,
};

#[derive(Debug, Deserialize)]
struct AddSongForm {
    track: Option<String>,
}

/// The `track` field of an add-song submission.
///
/// Accepts both `application/x-www-form-urlencoded` bodies and
/// `multipart/form-data` bodies, which is what a browser `FormData` submit
/// produces. A body without the field yields `None`.
#[derive(Debug)]
pub struct TrackField(pub Option<String>);

impl<S> FromRequest<S> for TrackField
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(form) = Form::<AddSongForm>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(TrackField(form.track));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(IntoResponse::into_response)?
        {
            if field.name() == Some("track") {
                let value = field.text().await.map_err(IntoResponse::into_response)?;
                return Ok(TrackField(Some(value)));
            }
        }

        Ok(TrackField(None))
    }
}

/// Adds the best match for the submitted `track` query to the shared playlist.
///
/// The session cookie is written back on every outcome, since the access
/// token may have been refreshed before the search or append failed.
pub async fn add_song(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    TrackField(track): TrackField,
) -> Response {
    let Some(query) = track
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
    else {
        return ApiError::ClientInput("Missing track in request".to_string()).into_response();
    };

    let mut session = Session::load(&jar);
    let outcome = append_track(&state.spotify, &mut session, &query).await;
    let jar = session.save(jar, state.config().secure_cookies());

    let response = match outcome {
        AppendOutcome::Added(_) => "Track added to the playlist!".into_response(),
        AppendOutcome::NeedsAuth => Redirect::to("/").into_response(),
        AppendOutcome::NotFound => {
            ApiError::NotFound(format!("No track found for \"{}\"", query)).into_response()
        }
        AppendOutcome::UpstreamError(body) => {
            ApiError::Upstream(format!("Spotify error: {}", body)).into_response()
        }
    };

    (jar, response).into_response()
}
