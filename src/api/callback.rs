use axum::{
    extract::{Query, State},
    response::Redirect,
};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;

use crate::{
    api::ApiError,
    management::{Session, complete_authorization},
    server::AppState,
    success, warning,
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
}

pub async fn callback(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(PrivateCookieJar, Redirect), ApiError> {
    // Spotify reports a denied consent as ?error=access_denied
    if let Some(error) = params.error {
        warning!("Authorization was not granted: {}", error);
        return Err(ApiError::ClientInput(format!(
            "Authorization was not granted: {}",
            error
        )));
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return Err(ApiError::ClientInput(
            "Missing authorization code in request".to_string(),
        ));
    };

    let mut session = Session::load(&jar);
    if let Err(e) = complete_authorization(&state.spotify, &mut session, &code).await {
        warning!("Token exchange failed: {}", e);
        return Err(e.into());
    }

    success!("Authorization completed");
    let jar = session.save(jar, state.config().secure_cookies());
    Ok((jar, Redirect::to("/")))
}
