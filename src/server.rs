use axum::{
    Router,
    extract::FromRef,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{Res, api, config::Config, info, spotify::SpotifyClient, utils, warning};

/// Shared, read-only state of the request handlers.
#[derive(Clone)]
pub struct AppState {
    pub spotify: SpotifyClient,
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cookie_key = utils::cookie_key(config.session_secret.as_deref());
        AppState {
            spotify: SpotifyClient::new(Arc::new(config)),
            cookie_key,
        }
    }

    pub fn config(&self) -> &Config {
        self.spotify.config()
    }
}

// PrivateCookieJar pulls its key out of the router state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config().cors_origins);

    let app = Router::new()
        .route("/", get(api::index))
        .route("/callback", get(api::callback))
        .route("/add_song", post(api::add_song))
        .route("/health", get(api::health))
        .with_state(state);

    match cors {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

/// CORS for the configured front-end origins.
///
/// Credentials are allowed so the browser sends the session cookie along;
/// that rules out a wildcard origin, hence the explicit list.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warning!("Ignoring invalid CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE])
            .allow_credentials(true),
    )
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = SocketAddr::from_str(&config.server_addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", config.server_addr, e))?;

    if config.session_secret.is_none() {
        warning!("SESSION_SECRET not set, sessions will not survive a restart");
    }

    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
