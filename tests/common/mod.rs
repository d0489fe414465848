#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
};
use playlist_backend::{
    config::Config,
    server::{self, AppState},
    spotify::SpotifyClient,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Scripted behavior and recorded traffic of the fake Spotify service.
pub struct FakeState {
    pub me_status: u16,
    pub token_status: u16,
    pub token_body: String,
    pub search_status: u16,
    pub search_body: Value,
    pub append_status: u16,
    pub append_body: Value,

    pub me_calls: usize,
    pub token_calls: usize,
    pub search_calls: usize,
    pub append_calls: usize,
    pub bearer_tokens: Vec<String>,
    pub token_forms: Vec<HashMap<String, String>>,
    pub search_queries: Vec<HashMap<String, String>>,
    pub append_playlists: Vec<String>,
    pub append_bodies: Vec<Value>,
}

impl Default for FakeState {
    fn default() -> Self {
        FakeState {
            me_status: 200,
            token_status: 200,
            token_body: json!({"access_token": "A", "refresh_token": "R"}).to_string(),
            search_status: 200,
            search_body: json!({"tracks": {"items": []}}),
            append_status: 201,
            append_body: json!({"snapshot_id": "snap-1"}),
            me_calls: 0,
            token_calls: 0,
            search_calls: 0,
            append_calls: 0,
            bearer_tokens: Vec::new(),
            token_forms: Vec::new(),
            search_queries: Vec::new(),
            append_playlists: Vec::new(),
            append_bodies: Vec::new(),
        }
    }
}

impl FakeState {
    pub fn with_track(mut self, uri: &str) -> Self {
        self.search_body = json!({
            "tracks": {"items": [{"id": "123", "name": "Imagine", "uri": uri}]}
        });
        self
    }

    pub fn provider_calls(&self) -> usize {
        self.me_calls + self.token_calls + self.search_calls + self.append_calls
    }
}

type Shared = Arc<Mutex<FakeState>>;

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

fn record_bearer(state: &mut FakeState, headers: &HeaderMap) {
    if let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        state
            .bearer_tokens
            .push(value.trim_start_matches("Bearer ").to_string());
    }
}

async fn me(State(shared): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let mut state = shared.lock().unwrap();
    state.me_calls += 1;
    record_bearer(&mut state, &headers);
    (status(state.me_status), Json(json!({"id": "user"})))
}

async fn token(
    State(shared): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, String) {
    let mut state = shared.lock().unwrap();
    state.token_calls += 1;
    state.token_forms.push(form);
    (status(state.token_status), state.token_body.clone())
}

async fn search(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let mut state = shared.lock().unwrap();
    state.search_calls += 1;
    record_bearer(&mut state, &headers);
    state.search_queries.push(query);
    (status(state.search_status), Json(state.search_body.clone()))
}

async fn append(
    State(shared): State<Shared>,
    Path(playlist_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = shared.lock().unwrap();
    state.append_calls += 1;
    record_bearer(&mut state, &headers);
    state.append_playlists.push(playlist_id);
    state.append_bodies.push(body);
    (status(state.append_status), Json(state.append_body.clone()))
}

/// In-process stand-in for the Spotify Accounts service and Web API.
pub struct FakeSpotify {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl FakeSpotify {
    pub async fn start(state: FakeState) -> Self {
        let shared = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me", get(me))
            .route("/v1/search", get(search))
            .route("/v1/playlists/{playlist_id}/tracks", post(append))
            .with_state(Arc::clone(&shared));

        let addr = serve(app).await;
        FakeSpotify {
            addr,
            state: shared,
        }
    }

    pub fn config(&self) -> Config {
        test_config(self.addr)
    }

    pub fn client(&self) -> SpotifyClient {
        SpotifyClient::new(Arc::new(self.config()))
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

pub fn test_config(spotify_addr: SocketAddr) -> Config {
    Config {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        redirect_uri: "http://127.0.0.1:5000/callback".to_string(),
        playlist_id: "playlist-1".to_string(),
        auth_url: "https://accounts.example.com/authorize".to_string(),
        token_url: format!("http://{}/api/token", spotify_addr),
        api_url: format!("http://{}/v1", spotify_addr),
        server_addr: "127.0.0.1:0".to_string(),
        session_secret: Some("test session secret".to_string()),
        cors_origins: Vec::new(),
    }
}

/// Address nothing listens on, for transport failure tests.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// The backend under test, served on an ephemeral port.
pub struct TestApp {
    pub base: String,
    pub http: reqwest::Client,
}

impl TestApp {
    pub async fn start(config: Config) -> Self {
        let addr = serve(server::router(AppState::new(config))).await;
        TestApp {
            base: format!("http://{}", addr),
            http: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .unwrap(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Runs the callback with `code` and returns the session cookie it set.
    pub async fn login(&self, code: &str) -> String {
        let res = self
            .http
            .get(self.url("/callback"))
            .query(&[("code", code)])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::SEE_OTHER);
        session_cookie(&res).expect("callback should set the session cookie")
    }
}

/// Extracts `name=value` of the session cookie from a response.
pub fn session_cookie(res: &reqwest::Response) -> Option<String> {
    res.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("spotify_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}
