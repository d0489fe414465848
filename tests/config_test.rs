use std::collections::HashMap;

use playlist_backend::config::{
    Config, ConfigError, DEFAULT_API_URL, DEFAULT_AUTH_URL, DEFAULT_TOKEN_URL,
};

fn required_vars() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("SPOTIFY_API_AUTH_CLIENT_ID", "id"),
        ("SPOTIFY_API_AUTH_CLIENT_SECRET", "secret"),
        ("SPOTIFY_API_REDIRECT_URI", "https://backend.example.com/callback"),
        ("SPOTIFY_PLAYLIST_ID", "playlist"),
    ])
}

fn load(vars: &HashMap<&'static str, &'static str>) -> Result<Config, ConfigError> {
    Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
}

#[test]
fn test_defaults_are_applied() {
    let config = load(&required_vars()).unwrap();

    assert_eq!(config.client_id, "id");
    assert_eq!(config.client_secret, "secret");
    assert_eq!(config.playlist_id, "playlist");
    assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
    assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.server_addr, "0.0.0.0:5000");
    assert_eq!(config.session_secret, None);
    assert!(config.cors_origins.is_empty());
    assert!(config.secure_cookies());
}

#[test]
fn test_port_and_server_address() {
    let mut vars = required_vars();
    vars.insert("PORT", "8080");
    assert_eq!(load(&vars).unwrap().server_addr, "0.0.0.0:8080");

    vars.insert("SERVER_ADDRESS", "127.0.0.1:9000");
    assert_eq!(load(&vars).unwrap().server_addr, "127.0.0.1:9000");
}

#[test]
fn test_invalid_port_is_rejected() {
    let mut vars = required_vars();
    vars.insert("PORT", "eighty");

    match load(&vars) {
        Err(ConfigError::Invalid { name, .. }) => assert_eq!(name, "PORT"),
        other => panic!("expected invalid PORT, got {:?}", other),
    }
}

#[test]
fn test_missing_and_empty_required_values() {
    for name in [
        "SPOTIFY_API_AUTH_CLIENT_ID",
        "SPOTIFY_API_AUTH_CLIENT_SECRET",
        "SPOTIFY_API_REDIRECT_URI",
        "SPOTIFY_PLAYLIST_ID",
    ] {
        let mut vars = required_vars();
        vars.remove(name);
        assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing(name));

        vars.insert(name, "  ");
        assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing(name));
    }
}

#[test]
fn test_overrides_and_api_base() {
    let mut vars = required_vars();
    vars.insert("SPOTIFY_API_URL", "http://localhost:9999/v1/");
    vars.insert("SPOTIFY_API_REDIRECT_URI", "http://localhost:5000/callback");
    vars.insert("SESSION_SECRET", "s3cret");

    let config = load(&vars).unwrap();
    assert_eq!(config.api_base(), "http://localhost:9999/v1");
    assert_eq!(config.session_secret.as_deref(), Some("s3cret"));
    assert!(!config.secure_cookies());
}

#[test]
fn test_missing_error_message_names_variable() {
    let err = ConfigError::Missing("SPOTIFY_PLAYLIST_ID");
    assert_eq!(err.to_string(), "SPOTIFY_PLAYLIST_ID must be set");
}

#[test]
fn test_cors_origins_are_split_and_trimmed() {
    let mut vars = required_vars();
    vars.insert(
        "CORS_ALLOWED_ORIGINS",
        "https://playlist.example.com/, http://localhost:3000 ,,",
    );

    let config = load(&vars).unwrap();
    assert_eq!(
        config.cors_origins,
        vec![
            "https://playlist.example.com".to_string(),
            "http://localhost:3000".to_string()
        ]
    );
}
