//! Tests for client configuration.

use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use meta_tictactoe::{API_URL_ENV, ClientConfig, DEFAULT_API_URL, Player, normalize_api_url};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.api_url(), DEFAULT_API_URL);
    assert_eq!(*config.starting_player(), Player::X);
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
}

#[test]
fn test_trailing_slashes_are_trimmed() {
    let config = ClientConfig::new("https://games.example.com/api//").unwrap();
    assert_eq!(config.api_url(), "https://games.example.com/api");
}

#[test]
fn test_rejects_non_http_urls() {
    assert!(normalize_api_url("localhost:8000").is_err());
    assert!(normalize_api_url("ftp://example.com").is_err());
    assert!(normalize_api_url("http://").is_err());
    assert!(normalize_api_url("").is_err());
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::from_file(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, ClientConfig::default());
}

#[test]
fn test_loads_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "api_url = \"http://10.0.0.5:9000/\"\nstarting_player = \"O\"\nrequest_timeout_ms = 2500"
    )
    .unwrap();

    let config = ClientConfig::from_file(file.path()).unwrap();
    assert_eq!(config.api_url(), "http://10.0.0.5:9000");
    assert_eq!(*config.starting_player(), Player::O);
    assert_eq!(config.request_timeout(), Duration::from_millis(2500));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "starting_player = \"O\"").unwrap();

    let config = ClientConfig::from_file(file.path()).unwrap();
    assert_eq!(config.api_url(), DEFAULT_API_URL);
    assert_eq!(*config.starting_player(), Player::O);
}

#[test]
fn test_bad_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "api_url = \"not a url\"").unwrap();
    let err = ClientConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("http(s)"));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "colour = \"blue\"").unwrap();
    let err = ClientConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "request_timeout_ms = 0").unwrap();

    let err = ClientConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("request_timeout_ms"));
}

#[test]
fn test_environment_overrides_file() {
    let config = ClientConfig::default()
        .apply_env(env(&[(API_URL_ENV, "http://staging:8000/")]))
        .unwrap();
    assert_eq!(config.api_url(), "http://staging:8000");
}

#[test]
fn test_blank_environment_is_ignored() {
    let config = ClientConfig::default()
        .apply_env(env(&[(API_URL_ENV, "   ")]))
        .unwrap();
    assert_eq!(config.api_url(), DEFAULT_API_URL);

    let config = ClientConfig::default().apply_env(env(&[])).unwrap();
    assert_eq!(config.api_url(), DEFAULT_API_URL);
}

#[test]
fn test_setters() {
    let config = ClientConfig::default()
        .with_starting_player(Player::O)
        .with_request_timeout_ms(50);
    assert_eq!(*config.starting_player(), Player::O);
    assert_eq!(config.request_timeout(), Duration::from_millis(50));
}
