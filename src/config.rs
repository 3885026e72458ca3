//! Configuration management for Spotify True Shuffle.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Every value has a built-in default, so the
//! application runs without any configuration apart from the API credentials,
//! which live in their own two-line file (see [`crate::management::CredentialStore`]).
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

/// Name of the application directory below the platform local data directory.
pub const APP_DIR: &str = "trueshuffle";

/// Permissions requested during authorization: read/write playback and playlist access.
pub const SCOPES: &[&str] = &[
    "user-read-private",
    "user-read-email",
    "user-modify-playback-state",
    "user-read-currently-playing",
    "user-read-playback-state",
    "playlist-read-private",
    "playlist-read-collaborative",
];

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:5000/callback";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Runtime settings resolved once at startup and owned by the application context.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub credentials_path: PathBuf,
    pub request_timeout: Duration,
}

impl Settings {
    /// Resolves every setting from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            server_addr: server_addr(),
            redirect_uri: spotify_redirect_uri(),
            scope: spotify_scope(),
            auth_url: spotify_apiauth_url(),
            token_url: spotify_apitoken_url(),
            api_url: spotify_apiurl(),
            credentials_path: credentials_path(),
            request_timeout: request_timeout(),
        }
    }
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the application directory if it doesn't exist and loads variables
/// from `trueshuffle/.env` below the platform-specific local data directory:
/// - Linux: `~/.local/share/trueshuffle/.env`
/// - macOS: `~/Library/Application Support/trueshuffle/.env`
/// - Windows: `%LOCALAPPDATA%/trueshuffle/.env`
///
/// A missing `.env` file is fine; all settings have defaults.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the application directory inside the platform local data directory.
pub fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Returns the address the local callback server binds to (`SERVER_ADDRESS`).
///
/// Must be reachable at the redirect URI registered with Spotify.
pub fn server_addr() -> String {
    env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the OAuth redirect URI (`SPOTIFY_API_REDIRECT_URI`).
pub fn spotify_redirect_uri() -> String {
    env_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Returns the space-delimited scope list (`SPOTIFY_API_AUTH_SCOPE`).
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|_| SCOPES.join(" "))
}

/// Returns the Spotify OAuth authorization URL (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    env_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify OAuth token exchange URL (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    env_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    env_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns the path of the two-line credentials file (`TRUESHUFFLE_CREDENTIALS_FILE`).
pub fn credentials_path() -> PathBuf {
    match env::var("TRUESHUFFLE_CREDENTIALS_FILE") {
        Ok(path) => PathBuf::from(path),
        Err(_) => app_dir().join("config.conf"),
    }
}

/// Returns the timeout applied to every outgoing request (`TRUESHUFFLE_REQUEST_TIMEOUT_SECS`).
pub fn request_timeout() -> Duration {
    let secs = env::var("TRUESHUFFLE_REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
