#![allow(dead_code)]

use std::{path::Path, time::Duration};

use chrono::Utc;
use serde_json::{Value, json};
use tempfile::TempDir;
use trueshuffle::{
    config::{self, Settings},
    context::AppContext,
    types::TokenRecord,
};

pub const CLIENT_ID: &str = "0123456789abcdef0123456789abcdef";
pub const CLIENT_SECRET: &str = "fedcba9876543210fedcba9876543210";
pub const REDIRECT_URI: &str = "http://localhost:5000/callback";

// Settings pointing every Spotify endpoint at a mock server
pub fn settings(base_url: &str, dir: &Path) -> Settings {
    Settings {
        server_addr: "127.0.0.1:0".to_string(),
        redirect_uri: REDIRECT_URI.to_string(),
        scope: config::SCOPES.join(" "),
        auth_url: format!("{}/authorize", base_url),
        token_url: format!("{}/api/token", base_url),
        api_url: format!("{}/v1", base_url),
        credentials_path: dir.join("config.conf"),
        request_timeout: Duration::from_secs(5),
    }
}

// Context with saved credentials; keep the TempDir alive for the test's duration
pub async fn context(base_url: &str) -> (AppContext, TempDir) {
    let dir = TempDir::new().unwrap();
    let ctx = AppContext::new(settings(base_url, dir.path())).unwrap();
    ctx.update_credentials(CLIENT_ID, CLIENT_SECRET)
        .await
        .unwrap();
    (ctx, dir)
}

// Context that is already logged in with a token valid for an hour
pub async fn authenticated_context(base_url: &str) -> (AppContext, TempDir) {
    let (ctx, dir) = context(base_url).await;
    ctx.tokens.insert(record("access-1", "refresh-1", 3600)).await;
    (ctx, dir)
}

pub fn record(access: &str, refresh: &str, expires_in_secs: i64) -> TokenRecord {
    TokenRecord {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
        expires_at: Utc::now() + chrono::Duration::seconds(expires_in_secs),
    }
}

// One page of playlist items with tracks numbered from `offset`
pub fn tracks_page(offset: usize, count: usize) -> Value {
    let items: Vec<Value> = (offset..offset + count)
        .map(|i| {
            json!({
                "track": {
                    "id": format!("track{}", i),
                    "name": format!("Track {}", i),
                    "uri": format!("spotify:track:track{}", i),
                }
            })
        })
        .collect();
    json!({ "items": items, "limit": 100, "offset": offset })
}
