//! The local HTTP server end to end: real listener, mocked Spotify.

mod common;

use std::sync::Arc;

use reqwest::{Client, StatusCode, header::LOCATION, redirect::Policy};
use serde_json::{Value, json};
use tempfile::TempDir;
use trueshuffle::{context::AppContext, error::Error, server, types::AuthState};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestServer {
    base: String,
    client: Client,
    ctx: Arc<AppContext>,
    _dir: TempDir,
}

async fn spawn(ctx: AppContext, dir: TempDir) -> TestServer {
    let ctx = Arc::new(ctx);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = server::router(Arc::clone(&ctx));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base: format!("http://{}", addr),
        client: Client::builder().redirect(Policy::none()).build().unwrap(),
        ctx,
        _dir: dir,
    }
}

impl TestServer {
    async fn get(&self, route: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base, route))
            .send()
            .await
            .unwrap()
    }

    async fn is_authenticated(&self) -> bool {
        let body: Value = self.get("/check_authentication").await.json().await.unwrap();
        body["success"].as_bool().unwrap()
    }
}

fn location(res: &reqwest::Response) -> String {
    res.headers()[LOCATION].to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_check_authentication_reflects_token_store() {
    let (ctx, dir) = common::context("http://127.0.0.1:9").await;
    let srv = spawn(ctx, dir).await;

    assert!(!srv.is_authenticated().await);

    srv.ctx
        .tokens
        .insert(common::record("access-1", "refresh-1", 3600))
        .await;
    assert!(srv.is_authenticated().await);
}

#[tokio::test]
async fn test_home_without_credentials() {
    let dir = TempDir::new().unwrap();
    let ctx = AppContext::new(common::settings("http://127.0.0.1:9", dir.path())).unwrap();
    let srv = spawn(ctx, dir).await;

    let res = srv.get("/").await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_home_redirects_to_authorization_page() {
    let (ctx, dir) = common::context("http://127.0.0.1:9").await;
    let srv = spawn(ctx, dir).await;

    let res = srv.get("/").await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let target = location(&res);
    assert!(target.starts_with("http://127.0.0.1:9/authorize?response_type=code"));
    assert!(target.contains(common::CLIENT_ID));
    assert_eq!(srv.ctx.auth_state().await, AuthState::AwaitingCallback);
}

#[tokio::test]
async fn test_callback_denied_redirects_to_failure_page() {
    let spotify = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&spotify)
        .await;

    let (ctx, dir) = common::context(&spotify.uri()).await;
    let srv = spawn(ctx, dir).await;

    let res = srv.get("/callback?error=access_denied").await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/failed_webpage");
    assert!(!srv.is_authenticated().await);

    let page = srv.get("/failed_webpage").await.text().await.unwrap();
    assert!(page.contains("Failed to authenticate to Spotify"));
}

#[tokio::test]
async fn test_callback_with_code_logs_in() {
    let spotify = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "token_type": "Bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-1"
        })))
        .expect(1)
        .mount(&spotify)
        .await;

    let (ctx, dir) = common::context(&spotify.uri()).await;
    let srv = spawn(ctx, dir).await;

    let res = srv.get("/callback?code=abc").await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/success_webpage");
    assert!(srv.is_authenticated().await);
    assert_eq!(srv.ctx.auth_state().await, AuthState::Authenticated);

    let page = srv.get("/success_webpage").await.text().await.unwrap();
    assert!(page.contains("Successfully Authenticated to Spotify!"));
}

#[tokio::test]
async fn test_actions_before_login_are_unauthorized() {
    let (ctx, dir) = common::context("http://127.0.0.1:9").await;
    let srv = spawn(ctx, dir).await;

    let res = srv.get("/playlists").await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = srv
        .client
        .post(format!("{}/skip_to_next_song", srv.base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.text().await.unwrap(),
        "Not authenticated with Spotify. Please log in first."
    );
}

#[tokio::test]
async fn test_add_random_song_route() {
    let spotify = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/pl1/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::tracks_page(0, 12)))
        .expect(1)
        .mount(&spotify)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/me/player/queue"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&spotify)
        .await;

    let (ctx, dir) = common::authenticated_context(&spotify.uri()).await;
    let srv = spawn(ctx, dir).await;

    let res = srv
        .client
        .post(format!("{}/add_random_song_to_queue/pl1", srv.base))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.text().await.unwrap(),
        "Random song added to queue successfully!"
    );
}

#[tokio::test]
async fn test_add_random_song_from_empty_playlist() {
    let spotify = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/empty/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::tracks_page(0, 0)))
        .mount(&spotify)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/me/player/queue"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&spotify)
        .await;

    let (ctx, dir) = common::authenticated_context(&spotify.uri()).await;
    let srv = spawn(ctx, dir).await;

    let res = srv
        .client
        .post(format!("{}/add_random_song_to_queue/empty", srv.base))
        .send()
        .await
        .unwrap();

    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "No tracks found in the playlist." }));
}

#[tokio::test]
async fn test_remote_status_is_passed_through() {
    let spotify = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/me/player/pause"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&spotify)
        .await;

    let (ctx, dir) = common::authenticated_context(&spotify.uri()).await;
    let srv = spawn(ctx, dir).await;

    let res = srv
        .client
        .put(format!("{}/pause_playback", srv.base))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Failed to pause song");
}

#[tokio::test]
async fn test_bind_fails_when_address_is_taken() {
    let holder = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = holder.local_addr().unwrap().to_string();

    let result = server::bind_api_server(&addr).await;

    match result {
        Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::AddrInUse),
        other => panic!("Expected AddrInUse, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_get_queue_route_passes_local_files_through() {
    let spotify = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/player/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "queue": [{ "id": "abc" }, { "id": null, "is_local": true }]
        })))
        .mount(&spotify)
        .await;

    let (ctx, dir) = common::authenticated_context(&spotify.uri()).await;
    let srv = spawn(ctx, dir).await;

    let res = srv.get("/get_queue").await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!([{ "id": "abc" }, { "id": null }]));
}

#[tokio::test]
async fn test_health() {
    let (ctx, dir) = common::context("http://127.0.0.1:9").await;
    let srv = spawn(ctx, dir).await;

    let body: Value = srv.get("/health").await.json().await.unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["authenticated"], false);
}
