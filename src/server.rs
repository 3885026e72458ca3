use axum::{
    Extension, Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::{api, context::AppContext, error::Result, info};

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/callback", get(api::callback))
        .route(api::SUCCESS_PAGE, get(api::success_webpage))
        .route(api::FAILED_PAGE, get(api::failed_webpage))
        .route("/check_authentication", get(api::check_authentication))
        .route("/health", get(api::health))
        .route("/playlists", get(api::get_playlists))
        .route("/get_queue", get(api::get_queue))
        .route(
            "/add_random_song_to_queue/{playlist_id}",
            post(api::add_random_song_to_queue),
        )
        .route("/skip_to_next_song", post(api::skip_to_next_song))
        .route("/pause_playback", put(api::pause_playback))
        .layer(Extension(ctx))
}

/// Binds the callback listener. Fails with [`crate::error::Error::Io`] when
/// the address is taken, e.g. by a running `trueshuffle serve`.
pub async fn bind_api_server(addr: &str) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    Ok(listener)
}

/// Serves on an already bound listener until the process ends.
pub async fn serve_api(listener: TcpListener, ctx: Arc<AppContext>) -> Result<()> {
    axum::serve(listener, router(ctx)).await?;
    Ok(())
}

/// Binds the configured server address and serves until the process ends.
pub async fn start_api_server(ctx: Arc<AppContext>) -> Result<()> {
    let listener = bind_api_server(&ctx.settings.server_addr).await?;
    serve_api(listener, ctx).await
}
