use std::sync::Arc;

use axum::{
    Extension,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::{
    context::AppContext,
    error::Error,
    spotify::{player, playlists},
    success, warning,
};

pub async fn get_playlists(Extension(ctx): Extension<Arc<AppContext>>) -> Response {
    match playlists::list_playlists(&ctx).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => failure(e, "Failed to fetch playlists."),
    }
}

pub async fn get_queue(Extension(ctx): Extension<Arc<AppContext>>) -> Response {
    match player::get_queue(&ctx).await {
        Ok(queue) => Json(queue).into_response(),
        Err(e) => failure(e, "Failed to fetch queue."),
    }
}

pub async fn add_random_song_to_queue(
    Path(playlist_id): Path<String>,
    Extension(ctx): Extension<Arc<AppContext>>,
) -> Response {
    match player::add_random_track_to_queue(&ctx, &playlist_id).await {
        Ok(track) => {
            success!("Queued {} from playlist {}", track.name, playlist_id);
            "Random song added to queue successfully!".into_response()
        }
        Err(Error::EmptyPlaylist) => {
            Json(json!({ "error": "No tracks found in the playlist." })).into_response()
        }
        Err(e) => failure(e, "Failed to add song to queue."),
    }
}

pub async fn skip_to_next_song(Extension(ctx): Extension<Arc<AppContext>>) -> Response {
    match player::skip_to_next(&ctx).await {
        Ok(()) => "Skipped to next song successfully!".into_response(),
        Err(e) => failure(e, "Failed to skip to next song"),
    }
}

pub async fn pause_playback(Extension(ctx): Extension<Arc<AppContext>>) -> Response {
    match player::pause_playback(&ctx).await {
        Ok(()) => "Paused song successfully!".into_response(),
        Err(e) => failure(e, "Failed to pause song"),
    }
}

fn failure(err: Error, message: &str) -> Response {
    warning!("{} {}", message, err);

    if err.is_auth_error() {
        return (
            StatusCode::UNAUTHORIZED,
            "Not authenticated with Spotify. Please log in first.",
        )
            .into_response();
    }

    let status = match err {
        Error::RemoteApi { status_code } => {
            StatusCode::from_u16(status_code).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        _ => StatusCode::BAD_GATEWAY,
    };
    (status, message.to_string()).into_response()
}
