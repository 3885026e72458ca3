use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    context::AppContext,
    error,
    error::Error,
    spotify::player,
    success,
    types::ShuffleAmount,
    warning,
};

use super::auth::authenticate;

/// Queues `amount` random tracks of a playlist.
///
/// Shows a spinner while the playlist is fetched page by page and the picks
/// are queued. An empty playlist is reported as a warning, not a failure.
pub async fn shuffle(ctx: Arc<AppContext>, playlist_id: String, amount: ShuffleAmount) {
    authenticate(Arc::clone(&ctx)).await;

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Queueing {} random track(s)...", amount.get()));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = player::add_random_tracks_to_queue(&ctx, &playlist_id, amount).await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) => {
            for track in &tracks {
                success!("Queued {}", track.name);
            }
            success!("Random song(s) added to queue successfully!");
        }
        Err(Error::EmptyPlaylist) => warning!("No tracks found in playlist {}", playlist_id),
        Err(e) => error!("Failed to add song to queue: {}", e),
    }
}

pub async fn skip(ctx: Arc<AppContext>) {
    authenticate(Arc::clone(&ctx)).await;

    match player::skip_to_next(&ctx).await {
        Ok(()) => success!("Skipped to next song successfully!"),
        Err(e) => error!("Failed to skip to next song: {}", e),
    }
}

pub async fn pause(ctx: Arc<AppContext>) {
    authenticate(Arc::clone(&ctx)).await;

    match player::pause_playback(&ctx).await {
        Ok(()) => success!("Paused song successfully!"),
        Err(e) => error!("Failed to pause song: {}", e),
    }
}
