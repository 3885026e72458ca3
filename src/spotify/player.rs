use reqwest::{StatusCode, header::CONTENT_LENGTH};

use crate::{
    context::AppContext,
    error::{Error, Result},
    types::{GetQueueResponse, QueueItem, ShuffleAmount, Track},
    utils,
};

use super::{access_token, playlists};

/// Retrieves the identifiers of the tracks currently in the playback queue.
///
/// # Errors
///
/// - [`Error::NotAuthenticated`] if no one has logged in
/// - [`Error::RemoteApi`] for any status other than 200 OK
pub async fn get_queue(ctx: &AppContext) -> Result<Vec<QueueItem>> {
    let token = access_token(ctx).await?;

    let api_url = format!("{uri}/me/player/queue", uri = &ctx.settings.api_url);
    let res = ctx.http.get(&api_url).bearer_auth(token).send().await?;

    if res.status() != StatusCode::OK {
        return Err(Error::RemoteApi {
            status_code: res.status().as_u16(),
        });
    }

    let body = res.json::<GetQueueResponse>().await?;
    Ok(body.queue)
}

/// Adds one uniformly random track of a playlist to the playback queue.
///
/// # Process
///
/// 1. **Exhaustive fetch**: every page of the playlist is read, so each track
///    has the same chance of being picked regardless of its position
/// 2. **Selection**: the full set is shuffled and one track is chosen
/// 3. **Enqueue**: a single queue request is issued for the track's URI
///
/// Returns the queued track.
///
/// # Errors
///
/// - [`Error::NotAuthenticated`] if no one has logged in
/// - [`Error::EmptyPlaylist`] if the playlist has no tracks; nothing is queued
/// - [`Error::RemoteApi`] if fetching a page or queueing fails
pub async fn add_random_track_to_queue(ctx: &AppContext, playlist_id: &str) -> Result<Track> {
    let token = access_token(ctx).await?;
    let mut tracks = playlists::fetch_all_playlist_tracks(ctx, &token, playlist_id).await?;

    let track = {
        let mut rng = rand::rng();
        utils::pick_random(&mut tracks, &mut rng).cloned()
    }
    .ok_or(Error::EmptyPlaylist)?;

    enqueue(ctx, &token, &track.uri).await?;
    Ok(track)
}

/// Adds `amount` random tracks of a playlist to the playback queue.
///
/// The playlist is fetched once; every pick is independent and uniform over
/// all of its tracks, so the same track may be queued more than once.
/// Queueing stops at the first failure.
///
/// # Errors
///
/// Same as [`add_random_track_to_queue`].
pub async fn add_random_tracks_to_queue(
    ctx: &AppContext,
    playlist_id: &str,
    amount: ShuffleAmount,
) -> Result<Vec<Track>> {
    let token = access_token(ctx).await?;
    let mut tracks = playlists::fetch_all_playlist_tracks(ctx, &token, playlist_id).await?;

    if tracks.is_empty() {
        return Err(Error::EmptyPlaylist);
    }

    let picks = {
        let mut rng = rand::rng();
        utils::pick_random_many(&mut tracks, amount.get(), &mut rng)
    };

    for track in &picks {
        enqueue(ctx, &token, &track.uri).await?;
    }

    Ok(picks)
}

/// Skips to the next track. Only 204 No Content counts as success.
pub async fn skip_to_next(ctx: &AppContext) -> Result<()> {
    let token = access_token(ctx).await?;

    let api_url = format!("{uri}/me/player/next", uri = &ctx.settings.api_url);
    let res = ctx
        .http
        .post(&api_url)
        .bearer_auth(token)
        .header(CONTENT_LENGTH, 0)
        .send()
        .await?;

    expect_no_content(res.status())
}

/// Pauses playback. Only 204 No Content counts as success.
pub async fn pause_playback(ctx: &AppContext) -> Result<()> {
    let token = access_token(ctx).await?;

    let api_url = format!("{uri}/me/player/pause", uri = &ctx.settings.api_url);
    let res = ctx
        .http
        .put(&api_url)
        .bearer_auth(token)
        .header(CONTENT_LENGTH, 0)
        .send()
        .await?;

    expect_no_content(res.status())
}

async fn enqueue(ctx: &AppContext, token: &str, track_uri: &str) -> Result<()> {
    let api_url = format!("{uri}/me/player/queue", uri = &ctx.settings.api_url);
    let res = ctx
        .http
        .post(&api_url)
        .bearer_auth(token)
        .query(&[("uri", track_uri)])
        .header(CONTENT_LENGTH, 0)
        .send()
        .await?;

    // Spotify has answered both 200 and 204 here over time.
    if !res.status().is_success() {
        return Err(Error::RemoteApi {
            status_code: res.status().as_u16(),
        });
    }
    Ok(())
}

fn expect_no_content(status: StatusCode) -> Result<()> {
    if status == StatusCode::NO_CONTENT {
        Ok(())
    } else {
        Err(Error::RemoteApi {
            status_code: status.as_u16(),
        })
    }
}
