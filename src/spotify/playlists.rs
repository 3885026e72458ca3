use reqwest::StatusCode;

use crate::{
    context::AppContext,
    error::{Error, Result},
    types::{GetUserPlaylistsResponse, PlaylistSummary, PlaylistTracksResponse, Track},
};

use super::{access_token, endpoint};

/// Page size used when walking a playlist's tracks. Spotify's maximum.
pub const TRACKS_PAGE_SIZE: usize = 100;

/// Retrieves the current user's playlists.
///
/// Only the first page returned by Spotify is read; further pages are not
/// followed.
///
/// # Errors
///
/// - [`Error::NotAuthenticated`] if no one has logged in (no request is made)
/// - [`Error::RemoteApi`] for any status other than 200 OK
pub async fn list_playlists(ctx: &AppContext) -> Result<Vec<PlaylistSummary>> {
    let token = access_token(ctx).await?;

    let api_url = format!("{uri}/me/playlists", uri = &ctx.settings.api_url);
    let res = ctx.http.get(&api_url).bearer_auth(token).send().await?;

    if res.status() != StatusCode::OK {
        return Err(Error::RemoteApi {
            status_code: res.status().as_u16(),
        });
    }

    let body = res.json::<GetUserPlaylistsResponse>().await?;
    Ok(body.items)
}

/// Fetches every track of a playlist using offset pagination.
///
/// Requests pages of [`TRACKS_PAGE_SIZE`] until a page comes back empty or
/// shorter than the page size. Items whose track is `null` (removed or
/// unavailable tracks) are skipped but still count towards the page length.
///
/// The playlist id is percent-encoded as a single path segment.
///
/// # Errors
///
/// - [`Error::RemoteApi`] as soon as any page request is not 200 OK
/// - [`Error::InvalidUrl`] if the configured API base cannot take path segments
pub async fn fetch_all_playlist_tracks(
    ctx: &AppContext,
    token: &str,
    playlist_id: &str,
) -> Result<Vec<Track>> {
    let api_url = endpoint(&ctx.settings.api_url, &["playlists", playlist_id, "tracks"])?;

    let mut tracks: Vec<Track> = Vec::new();
    let mut offset = 0;

    loop {
        let res = ctx
            .http
            .get(api_url.clone())
            .bearer_auth(token)
            .query(&[("limit", TRACKS_PAGE_SIZE), ("offset", offset)])
            .send()
            .await?;

        if res.status() != StatusCode::OK {
            return Err(Error::RemoteApi {
                status_code: res.status().as_u16(),
            });
        }

        let page = res.json::<PlaylistTracksResponse>().await?;
        let page_len = page.items.len();
        tracks.extend(page.items.into_iter().filter_map(|item| item.track));

        if page_len < TRACKS_PAGE_SIZE {
            break;
        }
        offset += TRACKS_PAGE_SIZE;
    }

    Ok(tracks)
}
