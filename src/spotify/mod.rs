//! # Spotify Integration Module
//!
//! This module is the integration layer between the application and the
//! Spotify Web API. It implements the OAuth 2.0 authorization-code flow and
//! the playback actions the application offers.
//!
//! ## Architecture
//!
//! ```text
//! Front-ends (CLI, local HTTP server)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code, refresh)
//!     ├── Playlist Operations (list, exhaustive track fetch)
//!     └── Player Operations (queue, random enqueue, skip, pause)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - Authorization URL, callback handling, code exchange, token
//!   refresh and waiting for the flow to finish
//! - [`playlists`] - The user's playlists and offset-paginated track listing
//! - [`player`] - Queue inspection, random track enqueueing, skip and pause
//!
//! ## Request Policy
//!
//! Every playback action first asks the application context for a valid
//! token; when nobody has logged in it fails with
//! [`Error::NotAuthenticated`] before any request is made. All remote calls
//! are single-attempt: there is no retry on transient failures, the user
//! retries manually. A non-success status becomes [`Error::RemoteApi`]
//! carrying the status code. The shared client applies the configured
//! request timeout.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Code exchange and token refresh
//! - `GET /me/playlists` - The user's playlists (first page)
//! - `GET /playlists/{id}/tracks` - Playlist tracks, `limit=100` pages
//! - `GET /me/player/queue` - Current playback queue
//! - `POST /me/player/queue` - Add a track to the queue
//! - `POST /me/player/next` - Skip to next track
//! - `PUT /me/player/pause` - Pause playback

pub mod auth;
pub mod player;
pub mod playlists;

use reqwest::Url;

use crate::{
    context::AppContext,
    error::{Error, Result},
};

/// Fetches a valid token for a playback action, turning an empty token
/// store into [`Error::NotAuthenticated`].
pub(crate) async fn access_token(ctx: &AppContext) -> Result<String> {
    ctx.valid_token().await.map_err(|e| match e {
        Error::NoToken => Error::NotAuthenticated,
        other => other,
    })
}

/// Appends percent-encoded path segments to the API base URL.
pub(crate) fn endpoint(api_url: &str, segments: &[&str]) -> Result<Url> {
    let invalid = || Error::InvalidUrl(api_url.to_string());

    let mut url = Url::parse(api_url).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
