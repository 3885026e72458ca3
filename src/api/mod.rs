//! # API Module
//!
//! HTTP handlers of the local server. The server is the target of Spotify's
//! authorization redirect and, once the user is logged in, keeps serving the
//! playback action endpoints for the lifetime of the process.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`home`] - Redirects to Spotify's authorization page
//! - [`callback`] - Receives the authorization code (or error) and completes
//!   the flow, then redirects to [`success_webpage`] or [`failed_webpage`]
//! - [`check_authentication`] - `{"success": bool}`
//!
//! ### Playback Actions
//!
//! - [`get_playlists`] - The user's playlists as `{id, name, images}`
//! - [`get_queue`] - The playback queue as `{id}` entries
//! - [`add_random_song_to_queue`] - Queues a random track of a playlist
//! - [`skip_to_next_song`] / [`pause_playback`] - Player control
//!
//! Action endpoints answer with short plaintext messages. A request made
//! before login gets `401`; a failed Spotify call is answered with Spotify's
//! status code.
//!
//! ### Monitoring
//!
//! - [`health`] - Status, version and whether a token is present
//!
//! All handlers take the shared [`crate::context::AppContext`] through an
//! axum `Extension`.

mod callback;
mod health;
mod player;

pub use callback::{
    FAILED_PAGE, SUCCESS_PAGE, callback, check_authentication, failed_webpage, home,
    success_webpage,
};
pub use health::health;
pub use player::{
    add_random_song_to_queue, get_playlists, get_queue, pause_playback, skip_to_next_song,
};
