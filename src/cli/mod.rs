//! # CLI Module
//!
//! The command-line front-end. It stands in for a graphical companion app:
//! every command goes through the same core functions the local HTTP server
//! uses, and prints results with the crate's status macros.
//!
//! ## Commands
//!
//! - [`credentials`] - Save or show the Spotify API client id and secret
//! - [`serve`] - Run the local callback/action server in the foreground
//! - [`playlists`] - Log in and list the user's playlists
//! - [`shuffle`] - Log in and queue random tracks from a playlist
//! - [`skip`] / [`pause`] - Log in and control playback
//!
//! One-shot commands authorize through [`authenticate`]: tokens are
//! held in memory only, so each invocation logs in anew.
//!
//! ## Usage Patterns
//!
//! ```bash
//! trueshuffle credentials --client-id <ID> --client-secret <SECRET>
//! trueshuffle playlists
//! trueshuffle shuffle 37i9dQZF1DXcBWIGoYBM5M --amount 5
//! trueshuffle serve
//! ```

mod auth;
mod credentials;
mod player;
mod playlist;
mod serve;

pub use auth::authenticate;
pub use credentials::credentials;
pub use player::{pause, shuffle, skip};
pub use playlist::playlists;
pub use serve::serve;
