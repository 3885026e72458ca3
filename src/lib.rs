//! Spotify True Shuffle Library
//!
//! This library implements the core of a small Spotify companion: the OAuth
//! authorization-code flow with token lifecycle management, a local HTTP
//! callback server, and a handful of playback actions such as queueing a
//! uniformly random track from one of the user's playlists.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local callback and action server
//! - `cli` - Command-line front-end implementations
//! - `config` - Configuration management and environment variables
//! - `context` - The application context shared by every operation
//! - `error` - Error taxonomy of the core
//! - `management` - Credential file and in-memory token store
//! - `server` - Local HTTP server wiring
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use trueshuffle::{config, context::AppContext};
//!
//! #[tokio::main]
//! async fn main() -> trueshuffle::error::Result<()> {
//!     config::load_env().await.ok();
//!     let ctx = Arc::new(AppContext::new(config::Settings::from_env())?);
//!     trueshuffle::server::start_api_server(ctx).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Used for general information and status updates throughout the
/// application, including request handling in the local server.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error to stderr and exits with code 1.
///
/// Only the CLI front-end uses this; the core and the server handlers return
/// errors instead. Evaluates to `!`, so it can end a `match` arm.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning to stderr with a yellow exclamation mark.
///
/// Used for recoverable issues, such as a failed remote call inside a
/// request handler or a browser that could not be opened.
///
/// # Example
///
/// ```
/// warning!("Token exchange failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
