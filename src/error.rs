//! Error types for the authorization, token and playback core.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The token store is empty; nothing has been authorized yet.
    #[error("No access token available")]
    NoToken,

    /// A playback action was requested before the user logged in.
    #[error("Not authenticated with Spotify")]
    NotAuthenticated,

    #[error("Spotify API responded with status {status_code}")]
    RemoteApi { status_code: u16 },

    /// The playlist has no playable tracks. Recoverable, not a remote failure.
    #[error("No tracks found in the playlist")]
    EmptyPlaylist,

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Token refresh failed: {0}")]
    TokenRefresh(String),

    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    #[error("Timed out waiting for the authorization callback")]
    AuthorizationTimeout,

    #[error("No API credentials configured")]
    MissingCredentials,

    #[error("Client id and client secret must both be exactly 32 characters")]
    InvalidCredentials,

    #[error("Invalid shuffle amount: {0}")]
    InvalidShuffleAmount(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error means the caller has to (re)authorize before retrying.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::NoToken
                | Error::NotAuthenticated
                | Error::TokenRefresh(_)
                | Error::MissingCredentials
        )
    }
}
