use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::{
    error::{Error, Result},
    utils,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    /// Builds credentials, rejecting values that are not exactly 32 characters.
    ///
    /// Surrounding whitespace is trimmed before the length check, so a pasted
    /// id with a trailing space or newline is accepted and stored trimmed.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let client_id = client_id.into().trim().to_string();
        let client_secret = client_secret.into().trim().to_string();

        if !utils::is_valid_credential(&client_id) || !utils::is_valid_credential(&client_secret) {
            return Err(Error::InvalidCredentials);
        }

        Ok(Self {
            client_id,
            client_secret,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Absolute expiry for a token that lives `expires_in` seconds from now.
///
/// Returns `None` for a non-positive lifetime or one that does not fit in a
/// timestamp.
pub fn expiry_after(expires_in: i64) -> Option<DateTime<Utc>> {
    if expires_in <= 0 {
        return None;
    }
    let lifetime = TimeDelta::try_seconds(expires_in)?;
    Utc::now().checked_add_signed(lifetime)
}

/// Result of a successful refresh. The provider may rotate the refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
}

/// Raw body of the token endpoint. Every field is optional because the
/// provider answers errors with the same status family and a different shape.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl TokenResponse {
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| match &self.error_description {
            Some(desc) => format!("{}: {}", e, desc),
            None => e.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    AwaitingCallback,
    Authenticated,
    Failed(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<PlaylistSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueItem {
    /// `null` for local files.
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetQueueResponse {
    #[serde(default)]
    pub queue: Vec<QueueItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    #[serde(default)]
    pub items: Vec<PlaylistTrackItem>,
}

/// Number of random tracks a single shuffle request enqueues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleAmount(u8);

impl ShuffleAmount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 25;

    pub fn new(amount: i64) -> Result<Self> {
        if amount < Self::MIN as i64 {
            return Err(Error::InvalidShuffleAmount(format!(
                "{} is less than {}",
                amount,
                Self::MIN
            )));
        }
        if amount > Self::MAX as i64 {
            return Err(Error::InvalidShuffleAmount(format!(
                "{} is greater than {}",
                amount,
                Self::MAX
            )));
        }
        Ok(Self(amount as u8))
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for ShuffleAmount {
    fn default() -> Self {
        Self(1)
    }
}
