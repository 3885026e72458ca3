use std::{collections::HashMap, future::Future};

use tokio::sync::Mutex;

use crate::{
    error::{Error, Result},
    types::{self, RefreshedToken, TokenRecord},
};

/// In-memory token store keyed by the access token obtained at login.
///
/// Only one record is meaningfully used at a time. When several exist,
/// [`TokenManager::get_valid_token`] takes whichever the map yields first,
/// so logging in with more than one account at once is not supported.
pub struct TokenManager {
    tokens: Mutex<HashMap<String, TokenRecord>>,
}

impl TokenManager {
    pub fn new() -> Self {
        TokenManager {
            tokens: Mutex::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, record: TokenRecord) {
        let mut tokens = self.tokens.lock().await;
        tokens.insert(record.access_token.clone(), record);
    }

    pub async fn is_authenticated(&self) -> bool {
        !self.tokens.lock().await.is_empty()
    }

    /// Drops every stored record (full logout).
    pub async fn clear(&self) {
        self.tokens.lock().await.clear();
    }

    /// Returns a currently valid access token, refreshing it first if expired.
    ///
    /// `refresh` is called at most once, with the stored refresh token, and
    /// only when the record's expiry lies in the past. The store stays locked
    /// for the whole check-and-refresh so concurrent callers wait for the
    /// first refresh instead of issuing their own.
    ///
    /// # Errors
    ///
    /// - [`Error::NoToken`] if nothing has been authorized yet
    /// - whatever `refresh` returns; the stored record is left untouched then
    /// - [`Error::TokenRefresh`] if the refreshed lifetime is not a positive,
    ///   representable number of seconds
    pub async fn get_valid_token<F, Fut>(&self, refresh: F) -> Result<String>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<RefreshedToken>>,
    {
        let mut tokens = self.tokens.lock().await;
        let record = tokens.values_mut().next().ok_or(Error::NoToken)?;

        if record.is_expired() {
            let refreshed = refresh(record.refresh_token.clone()).await?;
            let expires_at = types::expiry_after(refreshed.expires_in).ok_or_else(|| {
                Error::TokenRefresh(format!("invalid expires_in: {}", refreshed.expires_in))
            })?;
            record.access_token = refreshed.access_token;
            record.expires_at = expires_at;
            if let Some(refresh_token) = refreshed.refresh_token {
                record.refresh_token = refresh_token;
            }
        }

        Ok(record.access_token.clone())
    }
}

impl Default for TokenManager {
    fn default() -> Self {
        Self::new()
    }
}
