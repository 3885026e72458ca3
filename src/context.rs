//! The application context.
//!
//! One [`AppContext`] is built at startup and shared as `Arc<AppContext>` by
//! the CLI front-end and every HTTP handler. It owns the settings, the
//! credentials, the token store, the authorization flow state and the HTTP
//! client used for all outgoing requests.

use reqwest::Client;
use tokio::sync::{Mutex, RwLock};

use crate::{
    config::Settings,
    error::{Error, Result},
    management::{CredentialStore, TokenManager},
    spotify,
    types::{AuthState, Credentials},
};

pub struct AppContext {
    pub settings: Settings,
    pub http: Client,
    pub tokens: TokenManager,
    credential_store: CredentialStore,
    credentials: RwLock<Option<Credentials>>,
    auth_state: Mutex<AuthState>,
}

impl AppContext {
    /// Creates a context with no credentials loaded and an empty token store.
    pub fn new(settings: Settings) -> Result<Self> {
        let http = Client::builder().timeout(settings.request_timeout).build()?;
        let credential_store = CredentialStore::new(settings.credentials_path.clone());

        Ok(Self {
            settings,
            http,
            tokens: TokenManager::new(),
            credential_store,
            credentials: RwLock::new(None),
            auth_state: Mutex::new(AuthState::Unauthenticated),
        })
    }

    /// Creates a context and reads saved credentials, tolerating their absence.
    pub async fn load(settings: Settings) -> Result<Self> {
        let ctx = Self::new(settings)?;
        let saved = ctx.credential_store.load().await;
        *ctx.credentials.write().await = saved;
        Ok(ctx)
    }

    pub fn credential_store(&self) -> &CredentialStore {
        &self.credential_store
    }

    pub async fn credentials(&self) -> Option<Credentials> {
        self.credentials.read().await.clone()
    }

    /// Validates, persists and activates new credentials.
    pub async fn update_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Credentials> {
        let credentials = Credentials::new(client_id, client_secret)?;
        self.credential_store.save(&credentials).await?;
        *self.credentials.write().await = Some(credentials.clone());
        Ok(credentials)
    }

    pub async fn auth_state(&self) -> AuthState {
        self.auth_state.lock().await.clone()
    }

    pub async fn set_auth_state(&self, state: AuthState) {
        *self.auth_state.lock().await = state;
    }

    /// Returns a valid access token, refreshing it with the configured
    /// credentials when it has expired.
    pub async fn valid_token(&self) -> Result<String> {
        let credentials = self.credentials().await;
        self.tokens
            .get_valid_token(|refresh_token| async move {
                let credentials = credentials.ok_or(Error::MissingCredentials)?;
                spotify::auth::refresh_access_token(
                    &self.http,
                    &self.settings.token_url,
                    &refresh_token,
                    &credentials,
                )
                .await
            })
            .await
    }

    /// Logs out by dropping every token and resetting the flow state.
    pub async fn logout(&self) {
        self.tokens.clear().await;
        self.set_auth_state(AuthState::Unauthenticated).await;
    }
}
