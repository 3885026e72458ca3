use std::time::{Duration, Instant};

use reqwest::{Client, Url};

use crate::{
    context::AppContext,
    error::{Error, Result},
    info,
    types::{
        self, AuthState, CallbackParams, Credentials, RefreshedToken, TokenRecord, TokenResponse,
    },
    warning,
};

const POLL_INTERVAL: Duration = Duration::from_millis(500);
const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Builds the Spotify authorization URL for the authorization-code flow.
///
/// The query carries `response_type=code`, the client id, the redirect URI
/// and the space-delimited scope list, percent-encoded. The result is
/// deterministic for the same inputs.
///
/// # Arguments
///
/// * `auth_url` - Base authorization endpoint, e.g. `https://accounts.spotify.com/authorize`
/// * `client_id` - Client id of the registered Spotify application
/// * `redirect_uri` - Callback URI; must match the one registered with Spotify
///   and be served by the local callback server
/// * `scope` - Space-delimited permission list
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] if `auth_url` is not an absolute URL.
///
/// # Example
///
/// ```
/// let url = build_authorization_url(
///     "https://accounts.spotify.com/authorize",
///     "0123456789abcdef0123456789abcdef",
///     "http://localhost:5000/callback",
///     "user-read-private playlist-read-private",
/// )?;
/// ```
pub fn build_authorization_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    scope: &str,
) -> Result<String> {
    let url = Url::parse_with_params(
        auth_url,
        &[
            ("response_type", "code"),
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("scope", scope),
        ],
    )
    .map_err(|e| Error::InvalidUrl(format!("{}: {}", auth_url, e)))?;

    Ok(url.to_string())
}

/// Starts an authorization round-trip and returns the URL to open.
///
/// Requires saved credentials. Moves the flow to
/// [`AuthState::AwaitingCallback`]; the callback server completes it.
pub async fn begin_authorization(ctx: &AppContext) -> Result<String> {
    let credentials = ctx.credentials().await.ok_or(Error::MissingCredentials)?;

    let url = build_authorization_url(
        &ctx.settings.auth_url,
        &credentials.client_id,
        &ctx.settings.redirect_uri,
        &ctx.settings.scope,
    )?;

    ctx.set_auth_state(AuthState::AwaitingCallback).await;
    Ok(url)
}

/// Completes the authorization flow from the redirect's query parameters.
///
/// # Flow
///
/// 1. **Provider error**: an `error` parameter (e.g. the user pressed
///    "Cancel") fails the flow without contacting the token endpoint
/// 2. **Missing code**: fails the flow the same way
/// 3. **Token exchange**: the code is exchanged for an access/refresh token
///    pair, which is stored in the token manager
///
/// The flow ends in [`AuthState::Authenticated`] or [`AuthState::Failed`].
///
/// # Errors
///
/// - [`Error::AuthorizationFailed`] for a provider error or a missing code
/// - [`Error::MissingCredentials`] if no credentials are configured
/// - any error from [`exchange_code_for_tokens`]
pub async fn handle_callback(ctx: &AppContext, params: CallbackParams) -> Result<()> {
    if let Some(error) = params.error {
        ctx.set_auth_state(AuthState::Failed(error.clone())).await;
        return Err(Error::AuthorizationFailed(error));
    }

    let Some(code) = params.code else {
        let reason = "missing authorization code".to_string();
        ctx.set_auth_state(AuthState::Failed(reason.clone())).await;
        return Err(Error::AuthorizationFailed(reason));
    };

    let result = match ctx.credentials().await {
        Some(credentials) => {
            exchange_code_for_tokens(
                &ctx.http,
                &ctx.settings.token_url,
                &code,
                &credentials,
                &ctx.settings.redirect_uri,
            )
            .await
        }
        None => Err(Error::MissingCredentials),
    };

    match result {
        Ok(record) => {
            ctx.tokens.insert(record).await;
            ctx.set_auth_state(AuthState::Authenticated).await;
            info!("Authorization completed");
            Ok(())
        }
        Err(e) => {
            ctx.set_auth_state(AuthState::Failed(e.to_string())).await;
            Err(e)
        }
    }
}

/// Exchanges an authorization code for an access and refresh token.
///
/// Issues a single POST to the token endpoint with
/// `grant_type=authorization_code` and the client credentials in the form
/// body. The new record expires `expires_in` seconds from now.
///
/// # Errors
///
/// - [`Error::TokenExchange`] if the response carries an `error` field, is
///   not JSON, lacks `access_token`, `refresh_token` or `expires_in`, or has
///   an `expires_in` that is not a positive, representable number of seconds
/// - [`Error::Http`] on network failure or timeout
///
/// # Security Note
///
/// The authorization code is single-use and expires quickly. The exchange
/// should happen immediately after receiving the code.
pub async fn exchange_code_for_tokens(
    client: &Client,
    token_url: &str,
    code: &str,
    credentials: &Credentials,
    redirect_uri: &str,
) -> Result<TokenRecord> {
    let res = client
        .post(token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ])
        .send()
        .await?;

    let status = res.status();
    let json: TokenResponse = res
        .json()
        .await
        .map_err(|_| Error::TokenExchange(format!("unexpected response ({})", status)))?;

    if let Some(message) = json.error_message() {
        return Err(Error::TokenExchange(message));
    }

    let (Some(access_token), Some(refresh_token), Some(expires_in)) =
        (json.access_token, json.refresh_token, json.expires_in)
    else {
        return Err(Error::TokenExchange(
            "response is missing token fields".to_string(),
        ));
    };

    let expires_at = types::expiry_after(expires_in)
        .ok_or_else(|| Error::TokenExchange(format!("invalid expires_in: {}", expires_in)))?;

    Ok(TokenRecord {
        access_token,
        refresh_token,
        expires_at,
    })
}

/// Refreshes an expired access token using a refresh token.
///
/// Single POST with `grant_type=refresh_token`; never retried. A missing
/// `expires_in` defaults to one hour. Spotify may rotate the refresh token,
/// in which case the new one is returned as well.
///
/// # Errors
///
/// - [`Error::TokenRefresh`] if the response has no `access_token` or an
///   unusable `expires_in`; the caller has to surface this as an
///   authentication failure
/// - [`Error::Http`] on network failure or timeout
pub async fn refresh_access_token(
    client: &Client,
    token_url: &str,
    refresh_token: &str,
    credentials: &Credentials,
) -> Result<RefreshedToken> {
    let res = client
        .post(token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ])
        .send()
        .await?;

    let status = res.status();
    let json: TokenResponse = res
        .json()
        .await
        .map_err(|_| Error::TokenRefresh(format!("unexpected response ({})", status)))?;

    let Some(access_token) = json.access_token.clone() else {
        let message = json
            .error_message()
            .unwrap_or_else(|| "response has no access token".to_string());
        warning!("Token refresh failed: {}", message);
        return Err(Error::TokenRefresh(message));
    };

    let expires_in = json.expires_in.unwrap_or(DEFAULT_EXPIRES_IN);
    if types::expiry_after(expires_in).is_none() {
        return Err(Error::TokenRefresh(format!(
            "invalid expires_in: {}",
            expires_in
        )));
    }

    Ok(RefreshedToken {
        access_token,
        refresh_token: json.refresh_token,
        expires_in,
    })
}

/// Waits for the callback server to finish the authorization flow.
///
/// Polls the flow state every 500 ms until it is authenticated or failed,
/// or until `max_wait` has elapsed.
///
/// # Errors
///
/// - [`Error::AuthorizationFailed`] if the flow failed
/// - [`Error::AuthorizationTimeout`] if nothing happened in time
pub async fn wait_for_authentication(ctx: &AppContext, max_wait: Duration) -> Result<()> {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        match ctx.auth_state().await {
            AuthState::Authenticated => return Ok(()),
            AuthState::Failed(reason) => return Err(Error::AuthorizationFailed(reason)),
            AuthState::Unauthenticated | AuthState::AwaitingCallback => {}
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    Err(Error::AuthorizationTimeout)
}
