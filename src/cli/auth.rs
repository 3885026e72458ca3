use std::{sync::Arc, time::Duration};

use crate::{
    context::AppContext,
    error,
    error::Error,
    info,
    server::{bind_api_server, serve_api},
    spotify, success, warning,
};

const MAX_WAIT: Duration = Duration::from_secs(120);

/// Runs the complete authorization round-trip for a one-shot command.
///
/// # Authentication Flow
///
/// 1. **Server Start**: Binds the callback address, exiting at once if it is
///    taken, then serves in the background
/// 2. **Browser Launch**: Opens the Spotify authorization URL in the default browser
/// 3. **User Authorization**: User grants permissions in their browser
/// 4. **Callback Handling**: The server exchanges the code and stores the tokens
/// 5. **Completion**: Returns once the flow is authenticated
///
/// Tokens only live in this process, so every one-shot command logs in anew.
///
/// # Error Handling
///
/// - Browser launch failures result in a warning with manual URL instructions
/// - Missing credentials, a failed flow, or a timeout after two minutes
///   terminate the program with an error message
pub async fn authenticate(ctx: Arc<AppContext>) {
    // Must be bound before the browser opens.
    let listener = match bind_api_server(&ctx.settings.server_addr).await {
        Ok(listener) => listener,
        Err(e) => error!(
            "Cannot start callback server on {}: {}. Is trueshuffle serve already running?",
            ctx.settings.server_addr, e
        ),
    };

    let server_ctx = Arc::clone(&ctx);
    tokio::spawn(async move {
        if let Err(e) = serve_api(listener, server_ctx).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = match spotify::auth::begin_authorization(&ctx).await {
        Ok(url) => url,
        Err(Error::MissingCredentials) => error!(
            "No API credentials configured. Run trueshuffle credentials --client-id <ID> --client-secret <SECRET>"
        ),
        Err(e) => error!("Cannot start authorization: {}", e),
    };

    info!("Waiting for Spotify authorization...");
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match spotify::auth::wait_for_authentication(&ctx, MAX_WAIT).await {
        Ok(()) => success!("Authentication successful!"),
        Err(e) => error!("{}", e),
    }
}
