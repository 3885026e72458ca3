use std::sync::Arc;

use crate::{context::AppContext, error, info, server::start_api_server, warning};

/// Runs the local server in the foreground.
///
/// Unless `no_browser` is set, the browser is pointed at the server root,
/// which forwards to Spotify's authorization page.
pub async fn serve(ctx: Arc<AppContext>, no_browser: bool) {
    if ctx.credentials().await.is_none() {
        warning!("No API credentials configured; authorization will fail until they are set");
    }

    if !no_browser {
        let url = format!("http://{}/", ctx.settings.server_addr);
        info!("Opening {} to log in", url);
        if webbrowser::open(&url).is_err() {
            warning!("Failed to open browser. Please navigate to {} manually", url);
        }
    }

    if let Err(e) = start_api_server(ctx).await {
        error!("Failed to start server: {}", e);
    }
}
