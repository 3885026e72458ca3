use std::sync::Arc;

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use serde_json::{Value, json};

use crate::{context::AppContext, spotify::auth, types::CallbackParams, warning};

pub const SUCCESS_PAGE: &str = "/success_webpage";
pub const FAILED_PAGE: &str = "/failed_webpage";

/// Sends the browser to Spotify's authorization page.
pub async fn home(Extension(ctx): Extension<Arc<AppContext>>) -> Response {
    match auth::begin_authorization(&ctx).await {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(e) => {
            warning!("Cannot start authorization: {}", e);
            (StatusCode::BAD_REQUEST, format!("{}.", e)).into_response()
        }
    }
}

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(ctx): Extension<Arc<AppContext>>,
) -> Redirect {
    match auth::handle_callback(&ctx, params).await {
        Ok(()) => Redirect::to(SUCCESS_PAGE),
        Err(e) => {
            warning!("Authorization failed: {}", e);
            Redirect::to(FAILED_PAGE)
        }
    }
}

pub async fn success_webpage() -> Html<&'static str> {
    Html(
        "<html><body><h1>Successfully Authenticated to Spotify! You can close this tab.</h1></body></html>",
    )
}

pub async fn failed_webpage() -> Html<&'static str> {
    Html("<html><body><h1>Failed to authenticate to Spotify, Try again!</h1></body></html>")
}

pub async fn check_authentication(Extension(ctx): Extension<Arc<AppContext>>) -> Json<Value> {
    Json(json!({ "success": ctx.tokens.is_authenticated().await }))
}
