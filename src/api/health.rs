use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::context::AppContext;

pub async fn health(Extension(ctx): Extension<Arc<AppContext>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "authenticated": ctx.tokens.is_authenticated().await,
    }))
}
