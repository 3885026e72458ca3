use crate::{context::AppContext, error, info, success, utils, warning};

/// Saves new credentials, or reports the stored ones when none are given.
pub async fn credentials(
    ctx: &AppContext,
    client_id: Option<String>,
    client_secret: Option<String>,
) {
    let path = ctx.credential_store().path().display().to_string();

    match (client_id, client_secret) {
        (Some(id), Some(secret)) => match ctx.update_credentials(&id, &secret).await {
            Ok(_) => success!("Credentials saved to {}", path),
            Err(e) => error!("{}", e),
        },
        (None, None) => match ctx.credentials().await {
            Some(c) => {
                info!("Credentials file: {}", path);
                info!("Client id:     {}", c.client_id);
                info!("Client secret: {}", utils::mask_secret(&c.client_secret));
            }
            None => warning!("No valid credentials stored in {}", path),
        },
        _ => error!("Both --client-id and --client-secret are required"),
    }
}
