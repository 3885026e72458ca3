use std::sync::Arc;

use tabled::Table;

use crate::{context::AppContext, error, info, spotify, types::PlaylistTableRow};

use super::auth::authenticate;

pub async fn playlists(ctx: Arc<AppContext>) {
    authenticate(Arc::clone(&ctx)).await;

    let playlists = match spotify::playlists::list_playlists(&ctx).await {
        Ok(playlists) => playlists,
        Err(e) => error!("Failed to fetch playlists: {}", e),
    };

    if playlists.is_empty() {
        info!("No playlists found");
        return;
    }

    let rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            id: p.id,
            name: p.name,
        })
        .collect();

    println!("{}", Table::new(rows));
}
