use tabled::Table;

use crate::{
    error,
    management::{CredentialsManager, TokenManager},
    spotify,
    types::TrackTableRow,
    utils, warning,
};

pub async fn tracks(url: String) {
    let playlist_id = match utils::extract_playlist_id(&url) {
        Some(id) => id,
        None => error!("Invalid Spotify playlist URL"),
    };

    let credentials = match CredentialsManager::resolve().await {
        Some(credentials) => credentials,
        None => error!(
            "Spotify credentials not configured. Run spodlcli credentials --client-id <ID> --client-secret <SECRET>"
        ),
    };

    let mut token_mgr = match TokenManager::acquire(credentials).await {
        Ok(manager) => manager,
        Err(e) => error!("Failed to authenticate with Spotify: {}", e),
    };
    let token = token_mgr.get_valid_token().await;

    let playlist_name = match spotify::playlist::get_playlist_name(&playlist_id, &token).await {
        Ok(name) => name,
        Err(e) => error!("Could not retrieve playlist information: {}", e),
    };

    let tracks = match spotify::playlist::get_playlist_tracks(&playlist_id, &token).await {
        Ok(tracks) => tracks,
        Err(e) => error!("Failed to get playlist tracks: {}", e),
    };

    if tracks.is_empty() {
        warning!("No tracks found in playlist {}", playlist_name);
        return;
    }

    let rows: Vec<TrackTableRow> = tracks
        .iter()
        .enumerate()
        .map(|(index, track)| TrackTableRow {
            position: index + 1,
            title: track.title.clone(),
            artists: track.artists.join(", "),
            album: track.album.clone(),
            duration: utils::format_duration_ms(track.duration_ms),
        })
        .collect();

    let table = Table::new(rows);
    println!(
        "Playlist: {name}\tTracks: {count}\n{table}\n",
        name = playlist_name,
        count = tracks.len(),
        table = table
    );
}
