use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Normalized metadata record for one song, independent of where its audio
/// comes from. Produced by the catalog client, consumed read-only by the
/// pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub title: String,
    pub artists: Vec<String>,
    pub album: String,
    pub album_art_url: Option<String>,
    pub track_number: u32,
    pub disc_number: u32,
    pub duration_ms: u64,
}

/// One playable item reference chosen from the external index's result set.
/// Discarded after the download step.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub url: String,
    pub title: Option<String>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub title: String,
    pub artists: String,
    pub album: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistDetailsResponse {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub album: TrackAlbum,
    #[serde(default)]
    pub track_number: u32,
    #[serde(default)]
    pub disc_number: u32,
    #[serde(default)]
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackAlbum {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<AlbumImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumImage {
    pub url: String,
}

impl From<PlaylistTrack> for Track {
    fn from(t: PlaylistTrack) -> Self {
        Track {
            id: t.id,
            title: t.name,
            artists: t.artists.into_iter().map(|a| a.name).collect(),
            album: t.album.name,
            album_art_url: t.album.images.first().map(|i| i.url.clone()),
            track_number: t.track_number,
            disc_number: t.disc_number,
            duration_ms: t.duration_ms,
        }
    }
}
