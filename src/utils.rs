use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::types::Track;

const PLAYLIST_PATTERNS: [&str; 3] = [
    r"spotify:playlist:([a-zA-Z0-9]+)",
    r"open\.spotify\.com/playlist/([a-zA-Z0-9]+)",
    r"playlist/([a-zA-Z0-9]+)",
];

/// Extracts the playlist ID from a Spotify playlist reference.
///
/// Accepts the URI form (`spotify:playlist:ID`) and the HTTP(S) path forms
/// (`open.spotify.com/playlist/ID`, `.../playlist/ID`), with or without
/// trailing query or path segments. Returns `None` when no shape matches.
pub fn extract_playlist_id(reference: &str) -> Option<String> {
    for pattern in PLAYLIST_PATTERNS.iter() {
        let re = Regex::new(pattern).unwrap();
        if let Some(captures) = re.captures(reference) {
            return captures.get(1).map(|id| id.as_str().to_string());
        }
    }
    None
}

/// Strips every character that is not alphanumeric, space, hyphen or
/// underscore, then trims surrounding whitespace. Idempotent.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn primary_artist(track: &Track) -> Option<&str> {
    track.artists.first().map(|a| a.as_str())
}

/// Builds the external index search query for a track. The primary artist is
/// included when known; "official audio" biases results toward uploads that
/// match the catalog recording.
pub fn search_query(track: &Track) -> String {
    match primary_artist(track) {
        Some(artist) => format!("{} {} official audio", track.title, artist),
        None => format!("{} official audio", track.title),
    }
}

/// Derives the on-disk file stem for a track.
///
/// The sanitized title alone is not collision-free (two tracks may share a
/// title), so the stem carries a stable per-track key: the Spotify track ID
/// when present, otherwise a digest of title, primary artist and album. The
/// unsanitized title remains the display name embedded in tags.
pub fn track_file_stem(track: &Track) -> String {
    let sanitized = sanitize_title(&track.title);
    let key = match &track.id {
        Some(id) => id.clone(),
        None => {
            let hash = Sha256::digest(
                format!(
                    "{}\x1f{}\x1f{}",
                    track.title,
                    primary_artist(track).unwrap_or(""),
                    track.album
                )
                .as_bytes(),
            );
            let mut key = URL_SAFE_NO_PAD.encode(hash);
            key.truncate(16);
            key
        }
    };

    if sanitized.is_empty() {
        key
    } else {
        format!("{} [{}]", sanitized, key)
    }
}

pub fn format_duration_ms(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
