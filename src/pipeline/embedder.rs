use std::{io::Cursor, path::Path};

use id3::{
    Tag, TagLike, Version,
    frame::{Picture, PictureType},
};
use image::ImageFormat;

use crate::{types::Track, utils, warning};

use super::TrackError;

/// Writes descriptive tags and optional embedded cover art into an audio
/// file's ID3 container.
///
/// Title, primary artist, album, track number and disc number are always
/// overwritten; any other existing frames are preserved. Cover art is a
/// best-effort sub-step: a missing art URL, a non-2xx response or a decode
/// failure leaves the track untagged with art but otherwise intact — the art
/// never fails the track.
pub async fn embed(path: &Path, track: &Track) -> Result<(), TrackError> {
    // Read the existing container, or start a fresh one for a bare file.
    let mut tag = Tag::read_from_path(path).unwrap_or_default();

    tag.set_title(&track.title);
    tag.set_artist(utils::primary_artist(track).unwrap_or("Unknown Artist"));
    tag.set_album(&track.album);
    tag.set_track(track.track_number);
    tag.set_disc(track.disc_number);

    if let Some(url) = &track.album_art_url {
        if let Some(art) = fetch_album_art(url).await {
            tag.add_frame(Picture {
                mime_type: "image/jpeg".to_string(),
                picture_type: PictureType::CoverFront,
                description: "Cover".to_string(),
                data: art,
            });
        }
    }

    tag.write_to_path(path, Version::Id3v24)
        .map_err(|e| TrackError::TagError(e.to_string()))
}

/// Confirms the three required tags (title, artist, album) are present.
///
/// Track/disc numbers and art are deliberately not checked. Absence is a
/// soft signal rather than a fault, hence a boolean and not an error.
pub fn verify_metadata(path: &Path) -> bool {
    match Tag::read_from_path(path) {
        Ok(tag) => tag.title().is_some() && tag.artist().is_some() && tag.album().is_some(),
        Err(_) => false,
    }
}

/// Fetches cover art over HTTP and returns it as JPEG bytes, re-encoding
/// other image formats. Every failure mode returns `None` after a warning;
/// embedding proceeds without art rather than failing the track.
async fn fetch_album_art(url: &str) -> Option<Vec<u8>> {
    let response = match reqwest::get(url).await {
        Ok(resp) => resp,
        Err(e) => {
            warning!("Failed to download album art: {}", e);
            return None;
        }
    };

    if !response.status().is_success() {
        return None;
    }

    let data = match response.bytes().await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            warning!("Failed to download album art: {}", e);
            return None;
        }
    };

    to_jpeg(data)
}

fn to_jpeg(data: Vec<u8>) -> Option<Vec<u8>> {
    match image::guess_format(&data) {
        Ok(ImageFormat::Jpeg) => Some(data),
        Ok(_) => {
            let decoded = match image::load_from_memory(&data) {
                Ok(img) => img,
                Err(e) => {
                    warning!("Failed to process album art: {}", e);
                    return None;
                }
            };

            let mut out = Vec::new();
            match decoded
                .to_rgb8()
                .write_to(&mut Cursor::new(&mut out), ImageFormat::Jpeg)
            {
                Ok(()) => Some(out),
                Err(e) => {
                    warning!("Failed to process album art: {}", e);
                    None
                }
            }
        }
        Err(e) => {
            warning!("Failed to process album art: {}", e);
            None
        }
    }
}
