use std::fs;
use std::path::PathBuf;

use id3::{Tag, TagLike, Version};
use tempfile::TempDir;

use spodlcli::pipeline::embedder;
use spodlcli::types::Track;

// Helper function to create a test track
fn create_test_track(title: &str, artists: &[&str], album: &str) -> Track {
    Track {
        id: Some("4aWmUd".to_string()),
        title: title.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        album: album.to_string(),
        album_art_url: None,
        track_number: 7,
        disc_number: 2,
        duration_ms: 258_000,
    }
}

// Helper function to create a dummy audio file without a tag
fn create_dummy_file(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, b"fake audio payload").unwrap();
    path
}

#[tokio::test]
async fn test_embed_sets_required_tags() {
    let dir = TempDir::new().unwrap();
    let path = create_dummy_file(&dir, "song.mp3");
    let track = create_test_track("Nightcall", &["Kavinsky", "Lovefoxxx"], "OutRun");

    embedder::embed(&path, &track).await.unwrap();

    let tag = Tag::read_from_path(&path).unwrap();
    assert_eq!(tag.title(), Some("Nightcall"));
    // Primary artist only
    assert_eq!(tag.artist(), Some("Kavinsky"));
    assert_eq!(tag.album(), Some("OutRun"));
    assert_eq!(tag.track(), Some(7));
    assert_eq!(tag.disc(), Some(2));

    // No art URL, no picture
    assert_eq!(tag.pictures().count(), 0);
}

#[tokio::test]
async fn test_embed_overwrites_managed_frames_and_preserves_others() {
    let dir = TempDir::new().unwrap();
    let path = create_dummy_file(&dir, "song.mp3");

    // Pre-existing container with stale values and an unrelated frame
    let mut existing = Tag::new();
    existing.set_title("Old Title");
    existing.set_artist("Old Artist");
    existing.set_genre("Synthwave");
    existing.write_to_path(&path, Version::Id3v24).unwrap();

    let track = create_test_track("Nightcall", &["Kavinsky"], "OutRun");
    embedder::embed(&path, &track).await.unwrap();

    let tag = Tag::read_from_path(&path).unwrap();
    assert_eq!(tag.title(), Some("Nightcall"));
    assert_eq!(tag.artist(), Some("Kavinsky"));
    assert_eq!(tag.album(), Some("OutRun"));
    // The unrelated frame survives
    assert_eq!(tag.genre(), Some("Synthwave"));
}

#[tokio::test]
async fn test_embed_without_artists_uses_fallback() {
    let dir = TempDir::new().unwrap();
    let path = create_dummy_file(&dir, "song.mp3");
    let track = create_test_track("Nightcall", &[], "OutRun");

    embedder::embed(&path, &track).await.unwrap();

    let tag = Tag::read_from_path(&path).unwrap();
    assert_eq!(tag.artist(), Some("Unknown Artist"));
}

#[tokio::test]
async fn test_verify_metadata_requires_title_artist_album() {
    let dir = TempDir::new().unwrap();

    // All three required tags present
    let complete = create_dummy_file(&dir, "complete.mp3");
    let mut tag = Tag::new();
    tag.set_title("Nightcall");
    tag.set_artist("Kavinsky");
    tag.set_album("OutRun");
    tag.write_to_path(&complete, Version::Id3v24).unwrap();
    assert!(embedder::verify_metadata(&complete));

    // Album missing
    let incomplete = create_dummy_file(&dir, "incomplete.mp3");
    let mut tag = Tag::new();
    tag.set_title("Nightcall");
    tag.set_artist("Kavinsky");
    tag.write_to_path(&incomplete, Version::Id3v24).unwrap();
    assert!(!embedder::verify_metadata(&incomplete));
}

#[tokio::test]
async fn test_verify_metadata_ignores_track_numbers_and_art() {
    let dir = TempDir::new().unwrap();

    let path = create_dummy_file(&dir, "song.mp3");
    let mut tag = Tag::new();
    tag.set_title("Nightcall");
    tag.set_artist("Kavinsky");
    tag.set_album("OutRun");
    // No track number, no disc number, no picture
    tag.write_to_path(&path, Version::Id3v24).unwrap();

    assert!(embedder::verify_metadata(&path));
}

#[tokio::test]
async fn test_verify_metadata_on_untagged_or_missing_file() {
    let dir = TempDir::new().unwrap();

    let untagged = create_dummy_file(&dir, "untagged.mp3");
    assert!(!embedder::verify_metadata(&untagged));

    let missing = dir.path().join("missing.mp3");
    assert!(!embedder::verify_metadata(&missing));
}

#[tokio::test]
async fn test_embed_after_verify_roundtrip() {
    // embed followed by verify_metadata is the pipeline's tag sequence
    let dir = TempDir::new().unwrap();
    let path = create_dummy_file(&dir, "song.mp3");
    let track = create_test_track("Nightcall", &["Kavinsky"], "OutRun");

    embedder::embed(&path, &track).await.unwrap();
    assert!(embedder::verify_metadata(&path));
}
