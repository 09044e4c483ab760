use spodlcli::types::Track;
use spodlcli::utils::*;

// Helper function to create a test track
fn create_test_track(id: Option<&str>, title: &str, artists: &[&str], album: &str) -> Track {
    Track {
        id: id.map(|s| s.to_string()),
        title: title.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        album: album.to_string(),
        album_art_url: None,
        track_number: 1,
        disc_number: 1,
        duration_ms: 215_000,
    }
}

#[test]
fn test_sanitize_title_strips_disallowed_characters() {
    // Slashes, colons, parentheses and punctuation are stripped
    assert_eq!(
        sanitize_title("AC/DC: Back (in Black)!"),
        "ACDC Back in Black"
    );

    // Alphanumerics, spaces, hyphens and underscores survive
    assert_eq!(
        sanitize_title("Mr_Brightside - Live 2004"),
        "Mr_Brightside - Live 2004"
    );

    // Surrounding whitespace is trimmed after stripping
    assert_eq!(sanitize_title("  Hello.  "), "Hello");

    // Unicode letters count as alphanumeric
    assert_eq!(sanitize_title("Måneskin"), "Måneskin");
}

#[test]
fn test_sanitize_title_is_idempotent() {
    let inputs = [
        "AC/DC: Back (in Black)!",
        "  Hello.  ",
        "Måneskin – ZITTI E BUONI",
        "plain title",
        "",
        "!!!***",
    ];

    for input in inputs {
        let once = sanitize_title(input);
        assert_eq!(sanitize_title(&once), once, "not idempotent for {input:?}");
    }
}

#[test]
fn test_extract_playlist_id_supported_shapes() {
    // URI scheme form
    assert_eq!(
        extract_playlist_id("spotify:playlist:abc123"),
        Some("abc123".to_string())
    );

    // Canonical web URL
    assert_eq!(
        extract_playlist_id("https://open.spotify.com/playlist/abc123"),
        Some("abc123".to_string())
    );

    // Trailing query parameters do not leak into the ID
    assert_eq!(
        extract_playlist_id("https://open.spotify.com/playlist/abc123?si=xyz789"),
        Some("abc123".to_string())
    );

    // Bare path form with trailing segments
    assert_eq!(
        extract_playlist_id("https://example.com/some/playlist/abc123/extra"),
        Some("abc123".to_string())
    );
}

#[test]
fn test_extract_playlist_id_unsupported_shapes() {
    assert_eq!(extract_playlist_id("not a url"), None);
    assert_eq!(
        extract_playlist_id("https://open.spotify.com/album/abc123"),
        None
    );
    assert_eq!(extract_playlist_id("spotify:track:abc123"), None);
    assert_eq!(extract_playlist_id(""), None);
}

#[test]
fn test_search_query_includes_primary_artist_only() {
    let track = create_test_track(None, "Nightcall", &["Kavinsky", "Lovefoxxx"], "OutRun");
    assert_eq!(search_query(&track), "Nightcall Kavinsky official audio");
}

#[test]
fn test_search_query_without_artists() {
    let track = create_test_track(None, "Nightcall", &[], "OutRun");
    assert_eq!(search_query(&track), "Nightcall official audio");
}

#[test]
fn test_primary_artist() {
    let track = create_test_track(None, "Nightcall", &["Kavinsky", "Lovefoxxx"], "OutRun");
    assert_eq!(primary_artist(&track), Some("Kavinsky"));

    let no_artists = create_test_track(None, "Nightcall", &[], "OutRun");
    assert_eq!(primary_artist(&no_artists), None);
}

#[test]
fn test_track_file_stem_uses_catalog_id_when_present() {
    let track = create_test_track(Some("4aWmUd"), "Nightcall", &["Kavinsky"], "OutRun");
    assert_eq!(track_file_stem(&track), "Nightcall [4aWmUd]");
}

#[test]
fn test_track_file_stem_is_deterministic_without_id() {
    let a = create_test_track(None, "Nightcall", &["Kavinsky"], "OutRun");
    let b = create_test_track(None, "Nightcall", &["Kavinsky"], "OutRun");
    assert_eq!(track_file_stem(&a), track_file_stem(&b));
}

#[test]
fn test_track_file_stem_distinguishes_same_title() {
    // Two different recordings sharing a title must not collide on disk
    let a = create_test_track(None, "Hurt", &["Nine Inch Nails"], "The Downward Spiral");
    let b = create_test_track(None, "Hurt", &["Johnny Cash"], "American IV");
    assert_ne!(track_file_stem(&a), track_file_stem(&b));

    let c = create_test_track(Some("id1"), "Hurt", &["Nine Inch Nails"], "The Downward Spiral");
    let d = create_test_track(Some("id2"), "Hurt", &["Johnny Cash"], "American IV");
    assert_ne!(track_file_stem(&c), track_file_stem(&d));
}

#[test]
fn test_track_file_stem_with_unsanitizable_title() {
    // A title that sanitizes to nothing still yields a non-empty stem
    let track = create_test_track(None, "!!!", &["!!!"], "Myth Takes");
    let stem = track_file_stem(&track);
    assert!(!stem.is_empty());
    assert!(!stem.contains('['));
    assert_eq!(stem.len(), 16);
}

#[test]
fn test_format_duration_ms() {
    assert_eq!(format_duration_ms(215_000), "3:35");
    assert_eq!(format_duration_ms(5_000), "0:05");
    assert_eq!(format_duration_ms(600_000), "10:00");
    assert_eq!(format_duration_ms(0), "0:00");
}
