use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    config,
    types::{PlaylistDetailsResponse, PlaylistTracksResponse, Track},
    warning,
};

/// Retrieves the name of a playlist from the Spotify Web API.
///
/// # Arguments
///
/// * `playlist_id` - Spotify ID of the playlist
/// * `token` - Valid access token for Spotify API authentication
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(String)` - The playlist's display name
/// - `Err(reqwest::Error)` - Network error, API error, or HTTP error
///
/// # Rate Limiting
///
/// Handled by [`get_with_retry`]: 429 responses are retried after the delay
/// the API asks for, 502 responses after a fixed 10 seconds.
pub async fn get_playlist_name(playlist_id: &str, token: &str) -> Result<String, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}?fields=name",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let details = get_with_retry::<PlaylistDetailsResponse>(&api_url, token).await?;
    Ok(details.name)
}

/// Retrieves the complete ordered track list of a playlist.
///
/// Follows Spotify's page-based pagination (`limit`/`offset` with a `next`
/// URL in each response) until the listing is exhausted, preserving playlist
/// order. Playlist items without a track payload (removed or unavailable
/// entries, podcast episodes that fail to map) are skipped.
///
/// # Arguments
///
/// * `playlist_id` - Spotify ID of the playlist
/// * `token` - Valid access token for Spotify API authentication
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<Track>)` - Ordered track descriptors, possibly empty
/// - `Err(reqwest::Error)` - Network error, API error, or HTTP error
///
/// # Example
///
/// ```
/// let tracks = get_playlist_tracks("37i9dQZF1DXcBWIGoYBM5M", &token).await?;
/// println!("playlist has {} tracks", tracks.len());
/// ```
pub async fn get_playlist_tracks(
    playlist_id: &str,
    token: &str,
) -> Result<Vec<Track>, reqwest::Error> {
    let mut api_url = format!(
        "{uri}/playlists/{id}/tracks?limit=100",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let mut tracks: Vec<Track> = Vec::new();

    loop {
        let page = get_with_retry::<PlaylistTracksResponse>(&api_url, token).await?;

        for item in page.items {
            if let Some(track) = item.track {
                tracks.push(Track::from(track));
            }
        }

        match page.next {
            Some(next) => api_url = next,
            None => break,
        }
    }

    Ok(tracks)
}

async fn get_with_retry<T: DeserializeOwned>(
    api_url: &str,
    token: &str,
) -> Result<T, reqwest::Error> {
    loop {
        let client = Client::new();
        let response = client.get(api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => {
                if resp.status() == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = resp
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(0);
                    if retry_after <= 120 {
                        sleep(Duration::from_secs(retry_after)).await;
                        continue; // retry
                    }
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds. Try again later.",
                        retry_after
                    );
                }

                match resp.error_for_status() {
                    Ok(valid_response) => valid_response,
                    Err(err) => {
                        if let Some(status) = err.status() {
                            if status == StatusCode::BAD_GATEWAY {
                                sleep(Duration::from_secs(10)).await;
                                continue; // retry
                            }
                        }
                        return Err(err); // propagate other errors
                    }
                }
            }
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        return response.json::<T>().await;
    }
}
