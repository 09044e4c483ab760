use std::{process::Stdio, time::Duration};

use rand::Rng;
use tokio::{process::Command, time::sleep};

use crate::{
    config,
    types::{SearchResult, Track},
    utils,
};

use super::{BROWSER_USER_AGENT, TrackError, last_stderr_line};

/// Searches the external index for a best-effort audio match of a track.
///
/// Builds the query from the track's title and primary artist and asks
/// yt-dlp for exactly one search result (`ytsearch1:`); no ranking is
/// applied beyond the index's own ordering. Sleeps a randomized 1-3 seconds
/// before every search to keep request pacing below rate-limit thresholds.
///
/// # Returns
///
/// - `Ok(SearchResult)` - the first entry's playable URL
/// - `Err(TrackError::NotFound)` - the index returned zero entries
/// - `Err(TrackError::LocateFailed)` - subprocess or parse failure, with the
///   underlying cause preserved for the status line
pub async fn locate(track: &Track) -> Result<SearchResult, TrackError> {
    // Unconditional per-track pacing, not adaptive to prior failures.
    let delay = rand::rng().random_range(1.0..=3.0);
    sleep(Duration::from_secs_f64(delay)).await;

    let query = utils::search_query(track);

    let output = Command::new(config::ytdlp_path())
        .arg("--dump-json")
        .arg("--flat-playlist")
        .arg("--no-warnings")
        .arg("--no-check-certificate")
        .arg("--geo-bypass")
        .args(["--user-agent", BROWSER_USER_AGENT])
        .arg(format!("ytsearch1:{}", query))
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| TrackError::LocateFailed(e.to_string()))?;

    if !output.status.success() {
        return Err(TrackError::LocateFailed(last_stderr_line(&output.stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = match stdout.lines().find(|line| !line.trim().is_empty()) {
        Some(line) => line,
        None => return Err(TrackError::NotFound),
    };

    let entry: serde_json::Value =
        serde_json::from_str(first).map_err(|e| TrackError::LocateFailed(e.to_string()))?;

    let url = entry["url"]
        .as_str()
        .or_else(|| entry["webpage_url"].as_str())
        .map(|u| u.to_string())
        .or_else(|| {
            entry["id"]
                .as_str()
                .map(|id| format!("https://www.youtube.com/watch?v={}", id))
        });

    match url {
        Some(url) => Ok(SearchResult {
            url,
            title: entry["title"].as_str().map(|t| t.to_string()),
        }),
        None => Err(TrackError::LocateFailed(
            "Search entry carries no playable URL".to_string(),
        )),
    }
}
