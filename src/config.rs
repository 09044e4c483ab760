//! Configuration management for the Spotify Playlist Downloader.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including Spotify API credentials, API
//! endpoints and the yt-dlp binary location.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)
//!
//! Credentials saved with `spodlcli credentials` take precedence over the
//! environment; see [`crate::management::CredentialsManager`].

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `spodlcli/.env`. A missing `.env` file is not
/// an error: credentials may come from the saved credential record instead.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spodlcli/.env`
/// - macOS: `~/Library/Application Support/spodlcli/.env`
/// - Windows: `%LOCALAPPDATA%/spodlcli/.env`
///
/// # Returns
///
/// Returns `Ok(())` if the environment file is successfully loaded or absent,
/// or an error string if directory creation or file parsing fails.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spodlcli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable, falling back to the
/// production endpoint. The override exists so the client can be pointed at
/// a mock or proxy.
///
/// # Example
///
/// ```
/// let api_url = spotify_apiurl(); // e.g., "https://api.spotify.com/v1"
/// ```
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Retrieves the `SPOTIFY_API_TOKEN_URL` environment variable, falling back
/// to the production endpoint. Used for the client-credentials grant when
/// requesting an access token.
///
/// # Example
///
/// ```
/// let token_url = spotify_apitoken_url(); // e.g., "https://accounts.spotify.com/api/token"
/// ```
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify API client ID from the environment, if set.
///
/// A missing client ID is not a panic here: credential resolution falls back
/// from the saved credential record to the environment, and a final absence
/// is surfaced to the user as a configuration error before any track work
/// begins.
pub fn spotify_client_id() -> Option<String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").ok()
}

/// Returns the Spotify API client secret from the environment, if set.
///
/// See [`spotify_client_id`] for the resolution order.
pub fn spotify_client_secret() -> Option<String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_SECRET").ok()
}

/// Returns the path of the yt-dlp binary.
///
/// Retrieves the `YTDLP_PATH` environment variable, falling back to
/// `yt-dlp` resolved via `PATH`.
///
/// # Example
///
/// ```
/// let ytdlp = ytdlp_path(); // e.g., "yt-dlp" or "/usr/local/bin/yt-dlp"
/// ```
pub fn ytdlp_path() -> String {
    env::var("YTDLP_PATH").unwrap_or_else(|_| "yt-dlp".to_string())
}
