//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by
//! spodlcli: it authenticates with the client-credentials grant and resolves
//! a public playlist reference to its name and complete ordered track list.
//! It handles all HTTP communication, error handling and rate limiting for
//! the catalog side of the application.
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the OAuth 2.0 client-credentials grant:
//! - **Token Request**: Exchanges the application's client ID and secret for
//!   an access token via HTTP Basic authentication
//! - **No User Login**: Public playlist data needs no user authorization, so
//!   there is no browser flow and no callback server
//! - **Token Lifecycle**: Expiry handling lives in
//!   [`crate::management::TokenManager`]
//!
//! ### Playlist Module
//!
//! [`playlist`] - Handles playlist resolution:
//! - **Playlist Metadata**: Fetches the playlist name
//! - **Track Listing**: Retrieves the full ordered track list, following
//!   Spotify's page-based pagination until exhausted
//! - **Rate Limiting**: Respects `Retry-After` on 429 Too Many Requests and
//!   retries 502 Bad Gateway responses with a fixed delay
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Client-credentials token request
//! - `GET /playlists/{id}` - Playlist name
//! - `GET /playlists/{id}/tracks` - Paginated playlist items
//!
//! ## Error Types
//!
//! All functions return `Result` types:
//! - **`reqwest::Error`** - HTTP client errors, network issues, API errors
//! - **`String`** - Token request failures
//!
//! Failures here are run-level: the caller surfaces them once and aborts the
//! run before any track work begins.

pub mod auth;
pub mod playlist;
