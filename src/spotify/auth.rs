use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;

use crate::{
    config,
    types::{Credentials, Token},
};

/// Requests an access token using the OAuth 2.0 client-credentials grant.
///
/// Exchanges the application's client ID and secret for an access token.
/// This grant covers public catalog data only, which is all the downloader
/// needs; no user authorization is involved.
///
/// # Arguments
///
/// * `credentials` - Client ID and secret of the registered application
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Token)` - Fresh access token with expiry metadata
/// - `Err(String)` - Network failure, rejected credentials or a malformed
///   token response
///
/// # Example
///
/// ```
/// let token = request_token(&credentials).await?;
/// println!("token expires in {} seconds", token.expires_in);
/// ```
pub async fn request_token(credentials: &Credentials) -> Result<Token, String> {
    let client = Client::new();
    let basic = STANDARD.encode(format!(
        "{}:{}",
        credentials.client_id, credentials.client_secret
    ));

    let res = client
        .post(&config::spotify_apitoken_url())
        .header("Authorization", format!("Basic {}", basic))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !res.status().is_success() {
        return Err(format!("Token request failed with status {}", res.status()));
    }

    let json: serde_json::Value = res.json().await.map_err(|e| e.to_string())?;

    let access_token = json["access_token"].as_str().unwrap_or_default();
    if access_token.is_empty() {
        return Err("Token response did not contain an access token".to_string());
    }

    Ok(Token {
        access_token: access_token.to_string(),
        token_type: json["token_type"].as_str().unwrap_or("Bearer").to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
