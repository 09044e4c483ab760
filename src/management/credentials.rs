use std::path::PathBuf;

use crate::{config, types::Credentials};

/// Persists the application's Spotify credential record (client ID and
/// client secret) in the local data directory. The saved record takes
/// precedence over the environment; see [`CredentialsManager::resolve`].
pub struct CredentialsManager {
    credentials: Credentials,
}

impl CredentialsManager {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::credentials_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let credentials: Credentials = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { credentials })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::credentials_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.credentials).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Resolves credentials from the saved record, falling back to the
    /// `SPOTIFY_API_AUTH_CLIENT_ID` / `SPOTIFY_API_AUTH_CLIENT_SECRET`
    /// environment variables. Returns `None` when neither source provides a
    /// complete record.
    pub async fn resolve() -> Option<Credentials> {
        if let Ok(manager) = Self::load().await {
            return Some(manager.credentials);
        }

        match (config::spotify_client_id(), config::spotify_client_secret()) {
            (Some(client_id), Some(client_secret)) => Some(Credentials {
                client_id,
                client_secret,
            }),
            _ => None,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn credentials_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spodlcli/credentials.json");
        path
    }
}
