use crate::{error, info, management::CredentialsManager, success, types::Credentials, warning};

pub async fn credentials(client_id: Option<String>, client_secret: Option<String>, show: bool) {
    if show {
        match CredentialsManager::resolve().await {
            Some(credentials) => {
                info!("Client ID: {}", credentials.client_id);
                info!("Client secret: {}", mask(&credentials.client_secret));
            }
            None => warning!("No credentials configured"),
        }
        return;
    }

    match (client_id, client_secret) {
        (Some(client_id), Some(client_secret)) => {
            let manager = CredentialsManager::new(Credentials {
                client_id,
                client_secret,
            });
            match manager.persist().await {
                Ok(()) => success!("Credentials saved"),
                Err(e) => error!("Failed to save credentials: {}", e),
            }
        }
        _ => error!("Both --client-id and --client-secret are required to save credentials"),
    }
}

fn mask(secret: &str) -> String {
    if secret.len() <= 4 {
        "****".to_string()
    } else {
        format!("{}{}", &secret[..4], "*".repeat(secret.len() - 4))
    }
}
