//! Dropbox refresh-token bootstrap.
//!
//! One-time interactive flow: print the authorization URL, let the user
//! approve the app in a browser and paste the resulting code back, then
//! exchange the code for a long-lived refresh token to store in the
//! environment.

use crate::config::AppCredentials;
use atelier_error::{AtelierResult, ConfigError, HttpError, JsonError, StorageError, StorageErrorKind};
use serde::Deserialize;
use std::io::{self, BufRead, Write};
use tracing::debug;

const AUTHORIZE_URL: &str = "https://www.dropbox.com/oauth2/authorize";
const TOKEN_URL: &str = "https://api.dropboxapi.com/oauth2/token";

/// Run the no-redirect OAuth2 authorization flow and print the refresh token.
pub async fn handle_auth_command() -> AtelierResult<()> {
    let credentials = AppCredentials::from_env()?;

    println!("1. Go to: {}", authorize_url(&credentials.app_key));
    println!("2. Click \"Allow\" (you might have to log in first).");
    println!("3. Copy the authorization code.");
    print!("Enter the authorization code here: ");
    io::stdout()
        .flush()
        .map_err(|e| ConfigError::new(format!("Failed to flush stdout: {e}")))?;

    let mut code = String::new();
    io::stdin()
        .lock()
        .read_line(&mut code)
        .map_err(|e| ConfigError::new(format!("Failed to read authorization code: {e}")))?;
    let code = code.trim();
    if code.is_empty() {
        return Err(ConfigError::new("No authorization code entered").into());
    }

    let grant = exchange_code(&credentials, code).await?;
    println!();
    println!("Refresh token: {}", grant.refresh_token);
    println!("Store it as DROPBOX_REFRESH_TOKEN in your environment or .env file.");
    Ok(())
}

/// Authorization URL for the no-redirect flow.
///
/// `token_access_type=offline` asks Dropbox for a refresh token instead
/// of a short-lived access token.
fn authorize_url(app_key: &str) -> String {
    format!(
        "{AUTHORIZE_URL}?client_id={app_key}&response_type=code&token_access_type=offline"
    )
}

/// Exchange an authorization code for a token grant.
async fn exchange_code(credentials: &AppCredentials, code: &str) -> AtelierResult<AuthGrant> {
    debug!("Exchanging authorization code for refresh token");
    let response = reqwest::Client::new()
        .post(TOKEN_URL)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", &credentials.app_key),
            ("client_secret", &credentials.app_secret),
        ])
        .send()
        .await
        .map_err(|e| HttpError::new(format!("Token exchange failed: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(StorageError::new(StorageErrorKind::Auth(format!(
            "token endpoint returned {status}: {body}"
        )))
        .into());
    }

    response
        .json()
        .await
        .map_err(|e| JsonError::new(format!("Failed to parse token response: {e}")).into())
}

#[derive(Debug, Deserialize)]
struct AuthGrant {
    refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_requests_offline_access() {
        let url = authorize_url("abc123");
        assert!(url.starts_with("https://www.dropbox.com/oauth2/authorize?"));
        assert!(url.contains("client_id=abc123"));
        assert!(url.contains("token_access_type=offline"));
        assert!(url.contains("response_type=code"));
    }
}
