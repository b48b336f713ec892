//! Dropbox HTTP API v2 implementation of [`ObjectStore`].

use crate::{ObjectMetadata, ObjectStore, Probe, SharedLink};
use atelier_error::{AtelierResult, HttpError, JsonError, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, error, instrument};

const TOKEN_URL: &str = "https://api.dropbox.com/oauth2/token";
const API_BASE: &str = "https://api.dropboxapi.com/2";
const CONTENT_BASE: &str = "https://content.dropboxapi.com/2";

/// Refresh the access token this long before the store says it expires.
const TOKEN_EXPIRY_SLACK: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Dropbox client with OAuth2 refresh-token auth.
///
/// The long-lived refresh token comes from the one-shot `atelier auth`
/// bootstrap flow; short-lived access tokens are minted on demand and cached
/// until shortly before expiry.
pub struct DropboxStore {
    http: reqwest::Client,
    app_key: String,
    app_secret: String,
    refresh_token: String,
    token: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for DropboxStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropboxStore")
            .field("app_key", &self.app_key)
            .finish_non_exhaustive()
    }
}

impl DropboxStore {
    /// Create a new Dropbox client.
    ///
    /// # Arguments
    ///
    /// * `app_key` / `app_secret` - Dropbox app credentials
    /// * `refresh_token` - long-lived refresh token from the bootstrap flow
    pub fn new(
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        debug!("Creating new Dropbox client");
        Self {
            http: reqwest::Client::new(),
            app_key: app_key.into(),
            app_secret: app_secret.into(),
            refresh_token: refresh_token.into(),
            token: Mutex::new(None),
        }
    }

    /// Get a valid access token, refreshing through the OAuth2 endpoint when
    /// the cached one is absent or about to expire.
    async fn access_token(&self) -> AtelierResult<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref()
            && token.expires_at > Instant::now() + TOKEN_EXPIRY_SLACK
        {
            return Ok(token.access_token.clone());
        }

        debug!("Refreshing Dropbox access token");
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", &self.refresh_token),
                ("client_id", &self.app_key),
                ("client_secret", &self.app_secret),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Token refresh request failed");
                HttpError::new(format!("Token refresh failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Token endpoint returned error");
            return Err(StorageError::new(StorageErrorKind::Auth(format!(
                "token endpoint returned {status}: {body}"
            )))
            .into());
        }

        let grant: TokenGrant = response.json().await.map_err(|e| {
            JsonError::new(format!("Failed to parse token response: {e}"))
        })?;
        let token = CachedToken {
            access_token: grant.access_token,
            expires_at: Instant::now() + Duration::from_secs(grant.expires_in),
        };
        let access = token.access_token.clone();
        *cached = Some(token);
        Ok(access)
    }

    /// RPC-style call against the api endpoint with a JSON body.
    async fn api_call<A: Serialize>(&self, route: &str, arg: &A) -> AtelierResult<reqwest::Response> {
        let token = self.access_token().await?;
        self.http
            .post(format!("{API_BASE}/{route}"))
            .bearer_auth(token)
            .json(arg)
            .send()
            .await
            .map_err(|e| {
                error!(route = %route, error = ?e, "Dropbox API request failed");
                HttpError::new(format!("{route}: {e}")).into()
            })
    }

    /// Content-upload call: JSON argument in the `Dropbox-API-Arg` header,
    /// payload bytes in the body.
    async fn content_call<A: Serialize>(
        &self,
        route: &str,
        arg: &A,
        body: &[u8],
    ) -> AtelierResult<reqwest::Response> {
        let token = self.access_token().await?;
        let arg_json = serde_json::to_string(arg)
            .map_err(|e| JsonError::new(format!("Failed to encode API arg: {e}")))?;
        self.http
            .post(format!("{CONTENT_BASE}/{route}"))
            .bearer_auth(token)
            .header("Dropbox-API-Arg", arg_json)
            .header("Content-Type", "application/octet-stream")
            .body(body.to_vec())
            .send()
            .await
            .map_err(|e| {
                error!(route = %route, error = ?e, "Dropbox content request failed");
                HttpError::new(format!("{route}: {e}")).into()
            })
    }

    /// Read the `error_summary` tag out of a non-success response body.
    async fn error_summary(response: reqwest::Response) -> (reqwest::StatusCode, String) {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let summary = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|e| e.error_summary)
            .unwrap_or(body);
        (status, summary)
    }
}

#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error_summary: String,
}

#[derive(Debug, Serialize)]
struct PathArg<'a> {
    path: &'a str,
}

#[derive(Debug, Deserialize)]
struct MetadataResponse {
    path_display: Option<String>,
    size: Option<u64>,
}

#[derive(Debug, Serialize)]
struct UploadArg<'a> {
    path: &'a str,
    mode: &'a str,
    autorename: bool,
    mute: bool,
}

#[derive(Debug, Serialize)]
struct SessionStartArg {
    close: bool,
}

#[derive(Debug, Deserialize)]
struct SessionStartResponse {
    session_id: String,
}

#[derive(Debug, Serialize)]
struct Cursor<'a> {
    session_id: &'a str,
    offset: u64,
}

#[derive(Debug, Serialize)]
struct SessionAppendArg<'a> {
    cursor: Cursor<'a>,
    close: bool,
}

#[derive(Debug, Serialize)]
struct SessionFinishArg<'a> {
    cursor: Cursor<'a>,
    commit: UploadArg<'a>,
}

#[derive(Debug, Serialize)]
struct ListLinksArg<'a> {
    path: &'a str,
    direct_only: bool,
}

#[derive(Debug, Deserialize)]
struct LinkEntry {
    url: String,
    #[serde(default)]
    path_lower: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListLinksResponse {
    links: Vec<LinkEntry>,
}

#[derive(Debug, Deserialize)]
struct CreateLinkResponse {
    url: String,
}

#[async_trait::async_trait]
impl ObjectStore for DropboxStore {
    #[instrument(skip(self))]
    async fn probe(&self, path: &str) -> AtelierResult<Probe> {
        let response = self.api_call("files/get_metadata", &PathArg { path }).await?;
        if response.status().is_success() {
            let meta: MetadataResponse = response.json().await.map_err(|e| {
                JsonError::new(format!("Failed to parse metadata response: {e}"))
            })?;
            return Ok(Probe::Found(ObjectMetadata {
                path: meta.path_display.unwrap_or_else(|| path.to_string()),
                size: meta.size,
            }));
        }

        let (status, summary) = Self::error_summary(response).await;
        if status == reqwest::StatusCode::CONFLICT && summary.starts_with("path/not_found") {
            return Ok(Probe::Missing);
        }
        error!(path = %path, status = %status, summary = %summary, "Metadata probe failed");
        Err(StorageError::new(StorageErrorKind::Remote(format!(
            "get_metadata {path}: {status} {summary}"
        )))
        .into())
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(&self, bytes: &[u8], path: &str) -> AtelierResult<()> {
        let arg = UploadArg {
            path,
            mode: "add",
            autorename: false,
            mute: true,
        };
        let response = self.content_call("files/upload", &arg, bytes).await?;
        if response.status().is_success() {
            debug!(path = %path, size = bytes.len(), "Uploaded object");
            return Ok(());
        }
        let (status, summary) = Self::error_summary(response).await;
        error!(path = %path, status = %status, summary = %summary, "Upload failed");
        if summary.contains("path/conflict") {
            return Err(StorageError::new(StorageErrorKind::Conflict(path.to_string())).into());
        }
        Err(StorageError::new(StorageErrorKind::Remote(format!(
            "upload {path}: {status} {summary}"
        )))
        .into())
    }

    #[instrument(skip(self, chunk), fields(size = chunk.len()))]
    async fn session_start(&self, chunk: &[u8]) -> AtelierResult<String> {
        let response = self
            .content_call("files/upload_session/start", &SessionStartArg { close: false }, chunk)
            .await?;
        if !response.status().is_success() {
            let (status, summary) = Self::error_summary(response).await;
            error!(status = %status, summary = %summary, "Session start failed");
            return Err(StorageError::new(StorageErrorKind::Remote(format!(
                "upload_session/start: {status} {summary}"
            )))
            .into());
        }
        let started: SessionStartResponse = response.json().await.map_err(|e| {
            JsonError::new(format!("Failed to parse session start response: {e}"))
        })?;
        Ok(started.session_id)
    }

    #[instrument(skip(self, chunk), fields(size = chunk.len()))]
    async fn session_append(
        &self,
        session_id: &str,
        offset: u64,
        chunk: &[u8],
    ) -> AtelierResult<()> {
        let arg = SessionAppendArg {
            cursor: Cursor { session_id, offset },
            close: false,
        };
        let response = self
            .content_call("files/upload_session/append_v2", &arg, chunk)
            .await?;
        if !response.status().is_success() {
            let (status, summary) = Self::error_summary(response).await;
            error!(session = %session_id, offset, status = %status, summary = %summary, "Session append failed");
            return Err(StorageError::new(StorageErrorKind::Remote(format!(
                "upload_session/append_v2 at {offset}: {status} {summary}"
            )))
            .into());
        }
        Ok(())
    }

    #[instrument(skip(self, chunk), fields(size = chunk.len()))]
    async fn session_finish(
        &self,
        session_id: &str,
        offset: u64,
        chunk: &[u8],
        path: &str,
    ) -> AtelierResult<()> {
        let arg = SessionFinishArg {
            cursor: Cursor { session_id, offset },
            commit: UploadArg {
                path,
                mode: "add",
                autorename: false,
                mute: true,
            },
        };
        let response = self
            .content_call("files/upload_session/finish", &arg, chunk)
            .await?;
        if !response.status().is_success() {
            let (status, summary) = Self::error_summary(response).await;
            error!(session = %session_id, path = %path, status = %status, summary = %summary, "Session finish failed");
            if summary.contains("path/conflict") {
                return Err(
                    StorageError::new(StorageErrorKind::Conflict(path.to_string())).into(),
                );
            }
            return Err(StorageError::new(StorageErrorKind::Remote(format!(
                "upload_session/finish {path}: {status} {summary}"
            )))
            .into());
        }
        debug!(path = %path, "Committed upload session");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_shared_links(&self, path: &str) -> AtelierResult<Vec<SharedLink>> {
        let arg = ListLinksArg {
            path,
            direct_only: true,
        };
        let response = self.api_call("sharing/list_shared_links", &arg).await?;
        if !response.status().is_success() {
            let (status, summary) = Self::error_summary(response).await;
            error!(path = %path, status = %status, summary = %summary, "Listing shared links failed");
            return Err(StorageError::new(StorageErrorKind::Remote(format!(
                "list_shared_links {path}: {status} {summary}"
            )))
            .into());
        }
        let listed: ListLinksResponse = response.json().await.map_err(|e| {
            JsonError::new(format!("Failed to parse shared link list: {e}"))
        })?;
        Ok(listed
            .links
            .into_iter()
            .map(|entry| SharedLink {
                path: entry.path_lower.unwrap_or_else(|| path.to_string()),
                url: entry.url,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn create_shared_link(&self, path: &str) -> AtelierResult<SharedLink> {
        let response = self
            .api_call("sharing/create_shared_link_with_settings", &PathArg { path })
            .await?;
        if !response.status().is_success() {
            let (status, summary) = Self::error_summary(response).await;
            error!(path = %path, status = %status, summary = %summary, "Creating shared link failed");
            return Err(StorageError::new(StorageErrorKind::Remote(format!(
                "create_shared_link_with_settings {path}: {status} {summary}"
            )))
            .into());
        }
        let created: CreateLinkResponse = response.json().await.map_err(|e| {
            JsonError::new(format!("Failed to parse created link: {e}"))
        })?;
        debug!(path = %path, url = %created.url, "Created shared link");
        Ok(SharedLink {
            path: path.to_string(),
            url: created.url,
        })
    }
}
