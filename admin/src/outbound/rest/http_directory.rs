//! Reqwest-backed user directory adapter.
//!
//! This adapter owns transport details only: URL building, timeout and HTTP
//! error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{Error, UserRecord, UserRecordId, ValidatedDraft};

/// Failures while constructing a [`RestUserDirectory`].
#[derive(Debug, thiserror::Error)]
pub enum RestDirectoryBuildError {
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The base URL cannot carry path segments (for example `mailto:`).
    #[error("base URL `{0}` cannot carry a path")]
    CannotBeABase(Url),
}

/// User directory that talks to a REST store rooted at one base URL.
#[derive(Debug, Clone)]
pub struct RestUserDirectory {
    client: Client,
    base: Url,
}

impl RestUserDirectory {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// `base` is the API root; `users` is appended to it, so
    /// `http://localhost:3001/api` serves `http://localhost:3001/api/users`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// base URL cannot carry a path.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, RestDirectoryBuildError> {
        if base.cannot_be_a_base() {
            return Err(RestDirectoryBuildError::CannotBeABase(base));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    /// API root this adapter was built with.
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn users_url(&self, id: Option<&UserRecordId>) -> Result<Url, UserDirectoryError> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                UserDirectoryError::transport(format!("base URL {} cannot carry a path", self.base))
            })?;
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(id.as_ref());
            }
        }
        Ok(url)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        id: Option<&UserRecordId>,
    ) -> Result<Vec<u8>, UserDirectoryError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref(), id));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl UserDirectory for RestUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, UserDirectoryError> {
        let url = self.users_url(None)?;
        let body = self.send(self.client.get(url), None).await?;
        decode(&body)
    }

    async fn get_user(&self, id: &UserRecordId) -> Result<UserRecord, UserDirectoryError> {
        let url = self.users_url(Some(id))?;
        let body = self.send(self.client.get(url), Some(id)).await?;
        decode(&body)
    }

    async fn create_user(&self, draft: &ValidatedDraft) -> Result<UserRecord, UserDirectoryError> {
        let url = self.users_url(None)?;
        let body = self.send(self.client.post(url).json(draft), None).await?;
        decode(&body)
    }

    async fn update_user(
        &self,
        id: &UserRecordId,
        draft: &ValidatedDraft,
    ) -> Result<UserRecord, UserDirectoryError> {
        let url = self.users_url(Some(id))?;
        let body = self.send(self.client.put(url).json(draft), Some(id)).await?;
        decode(&body)
    }

    async fn delete_user(&self, id: &UserRecordId) -> Result<(), UserDirectoryError> {
        let url = self.users_url(Some(id))?;
        self.send(self.client.delete(url), Some(id)).await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, UserDirectoryError> {
    serde_json::from_slice(body).map_err(|error| {
        UserDirectoryError::decode(format!("invalid user store JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> UserDirectoryError {
    if error.is_timeout() {
        UserDirectoryError::timeout(error.to_string())
    } else {
        UserDirectoryError::transport(error.to_string())
    }
}

fn map_status_error(
    status: StatusCode,
    body: &[u8],
    id: Option<&UserRecordId>,
) -> UserDirectoryError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => UserDirectoryError::not_found(id.as_ref()),
        (StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT, _) => {
            UserDirectoryError::timeout(message)
        }
        (StatusCode::NOT_FOUND, None) => UserDirectoryError::transport(message),
        _ if status.is_client_error() => {
            UserDirectoryError::rejected(store_message(body).unwrap_or(message))
        }
        _ => UserDirectoryError::transport(message),
    }
}

/// The store's own message, when `body` is its error envelope.
fn store_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Error>(body)
        .ok()
        .map(|envelope| envelope.message().to_owned())
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
