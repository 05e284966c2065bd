//! Where the initial user list comes from.
//!
//! [`HttpSource`] owns transport concerns only: request, status mapping and
//! JSON decoding into [`UserRecord`]s. Tests substitute their own
//! [`RecordSource`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::model::user::UserRecord;

const USER_AGENT: &str = concat!("roster/", env!("CARGO_PKG_VERSION"));

/// Error type for fetching the user list
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("invalid source url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("source returned {status}")]
    Status { status: StatusCode },
    #[error("could not decode user list: {0}")]
    Decode(String),
}

/// A read-only provider of the full user list
#[async_trait]
pub trait RecordSource {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, SourceError>;
}

/// Fetches the user list with a single GET against one endpoint.
pub struct HttpSource {
    client: Client,
    endpoint: Url,
}

impl HttpSource {
    /// Build a source whose requests give up after `timeout`.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, SourceError> {
        let endpoint = Url::parse(endpoint).map_err(|e| SourceError::InvalidUrl {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(HttpSource { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, SourceError> {
        debug!(url = %self.endpoint, "fetching users");
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { status });
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        parse_users(&body)
    }
}

/// Decode a JSON array of user objects. Fields beyond the five text fields
/// and `id` are ignored.
pub fn parse_users(body: &[u8]) -> Result<Vec<UserRecord>, SourceError> {
    serde_json::from_slice(body).map_err(|e| SourceError::Decode(e.to_string()))
}
