//! HTTP transport backed by `reqwest`.

use super::transport::SearchTransport;
use crate::error::{SearchError, SearchResult};
use crate::types::{SearchPage, SearchRequest};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Search endpoint of the DeHashed v2 API.
pub const DEFAULT_ENDPOINT: &str = "https://api.dehashed.com/v2/search";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "Dehashed-Api-Key";

/// Longest error body kept in a [`SearchError::Status`] message.
const MAX_ERROR_BODY: usize = 200;

/// Sends search requests over HTTPS.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpTransport {
    /// Create a transport for the given endpoint.
    ///
    /// With `timeout` set to `None` requests use the client's default
    /// behaviour.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> SearchResult<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("leakseek/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SearchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchPage> {
        debug!(page = request.page(), size = request.size(), "sending search request");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        response
            .json::<SearchPage>()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))
    }
}

/// Map a non-success status code to the matching error.
pub(crate) fn status_error(status: StatusCode, body: &str) -> SearchError {
    match status {
        StatusCode::FORBIDDEN => SearchError::AccessDenied,
        StatusCode::UNAUTHORIZED => SearchError::Unauthorized,
        _ => {
            let body = body.trim();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.chars().take(MAX_ERROR_BODY).collect()
            };
            SearchError::Status {
                status: status.as_u16(),
                message,
            }
        }
    }
}
