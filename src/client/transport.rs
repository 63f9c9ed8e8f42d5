//! Transport trait abstraction.
//!
//! Separates "send one page request" from the pagination loop so the loop
//! can be driven by the real HTTP client or by a scripted fake in tests.

use crate::error::SearchResult;
use crate::types::{SearchPage, SearchRequest};
use async_trait::async_trait;

/// Sends a single page request to the search API.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Fetch one page of results.
    ///
    /// Implementations map authorization failures to
    /// [`SearchError::AccessDenied`](crate::error::SearchError::AccessDenied)
    /// or [`SearchError::Unauthorized`](crate::error::SearchError::Unauthorized).
    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchPage>;
}
