//! Search client - paginates through the remote search API.
//!
//! Pages are requested one at a time. Fetching stops when a page comes back
//! short, when the result cap is reached, or on the first failure. There are
//! no retries: a failed page ends the whole fetch.

pub mod http;
pub mod transport;

pub use http::{HttpTransport, API_KEY_HEADER, DEFAULT_ENDPOINT};
pub use transport::SearchTransport;

use crate::error::SearchError;
use crate::types::{ResultEntry, SearchMode, SearchRequest};
use serde_json::Number;
use std::time::Duration;
use tracing::{debug, warn};

/// Default number of entries requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default cap on accumulated entries.
pub const DEFAULT_MAX_RESULTS: usize = 10_000;

/// Default pause between consecutive page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(500);

/// Options controlling a paginated fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Stop requesting pages once this many entries are held.
    pub max_results: usize,
    /// Entries requested per page.
    pub page_size: u32,
    /// Pause before each page after the first.
    pub page_delay: Duration,
    /// Query matching mode.
    pub mode: SearchMode,
    /// Ask the server to drop duplicate records.
    pub dedupe: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
            mode: SearchMode::Exact,
            dedupe: false,
        }
    }
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the inter-page pause.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Set the matching mode.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable server-side deduplication.
    pub fn with_dedupe(mut self) -> Self {
        self.dedupe = true;
        self
    }
}

/// Progress information for one successfully fetched page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    /// Page number (1-based).
    pub page: u32,
    /// Entries on this page.
    pub entries: usize,
    /// Entries accumulated so far, this page included.
    pub total: usize,
    /// Remaining quota reported by the server.
    pub balance: Option<Number>,
}

/// Why pagination stopped.
#[derive(Debug)]
pub enum StopReason {
    /// A page held fewer entries than the page size.
    Exhausted,
    /// The result cap was reached.
    LimitReached,
    /// The API rejected the key. No entries are returned.
    Denied(SearchError),
    /// A request failed. Entries from earlier pages are kept.
    Failed(SearchError),
}

impl StopReason {
    /// Whether every available page up to the cap was fetched.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Exhausted | Self::LimitReached)
    }
}

/// The result of a paginated fetch.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Accumulated entries in page order.
    pub entries: Vec<ResultEntry>,
    /// Number of pages fetched successfully.
    pub pages: u32,
    /// Last balance reported by the server.
    pub balance: Option<Number>,
    /// Why fetching stopped.
    pub stop: StopReason,
}

/// Client driving the pagination loop over a [`SearchTransport`].
pub struct SearchClient<T> {
    transport: T,
}

impl<T: SearchTransport> SearchClient<T> {
    /// Create a client over the given transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Get a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch all pages for `query`.
    pub async fn fetch(&self, query: &str, options: &FetchOptions) -> FetchOutcome {
        self.fetch_with(query, options, |_| {}).await
    }

    /// Fetch all pages for `query`, calling `on_page` after every successful page.
    pub async fn fetch_with<F>(
        &self,
        query: &str,
        options: &FetchOptions,
        mut on_page: F,
    ) -> FetchOutcome
    where
        F: FnMut(&PageReport),
    {
        let mut entries: Vec<ResultEntry> = Vec::new();
        let mut balance = None;
        let mut pages = 0;
        let mut page = 1;

        let stop = loop {
            if entries.len() >= options.max_results {
                break StopReason::LimitReached;
            }

            if page > 1 && !options.page_delay.is_zero() {
                tokio::time::sleep(options.page_delay).await;
            }

            let request = SearchRequest::new(
                query,
                page,
                options.page_size,
                options.mode,
                options.dedupe,
            );

            match self.transport.search(&request).await {
                Ok(result) => {
                    let count = result.entries.len();
                    entries.extend(result.entries);
                    balance = result.balance;
                    pages += 1;

                    debug!(page, count, total = entries.len(), "page fetched");
                    on_page(&PageReport {
                        page,
                        entries: count,
                        total: entries.len(),
                        balance: balance.clone(),
                    });

                    if count < options.page_size as usize {
                        break StopReason::Exhausted;
                    }
                    page += 1;
                }
                Err(err) if err.is_auth() => {
                    warn!(page, error = %err, "search rejected");
                    return FetchOutcome {
                        entries: Vec::new(),
                        pages,
                        balance,
                        stop: StopReason::Denied(err),
                    };
                }
                Err(err) => {
                    warn!(page, error = %err, kept = entries.len(), "search request failed");
                    break StopReason::Failed(err);
                }
            }
        };

        FetchOutcome {
            entries,
            pages,
            balance,
            stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchResult;
    use crate::types::SearchPage;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted responses and records every request it receives.
    struct ScriptedTransport {
        responses: Mutex<VecDeque<SearchResult<SearchPage>>>,
        requests: Mutex<Vec<SearchRequest>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<SearchResult<SearchPage>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<SearchRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchTransport for ScriptedTransport {
        async fn search(&self, request: &SearchRequest) -> SearchResult<SearchPage> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(SearchPage::default()))
        }
    }

    /// A page of `count` entries numbered from `start`.
    fn page(start: usize, count: usize, balance: u64) -> SearchResult<SearchPage> {
        let entries = (start..start + count)
            .map(|i| {
                serde_json::from_value(json!({ "id": i, "email": [format!("user{i}@example.com")] }))
                    .unwrap()
            })
            .collect();
        Ok(SearchPage {
            entries,
            balance: Some(Number::from(balance)),
        })
    }

    fn ids(entries: &[ResultEntry]) -> Vec<u64> {
        entries
            .iter()
            .map(|e| e.get("id").and_then(|v| v.as_u64()).unwrap())
            .collect()
    }

    fn options() -> FetchOptions {
        FetchOptions::new().with_page_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_fetch_until_short_page() {
        let client = SearchClient::new(ScriptedTransport::new(vec![
            page(0, 100, 9),
            page(100, 100, 8),
            page(200, 40, 7),
        ]));

        let outcome = client.fetch("example.com", &options()).await;

        assert_eq!(outcome.entries.len(), 240);
        assert_eq!(outcome.pages, 3);
        assert!(matches!(outcome.stop, StopReason::Exhausted));
        assert_eq!(outcome.balance.unwrap().as_u64(), Some(7));
        assert_eq!(ids(&outcome.entries), (0..240).collect::<Vec<u64>>());

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 3);
        let pages: Vec<u32> = requests.iter().map(|r| r.page()).collect();
        assert_eq!(pages, vec![1, 2, 3]);
        assert!(requests.iter().all(|r| r.size() == 100 && r.query() == "example.com"));
    }

    #[tokio::test]
    async fn test_empty_first_page() {
        let client = SearchClient::new(ScriptedTransport::new(vec![page(0, 0, 5)]));

        let outcome = client.fetch("nobody", &options()).await;

        assert!(outcome.entries.is_empty());
        assert!(matches!(outcome.stop, StopReason::Exhausted));
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_access_denied_returns_nothing() {
        let client = SearchClient::new(ScriptedTransport::new(vec![
            Err(SearchError::AccessDenied),
            page(0, 100, 9),
        ]));

        let outcome = client.fetch("example.com", &options()).await;

        assert!(outcome.entries.is_empty());
        assert_eq!(outcome.pages, 0);
        assert!(matches!(outcome.stop, StopReason::Denied(SearchError::AccessDenied)));
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_mid_fetch_discards_pages() {
        let client = SearchClient::new(ScriptedTransport::new(vec![
            page(0, 100, 9),
            Err(SearchError::Unauthorized),
            page(200, 100, 7),
        ]));

        let outcome = client.fetch("example.com", &options()).await;

        assert!(outcome.entries.is_empty());
        assert!(matches!(outcome.stop, StopReason::Denied(SearchError::Unauthorized)));
        assert!(!outcome.stop.is_complete());
        assert_eq!(client.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_prior_pages() {
        let client = SearchClient::new(ScriptedTransport::new(vec![
            page(0, 100, 9),
            page(100, 100, 8),
            Err(SearchError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            }),
            page(300, 100, 6),
        ]));

        let outcome = client.fetch("example.com", &options()).await;

        assert_eq!(ids(&outcome.entries), (0..200).collect::<Vec<u64>>());
        assert_eq!(outcome.pages, 2);
        assert!(matches!(
            outcome.stop,
            StopReason::Failed(SearchError::Status { status: 500, .. })
        ));
        // No retry of the failed page and nothing after it.
        assert_eq!(client.transport().requests().len(), 3);
    }

    #[tokio::test]
    async fn test_stops_at_max_results() {
        let client = SearchClient::new(ScriptedTransport::new(
            (0..10).map(|i| page(i * 100, 100, 1)).collect(),
        ));

        let outcome = client
            .fetch("example.com", &options().with_max_results(250))
            .await;

        // ceil(250 / 100) requests; the last page is not truncated.
        assert_eq!(client.transport().requests().len(), 3);
        assert_eq!(outcome.entries.len(), 300);
        assert!(matches!(outcome.stop, StopReason::LimitReached));
    }

    #[tokio::test]
    async fn test_zero_max_results_sends_nothing() {
        let client = SearchClient::new(ScriptedTransport::new(vec![page(0, 100, 1)]));

        let outcome = client
            .fetch("example.com", &options().with_max_results(0))
            .await;

        assert!(outcome.entries.is_empty());
        assert!(client.transport().requests().is_empty());
        assert!(matches!(outcome.stop, StopReason::LimitReached));
    }

    #[tokio::test]
    async fn test_mode_and_dedupe_on_every_page() {
        let client = SearchClient::new(ScriptedTransport::new(vec![
            page(0, 10, 2),
            page(10, 5, 1),
        ]));
        let options = options()
            .with_page_size(10)
            .with_mode(SearchMode::Regex)
            .with_dedupe();

        client.fetch("^admin", &options).await;

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 2);
        for request in requests {
            assert!(request.regex());
            assert!(!request.wildcard());
            assert!(request.de_dupe());
            assert_eq!(request.size(), 10);
        }
    }

    #[tokio::test]
    async fn test_reports_each_page() {
        let client = SearchClient::new(ScriptedTransport::new(vec![
            page(0, 100, 30),
            page(100, 20, 29),
        ]));
        let mut reports = Vec::new();

        client
            .fetch_with("example.com", &options(), |report| reports.push(report.clone()))
            .await;

        assert_eq!(
            reports,
            vec![
                PageReport {
                    page: 1,
                    entries: 100,
                    total: 100,
                    balance: Some(Number::from(30u64)),
                },
                PageReport {
                    page: 2,
                    entries: 20,
                    total: 120,
                    balance: Some(Number::from(29u64)),
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_between_pages() {
        let client = SearchClient::new(ScriptedTransport::new(vec![
            page(0, 100, 3),
            page(100, 100, 2),
            page(200, 1, 1),
        ]));
        let options = FetchOptions::new();
        let started = tokio::time::Instant::now();

        client.fetch("example.com", &options).await;

        assert_eq!(started.elapsed(), DEFAULT_PAGE_DELAY * 2);
    }
}
