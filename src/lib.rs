//! # leakseek - breach-data search from the command line
//!
//! leakseek queries a breach search API for records matching a domain,
//! username, phone number or email address, pages through every result up
//! to a cap, prints a preview table and saves the full result set as JSON.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use leakseek::client::{FetchOptions, HttpTransport, SearchClient, DEFAULT_ENDPOINT};
//! use leakseek::storage::{ResultStore, WriteMode};
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = HttpTransport::new("api-key", DEFAULT_ENDPOINT, None).unwrap();
//!     let client = SearchClient::new(transport);
//!
//!     let outcome = client.fetch("example.com", &FetchOptions::new()).await;
//!     println!("{} entries, stopped: {:?}", outcome.entries.len(), outcome.stop);
//!
//!     ResultStore::new("results.json")
//!         .persist(&outcome.entries, WriteMode::Append)
//!         .unwrap();
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Request and result types
//! - [`client`] - Paginated fetch over a pluggable transport
//! - [`output`] - Console messages and the preview table
//! - [`storage`] - JSON result file persistence
//! - [`config`] - Optional settings file
//! - [`error`] - Error types

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use client::{FetchOptions, FetchOutcome, SearchClient, SearchTransport, StopReason};
pub use error::{CliError, SearchError};
pub use types::{ResultEntry, SearchMode, SearchRequest};
