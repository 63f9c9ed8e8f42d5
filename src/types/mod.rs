//! Core type definitions.
//!
//! The request side is strongly typed so that an invalid combination of
//! search flags cannot reach the wire. The response side stays opaque:
//! entries are kept exactly as the API returned them.

mod entry;
mod request;

pub use entry::{ResultEntry, SearchPage};
pub use request::{SearchMode, SearchRequest};
