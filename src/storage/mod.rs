//! Search result persistence.
//!
//! Stores results as a single pretty-printed JSON array on disk.

mod json_store;

pub use json_store::{ResultStore, WriteMode, DEFAULT_OUTPUT};
