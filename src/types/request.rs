//! Search request payloads.

use crate::error::{ConfigError, ConfigResult};
use serde::Serialize;
use std::fmt;

/// How the query value is matched by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Plain match.
    #[default]
    Exact,
    /// Wildcard match (`*` and `?`).
    Wildcard,
    /// Regular expression match.
    Regex,
}

impl SearchMode {
    /// Build a mode from the two command-line switches.
    ///
    /// Wildcard and regex matching are mutually exclusive.
    pub fn from_flags(wildcard: bool, regex: bool) -> ConfigResult<Self> {
        match (wildcard, regex) {
            (true, true) => Err(ConfigError::ConflictingSearchModes),
            (true, false) => Ok(Self::Wildcard),
            (false, true) => Ok(Self::Regex),
            (false, false) => Ok(Self::Exact),
        }
    }

    pub fn is_wildcard(self) -> bool {
        self == Self::Wildcard
    }

    pub fn is_regex(self) -> bool {
        self == Self::Regex
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Wildcard => write!(f, "wildcard"),
            Self::Regex => write!(f, "regex"),
        }
    }
}

/// One page request as sent to the search endpoint.
///
/// The `wildcard` and `regex` fields are derived from a [`SearchMode`], so
/// they are never both true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    query: String,
    page: u32,
    size: u32,
    wildcard: bool,
    regex: bool,
    de_dupe: bool,
}

impl SearchRequest {
    /// Create a request for the given page (1-based).
    pub fn new(
        query: impl Into<String>,
        page: u32,
        size: u32,
        mode: SearchMode,
        de_dupe: bool,
    ) -> Self {
        Self {
            query: query.into(),
            page,
            size,
            wildcard: mode.is_wildcard(),
            regex: mode.is_regex(),
            de_dupe,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn wildcard(&self) -> bool {
        self.wildcard
    }

    pub fn regex(&self) -> bool {
        self.regex
    }

    pub fn de_dupe(&self) -> bool {
        self.de_dupe
    }
}
