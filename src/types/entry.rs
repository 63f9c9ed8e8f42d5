//! Result entries and response pages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A single breach record.
///
/// The API does not publish a fixed schema, so the record is kept as the
/// JSON object it arrived as. Fields are looked up by name when rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultEntry(Map<String, Value>);

impl ResultEntry {
    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Iterate over the field names in their original order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Consume the entry, returning the underlying JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// One decoded response from the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    /// Entries on this page, empty when the field is missing.
    #[serde(default)]
    pub entries: Vec<ResultEntry>,
    /// Remaining query quota.
    #[serde(default)]
    pub balance: Option<Number>,
}
