//! Raw feed records
//!
//! One [`RawEventRecord`] per element of the feed's JSON array. Field names
//! are lower-cased on construction so that `EventType`, `eventtype` and
//! `EVENTTYPE` all resolve to the same field. Values are not examined here.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Case-folded names of the fields the classifier reads
pub mod fields {
    pub const EVENT_TYPE: &str = "eventtype";
    pub const EVENT_SUBTYPE: &str = "eventsubtype";
    pub const START_TIME: &str = "starttime";
    pub const END_TIME: &str = "endtime";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
}

/// A single upstream event record with case-folded field names
///
/// When two source fields fold to the same name, a non-null value wins over
/// null; otherwise the first one seen is kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RawEventRecord {
    fields: BTreeMap<String, Value>,
}

impl RawEventRecord {
    /// Build a record from any `(name, value)` pairs
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut fields: BTreeMap<String, Value> = BTreeMap::new();
        for (name, value) in pairs {
            let key = name.as_ref().to_lowercase();
            match fields.get(&key) {
                Some(existing) if !existing.is_null() => {}
                _ => {
                    fields.insert(key, value);
                }
            }
        }
        Self { fields }
    }

    /// Look up a field case-insensitively
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.fields.get(name) {
            Some(value) => Some(value),
            None => self.fields.get(&name.to_lowercase()),
        }
    }

    /// Iterate over all fields (folded names), including ones never examined
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Value> for RawEventRecord {
    /// Non-object values carry no fields and are dropped by the filter
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from_pairs(map),
            _ => Self::default(),
        }
    }
}
