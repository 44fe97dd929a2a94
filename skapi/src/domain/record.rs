use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// Identifier assigned to a record by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque continuation token returned with a page of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StartKey(String);

impl StartKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T = Value> {
    pub record_id: RecordId,
    /// Upload time in epoch milliseconds, assigned by the service.
    pub uploaded: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub data: T,
}

impl Record<Value> {
    /// Deserialize the untyped payload into `T`, keeping the record metadata.
    pub fn parse_data<T: DeserializeOwned>(self) -> Result<Record<T>> {
        let data = serde_json::from_value(self.data)?;
        Ok(Record {
            record_id: self.record_id,
            uploaded: self.uploaded,
            tags: self.tags,
            data,
        })
    }
}

/// One page of a paginated query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub list: Vec<T>,
    #[serde(default)]
    pub start_key: Option<StartKey>,
    pub end_of_list: bool,
}
