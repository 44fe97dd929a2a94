use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RecordId;

/// Reserved index holding each record's upload time.
pub const UPLOADED_INDEX: &str = "$uploaded";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessGroup {
    Public,
    Authorized,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    pub access_group: AccessGroup,
}

impl TableRef {
    pub fn new(name: impl Into<String>, access_group: AccessGroup) -> Self {
        Self {
            name: name.into(),
            access_group,
        }
    }

    pub fn private(name: impl Into<String>) -> Self {
        Self::new(name, AccessGroup::Private)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
}

impl Condition {
    /// Whether `indexed.cmp(&value)` satisfies this condition.
    pub fn matches(self, ordering: Ordering) -> bool {
        match self {
            Condition::Eq => ordering == Ordering::Equal,
            Condition::Ne => ordering != Ordering::Equal,
            Condition::Gt => ordering == Ordering::Greater,
            Condition::Gte => ordering != Ordering::Less,
            Condition::Lt => ordering == Ordering::Less,
            Condition::Lte => ordering != Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuery {
    pub name: String,
    pub value: Value,
    pub condition: Condition,
}

impl IndexQuery {
    pub fn new(name: impl Into<String>, value: impl Into<Value>, condition: Condition) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            condition,
        }
    }

    /// Every record uploaded after `epoch_ms`. With `0` this selects the whole table
    /// ordered by upload time.
    pub fn uploaded_after(epoch_ms: i64) -> Self {
        Self::new(UPLOADED_INDEX, epoch_ms, Condition::Gt)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordQuery {
    pub table: TableRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexQuery>,
}

impl RecordQuery {
    pub fn new(table: TableRef) -> Self {
        Self {
            table,
            tag: None,
            index: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_index(mut self, index: IndexQuery) -> Self {
        self.index = Some(index);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOptions {
    pub ascending: bool,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_key: Option<super::StartKey>,
}

/// Where and how a new record is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostConfig {
    pub table: TableRef,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteQuery {
    pub record_id: RecordId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_serializes_to_service_shape() {
        let query = RecordQuery::new(TableRef::private("activities"))
            .with_tag("sleep")
            .with_index(IndexQuery::uploaded_after(0));

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "table": { "name": "activities", "access_group": "private" },
                "tag": "sleep",
                "index": { "name": "$uploaded", "value": 0, "condition": ">" }
            })
        );
    }

    #[test]
    fn untagged_query_omits_tag() {
        let query = RecordQuery::new(TableRef::private("activities"));
        let value = serde_json::to_value(&query).unwrap();
        assert!(value.get("tag").is_none());
        assert!(value.get("index").is_none());
    }

    #[test]
    fn fetch_options_omit_missing_start_key() {
        let options = FetchOptions {
            ascending: false,
            limit: 20,
            start_key: None,
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({ "ascending": false, "limit": 20 })
        );
    }

    #[test]
    fn conditions_match_orderings() {
        assert!(Condition::Gt.matches(Ordering::Greater));
        assert!(!Condition::Gt.matches(Ordering::Equal));
        assert!(Condition::Gte.matches(Ordering::Equal));
        assert!(Condition::Lte.matches(Ordering::Less));
        assert!(Condition::Ne.matches(Ordering::Less));
        assert!(!Condition::Eq.matches(Ordering::Less));
    }
}
