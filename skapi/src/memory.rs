use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use time::OffsetDateTime;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    AccessGroup, DeleteQuery, FetchOptions, IndexQuery, Page, PostConfig, Profile, Record,
    RecordId, RecordQuery, RecordStore, Result, SessionEvent, SessionListener, SessionProvider,
    SkapiError, StartKey, TableRef, UPLOADED_INDEX,
};

/// In-process implementation of the service, used for dev mode and tests.
///
/// Results are always ordered by upload time. Indexes other than `$uploaded`
/// filter on the named data field but do not change the order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    listener: SessionListener,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<MemoryUser>,
    current: Option<Profile>,
    records: Vec<StoredRecord>,
    next_id: u64,
    last_uploaded: i64,
}

#[derive(Debug, Clone)]
struct MemoryUser {
    profile: Profile,
    password: String,
}

#[derive(Debug, Clone)]
struct StoredRecord {
    table: TableRef,
    owner: Option<String>,
    record: Record,
}

impl MemoryState {
    fn next_uploaded(&mut self) -> i64 {
        let now = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
        self.last_uploaded = now.max(self.last_uploaded + 1);
        self.last_uploaded
    }

    fn insert(&mut self, table: TableRef, tags: Vec<String>, data: Value) -> Record {
        self.next_id += 1;
        let record = Record {
            record_id: RecordId::new(format!("mem-{}", self.next_id)),
            uploaded: self.next_uploaded(),
            tags,
            data,
        };
        self.records.push(StoredRecord {
            table,
            owner: self.current.as_ref().map(|p| p.user_id.clone()),
            record: record.clone(),
        });
        record
    }

    fn visible_to_current(&self, stored: &StoredRecord) -> bool {
        match stored.table.access_group {
            AccessGroup::Private => {
                stored.owner.is_some()
                    && stored.owner.as_deref() == self.current.as_ref().map(|p| p.user_id.as_str())
            }
            AccessGroup::Authorized => self.current.is_some(),
            AccessGroup::Public => true,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user that can log in with `password`.
    pub fn with_user(self, profile: Profile, password: &str) -> Self {
        self.lock().users.push(MemoryUser {
            profile,
            password: password.to_string(),
        });
        self
    }

    /// Start with `profile` already signed in.
    pub fn signed_in(self, profile: Profile) -> Self {
        {
            let mut state = self.lock();
            if !state
                .users
                .iter()
                .any(|u| u.profile.user_id == profile.user_id)
            {
                state.users.push(MemoryUser {
                    profile: profile.clone(),
                    password: String::new(),
                });
            }
            state.current = Some(profile);
        }
        self
    }

    /// Write a record on behalf of the current user without going through
    /// [`RecordStore::post_record`]. Used for seeding.
    pub fn insert(&self, table: TableRef, tags: Vec<String>, data: Value) -> Record {
        self.lock().insert(table, tags, data)
    }

    /// Every stored record, oldest first.
    pub fn records(&self) -> Vec<Record> {
        self.lock()
            .records
            .iter()
            .map(|stored| stored.record.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory store lock poisoned")
    }
}

fn compare_index(record: &Record, index: &IndexQuery) -> Option<Ordering> {
    if index.name == UPLOADED_INDEX {
        let value = index.value.as_i64()?;
        return Some(record.uploaded.cmp(&value));
    }

    match (record.data.get(&index.name)?, &index.value) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn parse_start_key(key: &StartKey) -> Result<i64> {
    key.as_str()
        .parse()
        .map_err(|_| SkapiError::InvalidRequest(format!("malformed start key '{}'", key.as_str())))
}

#[async_trait]
impl SessionProvider for MemoryStore {
    async fn get_profile(&self) -> Result<Option<Profile>> {
        Ok(self.lock().current.clone())
    }

    async fn login(&self, email: &str, password: &str) -> Result<Profile> {
        let profile = {
            let mut state = self.lock();
            let user = state
                .users
                .iter()
                .find(|u| u.profile.email.eq_ignore_ascii_case(email) && u.password == password)
                .cloned()
                .ok_or_else(|| SkapiError::Response("Incorrect email or password.".to_string()))?;
            state.current = Some(user.profile.clone());
            user.profile
        };

        self.listener.notify(SessionEvent::LoggedIn(profile.clone()));
        Ok(profile)
    }

    async fn logout(&self) -> Result<()> {
        self.lock().current = None;
        self.listener.notify(SessionEvent::LoggedOut);
        Ok(())
    }

    fn subscribe(&self) -> UnboundedReceiver<SessionEvent> {
        self.listener.subscribe()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn post_record(&self, data: Value, config: &PostConfig) -> Result<Record> {
        let mut state = self.lock();
        if state.current.is_none() {
            return Err(SkapiError::NotLoggedIn);
        }
        Ok(state.insert(config.table.clone(), config.tags.clone(), data))
    }

    async fn get_records(
        &self,
        query: &RecordQuery,
        options: &FetchOptions,
    ) -> Result<Page<Record>> {
        let state = self.lock();
        if query.table.access_group != AccessGroup::Public && state.current.is_none() {
            return Err(SkapiError::NotLoggedIn);
        }

        let mut matching: Vec<&Record> = state
            .records
            .iter()
            .filter(|stored| stored.table == query.table && state.visible_to_current(stored))
            .map(|stored| &stored.record)
            .filter(|record| match &query.tag {
                Some(tag) => record.tags.iter().any(|t| t == tag),
                None => true,
            })
            .filter(|record| match &query.index {
                Some(index) => compare_index(record, index)
                    .is_some_and(|ordering| index.condition.matches(ordering)),
                None => true,
            })
            .collect();

        if options.ascending {
            matching.sort_by_key(|record| record.uploaded);
        } else {
            matching.sort_by_key(|record| std::cmp::Reverse(record.uploaded));
        }

        if let Some(key) = &options.start_key {
            let after = parse_start_key(key)?;
            matching.retain(|record| {
                if options.ascending {
                    record.uploaded > after
                } else {
                    record.uploaded < after
                }
            });
        }

        let limit = options.limit.max(1) as usize;
        let end_of_list = matching.len() <= limit;
        let list: Vec<Record> = matching.into_iter().take(limit).cloned().collect();
        let start_key = if end_of_list {
            None
        } else {
            list.last()
                .map(|record| StartKey::new(record.uploaded.to_string()))
        };

        tracing::debug!(
            table = %query.table.name,
            tag = ?query.tag,
            returned = list.len(),
            end_of_list,
            "memory store query"
        );

        Ok(Page {
            list,
            start_key,
            end_of_list,
        })
    }

    async fn delete_records(&self, query: &DeleteQuery) -> Result<()> {
        let mut state = self.lock();
        if state.current.is_none() {
            return Err(SkapiError::NotLoggedIn);
        }

        let position = state
            .records
            .iter()
            .position(|stored| {
                stored.record.record_id == query.record_id && state.visible_to_current(stored)
            })
            .ok_or_else(|| SkapiError::NotFound(query.record_id.to_string()))?;
        state.records.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Condition;
    use serde_json::json;

    fn ada() -> Profile {
        Profile {
            user_id: "u-ada".to_string(),
            email: "ada@example.com".to_string(),
            name: Some("Ada".to_string()),
        }
    }

    fn grace() -> Profile {
        Profile {
            user_id: "u-grace".to_string(),
            email: "grace@example.com".to_string(),
            name: None,
        }
    }

    fn table() -> TableRef {
        TableRef::private("activities")
    }

    fn newest_first(limit: u32, start_key: Option<StartKey>) -> FetchOptions {
        FetchOptions {
            ascending: false,
            limit,
            start_key,
        }
    }

    fn all_query() -> RecordQuery {
        RecordQuery::new(table()).with_index(IndexQuery::uploaded_after(0))
    }

    #[tokio::test]
    async fn pages_through_records_newest_first() {
        let store = MemoryStore::new().signed_in(ada());
        for i in 0..25 {
            store.insert(table(), vec!["walk".to_string()], json!({ "n": i }));
        }

        let first = store
            .get_records(&all_query(), &newest_first(20, None))
            .await
            .unwrap();
        assert_eq!(first.list.len(), 20);
        assert!(!first.end_of_list);
        assert_eq!(first.list[0].data, json!({ "n": 24 }));

        let second = store
            .get_records(&all_query(), &newest_first(20, first.start_key))
            .await
            .unwrap();
        assert_eq!(second.list.len(), 5);
        assert!(second.end_of_list);
        assert_eq!(second.start_key, None);
        assert_eq!(second.list[4].data, json!({ "n": 0 }));
    }

    #[tokio::test]
    async fn exact_page_size_ends_the_list() {
        let store = MemoryStore::new().signed_in(ada());
        for i in 0..20 {
            store.insert(table(), vec![], json!({ "n": i }));
        }

        let page = store
            .get_records(&all_query(), &newest_first(20, None))
            .await
            .unwrap();
        assert_eq!(page.list.len(), 20);
        assert!(page.end_of_list);
    }

    #[tokio::test]
    async fn filters_by_tag() {
        let store = MemoryStore::new().signed_in(ada());
        store.insert(table(), vec!["sleep".to_string()], json!({}));
        store.insert(table(), vec!["walk".to_string()], json!({}));
        store.insert(table(), vec!["sleep".to_string()], json!({}));

        let page = store
            .get_records(&all_query().with_tag("sleep"), &newest_first(20, None))
            .await
            .unwrap();

        assert_eq!(page.list.len(), 2);
        assert!(page.list.iter().all(|r| r.tags == vec!["sleep".to_string()]));
    }

    #[tokio::test]
    async fn filters_on_data_field_index() {
        let store = MemoryStore::new().signed_in(ada());
        store.insert(table(), vec![], json!({ "hours": 1.5 }));
        store.insert(table(), vec![], json!({ "hours": 8 }));
        store.insert(table(), vec![], json!({ "other": true }));

        let query =
            RecordQuery::new(table()).with_index(IndexQuery::new("hours", 2, Condition::Gte));
        let page = store
            .get_records(&query, &newest_first(20, None))
            .await
            .unwrap();

        assert_eq!(page.list.len(), 1);
        assert_eq!(page.list[0].data, json!({ "hours": 8 }));
    }

    #[tokio::test]
    async fn private_records_are_scoped_to_owner() {
        let store = MemoryStore::new()
            .with_user(grace(), "hopper")
            .signed_in(ada());
        store.insert(table(), vec![], json!({ "owner": "ada" }));

        store.logout().await.unwrap();
        store.login("grace@example.com", "hopper").await.unwrap();

        let page = store
            .get_records(&all_query(), &newest_first(20, None))
            .await
            .unwrap();
        assert!(page.list.is_empty());
        assert!(page.end_of_list);
    }

    #[tokio::test]
    async fn private_queries_require_login() {
        let store = MemoryStore::new();
        let err = store
            .get_records(&all_query(), &newest_first(20, None))
            .await
            .unwrap_err();
        assert_eq!(err, SkapiError::NotLoggedIn);
    }

    #[tokio::test]
    async fn post_record_tags_and_assigns_ids() {
        let store = MemoryStore::new().signed_in(ada());
        let config = PostConfig {
            table: table(),
            tags: vec!["sleep".to_string()],
        };

        let first = store.post_record(json!({ "a": 1 }), &config).await.unwrap();
        let second = store.post_record(json!({ "a": 2 }), &config).await.unwrap();

        assert_ne!(first.record_id, second.record_id);
        assert!(second.uploaded > first.uploaded);
        assert_eq!(first.tags, vec!["sleep".to_string()]);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn delete_unknown_record_is_not_found() {
        let store = MemoryStore::new().signed_in(ada());
        let err = store
            .delete_records(&DeleteQuery {
                record_id: RecordId::from("missing"),
            })
            .await
            .unwrap_err();
        assert_eq!(err, SkapiError::NotFound("missing".to_string()));
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = MemoryStore::new().signed_in(ada());
        let record = store.insert(table(), vec![], json!({}));

        store
            .delete_records(&DeleteQuery {
                record_id: record.record_id,
            })
            .await
            .unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn login_and_logout_notify_the_listener() {
        let store = MemoryStore::new().with_user(ada(), "secret");
        let mut events = store.subscribe();

        let profile = store.login("ADA@example.com", "secret").await.unwrap();
        assert_eq!(profile, ada());
        assert_eq!(store.get_profile().await.unwrap(), Some(ada()));

        store.logout().await.unwrap();
        assert_eq!(store.get_profile().await.unwrap(), None);

        assert_eq!(events.try_recv().unwrap(), SessionEvent::LoggedIn(ada()));
        assert_eq!(events.try_recv().unwrap(), SessionEvent::LoggedOut);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let store = MemoryStore::new().with_user(ada(), "secret");
        let err = store.login("ada@example.com", "nope").await.unwrap_err();
        assert!(matches!(err, SkapiError::Response(_)));
        assert_eq!(store.get_profile().await.unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_start_key_is_rejected() {
        let store = MemoryStore::new().signed_in(ada());
        let err = store
            .get_records(
                &all_query(),
                &newest_first(20, Some(StartKey::new("not-a-number"))),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SkapiError::InvalidRequest(_)));
    }
}
