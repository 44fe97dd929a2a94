//! Store doubles shared by the unit tests.

use async_trait::async_trait;
use serde_json::Value;
use skapi::{
    DeleteQuery, FetchOptions, MemoryStore, Page, PostConfig, Profile, Record, RecordQuery,
    RecordStore, SessionEvent, SessionListener, SessionProvider, SkapiError,
};
use time::UtcOffset;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::time_utils::LocalZone;

pub const UTC: LocalZone = LocalZone::Fixed(UtcOffset::UTC);

pub fn ada() -> Profile {
    Profile {
        user_id: "u-ada".to_string(),
        email: "ada@example.com".to_string(),
        name: Some("Ada".to_string()),
    }
}

/// A memory store with Ada already signed in.
pub fn ada_store() -> MemoryStore {
    MemoryStore::new().signed_in(ada())
}

/// Fails every call with the same service message.
#[derive(Debug, Default)]
pub struct FailingStore {
    message: String,
    listener: SessionListener,
}

impl FailingStore {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            listener: SessionListener::default(),
        }
    }

    fn error(&self) -> SkapiError {
        SkapiError::Response(self.message.clone())
    }
}

#[async_trait]
impl SessionProvider for FailingStore {
    async fn get_profile(&self) -> skapi::Result<Option<Profile>> {
        Err(self.error())
    }

    async fn login(&self, _email: &str, _password: &str) -> skapi::Result<Profile> {
        Err(self.error())
    }

    async fn logout(&self) -> skapi::Result<()> {
        Err(self.error())
    }

    fn subscribe(&self) -> UnboundedReceiver<SessionEvent> {
        self.listener.subscribe()
    }
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn post_record(&self, _data: Value, _config: &PostConfig) -> skapi::Result<Record> {
        Err(self.error())
    }

    async fn get_records(
        &self,
        _query: &RecordQuery,
        _options: &FetchOptions,
    ) -> skapi::Result<Page<Record>> {
        Err(self.error())
    }

    async fn delete_records(&self, _query: &DeleteQuery) -> skapi::Result<()> {
        Err(self.error())
    }
}
