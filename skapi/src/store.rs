//! Collaborator contract consumed by clients.
//!
//! Both traits are implemented by [`crate::SkapiClient`] (the real service) and
//! [`crate::MemoryStore`] (local development and tests).

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    DeleteQuery, FetchOptions, Page, PostConfig, Profile, Record, RecordQuery, Result,
    SessionEvent,
};

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The current session's profile, or `None` when nobody is signed in.
    async fn get_profile(&self) -> Result<Option<Profile>>;

    async fn login(&self, email: &str, password: &str) -> Result<Profile>;

    async fn logout(&self) -> Result<()>;

    /// Register the single listener for login/logout events.
    fn subscribe(&self) -> UnboundedReceiver<SessionEvent>;
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Write a new record tagged with `config.tags`.
    async fn post_record(&self, data: Value, config: &PostConfig) -> Result<Record>;

    /// Fetch one page of records matching `query`.
    async fn get_records(&self, query: &RecordQuery, options: &FetchOptions)
        -> Result<Page<Record>>;

    async fn delete_records(&self, query: &DeleteQuery) -> Result<()>;
}

/// Everything a client needs from the service.
pub trait Backend: SessionProvider + RecordStore {}

impl<T: SessionProvider + RecordStore + ?Sized> Backend for T {}
