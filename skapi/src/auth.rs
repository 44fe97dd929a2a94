use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// The signed-in user, as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Profile {
    /// The user's name, or their email when no name is set.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn(Profile),
    LoggedOut,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
    pub profile: Profile,
}

/// Delivers login/logout events to a single subscriber.
///
/// Subscribing again replaces the previous receiver, whose channel is then closed.
#[derive(Debug, Clone, Default)]
pub struct SessionListener {
    sender: Arc<Mutex<Option<UnboundedSender<SessionEvent>>>>,
}

impl SessionListener {
    pub fn subscribe(&self) -> UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.sender.lock().expect("session listener lock poisoned") = Some(tx);
        rx
    }

    pub fn notify(&self, event: SessionEvent) {
        let mut sender = self.sender.lock().expect("session listener lock poisoned");
        if let Some(tx) = sender.as_ref() {
            if tx.send(event).is_err() {
                tracing::debug!("session listener dropped, discarding subscription");
                *sender = None;
            }
        }
    }
}
