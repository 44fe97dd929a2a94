use skapi::{Profile, SessionEvent, SessionProvider};

/// Session state owned by the root of the application.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// The initial session check has not finished.
    Loading,
    Unauthenticated,
    Authenticated(Profile),
}

/// Tracks who is signed in and tells the activity list when to refetch.
#[derive(Debug, Clone)]
pub struct RootController {
    state: SessionState,
    refresh_trigger: u64,
}

impl Default for RootController {
    fn default() -> Self {
        Self::new()
    }
}

impl RootController {
    pub fn new() -> Self {
        Self {
            state: SessionState::Loading,
            refresh_trigger: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn profile(&self) -> Option<&Profile> {
        match &self.state {
            SessionState::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.profile().is_some()
    }

    pub fn refresh_trigger(&self) -> u64 {
        self.refresh_trigger
    }

    /// Resolve the initial session check. Ignored once the session is known,
    /// since a login or logout event may already have arrived.
    pub fn session_checked(&mut self, profile: Option<Profile>) {
        if self.state != SessionState::Loading {
            return;
        }
        self.state = match profile {
            Some(profile) => {
                tracing::info!(user_id = %profile.user_id, "existing session found");
                SessionState::Authenticated(profile)
            }
            None => {
                tracing::info!("no existing session");
                SessionState::Unauthenticated
            }
        };
    }

    /// Ask the provider for the current session and resolve the check with it.
    /// A failed check counts as signed out.
    pub async fn check_session<P>(&mut self, provider: &P)
    where
        P: SessionProvider + ?Sized,
    {
        let profile = match provider.get_profile().await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "session check failed");
                None
            }
        };
        self.session_checked(profile);
    }

    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::LoggedIn(profile) => {
                tracing::info!(user_id = %profile.user_id, "logged in");
                self.state = SessionState::Authenticated(profile);
            }
            SessionEvent::LoggedOut => {
                tracing::info!("logged out");
                self.state = SessionState::Unauthenticated;
            }
        }
    }

    /// Called after the form writes a record.
    pub fn activity_added(&mut self) {
        self.refresh_trigger = self.refresh_trigger.wrapping_add(1);
    }
}
