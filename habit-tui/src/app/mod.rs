use std::time::Instant;

use crate::format::format_timestamp;
use crate::time_utils::LocalZone;

pub mod controller;
pub mod form;
pub mod list;
mod navigation;
mod state;

pub use controller::{RootController, SessionState};
pub use form::{ActivityForm, Flash, FlashKind, FormField, PendingSubmit, SubmitOutcome, MESSAGE_TTL};
pub use list::{ActivityFilter, ActivityList, FetchMode, FetchTicket, PAGE_SIZE};
pub use state::{DeleteContext, LoginField, LoginState, Pane, TextInput, View};

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub pane: Pane,
    /// Zone used for entering and displaying times.
    pub zone: LocalZone,

    pub controller: RootController,
    pub form: ActivityForm,
    pub list: ActivityList,
    pub login: LoginState,

    // Delete confirmation
    pub delete_context: Option<DeleteContext>,

    pub status_message: Option<String>,
    status_until: Option<Instant>,
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new(zone: LocalZone, last_email: &str) -> Self {
        Self {
            running: true,
            current_view: View::Loading,
            pane: Pane::Form,
            zone,
            controller: RootController::new(),
            form: ActivityForm::new(zone.now()),
            list: ActivityList::new(),
            login: LoginState::new(last_email),
            delete_context: None,
            status_message: None,
            status_until: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Whether a spinner should be animated this frame.
    pub fn is_loading(&self) -> bool {
        self.current_view == View::Loading || self.list.loading || self.form.submitting
    }

    /// Show a header message until [`MESSAGE_TTL`] has passed.
    pub fn set_status(&mut self, message: String, now: Instant) {
        self.status_message = Some(message);
        self.status_until = Some(now + MESSAGE_TTL);
    }

    pub fn tick(&mut self, now: Instant) {
        self.form.tick(now);
        if self.status_until.is_some_and(|due| due <= now) {
            self.status_message = None;
            self.status_until = None;
        }
        if self.is_loading() {
            self.throbber_state.calc_next();
        }
    }

    /// Header line for the signed-in user.
    pub fn greeting(&self) -> Option<String> {
        self.controller
            .profile()
            .map(|profile| format!("Welcome, {}", profile.display_name()))
    }

    /// Open the delete dialog for the selected list entry.
    pub fn enter_delete_confirm(&mut self) {
        let Some(record) = self.list.selected_record() else {
            return;
        };
        self.delete_context = Some(DeleteContext {
            record_id: record.record_id.clone(),
            display_label: record.data.activity_type.label().to_string(),
            display_date: format_timestamp(record.data.timestamp, self.zone),
        });
        self.current_view = View::ConfirmDelete;
    }

    pub fn cancel_delete(&mut self) {
        self.delete_context = None;
        self.current_view = View::Main;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ada, UTC};
    use skapi::{Record, RecordId};
    use std::time::Duration;

    use crate::activity::{ActivityData, ActivityType};

    fn record(id: &str) -> Record<ActivityData> {
        Record {
            record_id: RecordId::from(id),
            uploaded: 1,
            tags: vec!["sleep".to_string()],
            data: ActivityData {
                activity_type: ActivityType::Sleep.into(),
                description: "slept".to_string(),
                date: "2024-01-15".to_string(),
                time: "09:30".to_string(),
                timestamp: 1_705_311_000_000,
                company: None,
                position: None,
                duration: Some(7.5),
            },
        }
    }

    #[test]
    fn delete_confirm_captures_selected_record() {
        let mut app = App::new(UTC, "");
        app.list.records = vec![record("a"), record("b")];
        app.list.select_next();

        app.enter_delete_confirm();

        assert_eq!(app.current_view, View::ConfirmDelete);
        assert_eq!(
            app.delete_context,
            Some(DeleteContext {
                record_id: RecordId::from("b"),
                display_label: "Sleep".to_string(),
                display_date: "Jan 15, 2024, 09:30 AM".to_string(),
            })
        );

        app.cancel_delete();
        assert_eq!(app.current_view, View::Main);
        assert!(app.delete_context.is_none());
    }

    #[test]
    fn delete_confirm_needs_a_selection() {
        let mut app = App::new(UTC, "");
        app.current_view = View::Main;
        app.enter_delete_confirm();
        assert_eq!(app.current_view, View::Main);
    }

    #[test]
    fn status_message_expires() {
        let mut app = App::new(UTC, "");
        let start = Instant::now();

        app.set_status("Deleted Sleep".to_string(), start);
        app.tick(start + Duration::from_secs(2));
        assert_eq!(app.status_message.as_deref(), Some("Deleted Sleep"));

        app.tick(start + MESSAGE_TTL);
        assert_eq!(app.status_message, None);
    }

    #[test]
    fn greeting_uses_display_name() {
        let mut app = App::new(UTC, "");
        assert_eq!(app.greeting(), None);
        app.controller.session_checked(Some(ada()));
        assert_eq!(app.greeting().as_deref(), Some("Welcome, Ada"));
    }
}
