use super::*;
use skapi::SessionEvent;

impl App {
    /// Bring the current view in line with the session state.
    pub fn sync_view(&mut self) {
        self.current_view = match self.controller.state() {
            SessionState::Loading => View::Loading,
            SessionState::Unauthenticated => View::Login,
            SessionState::Authenticated(_) => match self.current_view {
                View::ConfirmDelete => View::ConfirmDelete,
                _ => View::Main,
            },
        };
    }

    pub fn handle_session_event(&mut self, event: SessionEvent) {
        let logged_out = event == SessionEvent::LoggedOut;
        self.controller.handle_event(event);

        if logged_out {
            self.list.reset();
            self.form = ActivityForm::new(self.zone.now());
            self.delete_context = None;
            self.pane = Pane::Form;
        }
        self.login.password_input.clear();
        self.login.error = None;
        self.sync_view();
    }

    pub fn focus_pane(&mut self, pane: Pane) {
        self.pane = pane;
    }
}
