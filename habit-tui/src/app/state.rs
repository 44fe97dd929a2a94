use skapi::RecordId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    /// Initial session check in flight.
    Loading,
    Login,
    Main,
    ConfirmDelete,
}

/// Which half of the main view receives key presses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pane {
    Form,
    List,
}

/// The record awaiting delete confirmation, with owned display values.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteContext {
    pub record_id: RecordId,
    pub display_label: String,
    pub display_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginState {
    pub email_input: TextInput,
    pub password_input: TextInput,
    pub focused_field: LoginField,
    pub error: Option<String>,
}

impl LoginState {
    pub fn new(email: &str) -> Self {
        Self {
            email_input: TextInput::from_str(email),
            password_input: TextInput::new(),
            focused_field: LoginField::Email,
            error: None,
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focused_field {
            LoginField::Email => &mut self.email_input,
            LoginField::Password => &mut self.password_input,
        }
    }
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }
}
