//! Activity entry form: builds an activity record from user input and writes it.

use std::time::{Duration, Instant};

use serde_json::Value;
use skapi::{PostConfig, Record};
#[cfg(test)]
use skapi::RecordStore;
use thiserror::Error;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

use super::state::TextInput;
use crate::activity::{
    activities_table, ActivityData, ActivityType, NOT_SPECIFIED, NO_DESCRIPTION,
};
use crate::time_utils::LocalZone;

/// How long a submit message stays on screen.
pub const MESSAGE_TTL: Duration = Duration::from_secs(3);
pub const ADDED_MESSAGE: &str = "Activity added successfully!";
const FALLBACK_ERROR: &str = "Failed to add activity";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ActivityType,
    Company,
    Position,
    Duration,
    Date,
    Time,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Added(Record<ActivityData>),
    Failed,
    /// A submission was already in flight.
    Busy,
}

/// A validated activity waiting to be written.
#[derive(Debug)]
pub struct PendingSubmit {
    pub data: ActivityData,
    pub value: Value,
    pub config: PostConfig,
}

#[derive(Debug, Clone)]
pub struct ActivityForm {
    pub activity_type: ActivityType,
    pub description: TextInput,
    pub duration: TextInput,
    pub date: TextInput,
    pub time: TextInput,
    pub company: TextInput,
    pub position: TextInput,
    pub focused: FormField,
    pub submitting: bool,
    flash: Option<Flash>,
    // Every submission schedules one clear. Any clear that comes due wipes the
    // current message, even if a newer submission put it there.
    pending_clears: Vec<Instant>,
}

impl ActivityForm {
    /// A blank form with date and time defaulting to `now`.
    pub fn new(now: OffsetDateTime) -> Self {
        let date = format!(
            "{:04}-{:02}-{:02}",
            now.year(),
            now.month() as u8,
            now.day()
        );
        let time = format!("{:02}:{:02}", now.hour(), now.minute());

        Self {
            activity_type: ActivityType::default(),
            description: TextInput::new(),
            duration: TextInput::new(),
            date: TextInput::from_str(&date),
            time: TextInput::from_str(&time),
            company: TextInput::new(),
            position: TextInput::new(),
            focused: FormField::ActivityType,
            submitting: false,
            flash: None,
            pending_clears: Vec::new(),
        }
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    pub fn is_job_related(&self) -> bool {
        self.activity_type.is_job_related()
    }

    pub fn needs_duration(&self) -> bool {
        self.activity_type.needs_duration()
    }

    /// Fields in display order. Conditional fields only appear for the
    /// categories that carry them.
    pub fn visible_fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::ActivityType];
        if self.is_job_related() {
            fields.extend([FormField::Company, FormField::Position]);
        }
        if self.needs_duration() {
            fields.push(FormField::Duration);
        }
        fields.extend([FormField::Date, FormField::Time, FormField::Description]);
        fields
    }

    pub fn focus_next(&mut self) {
        let fields = self.visible_fields();
        let idx = fields.iter().position(|f| *f == self.focused);
        self.focused = match idx {
            Some(idx) => fields[(idx + 1) % fields.len()],
            None => fields[0],
        };
    }

    pub fn focus_previous(&mut self) {
        let fields = self.visible_fields();
        let idx = fields.iter().position(|f| *f == self.focused);
        self.focused = match idx {
            Some(idx) => fields[(idx + fields.len() - 1) % fields.len()],
            None => fields[0],
        };
    }

    pub fn cycle_type(&mut self, forward: bool) {
        self.activity_type = if forward {
            self.activity_type.next()
        } else {
            self.activity_type.previous()
        };
    }

    fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focused {
            FormField::ActivityType => None,
            FormField::Company => Some(&mut self.company),
            FormField::Position => Some(&mut self.position),
            FormField::Duration => Some(&mut self.duration),
            FormField::Date => Some(&mut self.date),
            FormField::Time => Some(&mut self.time),
            FormField::Description => Some(&mut self.description),
        }
    }

    pub fn focused_input(&self) -> Option<&TextInput> {
        match self.focused {
            FormField::ActivityType => None,
            FormField::Company => Some(&self.company),
            FormField::Position => Some(&self.position),
            FormField::Duration => Some(&self.duration),
            FormField::Date => Some(&self.date),
            FormField::Time => Some(&self.time),
            FormField::Description => Some(&self.description),
        }
    }

    pub fn input_char(&mut self, c: char) {
        let accepted = match self.focused {
            FormField::Duration => c.is_ascii_digit() || c == '.',
            FormField::Date => c.is_ascii_digit() || c == '-',
            FormField::Time => c.is_ascii_digit() || c == ':',
            _ => true,
        };
        if !accepted {
            return;
        }
        if let Some(input) = self.focused_input_mut() {
            input.insert(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(input) = self.focused_input_mut() {
            input.backspace();
        }
    }

    pub fn move_cursor(&mut self, left: bool) {
        if let Some(input) = self.focused_input_mut() {
            if left {
                input.move_left();
            } else {
                input.move_right();
            }
        }
    }

    /// Epoch milliseconds of the entered date and time, read as wall-clock
    /// time in `zone` on the entered date.
    pub fn timestamp_ms(&self, zone: LocalZone) -> Result<i64, FormError> {
        let date = parse_date(&self.date.value)?;
        let time = parse_time(&self.time.value)?;
        let local = PrimitiveDateTime::new(date, time);
        let dt = local.assume_offset(zone.offset_for_local(local));
        Ok((dt.unix_timestamp_nanos() / 1_000_000) as i64)
    }

    pub fn build_activity(&self, zone: LocalZone) -> Result<ActivityData, FormError> {
        let timestamp = self.timestamp_ms(zone)?;

        let description = if self.description.value.is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            self.description.value.clone()
        };

        let (company, position) = if self.is_job_related() {
            (
                Some(or_not_specified(&self.company.value)),
                Some(or_not_specified(&self.position.value)),
            )
        } else {
            (None, None)
        };

        let duration = if self.needs_duration() && !self.duration.value.is_empty() {
            Some(parse_duration(&self.duration.value))
        } else {
            None
        };

        Ok(ActivityData {
            activity_type: self.activity_type.into(),
            description,
            date: self.date.value.clone(),
            time: self.time.value.clone(),
            timestamp,
            company,
            position,
            duration,
        })
    }

    pub fn post_config(&self) -> PostConfig {
        PostConfig {
            table: activities_table(),
            tags: vec![self.activity_type.tag()],
        }
    }

    /// Validate the form and mark it as submitting. The returned write is
    /// posted by the caller and its result handed to [`Self::finish_submit`].
    /// A form that is already submitting, or one that does not validate,
    /// yields the outcome directly.
    pub fn begin_submit(
        &mut self,
        zone: LocalZone,
        now: Instant,
    ) -> Result<PendingSubmit, SubmitOutcome> {
        if self.submitting {
            return Err(SubmitOutcome::Busy);
        }
        self.flash = None;

        let built = self
            .build_activity(zone)
            .map_err(|e| e.to_string())
            .and_then(|data| {
                serde_json::to_value(&data)
                    .map(|value| (data, value))
                    .map_err(|e| e.to_string())
            });

        match built {
            Ok((data, value)) => {
                self.submitting = true;
                Ok(PendingSubmit {
                    data,
                    value,
                    config: self.post_config(),
                })
            }
            Err(message) => Err(self.fail(message, now)),
        }
    }

    /// Apply the result of a write started by [`Self::begin_submit`]. On success
    /// the transient fields are cleared; on failure everything entered is kept.
    /// Either way a message is shown and scheduled to clear after [`MESSAGE_TTL`].
    pub fn finish_submit(
        &mut self,
        data: ActivityData,
        result: skapi::Result<Record>,
        now: Instant,
    ) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(record) => {
                tracing::info!(record_id = %record.record_id, activity_type = %self.activity_type, "activity added");
                self.reset_transient();
                self.show(FlashKind::Success, ADDED_MESSAGE.to_string(), now);
                SubmitOutcome::Added(Record {
                    record_id: record.record_id,
                    uploaded: record.uploaded,
                    tags: record.tags,
                    data,
                })
            }
            Err(e) => self.fail(e.to_string(), now),
        }
    }

    /// Validate, write and apply in one go.
    #[cfg(test)]
    pub async fn submit<S>(&mut self, store: &S, zone: LocalZone, now: Instant) -> SubmitOutcome
    where
        S: RecordStore + ?Sized,
    {
        let pending = match self.begin_submit(zone, now) {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };
        let result = store.post_record(pending.value, &pending.config).await;
        self.finish_submit(pending.data, result, now)
    }

    fn fail(&mut self, message: String, now: Instant) -> SubmitOutcome {
        tracing::warn!(error = %message, "failed to add activity");
        let message = if message.is_empty() {
            FALLBACK_ERROR.to_string()
        } else {
            message
        };
        self.show(FlashKind::Error, message, now);
        SubmitOutcome::Failed
    }

    /// Run message clears that have come due.
    pub fn tick(&mut self, now: Instant) {
        let before = self.pending_clears.len();
        self.pending_clears.retain(|due| *due > now);
        if self.pending_clears.len() != before {
            self.flash = None;
        }
    }

    fn show(&mut self, kind: FlashKind, text: String, now: Instant) {
        self.flash = Some(Flash { kind, text });
        self.pending_clears.push(now + MESSAGE_TTL);
    }

    fn reset_transient(&mut self) {
        self.description.clear();
        self.duration.clear();
        self.company.clear();
        self.position.clear();
    }
}

fn or_not_specified(value: &str) -> String {
    if value.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        value.to_string()
    }
}

/// Hours from user input; anything unparseable counts as zero.
pub fn parse_duration(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|hours| hours.is_finite())
        .unwrap_or(0.0)
}

fn parse_date(input: &str) -> Result<Date, FormError> {
    Date::parse(input.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| FormError::InvalidDate(input.to_string()))
}

fn parse_time(input: &str) -> Result<Time, FormError> {
    let input_trimmed = input.trim();
    Time::parse(input_trimmed, format_description!("[hour]:[minute]"))
        .or_else(|_| Time::parse(input_trimmed, format_description!("[hour]:[minute]:[second]")))
        .map_err(|_| FormError::InvalidTime(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityKind;
    use crate::testing::{ada_store, FailingStore};
    use strum::IntoEnumIterator;
    use time::macros::datetime;
    use time::UtcOffset;

    const UTC: LocalZone = LocalZone::Fixed(UtcOffset::UTC);

    fn form_at(date: &str, time: &str) -> ActivityForm {
        let mut form = ActivityForm::new(datetime!(2024-01-01 00:00 UTC));
        form.date = TextInput::from_str(date);
        form.time = TextInput::from_str(time);
        form
    }

    fn ms(dt: OffsetDateTime) -> i64 {
        (dt.unix_timestamp_nanos() / 1_000_000) as i64
    }

    #[test]
    fn defaults_to_first_type_and_now() {
        let form = ActivityForm::new(datetime!(2024-03-05 07:04 UTC));
        assert_eq!(form.activity_type, ActivityType::JobApplication);
        assert_eq!(form.date.value, "2024-03-05");
        assert_eq!(form.time.value, "07:04");
        assert_eq!(form.focused, FormField::ActivityType);
    }

    #[test]
    fn job_types_carry_company_and_position() {
        for activity_type in ActivityType::iter() {
            let mut form = form_at("2024-01-15", "09:30");
            form.activity_type = activity_type;
            form.duration = TextInput::from_str("2");
            let data = form.build_activity(UTC).unwrap();

            if activity_type.is_job_related() {
                assert_eq!(data.company.as_deref(), Some(NOT_SPECIFIED));
                assert_eq!(data.position.as_deref(), Some(NOT_SPECIFIED));
                assert_eq!(data.duration, None);
            } else {
                assert_eq!(data.company, None);
                assert_eq!(data.position, None);
                assert_eq!(data.duration, Some(2.0));
            }
        }
    }

    #[test]
    fn duration_parsing() {
        let mut form = form_at("2024-01-15", "09:30");
        form.activity_type = ActivityType::Walk;

        form.duration = TextInput::from_str("1.25");
        assert_eq!(
            form.build_activity(UTC).unwrap().duration,
            Some(1.25)
        );

        form.duration = TextInput::from_str("..");
        assert_eq!(
            form.build_activity(UTC).unwrap().duration,
            Some(0.0)
        );

        form.duration = TextInput::new();
        assert_eq!(form.build_activity(UTC).unwrap().duration, None);
    }

    #[test]
    fn timestamp_is_date_and_time_in_offset() {
        let form = form_at("2024-01-15", "09:30");
        assert_eq!(
            form.timestamp_ms(UTC).unwrap(),
            ms(datetime!(2024-01-15 09:30 UTC))
        );

        let zone = LocalZone::Fixed(UtcOffset::from_hms(2, 0, 0).unwrap());
        assert_eq!(
            form.timestamp_ms(zone).unwrap(),
            ms(datetime!(2024-01-15 07:30 UTC))
        );
    }

    #[test]
    fn invalid_date_or_time_is_rejected() {
        let form = form_at("2024-13-01", "09:30");
        assert_eq!(
            form.build_activity(UTC).unwrap_err(),
            FormError::InvalidDate("2024-13-01".to_string())
        );

        let form = form_at("2024-01-15", "25:00");
        assert_eq!(
            form.build_activity(UTC).unwrap_err(),
            FormError::InvalidTime("25:00".to_string())
        );
    }

    #[test]
    fn empty_description_gets_placeholder() {
        let form = form_at("2024-01-15", "09:30");
        let data = form.build_activity(UTC).unwrap();
        assert_eq!(data.description, NO_DESCRIPTION);
    }

    #[test]
    fn visible_fields_follow_category() {
        let mut form = form_at("2024-01-15", "09:30");
        assert_eq!(
            form.visible_fields(),
            vec![
                FormField::ActivityType,
                FormField::Company,
                FormField::Position,
                FormField::Date,
                FormField::Time,
                FormField::Description,
            ]
        );

        form.activity_type = ActivityType::Sleep;
        assert_eq!(
            form.visible_fields(),
            vec![
                FormField::ActivityType,
                FormField::Duration,
                FormField::Date,
                FormField::Time,
                FormField::Description,
            ]
        );
    }

    #[test]
    fn focus_cycles_through_visible_fields() {
        let mut form = form_at("2024-01-15", "09:30");
        form.activity_type = ActivityType::Leisure;
        form.focus_next();
        assert_eq!(form.focused, FormField::Duration);
        form.focus_previous();
        form.focus_previous();
        assert_eq!(form.focused, FormField::Description);
    }

    #[test]
    fn numeric_fields_filter_input() {
        let mut form = form_at("2024-01-15", "09:30");
        form.activity_type = ActivityType::Sleep;
        form.focused = FormField::Duration;
        for c in "7a.5h".chars() {
            form.input_char(c);
        }
        assert_eq!(form.duration.value, "7.5");

        form.focused = FormField::ActivityType;
        form.input_char('x');
        assert_eq!(form.activity_type, ActivityType::Sleep);
    }

    #[tokio::test]
    async fn job_interview_submission() {
        let store = ada_store();
        let mut form = form_at("2024-01-15", "09:30");
        form.activity_type = ActivityType::JobInterview;
        form.company = TextInput::from_str("Acme");
        form.position = TextInput::from_str("Engineer");
        form.description = TextInput::from_str("Phone screen");

        let outcome = form.submit(&store, UTC, Instant::now()).await;
        assert!(matches!(outcome, SubmitOutcome::Added(_)));

        let stored = store.records();
        assert_eq!(stored.len(), 1);
        let record = &stored[0];
        assert_eq!(record.tags, vec!["job_interview".to_string()]);
        assert_eq!(
            record.data["timestamp"],
            serde_json::json!(ms(datetime!(2024-01-15 09:30 UTC)))
        );
        assert_eq!(record.data["company"], serde_json::json!("Acme"));
        assert_eq!(record.data["position"], serde_json::json!("Engineer"));
        assert_eq!(record.data["description"], serde_json::json!("Phone screen"));
        assert!(record.data.get("duration").is_none());
    }

    #[tokio::test]
    async fn sleep_submission() {
        let store = ada_store();
        let mut form = form_at("2024-01-15", "23:00");
        form.activity_type = ActivityType::Sleep;
        form.duration = TextInput::from_str("7.5");
        form.description = TextInput::from_str("slept");

        let outcome = form.submit(&store, UTC, Instant::now()).await;
        let SubmitOutcome::Added(record) = outcome else {
            panic!("expected the record to be added");
        };
        assert_eq!(record.data.duration, Some(7.5));
        assert_eq!(
            record.data.activity_type,
            ActivityKind::Known(ActivityType::Sleep)
        );

        let stored = &store.records()[0];
        assert_eq!(stored.data["duration"], serde_json::json!(7.5));
        assert!(stored.data.get("company").is_none());
        assert!(stored.data.get("position").is_none());
    }

    #[tokio::test]
    async fn success_clears_transient_fields() {
        let store = ada_store();
        let mut form = form_at("2024-01-15", "09:30");
        form.company = TextInput::from_str("Acme");
        form.position = TextInput::from_str("Engineer");
        form.description = TextInput::from_str("Sent CV");

        form.submit(&store, UTC, Instant::now()).await;

        assert!(form.company.is_empty());
        assert!(form.position.is_empty());
        assert!(form.description.is_empty());
        assert_eq!(form.date.value, "2024-01-15");
        assert_eq!(form.time.value, "09:30");
        assert_eq!(
            form.flash(),
            Some(&Flash {
                kind: FlashKind::Success,
                text: ADDED_MESSAGE.to_string()
            })
        );
        assert!(!form.submitting);
    }

    #[tokio::test]
    async fn failure_keeps_input_and_shows_store_message() {
        let store = FailingStore::new("Service unavailable");
        let mut form = form_at("2024-01-15", "09:30");
        form.description = TextInput::from_str("Sent CV");

        let outcome = form.submit(&store, UTC, Instant::now()).await;

        assert!(matches!(outcome, SubmitOutcome::Failed));
        assert_eq!(form.description.value, "Sent CV");
        assert_eq!(
            form.flash(),
            Some(&Flash {
                kind: FlashKind::Error,
                text: "Service unavailable".to_string()
            })
        );
    }

    #[tokio::test]
    async fn invalid_input_is_not_sent() {
        let store = ada_store();
        let mut form = form_at("not-a-date", "09:30");

        let outcome = form.submit(&store, UTC, Instant::now()).await;

        assert!(matches!(outcome, SubmitOutcome::Failed));
        assert!(store.is_empty());
        assert_eq!(form.flash().map(|f| f.kind), Some(FlashKind::Error));
    }

    #[tokio::test]
    async fn busy_form_ignores_submit() {
        let store = ada_store();
        let mut form = form_at("2024-01-15", "09:30");
        form.submitting = true;

        let outcome = form.submit(&store, UTC, Instant::now()).await;
        assert!(matches!(outcome, SubmitOutcome::Busy));
        assert!(store.is_empty());
    }

    #[test]
    fn in_flight_submit_blocks_another() {
        let mut form = form_at("2024-01-15", "09:30");
        let now = Instant::now();

        let pending = form.begin_submit(UTC, now).unwrap();
        assert!(form.submitting);
        assert_eq!(pending.config.tags, vec!["job_application".to_string()]);
        assert!(matches!(
            form.begin_submit(UTC, now),
            Err(SubmitOutcome::Busy)
        ));

        let outcome = form.finish_submit(
            pending.data,
            Err(skapi::SkapiError::Response("Service unavailable".to_string())),
            now,
        );
        assert!(matches!(outcome, SubmitOutcome::Failed));
        assert!(!form.submitting);
        assert!(form.begin_submit(UTC, now).is_ok());
    }

    #[tokio::test]
    async fn message_clears_after_ttl() {
        let store = ada_store();
        let mut form = form_at("2024-01-15", "09:30");
        let start = Instant::now();

        form.submit(&store, UTC, start).await;
        form.tick(start + Duration::from_secs(2));
        assert!(form.flash().is_some());

        form.tick(start + MESSAGE_TTL);
        assert!(form.flash().is_none());
    }

    #[tokio::test]
    async fn rapid_submissions_clear_each_other_early() {
        let store = ada_store();
        let mut form = form_at("2024-01-15", "09:30");
        let start = Instant::now();

        form.submit(&store, UTC, start).await;
        form.submit(&store, UTC, start + Duration::from_secs(2))
            .await;
        assert!(form.flash().is_some());

        // The first submission's clear fires one second into the second message.
        form.tick(start + MESSAGE_TTL);
        assert!(form.flash().is_none());
    }
}
