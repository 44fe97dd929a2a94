use skapi::{MemoryStore, Profile};
use strum::IntoEnumIterator;
use time::{Duration, OffsetDateTime, Time};

use crate::activity::{activities_table, ActivityData, ActivityType, NOT_SPECIFIED};
use crate::time_utils::LocalZone;

pub const DEV_EMAIL: &str = "dev@localhost";
pub const DEV_PASSWORD: &str = "dev";

const SEED_DAYS: i64 = 10;

pub fn dev_profile() -> Profile {
    Profile {
        user_id: "dev-user".to_string(),
        email: DEV_EMAIL.to_string(),
        name: Some("Dev User".to_string()),
    }
}

/// An in-memory store signed in as the dev user and seeded with a few weeks
/// of sample activities, enough to page through.
pub fn dev_store(zone: LocalZone) -> MemoryStore {
    let store = MemoryStore::new()
        .with_user(dev_profile(), DEV_PASSWORD)
        .signed_in(dev_profile());

    let now = zone.now();
    let types: Vec<ActivityType> = ActivityType::iter().collect();

    // Oldest first so upload order follows the entered dates.
    let mut idx = 0usize;
    for day in (0..SEED_DAYS).rev() {
        let date = (now - Duration::days(day)).date();
        for slot in 0..3u8 {
            let activity_type = types[idx % types.len()];
            let hour = 8 + slot * 4;
            let time = Time::from_hms(hour, 15, 0).unwrap_or(Time::MIDNIGHT);
            let local = date.with_time(time);
            let at = local.assume_offset(zone.offset_for_local(local));

            let data = sample(activity_type, idx, at);
            match serde_json::to_value(&data) {
                Ok(value) => {
                    store.insert(activities_table(), vec![activity_type.tag()], value);
                }
                Err(e) => tracing::warn!(error = %e, "skipping dev seed record"),
            }
            idx += 1;
        }
    }

    tracing::debug!(count = store.len(), "seeded dev store");
    store
}

fn sample(activity_type: ActivityType, idx: usize, at: OffsetDateTime) -> ActivityData {
    const COMPANIES: [&str; 4] = ["Acme", "Initech", "Globex", ""];
    const POSITIONS: [&str; 3] = ["Backend Engineer", "Platform Engineer", ""];
    const DURATIONS: [f64; 5] = [0.5, 1.0, 1.25, 2.0, 7.5];

    let (company, position) = if activity_type.is_job_related() {
        let pick = |s: &str| {
            if s.is_empty() {
                NOT_SPECIFIED.to_string()
            } else {
                s.to_string()
            }
        };
        (
            Some(pick(COMPANIES[idx % COMPANIES.len()])),
            Some(pick(POSITIONS[idx % POSITIONS.len()])),
        )
    } else {
        (None, None)
    };

    let duration = activity_type
        .needs_duration()
        .then(|| DURATIONS[idx % DURATIONS.len()]);

    ActivityData {
        activity_type: activity_type.into(),
        description: format!("Sample {} #{}", activity_type.label().to_lowercase(), idx + 1),
        date: format!(
            "{:04}-{:02}-{:02}",
            at.year(),
            at.month() as u8,
            at.day()
        ),
        time: format!("{:02}:{:02}", at.hour(), at.minute()),
        timestamp: (at.unix_timestamp_nanos() / 1_000_000) as i64,
        company,
        position,
        duration,
    }
}
