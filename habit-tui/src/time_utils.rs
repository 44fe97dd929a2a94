use chrono::{FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Where wall-clock dates and times are resolved to instants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocalZone {
    /// The system time zone. The offset is looked up per date, so daylight
    /// saving is applied for the date in question rather than for today.
    System,
    Fixed(UtcOffset),
}

impl LocalZone {
    /// Offset in effect at the instant `epoch_ms`.
    pub fn offset_at(self, epoch_ms: i64) -> UtcOffset {
        match self {
            LocalZone::Fixed(offset) => offset,
            LocalZone::System => Local
                .timestamp_millis_opt(epoch_ms)
                .earliest()
                .map(|dt| to_utc_offset(*dt.offset()))
                .unwrap_or(UtcOffset::UTC),
        }
    }

    /// Offset that applies to a wall-clock date and time. A repeated time takes
    /// its first occurrence; a time skipped by a forward jump uses the offset
    /// from before the jump.
    pub fn offset_for_local(self, local: PrimitiveDateTime) -> UtcOffset {
        match self {
            LocalZone::Fixed(offset) => offset,
            LocalZone::System => to_naive(local)
                .and_then(resolve_system)
                .map(to_utc_offset)
                .unwrap_or(UtcOffset::UTC),
        }
    }

    pub fn now(self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        let epoch_ms = (now.unix_timestamp_nanos() / 1_000_000) as i64;
        now.to_offset(self.offset_at(epoch_ms))
    }
}

fn resolve_system(naive: NaiveDateTime) -> Option<FixedOffset> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(*dt.offset()),
        LocalResult::None => {
            let before = naive.checked_sub_signed(TimeDelta::try_hours(1)?)?;
            Local
                .from_local_datetime(&before)
                .earliest()
                .map(|dt| *dt.offset())
        }
    }
}

fn to_naive(local: PrimitiveDateTime) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(local.year(), local.month() as u32, local.day() as u32)?
        .and_hms_nano_opt(
            local.hour() as u32,
            local.minute() as u32,
            local.second() as u32,
            local.nanosecond(),
        )
}

fn to_utc_offset(offset: FixedOffset) -> UtcOffset {
    UtcOffset::from_whole_seconds(offset.local_minus_utc()).unwrap_or(UtcOffset::UTC)
}
