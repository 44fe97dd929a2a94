use time::macros::format_description;
use time::OffsetDateTime;

use crate::time_utils::LocalZone;

/// Format epoch milliseconds like `Jan 15, 2024, 09:30 AM`, using the offset
/// `zone` had at that instant.
pub fn format_timestamp(epoch_ms: i64, zone: LocalZone) -> String {
    let format = format_description!(
        "[month repr:short] [day padding:none], [year], [hour repr:12]:[minute] [period]"
    );

    OffsetDateTime::from_unix_timestamp_nanos(epoch_ms as i128 * 1_000_000)
        .ok()
        .and_then(|dt| dt.to_offset(zone.offset_at(epoch_ms)).format(format).ok())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

/// Format fractional hours as `Xh Ym`, dropping zero components.
pub fn format_duration(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 {
        return String::new();
    }

    let mut h = hours.floor() as u64;
    let mut m = ((hours - hours.floor()) * 60.0).round() as u64;
    if m == 60 {
        h += 1;
        m = 0;
    }

    match (h, m) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};
    use time::UtcOffset;

    const UTC: LocalZone = LocalZone::Fixed(UtcOffset::UTC);

    fn ms(dt: OffsetDateTime) -> i64 {
        (dt.unix_timestamp_nanos() / 1_000_000) as i64
    }

    #[test]
    fn timestamp_morning() {
        let ts = ms(datetime!(2024-01-15 09:30 UTC));
        assert_eq!(format_timestamp(ts, UTC), "Jan 15, 2024, 09:30 AM");
    }

    #[test]
    fn timestamp_evening_in_offset() {
        let ts = ms(datetime!(2024-01-15 23:00 +1));
        assert_eq!(format_timestamp(ts, LocalZone::Fixed(offset!(+1))), "Jan 15, 2024, 11:00 PM");
    }

    #[test]
    fn timestamp_out_of_range() {
        assert_eq!(format_timestamp(i64::MAX, UTC), "Invalid Date");
    }

    #[test]
    fn duration_components() {
        assert_eq!(format_duration(7.5), "7h 30m");
        assert_eq!(format_duration(2.0), "2h");
        assert_eq!(format_duration(0.25), "15m");
    }

    #[test]
    fn duration_zero_is_blank() {
        assert_eq!(format_duration(0.0), "");
        assert_eq!(format_duration(f64::NAN), "");
    }

    #[test]
    fn duration_rounding_carries_into_hours() {
        assert_eq!(format_duration(1.999), "2h");
    }
}
