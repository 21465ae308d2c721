//! Display formatting for forecast values.
//!
//! Every function here is pure and total: any valid timestamp or
//! number produces a string, and absent or unrepresentable input falls
//! back to [`PLACEHOLDER`] instead of failing.

use chrono::{DateTime, Utc};

/// Rendered when a value is absent or unrepresentable.
pub const PLACEHOLDER: &str = "--";

/// Date of a unix timestamp, e.g. `Wed, Aug 27`.
pub fn format_date(ts: i64) -> String {
    match DateTime::<Utc>::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%a, %b %-d").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Short weekday name of a unix timestamp, e.g. `Wed`.
pub fn format_day(ts: i64) -> String {
    match DateTime::<Utc>::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%a").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Clock time of a unix timestamp, e.g. `6:12 AM`. Used for
/// sunrise/sunset.
pub fn format_time(ts: i64) -> String {
    match DateTime::<Utc>::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%-I:%M %p").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Temperature rounded half-up to the nearest integer with a degree
/// suffix: `21.6` becomes `22°`.
pub fn format_temperature(value: Option<f64>) -> String {
    match value {
        Some(t) if t.is_finite() => format!("{}°", t.round() as i64),
        _ => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_rounds_half_up() {
        assert_eq!(format_temperature(Some(21.6)), "22°");
        assert_eq!(format_temperature(Some(21.5)), "22°");
        assert_eq!(format_temperature(Some(21.4)), "21°");
        assert_eq!(format_temperature(Some(0.0)), "0°");
        assert_eq!(format_temperature(Some(-3.5)), "-4°");
    }

    #[test]
    fn temperature_placeholder_for_absent_or_bad_input() {
        assert_eq!(format_temperature(None), PLACEHOLDER);
        assert_eq!(format_temperature(Some(f64::NAN)), PLACEHOLDER);
        assert_eq!(format_temperature(Some(f64::INFINITY)), PLACEHOLDER);
    }

    #[test]
    fn date_and_day_of_epoch() {
        assert_eq!(format_date(0), "Thu, Jan 1");
        assert_eq!(format_day(0), "Thu");
    }

    #[test]
    fn clock_time_of_epoch() {
        assert_eq!(format_time(0), "12:00 AM");
        // 17:45 UTC
        assert_eq!(format_time(63_900), "5:45 PM");
    }

    #[test]
    fn out_of_range_timestamps_use_placeholder() {
        assert_eq!(format_date(i64::MAX), PLACEHOLDER);
        assert_eq!(format_time(i64::MIN), PLACEHOLDER);
    }
}
