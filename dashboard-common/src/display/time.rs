//! "Time ago" strings.

use chrono::{DateTime, SecondsFormat, Utc};

const YEAR_MS: i64 = 31_536_000_000;
const MONTH_MS: i64 = 2_592_000_000;
const DAY_MS: i64 = 86_400_000;
const HOUR_MS: i64 = 3_600_000;
const MINUTE_MS: i64 = 60_000;
const SECOND_MS: i64 = 1_000;

const UNITS: [(i64, &str); 5] = [
    (YEAR_MS, "year"),
    (MONTH_MS, "month"),
    (DAY_MS, "day"),
    (HOUR_MS, "hour"),
    (MINUTE_MS, "minute"),
];

/// Relative time from `timestamp` to now.
pub fn time_since(timestamp: DateTime<Utc>) -> String {
    time_since_at(timestamp, Utc::now())
}

/// Relative time from `timestamp` to `now`, using the largest unit with a
/// non-zero count (years and months are fixed 365 and 30 days).
///
/// Future timestamps are described rather than rejected.
pub fn time_since_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - timestamp).num_milliseconds();

    if elapsed < 0 {
        return format!(
            "in the future ({})",
            timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        );
    }

    for (unit_ms, unit) in UNITS {
        let count = elapsed / unit_ms;
        if count >= 1 {
            return plural(count, unit);
        }
    }

    plural(elapsed / SECOND_MS, "second")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn ago(ms: i64) -> String {
        time_since_at(now() - Duration::milliseconds(ms), now())
    }

    #[test]
    fn test_singular_units() {
        assert_eq!(ago(DAY_MS), "1 day ago");
        assert_eq!(ago(HOUR_MS), "1 hour ago");
        assert_eq!(ago(MINUTE_MS), "1 minute ago");
        assert_eq!(ago(YEAR_MS), "1 year ago");
        assert_eq!(ago(MONTH_MS), "1 month ago");
        assert_eq!(ago(SECOND_MS), "1 second ago");
    }

    #[test]
    fn test_largest_unit_wins() {
        assert_eq!(ago(90 * DAY_MS), "3 months ago");
        assert_eq!(ago(400 * DAY_MS), "1 year ago");
        assert_eq!(ago(29 * DAY_MS + 23 * HOUR_MS), "29 days ago");
        assert_eq!(ago(2 * HOUR_MS + 59 * MINUTE_MS), "2 hours ago");
        assert_eq!(ago(59_999), "59 seconds ago");
    }

    #[test]
    fn test_just_now() {
        assert_eq!(ago(0), "0 seconds ago");
        assert_eq!(ago(999), "0 seconds ago");
    }

    #[test]
    fn test_future_timestamp() {
        let future = now() + Duration::seconds(5);
        let text = time_since_at(future, now());
        assert!(text.contains("in the future"));
        assert!(text.contains("2024-03-01T12:00:05.000Z"));
    }
}
