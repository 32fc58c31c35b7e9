//! Display formatting helpers.

use chrono::{DateTime, Utc};

/// Formats a timestamp relative to now ("3 days ago", "just now").
pub fn relative(timestamp: DateTime<Utc>) -> String {
    relative_to(timestamp, Utc::now())
}

/// Formats `timestamp` relative to `now`.
///
/// Future timestamps (clock skew between client and backend) render as
/// "just now" rather than something nonsensical.
pub fn relative_to(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let (count, unit) = if seconds < 3600 {
        (seconds / 60, "minute")
    } else if seconds < 86_400 {
        (seconds / 3600, "hour")
    } else if seconds < 2_592_000 {
        (seconds / 86_400, "day")
    } else if seconds < 31_536_000 {
        (seconds / 2_592_000, "month")
    } else {
        (seconds / 31_536_000, "year")
    };

    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_relative_buckets() {
        let now = at(1_000_000_000);
        assert_eq!(relative_to(at(1_000_000_000 - 30), now), "just now");
        assert_eq!(relative_to(at(1_000_000_000 - 90), now), "1 minute ago");
        assert_eq!(relative_to(at(1_000_000_000 - 7200), now), "2 hours ago");
        assert_eq!(relative_to(at(1_000_000_000 - 86_400 * 3), now), "3 days ago");
        assert_eq!(
            relative_to(at(1_000_000_000 - 86_400 * 40), now),
            "1 month ago"
        );
        assert_eq!(
            relative_to(at(1_000_000_000 - 86_400 * 800), now),
            "2 years ago"
        );
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        let now = at(1_000_000_000);
        assert_eq!(relative_to(at(1_000_000_100), now), "just now");
    }
}
