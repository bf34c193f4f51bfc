//! "Time since last save" display text.

use chrono::{DateTime, Local, Utc};

/// Describes how long ago `saved_at` was, relative to `now`.
///
/// Minutes are floored. Anything under one minute (including timestamps in
/// the future) reads as "just now"; from one hour on, whole hours accumulate
/// without escalating to days.
pub fn format_time_ago(saved_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(saved_at) = saved_at else {
        return "Not saved yet.".to_string();
    };

    let diff_minutes = (now - saved_at).num_milliseconds().div_euclid(60_000);
    if diff_minutes < 1 {
        "Saved just now.".to_string()
    } else if diff_minutes == 1 {
        "Saved 1 minute ago.".to_string()
    } else if diff_minutes < 60 {
        format!("Saved {diff_minutes} minutes ago.")
    } else {
        format!("Saved about {} hour(s) ago.", diff_minutes / 60)
    }
}

/// Task creation time in the local zone, as shown next to each task.
pub fn format_created_at(created_at: DateTime<Utc>) -> String {
    format!(
        "Created: {}",
        created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    )
}

#[cfg(test)]
mod tests {
    use super::{format_created_at, format_time_ago};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
    }

    fn minutes_ago(minutes: i64) -> Option<DateTime<Utc>> {
        Some(now() - Duration::minutes(minutes))
    }

    #[test]
    fn absent_timestamp_is_not_saved_yet() {
        assert_eq!(format_time_ago(None, now()), "Not saved yet.");
    }

    #[test]
    fn minute_and_hour_boundaries() {
        assert_eq!(format_time_ago(minutes_ago(0), now()), "Saved just now.");
        assert_eq!(
            format_time_ago(Some(now() - Duration::seconds(59)), now()),
            "Saved just now."
        );
        assert_eq!(format_time_ago(minutes_ago(1), now()), "Saved 1 minute ago.");
        assert_eq!(format_time_ago(minutes_ago(2), now()), "Saved 2 minutes ago.");
        assert_eq!(format_time_ago(minutes_ago(59), now()), "Saved 59 minutes ago.");
        assert_eq!(
            format_time_ago(minutes_ago(60), now()),
            "Saved about 1 hour(s) ago."
        );
        assert_eq!(
            format_time_ago(minutes_ago(61), now()),
            "Saved about 1 hour(s) ago."
        );
    }

    #[test]
    fn hours_accumulate_without_day_escalation() {
        assert_eq!(
            format_time_ago(minutes_ago(3 * 24 * 60 + 30), now()),
            "Saved about 72 hour(s) ago."
        );
    }

    #[test]
    fn future_timestamp_reads_as_just_now() {
        assert_eq!(
            format_time_ago(Some(now() + Duration::minutes(5)), now()),
            "Saved just now."
        );
    }

    #[test]
    fn created_at_has_label() {
        assert!(format_created_at(now()).starts_with("Created: 2024-"));
    }
}
