//! Relative "time since last change" descriptions.

use chrono::{DateTime, Utc};

/// Describes the time elapsed between `then` and `now` in coarse units.
///
/// Under an hour is `"Just now"`, then whole hours up to a day, whole days up
/// to a week, and whole weeks beyond that. Timestamps in the future are
/// treated as just now.
#[must_use]
pub fn describe_time_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);

    let hours = elapsed.num_hours();
    if hours < 1 {
        return "Just now".to_owned();
    }
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = elapsed.num_days();
    if days < 7 {
        return plural(days, "day");
    }

    plural(elapsed.num_weeks(), "week")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
