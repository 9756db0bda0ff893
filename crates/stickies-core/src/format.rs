//! Display formatting for timestamps.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// Long-form date and time, e.g. `January 5, 2024, 3:04 PM`.
///
/// Rendered in the instant's own time zone; callers convert to local time
/// first if that is what they want to show.
pub fn format_timestamp<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.format("%B %-d, %Y, %-I:%M %p").to_string()
}

/// Compact age of a timestamp relative to `now` (`just now`, `5m ago`, ...).
pub fn format_relative_time<Tz>(then: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
{
    let seconds = now.clone().signed_duration_since(then.clone()).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }

    format!("{}d ago", hours / 24)
}
