use chrono::{DateTime, Local, Utc};

/// Render a UTC timestamp in the user's local timezone, seconds included.
pub fn format_local_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn format_kickoff(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%m-%d %H:%M").to_string()
}
