use chrono::{DateTime, Utc};

#[must_use]
pub fn format_clock(value: DateTime<Utc>) -> String {
    value.format("%H:%M").to_string()
}
