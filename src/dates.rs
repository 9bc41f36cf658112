use time::macros::format_description;
use time::Date;

use crate::error::TrackerError;

/// Parse an ISO calendar date key (`YYYY-MM-DD`). Anything else, including
/// unpadded components, is rejected so only canonical keys reach storage.
pub fn parse_iso(s: &str) -> Result<Date, TrackerError> {
    let fmt = format_description!("[year]-[month]-[day]");
    Date::parse(s, fmt).map_err(|_| TrackerError::InvalidDate(s.to_string()))
}

pub fn format_iso(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
