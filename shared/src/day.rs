use chrono::{Days, Local, NaiveDate};

/// Calendar day without time or timezone.
pub type Day = NaiveDate;

/// Stored form of a [`Day`].
pub type DayString = String;

/// Sortable and locale independent. Every stored day uses it.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

// Written by the first version of the service, e.g. "Mon Jan 01 2024".
const LEGACY_DAY_FORMAT: &str = "%a %b %d %Y";

pub fn day_string(day: Day) -> DayString {
    day.format(DAY_FORMAT).to_string()
}

/// Parses a stored day. Accepts the legacy form as well so old rows keep
/// their history; they are written back in [`DAY_FORMAT`].
pub fn parse_day(value: &str) -> Option<Day> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(value, LEGACY_DAY_FORMAT))
        .ok()
}

pub fn previous_day(day: Day) -> Option<Day> {
    day.checked_sub_days(Days::new(1))
}

/// Today according to the server's wall clock.
pub fn local_today() -> Day {
    Local::now().date_naive()
}
