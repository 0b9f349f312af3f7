use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Day of the week, Monday-first.
///
/// Weekly schedules are keyed by these seven values in this fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven weekdays in Monday-first order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// English day name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Zero-based offset from Monday.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|d| d == self).unwrap_or(0)
    }

    /// Weekday of a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::ALL[date.weekday().num_days_from_monday() as usize]
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Monday of the week containing `date`.
///
/// Saved schedules are dated from this day, so a plan generated mid-week
/// still covers the full Monday-Sunday span.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The seven weekdays rotated so that `first` comes first.
///
/// Used for the "focus for today" view, which lists the week starting from
/// the current day.
pub fn day_order_from(first: Weekday) -> [Weekday; 7] {
    let mut order = [Weekday::Monday; 7];
    let offset = first.index();
    for (i, slot) in order.iter_mut().enumerate() {
        *slot = Weekday::ALL[(offset + i) % 7];
    }
    order
}
