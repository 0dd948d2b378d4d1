//! Calendar date helpers
//!
//! All day arithmetic in the crate goes through `NaiveDate`; strings only
//! appear at the edges (`YYYY-MM-DD` on the wire and in the database).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Wire and storage format for calendar days
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Weekdays in the fixed Sun..Sat order used for day-of-week buckets
pub const WEEKDAYS_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Parse a `YYYY-MM-DD` string into a date
pub fn parse_day(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), DAY_FORMAT)
        .map_err(|_| DomainError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", s)))
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// The current local calendar date
///
/// Only the outer layers (binary, tools) call this; everything below takes
/// the reference day as a parameter.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve an optional caller-supplied reference day, defaulting to today
pub fn resolve_today(override_day: Option<&str>) -> Result<NaiveDate, DomainError> {
    match override_day {
        Some(s) => parse_day(s),
        None => Ok(today()),
    }
}

/// Number of days in the given month, leap years included
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return 0,
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(next) => (next - first).num_days() as u32,
        None => 31,
    }
}

/// Index of a weekday in the Sun..Sat bucket order
pub fn weekday_index(day: NaiveDate) -> usize {
    day.weekday().num_days_from_sunday() as usize
}

/// Inclusive range of calendar days
///
/// A window whose end precedes its start is empty rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Monday of the reference day's week through the reference day
    ///
    /// Weeks here always run Monday to Sunday, independent of the
    /// display preference in [`WeekStart`].
    pub fn week_to_date(reference: NaiveDate) -> Self {
        let offset = reference.weekday().num_days_from_monday() as i64;
        Self::new(reference - Duration::days(offset), reference)
    }

    /// First of the reference day's month through the reference day
    pub fn month_to_date(reference: NaiveDate) -> Self {
        let start = reference.with_day(1).unwrap_or(reference);
        Self::new(start, reference)
    }

    /// January 1 of the reference day's year through the reference day
    pub fn year_to_date(reference: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap_or(reference);
        Self::new(start, reference)
    }

    /// The `days` most recent days ending at `today`
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        if days == 0 {
            return Self::new(today.succ_opt().unwrap_or(today), today);
        }
        let start = today
            .checked_sub_signed(Duration::days(days as i64 - 1))
            .unwrap_or(NaiveDate::MIN);
        Self::new(start, today)
    }

    /// Inclusive day count, 0 for a malformed window
    pub fn len(&self) -> u32 {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start).num_days() as u32 + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Days of the window in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.len() as i64).map(move |offset| start + Duration::days(offset))
    }

    /// Days of the window from newest to oldest
    pub fn days_rev(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        (0..self.len() as i64).map(move |offset| end - Duration::days(offset))
    }
}

/// User display preference for the first day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    #[default]
    Monday,
}

impl WeekStart {
    pub fn start_of_week(&self, day: NaiveDate) -> NaiveDate {
        let offset = match self {
            WeekStart::Sunday => day.weekday().num_days_from_sunday(),
            WeekStart::Monday => day.weekday().num_days_from_monday(),
        };
        day - Duration::days(offset as i64)
    }
}

impl FromStr for WeekStart {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            _ => Err(DomainError::InvalidWeekStart(s.to_string())),
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => f.write_str("sunday"),
            WeekStart::Monday => f.write_str("monday"),
        }
    }
}
