//! Calendar projections of a habit's completion record
//!
//! Turns a list of completion days into the grids the month, week and year
//! views render. Days after the reference day are flagged as future and are
//! never shown as completed.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::analytics::period::calculate_period_stats;
use crate::domain::{days_in_month, DateWindow, WeekStart};

/// One cell of a calendar view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Day of month (1-31)
    pub day: u32,
    pub completed: bool,
    pub is_today: bool,
    pub is_future: bool,
}

impl CalendarDay {
    fn project(date: NaiveDate, today: NaiveDate, done: &BTreeSet<NaiveDate>) -> Self {
        let is_future = date > today;
        Self {
            date,
            day: date.day(),
            completed: !is_future && done.contains(&date),
            is_today: date == today,
            is_future,
        }
    }
}

/// Every day of `today`'s month, ascending
pub fn generate_month_calendar(dates: &[NaiveDate], today: NaiveDate) -> Vec<CalendarDay> {
    let done: BTreeSet<NaiveDate> = dates.iter().copied().collect();
    let length = days_in_month(today.year(), today.month());

    (1..=length)
        .filter_map(|day| NaiveDate::from_ymd_opt(today.year(), today.month(), day))
        .map(|date| CalendarDay::project(date, today, &done))
        .collect()
}

/// The seven days of `today`'s week, starting on the user's preferred day
pub fn week_strip(dates: &[NaiveDate], today: NaiveDate, week_start: WeekStart) -> Vec<CalendarDay> {
    let done: BTreeSet<NaiveDate> = dates.iter().copied().collect();
    let first = week_start.start_of_week(today);

    (0..7)
        .map(|offset| CalendarDay::project(first + Duration::days(offset), today, &done))
        .collect()
}

/// Progress for one month of the year view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    /// Month number (1-12)
    pub month: u32,
    pub completed: u32,
    /// Days of the month up to and including today
    pub elapsed_days: u32,
    pub percentage: u32,
}

/// Twelve month summaries for `today`'s year
pub fn year_overview(dates: &[NaiveDate], today: NaiveDate) -> Vec<MonthSummary> {
    let year = today.year();

    (1..=12)
        .filter_map(|month| {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
            let stats = calculate_period_stats(dates, DateWindow::new(first, last.min(today)));
            Some(MonthSummary {
                month,
                completed: stats.completed,
                elapsed_days: stats.total,
                percentage: stats.percentage,
            })
        })
        .collect()
}
