//! Statistics engine for habit records
//!
//! Pure functions that turn completion records into streaks, period
//! progress, calendar grids and the historical summary used for insight
//! prompts. Nothing in here touches the clock, the database or the network:
//! the reference day and all history are passed in explicitly.

pub mod calendar;
pub mod history;
pub mod period;
pub mod streak;

pub use calendar::*;
pub use history::*;
pub use period::*;
pub use streak::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{completion_dates, HabitDefinition, RecordBook};

/// Rounded percentage, 0 when there is nothing to divide by
pub(crate) fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Window lengths for the historical summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    /// Days covered by rates, correlations and patterns
    pub window_days: u32,
    /// Days scanned for reflection excerpts
    pub reflection_days: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            reflection_days: 7,
        }
    }
}

/// Streaks, period progress and month grid for a single habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitReport {
    pub habit_id: String,
    pub label: String,
    pub streak: StreakSummary,
    pub periods: PeriodOverview,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calendar: Vec<CalendarDay>,
}

/// Analytics engine for processing habit data
///
/// Holds the summary window configuration; every method is a pure function
/// of its arguments.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    /// Create a new analytics engine with default windows
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Build the single-habit report from its records
    pub fn habit_report(
        &self,
        habit: &HabitDefinition,
        book: &RecordBook,
        today: NaiveDate,
    ) -> HabitReport {
        let dates = completion_dates(book, &habit.id);
        self.report_from_dates(habit, &dates, today)
    }

    /// Same report from the habit's completion dates
    pub fn report_from_dates(
        &self,
        habit: &HabitDefinition,
        dates: &[NaiveDate],
        today: NaiveDate,
    ) -> HabitReport {
        HabitReport {
            habit_id: habit.id.to_string(),
            label: habit.label.clone(),
            streak: StreakSummary::from_dates(dates, today),
            periods: period_overview(dates, today),
            calendar: generate_month_calendar(dates, today),
        }
    }

    /// Historical summary of the trailing window for all given habits
    pub fn summarize(
        &self,
        habits: &[HabitDefinition],
        book: &RecordBook,
        today: NaiveDate,
    ) -> HistoricalSummary {
        compose_summary(book, habits, today, &self.config)
    }
}
