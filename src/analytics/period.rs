//! Progress-so-far aggregation for week, month and year windows
//!
//! Each window ends at the reference day, so the numbers describe progress
//! to date rather than the whole period.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::percent;
use crate::domain::DateWindow;

/// Completion count and percentage within a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub completed: u32,
    pub total: u32,
    pub percentage: u32,
}

/// Count completion days falling inside `window`
///
/// `total` is the inclusive length of the window, so a malformed window
/// (end before start) produces all zeros.
pub fn calculate_period_stats(dates: &[NaiveDate], window: DateWindow) -> PeriodStats {
    let total = window.len();
    let completed = dates
        .iter()
        .filter(|day| window.contains(**day))
        .collect::<BTreeSet<_>>()
        .len() as u32;

    PeriodStats {
        completed,
        total,
        percentage: percent(completed, total),
    }
}

/// Week, month and year progress for one habit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodOverview {
    pub week: PeriodStats,
    pub month: PeriodStats,
    pub year: PeriodStats,
}

pub fn period_overview(dates: &[NaiveDate], today: NaiveDate) -> PeriodOverview {
    PeriodOverview {
        week: calculate_period_stats(dates, DateWindow::week_to_date(today)),
        month: calculate_period_stats(dates, DateWindow::month_to_date(today)),
        year: calculate_period_stats(dates, DateWindow::year_to_date(today)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_period_stats_counts_only_days_in_window() {
        let dates = vec![d(2025, 1, 1), d(2025, 1, 3), d(2025, 1, 9)];
        let stats = calculate_period_stats(&dates, DateWindow::new(d(2025, 1, 1), d(2025, 1, 4)));
        assert_eq!(
            stats,
            PeriodStats {
                completed: 2,
                total: 4,
                percentage: 50
            }
        );
    }

    #[test]
    fn test_percentage_rounds_to_nearest() {
        let dates = vec![d(2025, 1, 1)];
        let stats = calculate_period_stats(&dates, DateWindow::new(d(2025, 1, 1), d(2025, 1, 3)));
        assert_eq!(stats.percentage, 33);

        let dates = vec![d(2025, 1, 1), d(2025, 1, 2)];
        let stats = calculate_period_stats(&dates, DateWindow::new(d(2025, 1, 1), d(2025, 1, 3)));
        assert_eq!(stats.percentage, 67);
    }

    #[test]
    fn test_malformed_window_yields_zeros() {
        let dates = vec![d(2025, 1, 5)];
        let stats = calculate_period_stats(&dates, DateWindow::new(d(2025, 1, 9), d(2025, 1, 1)));
        assert_eq!(stats, PeriodStats::default());
    }

    #[test]
    fn test_duplicate_dates_count_once() {
        let dates = vec![d(2025, 1, 2), d(2025, 1, 2)];
        let stats = calculate_period_stats(&dates, DateWindow::new(d(2025, 1, 1), d(2025, 1, 2)));
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.percentage, 50);
    }

    #[test]
    fn test_completed_never_exceeds_total() {
        let dates: Vec<_> = (1..=31).map(|day| d(2025, 1, day)).collect();
        for end in 1..=31 {
            let stats = calculate_period_stats(&dates, DateWindow::new(d(2025, 1, 1), d(2025, 1, end)));
            assert!(stats.completed <= stats.total);
            assert_eq!(stats.percentage, 100);
        }
    }

    #[test]
    fn test_period_overview_windows() {
        // Sunday 2025-03-16: week starts Monday 2025-03-10
        let today = d(2025, 3, 16);
        let dates = vec![d(2025, 3, 9), d(2025, 3, 10), d(2025, 3, 16), d(2025, 1, 1)];
        let overview = period_overview(&dates, today);

        assert_eq!(overview.week.total, 7);
        assert_eq!(overview.week.completed, 2);
        assert_eq!(overview.month.total, 16);
        assert_eq!(overview.month.completed, 3);
        assert_eq!(overview.year.total, 31 + 28 + 16);
        assert_eq!(overview.year.completed, 4);
    }
}
