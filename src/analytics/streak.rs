//! Streak calculation
//!
//! Streaks are runs of consecutive calendar days with a recorded completion.
//! Inputs are plain lists of completion days; order and duplicates don't
//! matter to callers.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Consecutive completed days ending at `today` or the day before
///
/// A miss on `today` itself does not break the streak yet, but if the most
/// recent completion is neither `today` nor yesterday the streak is 0 no
/// matter how long the older run was.
pub fn current_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = dates.iter().copied().collect();

    let Some(&latest) = days.iter().next_back() else {
        return 0;
    };

    let yesterday = today - Duration::days(1);
    if latest != today && latest != yesterday {
        return 0;
    }

    let mut streak = 0;
    let mut checking = latest;
    while days.contains(&checking) {
        streak += 1;
        checking = match checking.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
    }
    streak
}

/// Longest run of consecutive days anywhere in the history
pub fn longest_streak(dates: &[NaiveDate]) -> u32 {
    let days: BTreeSet<NaiveDate> = dates.iter().copied().collect();
    longest_run(days.into_iter())
}

/// Longest run in an ascending sequence of distinct days
pub(crate) fn longest_run(ascending: impl Iterator<Item = NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in ascending {
        current = match previous {
            Some(prev) if (day - prev).num_days() == 1 => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(day);
    }

    longest
}

/// Streak figures for a single habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
    pub total_completions: u32,
    pub last_completed: Option<NaiveDate>,
}

impl StreakSummary {
    pub fn from_dates(dates: &[NaiveDate], today: NaiveDate) -> Self {
        let distinct: BTreeSet<NaiveDate> = dates.iter().copied().collect();
        Self {
            current: current_streak(dates, today),
            longest: longest_streak(dates),
            total_completions: distinct.len() as u32,
            last_completed: distinct.iter().next_back().copied(),
        }
    }

    /// Get a motivational message based on current streak status
    pub fn motivational_message(&self) -> String {
        match self.current {
            0 => "Ready to start your streak! Every journey begins with a single step.".to_string(),
            1 => "Great start! One day down, keep the momentum going.".to_string(),
            2..=6 => format!("Nice work! {} days in a row. You're building a strong habit.", self.current),
            7..=13 => format!("Excellent! {} days strong. You're in the groove now!", self.current),
            14..=29 => format!("Amazing! {} days straight. This is becoming second nature.", self.current),
            _ => format!("Incredible! {} days of consistency.", self.current),
        }
    }
}
