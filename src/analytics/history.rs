//! Historical analytics over a trailing window of daily records
//!
//! Builds the compact summary handed to the text-generation service: per-habit
//! completion rates, weekday breakdowns, trends, pairwise co-occurrence,
//! combined weekday patterns and recent reflection excerpts. Every metric is
//! computed against the same window of days ending at the reference day.
//!
//! Rates only count days on which a habit was explicitly tracked (true or
//! false). Days with no record, or records that don't mention the habit, are
//! left out of the denominator.

use chrono::{Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::analytics::streak::longest_run;
use crate::analytics::{percent, AnalyticsConfig};
use crate::domain::{
    completed_on, habit_state_on, weekday_index, DateWindow, HabitDefinition, HabitId,
    RecordBook, WEEKDAYS_FROM_SUNDAY,
};

/// Trend threshold in percentage points
const TREND_THRESHOLD: i64 = 10;
/// Pairs below this correlation are dropped
const MIN_CORRELATION: u32 = 50;
/// Correlations kept for the prompt payload
const MAX_CORRELATIONS: usize = 5;
/// Reflection excerpts are cut to this many characters
const MAX_REFLECTION_CHARS: usize = 100;

/// Completed vs tracked days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateCount {
    pub completed: u32,
    pub total: u32,
    pub percentage: u32,
}

impl RateCount {
    fn from_counts(completed: u32, total: u32) -> Self {
        Self {
            completed,
            total,
            percentage: percent(completed, total),
        }
    }
}

/// Completion rate for one weekday bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRate {
    pub day: Weekday,
    pub completed: u32,
    pub total: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// How often two habits were completed on the same day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCorrelation {
    pub habit_a: String,
    pub habit_b: String,
    pub correlation: u32,
    pub both_done: u32,
    pub either_done: u32,
}

/// Weekday pattern across all habits combined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPatterns {
    pub rates: [DayRate; 7],
    pub best_day: Weekday,
    pub worst_day: Weekday,
    pub weekday_avg: u32,
    pub weekend_avg: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionExcerpt {
    pub date: NaiveDate,
    pub text: String,
}

/// Per-habit slice of the historical summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitInsight {
    pub id: HabitId,
    pub label: String,
    pub completion_rate: u32,
    pub completed: u32,
    pub tracked_days: u32,
    pub trend: Trend,
    pub best_streak: u32,
    pub day_of_week: [DayRate; 7],
}

/// Everything the insight prompt needs about the trailing window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalSummary {
    pub period_days: u32,
    pub generated_for: NaiveDate,
    pub habits: Vec<HabitInsight>,
    pub correlations: Vec<HabitCorrelation>,
    pub day_patterns: DayPatterns,
    pub recent_reflections: Vec<ReflectionExcerpt>,
}

fn tally(book: &RecordBook, habit: &HabitId, days: impl Iterator<Item = NaiveDate>) -> RateCount {
    let (completed, total) = days
        .filter_map(|day| habit_state_on(book, day, habit))
        .fold((0, 0), |(completed, total), done| {
            (completed + u32::from(done), total + 1)
        });
    RateCount::from_counts(completed, total)
}

/// Completion rate of a habit over the days it was tracked in `window`
pub fn habit_rate(book: &RecordBook, habit: &HabitId, window: DateWindow) -> RateCount {
    tally(book, habit, window.days())
}

fn weekday_buckets(completed: [u32; 7], total: [u32; 7]) -> [DayRate; 7] {
    let mut index = 0;
    WEEKDAYS_FROM_SUNDAY.map(|day| {
        let rate = DayRate {
            day,
            completed: completed[index],
            total: total[index],
            percentage: percent(completed[index], total[index]),
        };
        index += 1;
        rate
    })
}

/// Per-weekday completion rates for one habit, ordered Sun..Sat
pub fn day_of_week_rates(book: &RecordBook, habit: &HabitId, window: DateWindow) -> [DayRate; 7] {
    let mut completed = [0u32; 7];
    let mut total = [0u32; 7];

    for day in window.days() {
        if let Some(done) = habit_state_on(book, day, habit) {
            let bucket = weekday_index(day);
            total[bucket] += 1;
            completed[bucket] += u32::from(done);
        }
    }

    weekday_buckets(completed, total)
}

/// Last 7 days against the 7 days before them
pub fn trend(book: &RecordBook, habit: &HabitId, today: NaiveDate) -> Trend {
    let recent = tally(book, habit, DateWindow::trailing(today, 7).days());
    let previous = tally(
        book,
        habit,
        DateWindow::trailing(today - Duration::days(7), 7).days(),
    );

    let delta = recent.percentage as i64 - previous.percentage as i64;
    if delta > TREND_THRESHOLD {
        Trend::Up
    } else if delta < -TREND_THRESHOLD {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Longest run of completed days inside `window` only
pub fn best_streak_in_window(book: &RecordBook, habit: &HabitId, window: DateWindow) -> u32 {
    longest_run(window.days().filter(|day| completed_on(book, *day, habit)))
}

/// Pairs of habits that tend to be completed together, strongest first
///
/// At most five pairs with a correlation of 50 or more are returned.
pub fn compute_correlations(
    book: &RecordBook,
    habits: &[HabitDefinition],
    window: DateWindow,
) -> Vec<HabitCorrelation> {
    let mut correlations = Vec::new();

    for (i, first) in habits.iter().enumerate() {
        for second in &habits[i + 1..] {
            let mut both_done = 0;
            let mut either_done = 0;

            for day in window.days() {
                let a = completed_on(book, day, &first.id);
                let b = completed_on(book, day, &second.id);
                if a || b {
                    either_done += 1;
                }
                if a && b {
                    both_done += 1;
                }
            }

            if either_done == 0 {
                continue;
            }

            let correlation = percent(both_done, either_done);
            if correlation >= MIN_CORRELATION {
                correlations.push(HabitCorrelation {
                    habit_a: first.label.clone(),
                    habit_b: second.label.clone(),
                    correlation,
                    both_done,
                    either_done,
                });
            }
        }
    }

    correlations.sort_by(|a, b| b.correlation.cmp(&a.correlation));
    correlations.truncate(MAX_CORRELATIONS);
    correlations
}

/// Combined weekday rates across all habits, with best/worst day
///
/// Ties go to the earlier day in Sun..Sat order.
pub fn compute_day_patterns(
    book: &RecordBook,
    habits: &[HabitDefinition],
    window: DateWindow,
) -> DayPatterns {
    let mut completed = [0u32; 7];
    let mut total = [0u32; 7];

    for day in window.days() {
        let bucket = weekday_index(day);
        for habit in habits {
            if let Some(done) = habit_state_on(book, day, &habit.id) {
                total[bucket] += 1;
                completed[bucket] += u32::from(done);
            }
        }
    }

    let rates = weekday_buckets(completed, total);

    let mut best = rates[0];
    let mut worst = rates[0];
    for rate in &rates[1..] {
        if rate.percentage > best.percentage {
            best = *rate;
        }
        if rate.percentage < worst.percentage {
            worst = *rate;
        }
    }

    DayPatterns {
        rates,
        best_day: best.day,
        worst_day: worst.day,
        // rates are Sun..Sat: Mon-Fri sit at 1..6, the weekend at 0 and 6
        weekday_avg: mean_percentage(&rates[1..6]),
        weekend_avg: mean_percentage(&[rates[0], rates[6]]),
    }
}

fn mean_percentage(days: &[DayRate]) -> u32 {
    let sum: u32 = days.iter().map(|r| r.percentage).sum();
    (sum as f64 / days.len() as f64).round() as u32
}

/// Non-empty reflections from the last `days` days, newest first
pub fn recent_reflections(book: &RecordBook, today: NaiveDate, days: u32) -> Vec<ReflectionExcerpt> {
    DateWindow::trailing(today, days)
        .days_rev()
        .filter_map(|day| {
            let text = book.get(&day)?.reflection_text()?;
            Some(ReflectionExcerpt {
                date: day,
                text: excerpt(text),
            })
        })
        .collect()
}

fn excerpt(text: &str) -> String {
    if text.chars().count() > MAX_REFLECTION_CHARS {
        let cut: String = text.chars().take(MAX_REFLECTION_CHARS).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Assemble the full historical summary for the trailing window
pub fn compose_summary(
    book: &RecordBook,
    habits: &[HabitDefinition],
    today: NaiveDate,
    config: &AnalyticsConfig,
) -> HistoricalSummary {
    let window = DateWindow::trailing(today, config.window_days);

    let habit_insights = habits
        .iter()
        .map(|habit| {
            let rate = habit_rate(book, &habit.id, window);
            HabitInsight {
                id: habit.id.clone(),
                label: habit.label.clone(),
                completion_rate: rate.percentage,
                completed: rate.completed,
                tracked_days: rate.total,
                trend: trend(book, &habit.id, today),
                best_streak: best_streak_in_window(book, &habit.id, window),
                day_of_week: day_of_week_rates(book, &habit.id, window),
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        "Composed history for {} habits over {} days ending {}",
        habit_insights.len(),
        window.len(),
        today
    );

    HistoricalSummary {
        period_days: window.len(),
        generated_for: today,
        habits: habit_insights,
        correlations: compute_correlations(book, habits, window),
        day_patterns: compute_day_patterns(book, habits, window),
        recent_reflections: recent_reflections(book, today, config.reflection_days),
    }
}
