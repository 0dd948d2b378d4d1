/// Statistics engine behavior through the public API
use chrono::{Duration, NaiveDate};
use life_calendar::analytics::*;
use life_calendar::{Category, DailyRecord, DateWindow, HabitDefinition, HabitId, RecordBook};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dates(list: &[&str]) -> Vec<NaiveDate> {
    list.iter().map(|s| d(s)).collect()
}

fn habit(id: &str) -> HabitDefinition {
    HabitDefinition::with_id(HabitId::from(id), id.to_string(), None, Category::Other, None, 0).unwrap()
}

fn mark(book: &mut RecordBook, day: NaiveDate, id: &str, state: bool) {
    book.entry(day)
        .or_insert_with(|| DailyRecord::new(day))
        .set_habit(HabitId::from(id), Some(state));
}

#[test]
fn test_empty_completion_sets_have_no_streaks() {
    assert_eq!(current_streak(&[], d("2025-01-10")), 0);
    assert_eq!(longest_streak(&[]), 0);
}

#[test]
fn test_current_streak_lapses_after_a_missed_day() {
    let single = dates(&["2025-01-10"]);
    assert_eq!(current_streak(&single, d("2025-01-10")), 1);
    assert_eq!(current_streak(&single, d("2025-01-12")), 0);
}

#[test]
fn test_longest_streak_examples() {
    let runs = dates(&["2025-01-01", "2025-01-02", "2025-01-03", "2025-01-05"]);
    assert_eq!(longest_streak(&runs), 3);

    let duplicated = dates(&["2025-01-01", "2025-01-01", "2025-01-02"]);
    assert_eq!(longest_streak(&duplicated), 2);
}

#[test]
fn test_period_stats_bounds_over_many_windows() {
    let completions = dates(&[
        "2025-03-01", "2025-03-02", "2025-03-04", "2025-03-09", "2025-03-10", "2025-03-20",
    ]);
    let start = d("2025-02-25");

    for offset in 0..30 {
        for length in 0..25 {
            let from = start + Duration::days(offset);
            let to = from + Duration::days(length);
            let stats = calculate_period_stats(&completions, DateWindow::new(from, to));

            assert!(stats.completed <= stats.total);
            assert_eq!(stats.total, length as u32 + 1);
            let expected = (stats.completed as f64 / stats.total as f64 * 100.0).round() as u32;
            assert_eq!(stats.percentage, expected);
        }
    }

    let degenerate = calculate_period_stats(&completions, DateWindow::new(d("2025-03-10"), d("2025-03-01")));
    assert_eq!(degenerate.total, 0);
    assert_eq!(degenerate.percentage, 0);
}

#[test]
fn test_month_calendar_lengths_and_future_days() {
    assert_eq!(generate_month_calendar(&[], d("2024-02-01")).len(), 29);
    assert_eq!(generate_month_calendar(&[], d("2025-02-01")).len(), 28);

    let today = d("2025-04-10");
    let all_month: Vec<NaiveDate> = (1..=30)
        .map(|day| NaiveDate::from_ymd_opt(2025, 4, day).unwrap())
        .collect();

    for cell in generate_month_calendar(&all_month, today) {
        if cell.date > today {
            assert!(cell.is_future);
            assert!(!cell.completed);
        } else {
            assert!(cell.completed);
        }
    }
}

#[test]
fn test_correlations_are_capped_and_thresholded() {
    let habits: Vec<HabitDefinition> = ["a", "b", "c", "d", "e"].iter().map(|id| habit(id)).collect();
    let today = d("2025-05-30");
    let window = DateWindow::trailing(today, 30);
    let mut book = RecordBook::new();

    // Every habit done every day: 10 pairs at 100
    for day in window.days() {
        for h in &habits {
            mark(&mut book, day, h.id.as_str(), true);
        }
    }

    let correlations = compute_correlations(&book, &habits, window);
    assert_eq!(correlations.len(), 5);
    assert!(correlations.iter().all(|c| c.correlation >= 50));
}

#[test]
fn test_habits_done_together_correlate_fully() {
    let habits = vec![habit("stretch"), habit("run"), habit("read")];
    let today = d("2025-05-10");
    let window = DateWindow::trailing(today, 10);
    let mut book = RecordBook::new();

    for (i, day) in window.days().enumerate() {
        mark(&mut book, day, "run", true);
        mark(&mut book, day, "read", true);
        // stretch overlaps with run on a third of the days
        mark(&mut book, day, "stretch", i % 3 == 0);
    }

    let correlations = compute_correlations(&book, &habits, window);
    assert_eq!(correlations[0].habit_a, "run");
    assert_eq!(correlations[0].habit_b, "read");
    assert_eq!(correlations[0].correlation, 100);
    assert_eq!(correlations[0].both_done, 10);
    assert_eq!(correlations.len(), 1);
}

#[test]
fn test_day_pattern_averages() {
    let habits = vec![habit("run")];
    // 2025-06-01 is a Sunday; two full weeks
    let window = DateWindow::new(d("2025-06-01"), d("2025-06-14"));
    let mut book = RecordBook::new();
    for (i, day) in window.days().enumerate() {
        // Sundays and Mondays always done, other days done only in week one
        let weekday = i % 7;
        mark(&mut book, day, "run", weekday <= 1 || i < 7);
    }

    let patterns = compute_day_patterns(&book, &habits, window);
    let rates: Vec<u32> = patterns.rates.iter().map(|r| r.percentage).collect();
    assert_eq!(rates, vec![100, 100, 50, 50, 50, 50, 50]);

    let weekday_mean = (rates[1..6].iter().sum::<u32>() as f64 / 5.0).round() as u32;
    let weekend_mean = ((rates[0] + rates[6]) as f64 / 2.0).round() as u32;
    assert_eq!(patterns.weekday_avg, weekday_mean);
    assert_eq!(patterns.weekend_avg, weekend_mean);
    assert_eq!(patterns.weekday_avg, 60);
    assert_eq!(patterns.weekend_avg, 75);
}

#[test]
fn test_rate_denominator_counts_only_recorded_days() {
    let today = d("2025-07-30");
    let window = DateWindow::trailing(today, 30);
    let mut book = RecordBook::new();

    // Observed every other day, done on every fourth
    for (i, day) in window.days().enumerate() {
        if i % 2 == 0 {
            mark(&mut book, day, "meditate", i % 4 == 0);
        }
    }

    let rate = habit_rate(&book, &HabitId::from("meditate"), window);
    assert_eq!(rate.total, 15);
    assert_eq!(rate.completed, 8);
    assert_eq!(rate.percentage, 53);
}
