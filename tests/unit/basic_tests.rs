/// Basic unit tests to verify core functionality
use chrono::NaiveDate;
use life_calendar::*;
use tempfile::NamedTempFile;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_habit_creation() {
    let habit = HabitDefinition::new(
        "  Test Habit ".to_string(),
        Some("A test habit".to_string()),
        Category::Health,
        Some("✅".to_string()),
        0,
    );

    assert!(habit.is_ok());
    let habit = habit.unwrap();
    assert_eq!(habit.label, "Test Habit");
    assert_eq!(habit.display_label(), "✅ Test Habit");
    assert!(habit.is_active);
}

#[test]
fn test_closed_enums_reject_unknown_values() {
    assert_eq!("Learning".parse::<Category>().unwrap(), Category::Learning);
    assert!(matches!(
        "hobby".parse::<Category>(),
        Err(DomainError::InvalidCategory(_))
    ));
    assert_eq!("direct".parse::<Tone>().unwrap(), Tone::Direct);
    assert!("gentle".parse::<Tone>().is_err());
    assert_eq!("sun".parse::<WeekStart>().unwrap(), WeekStart::Sunday);
}

#[test]
fn test_daily_record_keeps_untracked_apart_from_missed() {
    let mut record = DailyRecord::new(day(2025, 1, 1));
    let run = HabitId::from("run");
    let read = HabitId::from("read");

    record.set_habit(run.clone(), Some(false));
    assert_eq!(record.habit_state(&run), Some(false));
    assert_eq!(record.habit_state(&read), None);
    assert!(!record.is_completed(&run));
    assert!(!record.is_empty());

    record.set_habit(run, None);
    assert!(record.is_empty());
}

#[test]
fn test_record_json_uses_camel_case() {
    let mut record = DailyRecord::new(day(2025, 1, 1));
    record.is_holiday = true;
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["isHoliday"], serde_json::json!(true));
    assert_eq!(value["date"], serde_json::json!("2025-01-01"));
}

#[test]
fn test_date_windows() {
    // 2025-01-05 is a Sunday; the aggregator week starts on the Monday before
    let sunday = day(2025, 1, 5);
    assert_eq!(DateWindow::week_to_date(sunday).start, day(2024, 12, 30));
    assert_eq!(DateWindow::month_to_date(sunday).len(), 5);
    assert_eq!(DateWindow::year_to_date(sunday).start, day(2025, 1, 1));
    assert_eq!(DateWindow::trailing(sunday, 30).len(), 30);
    assert!(DateWindow::new(day(2025, 1, 5), day(2025, 1, 1)).is_empty());
    assert_eq!(days_in_month(2024, 2), 29);
    assert_eq!(days_in_month(2100, 2), 28);
}

#[tokio::test]
async fn test_server_creation_seeds_default_habits() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let server = LifeCalendarServer::new(temp_file.path().to_path_buf(), ServerConfig::default())
        .await
        .expect("Failed to create server");

    let habits = server.storage().list_habits(true).unwrap();
    assert_eq!(habits.len(), 5);
    assert_eq!(server.analytics().config().window_days, 30);
    assert_eq!(server.week_start(), WeekStart::Monday);
    assert_eq!(server.tone(), Tone::Supportive);
}

#[test]
fn test_storage_creation() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let storage = SqliteStorage::new(temp_file.path().to_path_buf());
    assert!(storage.is_ok());
    assert!(storage.unwrap().list_habits(false).unwrap().is_empty());
}
