/// Basic integration tests
use chrono::{Duration, NaiveDate};
use life_calendar::tools::{self, DayLogParams, InsightsParams, StatusParams};
use life_calendar::*;
use std::collections::BTreeMap;
use tempfile::NamedTempFile;

fn log(server: &LifeCalendarServer, date: NaiveDate, states: &[(&str, bool)], reflection: Option<&str>) {
    let habits: BTreeMap<String, Option<bool>> = states
        .iter()
        .map(|(id, done)| (id.to_string(), Some(*done)))
        .collect();

    tools::log_day(
        server.storage(),
        DayLogParams {
            date: Some(format_day(date)),
            today: Some(format_day(date)),
            habits,
            reflection: reflection.map(str::to_string),
            ..Default::default()
        },
    )
    .expect("Failed to log day");
}

#[tokio::test]
async fn test_server_basic_workflow() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let server = LifeCalendarServer::new(temp_file.path().to_path_buf(), ServerConfig::default())
        .await
        .expect("Failed to create server");

    let today = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
    for back in (0..10).rev() {
        let date = today - Duration::days(back);
        log(
            &server,
            date,
            &[("exercise", true), ("reading", true), ("journaling", back % 2 == 0)],
            Some(&format!("Day {}", 10 - back)),
        );
    }

    let status = tools::get_habit_status(
        server.storage(),
        server.analytics(),
        StatusParams {
            habit_id: Some("exercise".to_string()),
            today: Some("2025-08-20".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(status.habits[0].report.streak.current, 10);

    let insights = tools::get_habit_insights(
        server.storage(),
        server.analytics(),
        server.tone(),
        InsightsParams {
            today: Some("2025-08-20".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    let summary = &insights.summary;
    assert_eq!(summary.period_days, 30);
    assert_eq!(summary.habits.len(), 5);

    let top = &summary.correlations[0];
    assert_eq!((top.habit_a.as_str(), top.habit_b.as_str()), ("Exercise", "Reading"));
    assert_eq!(top.correlation, 100);

    assert_eq!(summary.recent_reflections.len(), 7);
    assert_eq!(summary.recent_reflections[0].text, "Day 10");
    assert!(insights.prompt.user.contains("\"correlation\":100"));
}

#[tokio::test]
async fn test_database_persistence() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_file.path().to_path_buf();
    let day = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();

    {
        let server = LifeCalendarServer::new(db_path.clone(), ServerConfig::default())
            .await
            .expect("Failed to create first server");
        log(&server, day, &[("family-time", true)], Some("Picnic"));
    }

    let server = LifeCalendarServer::new(db_path, ServerConfig::default())
        .await
        .expect("Failed to create second server");

    // Reopening does not seed a second copy of the defaults
    assert_eq!(server.storage().list_habits(false).unwrap().len(), 5);

    let record = server.storage().get_day(day).unwrap().expect("day was stored");
    assert!(record.is_completed(&HabitId::from("family-time")));
    assert_eq!(record.reflection.as_deref(), Some("Picnic"));
}

#[test]
fn test_archived_habit_history_survives() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let storage = SqliteStorage::new(temp_file.path().to_path_buf()).expect("Failed to create storage");
    let server = LifeCalendarServer::with_storage(storage, ServerConfig::default()).unwrap();

    let day = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
    log(&server, day, &[("deep-work", true)], None);
    server.storage().archive_habit(&HabitId::from("deep-work")).unwrap();

    let storage: &dyn CalendarStorage = server.storage();
    assert_eq!(storage.list_habits(true).unwrap().len(), 4);
    let book = storage.get_records(DateWindow::new(day, day)).unwrap();
    assert!(book[&day].is_completed(&HabitId::from("deep-work")));
}
