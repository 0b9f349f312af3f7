//! Tests for LocalRepository.
//!
//! These cover the repository contract (ordering, idempotence, error cases)
//! and concurrent access patterns for the in-memory implementation.

use std::sync::Arc;

use chrono::NaiveDate;
use ssc_rust::api::{HabitId, MoodLogId, NewMoodLog, NewStudySession, StudySessionId};
use ssc_rust::db::repositories::LocalRepository;
use ssc_rust::db::repository::{
    FullRepository, HabitRepository, MoodPatch, MoodRepository, RepositoryError, SessionPatch,
    StudySessionRepository,
};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).expect("valid test date")
}

fn mood(d: u32, rating: i32) -> NewMoodLog {
    NewMoodLog {
        date: date(d),
        rating,
        label: "Neutral".to_string(),
        emoji: "😐".to_string(),
        journal: None,
    }
}

fn session(d: u32, subject: &str, minutes: i32) -> NewStudySession {
    NewStudySession {
        date: date(d),
        subject: subject.to_string(),
        duration_minutes: minutes,
        notes: String::new(),
    }
}

// =========================================================
// Mood logs
// =========================================================

#[tokio::test]
async fn test_insert_mood_assigns_increasing_ids() {
    let repo = LocalRepository::new();
    let first = repo.insert_mood(mood(1, 5)).await.unwrap();
    let second = repo.insert_mood(mood(2, 6)).await.unwrap();
    assert!(second.value() > first.value());
}

#[tokio::test]
async fn test_list_moods_newest_first() {
    let repo = LocalRepository::new();
    repo.insert_mood(mood(1, 2)).await.unwrap();
    repo.insert_mood(mood(8, 9)).await.unwrap();
    repo.insert_mood(mood(4, 5)).await.unwrap();

    let moods = repo.list_moods().await.unwrap();
    let dates: Vec<NaiveDate> = moods.iter().map(|m| m.date).collect();
    assert_eq!(dates, vec![date(8), date(4), date(1)]);
}

#[tokio::test]
async fn test_moods_since_filters_and_sorts_ascending() {
    let repo = LocalRepository::new();
    repo.insert_mood(mood(10, 7)).await.unwrap();
    repo.insert_mood(mood(2, 3)).await.unwrap();
    repo.insert_mood(mood(6, 5)).await.unwrap();

    let moods = repo.moods_since(date(5)).await.unwrap();
    let dates: Vec<NaiveDate> = moods.iter().map(|m| m.date).collect();
    assert_eq!(dates, vec![date(6), date(10)]);
}

#[tokio::test]
async fn test_recent_moods_limit() {
    let repo = LocalRepository::new();
    for d in 1..=9 {
        repo.insert_mood(mood(d, d as i32)).await.unwrap();
    }

    let recent = repo.recent_moods(3).await.unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].date, date(9));
}

#[tokio::test]
async fn test_update_mood_patch_applies_only_set_fields() {
    let repo = LocalRepository::new();
    let id = repo.insert_mood(mood(5, 4)).await.unwrap();

    repo.update_mood(
        id,
        MoodPatch {
            rating: Some(8),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let latest = repo.latest_mood().await.unwrap().unwrap();
    assert_eq!(latest.rating, 8);
    assert_eq!(latest.date, date(5));
}

#[tokio::test]
async fn test_delete_mood_unknown_id() {
    let repo = LocalRepository::new();
    let err = repo.delete_mood(MoodLogId::new(404)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

// =========================================================
// Habits and completions
// =========================================================

#[tokio::test]
async fn test_habits_keep_creation_order() {
    let repo = LocalRepository::new();
    repo.insert_habit("Walk").await.unwrap();
    repo.insert_habit("Meditate").await.unwrap();
    repo.insert_habit("Read").await.unwrap();

    let habits = repo.list_habits().await.unwrap();
    let names: Vec<&str> = habits.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Walk", "Meditate", "Read"]);
}

#[tokio::test]
async fn test_completion_for_unknown_habit_fails() {
    let repo = LocalRepository::new();
    let err = repo
        .record_completion(HabitId::new(99), date(1))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_completion_records_join_names_newest_first() {
    let repo = LocalRepository::new();
    let walk = repo.insert_habit("Walk").await.unwrap();
    let read = repo.insert_habit("Read").await.unwrap();

    repo.record_completion(walk, date(3)).await.unwrap();
    repo.record_completion(read, date(7)).await.unwrap();

    let records = repo.completion_records().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].habit, "Read");
    assert_eq!(records[0].date, date(7));
    assert_eq!(records[1].habit, "Walk");
}

#[tokio::test]
async fn test_completions_since_cutoff() {
    let repo = LocalRepository::new();
    let walk = repo.insert_habit("Walk").await.unwrap();
    repo.record_completion(walk, date(1)).await.unwrap();
    repo.record_completion(walk, date(9)).await.unwrap();

    let completions = repo.completions_since(date(5)).await.unwrap();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].date, date(9));
}

// =========================================================
// Study sessions
// =========================================================

#[tokio::test]
async fn test_replace_sessions_counts_rows() {
    let repo = LocalRepository::new();
    let written = repo
        .replace_sessions(vec![
            session(3, "Math", 120),
            session(3, "History", 60),
            session(4, "Math", 90),
        ])
        .await
        .unwrap();
    assert_eq!(written, 3);
}

#[tokio::test]
async fn test_replace_with_empty_clears_table() {
    let repo = LocalRepository::new();
    repo.replace_sessions(vec![session(3, "Math", 120)])
        .await
        .unwrap();
    let written = repo.replace_sessions(vec![]).await.unwrap();

    assert_eq!(written, 0);
    assert!(repo.list_sessions().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_session_duration() {
    let repo = LocalRepository::new();
    repo.replace_sessions(vec![session(3, "Math", 120)])
        .await
        .unwrap();
    let id = repo.list_sessions().await.unwrap()[0].id;

    repo.update_session(
        id,
        SessionPatch {
            duration_minutes: Some(45),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let sessions = repo.list_sessions().await.unwrap();
    assert_eq!(sessions[0].duration_minutes, 45);
    assert_eq!(sessions[0].subject, "Math");
}

#[tokio::test]
async fn test_delete_session_unknown_id() {
    let repo = LocalRepository::new();
    let err = repo
        .delete_session(StudySessionId::new(404))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

// =========================================================
// Concurrent Access Tests
// =========================================================

#[tokio::test]
async fn test_concurrent_mood_inserts() {
    let repo = Arc::new(LocalRepository::new());

    let mut handles = vec![];
    for i in 0..10u32 {
        let repo_clone = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo_clone.insert_mood(mood(1 + (i % 7), 5)).await
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    let moods = repo.list_moods().await.unwrap();
    assert_eq!(moods.len(), 10);

    // Ids must be unique even under contention
    let mut ids: Vec<i64> = moods.iter().map(|m| m.id.value()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn test_concurrent_completions_same_day_single_row() {
    let repo = Arc::new(LocalRepository::new());
    let habit_id = repo.insert_habit("Walk").await.unwrap();

    let mut handles = vec![];
    for _ in 0..10 {
        let repo_clone = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo_clone.record_completion(habit_id, date(5)).await
        }));
    }

    let mut inserted = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            inserted += 1;
        }
    }

    assert_eq!(inserted, 1, "exactly one concurrent completion should win");
    assert_eq!(repo.completions_on(date(5)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_health_check() {
    let repo = LocalRepository::new();
    assert!(repo.health_check().await.unwrap());
}
