//! End-to-end planner flow tests.
//!
//! Drive the full pipeline over the in-memory repository: build a subject
//! registry, generate a schedule with a seeded RNG, persist it, and read it
//! back through the records and dashboard services.

use chrono::NaiveDate;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use ssc_rust::api::{SubjectRegistry, OTHER_ACTIVITIES};
use ssc_rust::db::repositories::LocalRepository;
use ssc_rust::db::repository::StudySessionRepository;
use ssc_rust::db::services::{add_habit, complete_habit, log_mood, records_data};
use ssc_rust::models::week::start_of_week;
use ssc_rust::scheduler::{generate_weekly_schedule, PlannerSession};
use ssc_rust::services::planner::{evaluate_mood_gate, MoodGate};
use ssc_rust::services::schedule_saver::persist_weekly_schedule;
use ssc_rust::services::trends::{build_dashboard, TimeFrame};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).expect("valid test date")
}

fn registry() -> SubjectRegistry {
    let mut subjects = SubjectRegistry::new();
    subjects.add("Math", 5);
    subjects.add("History", 2);
    subjects
}

#[tokio::test]
async fn test_generate_save_and_read_back() {
    let repo = LocalRepository::new();
    let mut rng = SmallRng::seed_from_u64(11);

    let schedule = generate_weekly_schedule(&registry(), 6.0, &mut rng);
    let week_start = start_of_week(date(5)); // Wednesday -> Monday 2024-06-03

    let outcome = persist_weekly_schedule(&repo, &schedule, week_start, None)
        .await
        .unwrap();
    assert!(outcome.saved);
    assert!(outcome.sessions_written > 0);

    let sessions = repo.list_sessions().await.unwrap();

    // Free-time slots are never persisted
    assert!(sessions.iter().all(|s| s.subject != OTHER_ACTIVITIES));

    // All dates fall inside the saved week, starting from its Monday
    assert!(sessions
        .iter()
        .all(|s| s.date >= date(3) && s.date <= date(9)));

    // Stored minutes match the schedule's non-free hours
    let scheduled_minutes: i32 = schedule
        .iter()
        .flat_map(|(_, slots)| slots.iter())
        .filter(|slot| slot.subject != OTHER_ACTIVITIES)
        .map(|slot| (slot.hours.value() * 60.0).round() as i32)
        .sum();
    let stored_minutes: i32 = sessions.iter().map(|s| s.duration_minutes).sum();
    assert_eq!(stored_minutes, scheduled_minutes);
}

#[tokio::test]
async fn test_saved_schedule_feeds_dashboard() {
    let repo = LocalRepository::new();
    let mut rng = SmallRng::seed_from_u64(11);

    let schedule = generate_weekly_schedule(&registry(), 6.0, &mut rng);
    let week_start = start_of_week(date(5));
    persist_weekly_schedule(&repo, &schedule, week_start, None)
        .await
        .unwrap();

    log_mood(&repo, date(5), 9, None).await.unwrap();
    let habit_id = add_habit(&repo, "Walk").await.unwrap();
    complete_habit(&repo, habit_id, date(5)).await.unwrap();

    let mut rng = SmallRng::seed_from_u64(12);
    let dashboard = build_dashboard(&repo, TimeFrame::Last7Days, date(9), &mut rng)
        .await
        .unwrap();

    // Math has the dominant difficulty, so it dominates study time too
    let top = dashboard.study.top_subject.expect("top subject expected");
    assert_eq!(top.subject, "Math");
    assert!(dashboard.study.total_hours.value() > 0.0);
    assert_eq!(dashboard.mood.average, Some(9.0));
    assert!(dashboard.insight.contains("9/10"));
}

#[tokio::test]
async fn test_resave_identical_schedule_is_skipped() {
    let repo = LocalRepository::new();
    let mut rng = SmallRng::seed_from_u64(21);

    let schedule = generate_weekly_schedule(&registry(), 4.0, &mut rng);
    let week_start = start_of_week(date(5));

    let first = persist_weekly_schedule(&repo, &schedule, week_start, None)
        .await
        .unwrap();
    let before = repo.list_sessions().await.unwrap();

    let second = persist_weekly_schedule(&repo, &schedule, week_start, Some(&first.checksum))
        .await
        .unwrap();
    assert!(!second.saved);

    let after = repo.list_sessions().await.unwrap();
    assert_eq!(before, after, "skipped save must not touch stored sessions");
}

#[tokio::test]
async fn test_mood_gate_controls_generation_flow() {
    let repo = LocalRepository::new();
    log_mood(&repo, date(5), 2, None).await.unwrap();

    let latest = ssc_rust::db::services::latest_mood_rating(&repo)
        .await
        .unwrap();

    // Low mood holds generation...
    match evaluate_mood_gate(latest, false) {
        MoodGate::Hold { notice, .. } => assert!(notice.contains("low")),
        other => panic!("expected hold, got {:?}", other),
    }

    // ...unless regeneration is forced.
    assert!(matches!(
        evaluate_mood_gate(latest, true),
        MoodGate::Proceed { .. }
    ));
}

#[tokio::test]
async fn test_session_invalidation_requires_fresh_save() {
    let repo = LocalRepository::new();
    let mut session = PlannerSession::new();
    session.add_subject("Math", 5);
    session.set_hours_per_day(6.0);

    let mut rng = SmallRng::seed_from_u64(31);
    let schedule = session.generate(&mut rng).clone();

    let outcome = persist_weekly_schedule(&repo, &schedule, start_of_week(date(5)), None)
        .await
        .unwrap();
    session.mark_saved(outcome.checksum);
    assert!(session.saved_checksum().is_some());

    // Adding a subject invalidates both the schedule and the saved marker.
    session.add_subject("History", 2);
    assert!(session.schedule().is_none());
    assert!(session.saved_checksum().is_none());
}

#[tokio::test]
async fn test_records_reflect_saved_plan() {
    let repo = LocalRepository::new();
    let mut rng = SmallRng::seed_from_u64(41);

    let schedule = generate_weekly_schedule(&registry(), 6.0, &mut rng);
    persist_weekly_schedule(&repo, &schedule, start_of_week(date(5)), None)
        .await
        .unwrap();

    let records = records_data(&repo).await.unwrap();
    assert!(!records.sessions.is_empty());
    assert!(records
        .sessions
        .iter()
        .all(|s| s.subject == "Math" || s.subject == "History"));

    // Keyword filter narrows the sessions section
    let filtered = records.filtered("math");
    assert!(!filtered.sessions.is_empty());
    assert!(filtered.sessions.iter().all(|s| s.subject == "Math"));
}
