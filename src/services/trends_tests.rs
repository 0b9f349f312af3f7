use chrono::NaiveDate;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::api::{
    Habit, HabitCompletion, HabitCompletionId, HabitId, MoodLog, MoodLogId, NewStudySession,
    StudySession, StudySessionId,
};
use crate::db::repositories::LocalRepository;
use crate::db::repository::StudySessionRepository;
use crate::db::services::{add_habit, complete_habit, log_mood};
use crate::services::trends::{
    average_mood, build_dashboard, completion_counts, mood_points, study_by_subject,
    study_over_time, top_habit, top_subject, total_study_hours, TimeFrame,
};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn session(id: i64, d: u32, subject: &str, minutes: i32) -> StudySession {
    StudySession {
        id: StudySessionId::new(id),
        date: date(d),
        subject: subject.to_string(),
        duration_minutes: minutes,
        notes: String::new(),
    }
}

fn mood(id: i64, d: u32, rating: i32) -> MoodLog {
    MoodLog {
        id: MoodLogId::new(id),
        date: date(d),
        rating,
        label: String::new(),
        emoji: String::new(),
        journal: None,
    }
}

#[test]
fn test_time_frame_cutoffs() {
    assert_eq!(TimeFrame::Last7Days.cutoff(date(10)), date(3));
    assert_eq!(
        TimeFrame::Last30Days.cutoff(date(30)),
        NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
    );
}

#[test]
fn test_time_frame_parse() {
    assert_eq!(TimeFrame::parse("7d"), Some(TimeFrame::Last7Days));
    assert_eq!(TimeFrame::parse("30d"), Some(TimeFrame::Last30Days));
    assert_eq!(TimeFrame::parse("90d"), None);
}

#[test]
fn test_study_by_subject_groups_and_orders() {
    let sessions = vec![
        session(1, 1, "Math", 60),
        session(2, 2, "History", 30),
        session(3, 3, "Math", 90),
    ];

    let by_subject = study_by_subject(&sessions);
    assert_eq!(by_subject.len(), 2);
    assert_eq!(by_subject[0].subject, "Math");
    assert!((by_subject[0].hours.value() - 2.5).abs() < 1e-9);
    assert!((by_subject[1].hours.value() - 0.5).abs() < 1e-9);
}

#[test]
fn test_top_subject() {
    let sessions = vec![session(1, 1, "Math", 60), session(2, 2, "History", 120)];
    let by_subject = study_by_subject(&sessions);

    let top = top_subject(&by_subject).unwrap();
    assert_eq!(top.subject, "History");
}

#[test]
fn test_top_subject_empty() {
    assert!(top_subject(&[]).is_none());
}

#[test]
fn test_total_study_hours() {
    let sessions = vec![session(1, 1, "Math", 60), session(2, 2, "History", 45)];
    assert!((total_study_hours(&sessions).value() - 1.75).abs() < 1e-9);
}

#[test]
fn test_study_over_time_sorted_by_date() {
    let sessions = vec![
        session(1, 5, "Math", 60),
        session(2, 3, "Math", 30),
        session(3, 5, "History", 60),
    ];

    let series = study_over_time(&sessions);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].date, date(3));
    assert!((series[1].hours.value() - 2.0).abs() < 1e-9);
}

#[test]
fn test_mood_points_sorted() {
    let moods = vec![mood(1, 7, 8), mood(2, 5, 4)];
    let points = mood_points(&moods);
    assert_eq!(points[0].date, date(5));
    assert_eq!(points[1].rating, 8);
}

#[test]
fn test_average_mood_one_decimal() {
    let moods = vec![mood(1, 1, 4), mood(2, 2, 7), mood(3, 3, 7)];
    assert_eq!(average_mood(&moods), Some(6.0));

    let moods = vec![mood(1, 1, 4), mood(2, 2, 5)];
    assert_eq!(average_mood(&moods), Some(4.5));
}

#[test]
fn test_average_mood_empty() {
    assert_eq!(average_mood(&[]), None);
}

#[test]
fn test_completion_counts_include_zero() {
    let habits = vec![
        Habit {
            id: HabitId::new(1),
            name: "Walk".to_string(),
        },
        Habit {
            id: HabitId::new(2),
            name: "Meditate".to_string(),
        },
    ];
    let completions = vec![
        HabitCompletion {
            id: HabitCompletionId::new(1),
            habit_id: HabitId::new(1),
            date: date(1),
        },
        HabitCompletion {
            id: HabitCompletionId::new(2),
            habit_id: HabitId::new(1),
            date: date(2),
        },
    ];

    let counts = completion_counts(&habits, &completions);
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].count, 2);
    assert_eq!(counts[1].count, 0);
}

#[test]
fn test_top_habit_requires_a_completion() {
    let counts = completion_counts(
        &[Habit {
            id: HabitId::new(1),
            name: "Walk".to_string(),
        }],
        &[],
    );
    assert!(top_habit(&counts).is_none());
}

#[tokio::test]
async fn test_build_dashboard_scopes_to_window() {
    let repo = LocalRepository::new();

    // One session inside the 7-day window, one outside.
    repo.replace_sessions(vec![
        NewStudySession {
            date: date(9),
            subject: "Math".to_string(),
            duration_minutes: 120,
            notes: String::new(),
        },
        NewStudySession {
            date: date(1),
            subject: "History".to_string(),
            duration_minutes: 60,
            notes: String::new(),
        },
    ])
    .await
    .unwrap();

    log_mood(&repo, date(9), 8, None).await.unwrap();
    let habit_id = add_habit(&repo, "Walk").await.unwrap();
    complete_habit(&repo, habit_id, date(9)).await.unwrap();

    let mut rng = SmallRng::seed_from_u64(5);
    let dashboard = build_dashboard(&repo, TimeFrame::Last7Days, date(10), &mut rng)
        .await
        .unwrap();

    assert_eq!(dashboard.window_days, 7);
    assert_eq!(dashboard.study.by_subject.len(), 1);
    assert_eq!(dashboard.study.by_subject[0].subject, "Math");
    assert_eq!(dashboard.mood.average, Some(8.0));
    assert_eq!(dashboard.habits.top_habit.as_ref().unwrap().habit, "Walk");
    assert!(dashboard.insight.contains("8/10"));
}

#[tokio::test]
async fn test_build_dashboard_empty_repository() {
    let repo = LocalRepository::new();
    let mut rng = SmallRng::seed_from_u64(5);

    let dashboard = build_dashboard(&repo, TimeFrame::Last30Days, date(10), &mut rng)
        .await
        .unwrap();

    assert_eq!(dashboard.window_days, 30);
    assert!(dashboard.study.by_subject.is_empty());
    assert!(dashboard.study.top_subject.is_none());
    assert_eq!(dashboard.mood.average, None);
    assert!(dashboard.insight.contains("add a habit"));
}
