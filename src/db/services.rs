//! Service layer: high-level database operations.
//!
//! These functions orchestrate repository calls and apply the small pieces
//! of business logic that belong next to storage (mood labeling, joined
//! record assembly, habit status). They work with any repository
//! implementation; use them rather than the traits directly.

use chrono::NaiveDate;

use crate::api::{Habit, HabitId, MoodLog, MoodLogId, NewMoodLog, RecordsData};
use crate::models::mood;
use crate::routes::records::{MoodRecord, SessionRecord};
use crate::routes::trackers::{HabitStatus, MoodTrendPoint};

use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Verify the repository backend is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Log a mood entry for `date`.
///
/// The label and emoji are derived from the rating here, at log time, so
/// later edits to the scale do not rewrite history.
pub async fn log_mood(
    repo: &dyn FullRepository,
    date: NaiveDate,
    rating: i32,
    journal: Option<String>,
) -> RepositoryResult<MoodLogId> {
    let descriptor = mood::describe(rating);
    repo.insert_mood(NewMoodLog {
        date,
        rating,
        label: descriptor.label.to_string(),
        emoji: descriptor.emoji.to_string(),
        journal,
    })
    .await
}

/// Most recent mood entry, if any.
pub async fn latest_mood(repo: &dyn FullRepository) -> RepositoryResult<Option<MoodLog>> {
    repo.latest_mood().await
}

/// Most recent mood rating, if any. Used as the schedule generation gate.
pub async fn latest_mood_rating(repo: &dyn FullRepository) -> RepositoryResult<Option<i32>> {
    Ok(repo.latest_mood().await?.map(|log| log.rating))
}

/// The last `limit` mood entries as chart points, oldest first.
pub async fn mood_trend(
    repo: &dyn FullRepository,
    limit: usize,
) -> RepositoryResult<Vec<MoodTrendPoint>> {
    let mut moods = repo.recent_moods(limit).await?;
    moods.reverse();
    Ok(moods
        .into_iter()
        .map(|log| MoodTrendPoint {
            date: log.date,
            rating: log.rating,
        })
        .collect())
}

/// Create a habit. Blank names are rejected here; duplicate names are
/// rejected by the repository.
pub async fn add_habit(repo: &dyn FullRepository, name: &str) -> RepositoryResult<HabitId> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepositoryError::validation("Habit name must not be empty"));
    }
    repo.insert_habit(name).await
}

/// All habits with their completed-today flag.
pub async fn habit_statuses(
    repo: &dyn FullRepository,
    today: NaiveDate,
) -> RepositoryResult<Vec<HabitStatus>> {
    let habits = repo.list_habits().await?;
    let completions = repo.completions_on(today).await?;

    Ok(habits
        .into_iter()
        .map(|habit| {
            let completed_today = completions
                .iter()
                .any(|completion| completion.habit_id == habit.id);
            HabitStatus {
                habit,
                completed_today,
            }
        })
        .collect())
}

/// Mark a habit complete for today.
///
/// Returns `false` when it was already completed today. Unknown habit ids
/// fail with `NotFound`.
pub async fn complete_habit(
    repo: &dyn FullRepository,
    habit_id: HabitId,
    today: NaiveDate,
) -> RepositoryResult<bool> {
    repo.record_completion(habit_id, today).await
}

/// All habits (creation order), for insight suggestions.
pub async fn list_habits(repo: &dyn FullRepository) -> RepositoryResult<Vec<Habit>> {
    repo.list_habits().await
}

/// Assemble the full records payload: mood logs, joined habit completions,
/// and study sessions with minutes converted to hours for display.
pub async fn records_data(repo: &dyn FullRepository) -> RepositoryResult<RecordsData> {
    let moods = repo.list_moods().await?;
    let completions = repo.completion_records().await?;
    let sessions = repo.list_sessions().await?;

    Ok(RecordsData {
        moods: moods.iter().map(MoodRecord::from).collect(),
        completions,
        sessions: sessions.iter().map(SessionRecord::from).collect(),
    })
}
