//! Repository trait surface.
//!
//! These traits define the persistence contract for the three tracked data
//! sets: mood logs, habits (with completions), and study sessions. Storage
//! backends implement all of them plus a health check; callers work against
//! `dyn FullRepository` so backends can be swapped freely.
//!
//! # Thread Safety
//! Implementations must be `Send + Sync` to work with async Rust.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{
    Habit, HabitCompletion, HabitCompletionId, HabitCompletionRecord, HabitId, MoodLog, MoodLogId,
    NewMoodLog, NewStudySession, StudySession, StudySessionId,
};

/// Partial update for a mood log row. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct MoodPatch {
    pub date: Option<NaiveDate>,
    pub rating: Option<i32>,
    pub journal: Option<Option<String>>,
}

/// Partial update for a habit completion row.
#[derive(Debug, Clone, Default)]
pub struct CompletionPatch {
    pub date: Option<NaiveDate>,
}

/// Partial update for a study session row.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub date: Option<NaiveDate>,
    pub subject: Option<String>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
}

/// Repository trait for mood log operations.
#[async_trait]
pub trait MoodRepository: Send + Sync {
    /// Store a new mood log entry.
    async fn insert_mood(&self, entry: NewMoodLog) -> RepositoryResult<MoodLogId>;

    /// Most recent mood entry, by date then insertion order.
    async fn latest_mood(&self) -> RepositoryResult<Option<MoodLog>>;

    /// Up to `limit` most recent entries, newest first.
    async fn recent_moods(&self, limit: usize) -> RepositoryResult<Vec<MoodLog>>;

    /// Entries on or after `cutoff`, oldest first.
    async fn moods_since(&self, cutoff: NaiveDate) -> RepositoryResult<Vec<MoodLog>>;

    /// All entries, newest first.
    async fn list_moods(&self) -> RepositoryResult<Vec<MoodLog>>;

    /// Apply a partial update. Fails with `NotFound` for unknown ids.
    async fn update_mood(&self, id: MoodLogId, patch: MoodPatch) -> RepositoryResult<()>;

    /// Delete an entry. Fails with `NotFound` for unknown ids.
    async fn delete_mood(&self, id: MoodLogId) -> RepositoryResult<()>;
}

/// Repository trait for habit and habit-completion operations.
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Create a habit. Fails with `ValidationError` when the name exists.
    async fn insert_habit(&self, name: &str) -> RepositoryResult<HabitId>;

    /// All habits in creation order.
    async fn list_habits(&self) -> RepositoryResult<Vec<Habit>>;

    /// Look up a habit by id. Fails with `NotFound` for unknown ids.
    async fn get_habit(&self, id: HabitId) -> RepositoryResult<Habit>;

    /// Record a completion for the given day.
    ///
    /// Returns `false` when the habit was already completed that day
    /// (the operation is idempotent per habit and day).
    async fn record_completion(&self, habit_id: HabitId, date: NaiveDate)
        -> RepositoryResult<bool>;

    /// Completions on one specific day.
    async fn completions_on(&self, date: NaiveDate) -> RepositoryResult<Vec<HabitCompletion>>;

    /// Completions on or after `cutoff`.
    async fn completions_since(&self, cutoff: NaiveDate)
        -> RepositoryResult<Vec<HabitCompletion>>;

    /// All completions joined with habit names, newest first.
    async fn completion_records(&self) -> RepositoryResult<Vec<HabitCompletionRecord>>;

    /// Apply a partial update to a completion row.
    async fn update_completion(
        &self,
        id: HabitCompletionId,
        patch: CompletionPatch,
    ) -> RepositoryResult<()>;

    /// Delete a completion row.
    async fn delete_completion(&self, id: HabitCompletionId) -> RepositoryResult<()>;
}

/// Repository trait for study session operations.
#[async_trait]
pub trait StudySessionRepository: Send + Sync {
    /// Replace all stored sessions with the given rows.
    ///
    /// Saving a schedule always rewrites the full table; there is no
    /// incremental merge. Returns the number of rows written.
    async fn replace_sessions(&self, rows: Vec<NewStudySession>) -> RepositoryResult<usize>;

    /// All sessions, newest first.
    async fn list_sessions(&self) -> RepositoryResult<Vec<StudySession>>;

    /// Sessions on or after `cutoff`, oldest first.
    async fn sessions_since(&self, cutoff: NaiveDate) -> RepositoryResult<Vec<StudySession>>;

    /// Apply a partial update. Fails with `NotFound` for unknown ids.
    async fn update_session(&self, id: StudySessionId, patch: SessionPatch)
        -> RepositoryResult<()>;

    /// Delete a session. Fails with `NotFound` for unknown ids.
    async fn delete_session(&self, id: StudySessionId) -> RepositoryResult<()>;
}

/// Combined repository interface used throughout the application.
#[async_trait]
pub trait FullRepository:
    MoodRepository + HabitRepository + StudySessionRepository + Send + Sync
{
    /// Verify the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
