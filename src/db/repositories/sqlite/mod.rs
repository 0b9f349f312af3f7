//! SQLite repository implementation using Diesel.
//!
//! This module implements the repository traits against the application's
//! SQLite database (`study_companion.db` by default), the same schema the
//! original trackers used.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL`: SQLite database path (default: `study_companion.db`)
//! - `SQLITE_POOL_MAX`: Maximum pool size (default: 4)
//! - `SQLITE_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `SQLITE_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `SQLITE_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::api::{
    Habit, HabitCompletion, HabitCompletionId, HabitCompletionRecord, HabitId, MoodLog, MoodLogId,
    NewMoodLog, NewStudySession, StudySession, StudySessionId,
};
use crate::db::repository::{
    CompletionPatch, ErrorContext, FullRepository, HabitRepository, MoodPatch, MoodRepository,
    RepositoryError, RepositoryResult, SessionPatch, StudySessionRepository,
};

mod models;
mod schema;

use models::*;

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Configuration for opening the SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to the database file
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_url: "study_companion.db".to_string(),
            max_pool_size: 4,
            connection_timeout_sec: 30,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl SqliteConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(max) = std::env::var("SQLITE_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            config.max_pool_size = max;
        }
        if let Some(timeout) = std::env::var("SQLITE_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.connection_timeout_sec = timeout;
        }
        if let Some(retries) = std::env::var("SQLITE_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            config.max_retries = retries;
        }
        if let Some(delay) = std::env::var("SQLITE_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.retry_delay_ms = delay;
        }

        config
    }

    /// Create a new configuration with a database path.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for SQLite.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
    config: SqliteConfig,
}

impl SqliteRepository {
    /// Open the database, run pending migrations, and build the pool.
    pub fn new(config: SqliteConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("database_url={}", config.database_url)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool, config })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut SqliteConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a blocking database operation with retry for transient failures.
    ///
    /// Diesel's SQLite driver is synchronous, so every operation runs under
    /// `spawn_blocking`. Retryable errors (pool/connection trouble) back off
    /// exponentially up to `max_retries` attempts.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        return Err(err);
                    }
                };

                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }

            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn last_row_id(
    conn: &mut SqliteConnection,
    from: impl FnOnce(&mut SqliteConnection) -> QueryResult<i64>,
) -> RepositoryResult<i64> {
    from(conn).map_err(RepositoryError::from)
}

#[async_trait]
impl MoodRepository for SqliteRepository {
    async fn insert_mood(&self, entry: NewMoodLog) -> RepositoryResult<MoodLogId> {
        use schema::mood_logs::dsl;

        let row = NewMoodLogRow {
            date: entry.date,
            mood_rating: entry.rating,
            mood_label: entry.label,
            mood_emoji: entry.emoji,
            journal_entry: entry.journal,
        };

        self.with_conn(move |conn| {
            diesel::insert_into(dsl::mood_logs)
                .values(row.clone())
                .execute(conn)?;
            let id = last_row_id(conn, |conn| {
                dsl::mood_logs.select(dsl::id).order(dsl::id.desc()).first(conn)
            })?;
            Ok(MoodLogId::new(id))
        })
        .await
    }

    async fn latest_mood(&self) -> RepositoryResult<Option<MoodLog>> {
        use schema::mood_logs::dsl;

        self.with_conn(move |conn| {
            let row: Option<MoodLogRow> = dsl::mood_logs
                .order((dsl::date.desc(), dsl::id.desc()))
                .first(conn)
                .optional()?;
            Ok(row.map(MoodLog::from))
        })
        .await
    }

    async fn recent_moods(&self, limit: usize) -> RepositoryResult<Vec<MoodLog>> {
        use schema::mood_logs::dsl;

        self.with_conn(move |conn| {
            let rows: Vec<MoodLogRow> = dsl::mood_logs
                .order((dsl::date.desc(), dsl::id.desc()))
                .limit(limit as i64)
                .load(conn)?;
            Ok(rows.into_iter().map(MoodLog::from).collect())
        })
        .await
    }

    async fn moods_since(&self, cutoff: NaiveDate) -> RepositoryResult<Vec<MoodLog>> {
        use schema::mood_logs::dsl;

        self.with_conn(move |conn| {
            let rows: Vec<MoodLogRow> = dsl::mood_logs
                .filter(dsl::date.ge(cutoff))
                .order((dsl::date.asc(), dsl::id.asc()))
                .load(conn)?;
            Ok(rows.into_iter().map(MoodLog::from).collect())
        })
        .await
    }

    async fn list_moods(&self) -> RepositoryResult<Vec<MoodLog>> {
        use schema::mood_logs::dsl;

        self.with_conn(move |conn| {
            let rows: Vec<MoodLogRow> = dsl::mood_logs
                .order((dsl::date.desc(), dsl::id.desc()))
                .load(conn)?;
            Ok(rows.into_iter().map(MoodLog::from).collect())
        })
        .await
    }

    async fn update_mood(&self, id: MoodLogId, patch: MoodPatch) -> RepositoryResult<()> {
        use schema::mood_logs::dsl;

        self.with_conn(move |conn| {
            let row: MoodLogRow = dsl::mood_logs
                .find(id.value())
                .first(conn)
                .optional()?
                .ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        "mood_log not found",
                        ErrorContext::new("update_mood")
                            .with_entity("mood_log")
                            .with_entity_id(id),
                    )
                })?;

            let date = patch.date.unwrap_or(row.date);
            let rating = patch.rating.unwrap_or(row.mood_rating);
            let journal = patch.journal.clone().unwrap_or(row.journal_entry);

            diesel::update(dsl::mood_logs.find(id.value()))
                .set((
                    dsl::date.eq(date),
                    dsl::mood_rating.eq(rating),
                    dsl::journal_entry.eq(journal),
                ))
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    async fn delete_mood(&self, id: MoodLogId) -> RepositoryResult<()> {
        use schema::mood_logs::dsl;

        self.with_conn(move |conn| {
            let deleted = diesel::delete(dsl::mood_logs.find(id.value())).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::not_found_with_context(
                    "mood_log not found",
                    ErrorContext::new("delete_mood")
                        .with_entity("mood_log")
                        .with_entity_id(id),
                ));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl HabitRepository for SqliteRepository {
    async fn insert_habit(&self, name: &str) -> RepositoryResult<HabitId> {
        use schema::habits::dsl;

        let row = NewHabitRow {
            name: name.to_string(),
        };

        self.with_conn(move |conn| {
            diesel::insert_into(dsl::habits)
                .values(row.clone())
                .execute(conn)?;
            let id = last_row_id(conn, |conn| {
                dsl::habits.select(dsl::id).order(dsl::id.desc()).first(conn)
            })?;
            Ok(HabitId::new(id))
        })
        .await
    }

    async fn list_habits(&self) -> RepositoryResult<Vec<Habit>> {
        use schema::habits::dsl;

        self.with_conn(move |conn| {
            let rows: Vec<HabitRow> = dsl::habits.order(dsl::id.asc()).load(conn)?;
            Ok(rows.into_iter().map(Habit::from).collect())
        })
        .await
    }

    async fn get_habit(&self, id: HabitId) -> RepositoryResult<Habit> {
        use schema::habits::dsl;

        self.with_conn(move |conn| {
            let row: Option<HabitRow> = dsl::habits.find(id.value()).first(conn).optional()?;
            row.map(Habit::from).ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "habit not found",
                    ErrorContext::new("get_habit")
                        .with_entity("habit")
                        .with_entity_id(id),
                )
            })
        })
        .await
    }

    async fn record_completion(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
    ) -> RepositoryResult<bool> {
        use schema::habit_completions::dsl;
        use schema::habits::dsl as habits_dsl;

        self.with_conn(move |conn| {
            let habit_exists: Option<i64> = habits_dsl::habits
                .find(habit_id.value())
                .select(habits_dsl::id)
                .first(conn)
                .optional()?;
            if habit_exists.is_none() {
                return Err(RepositoryError::not_found_with_context(
                    "habit not found",
                    ErrorContext::new("record_completion")
                        .with_entity("habit")
                        .with_entity_id(habit_id),
                ));
            }

            let existing: i64 = dsl::habit_completions
                .filter(dsl::habit_id.eq(habit_id.value()))
                .filter(dsl::date.eq(date))
                .count()
                .get_result(conn)?;
            if existing > 0 {
                return Ok(false);
            }

            diesel::insert_into(dsl::habit_completions)
                .values(NewHabitCompletionRow {
                    habit_id: habit_id.value(),
                    date,
                })
                .execute(conn)?;
            Ok(true)
        })
        .await
    }

    async fn completions_on(&self, date: NaiveDate) -> RepositoryResult<Vec<HabitCompletion>> {
        use schema::habit_completions::dsl;

        self.with_conn(move |conn| {
            let rows: Vec<HabitCompletionRow> = dsl::habit_completions
                .filter(dsl::date.eq(date))
                .load(conn)?;
            Ok(rows.into_iter().map(HabitCompletion::from).collect())
        })
        .await
    }

    async fn completions_since(
        &self,
        cutoff: NaiveDate,
    ) -> RepositoryResult<Vec<HabitCompletion>> {
        use schema::habit_completions::dsl;

        self.with_conn(move |conn| {
            let rows: Vec<HabitCompletionRow> = dsl::habit_completions
                .filter(dsl::date.ge(cutoff))
                .load(conn)?;
            Ok(rows.into_iter().map(HabitCompletion::from).collect())
        })
        .await
    }

    async fn completion_records(&self) -> RepositoryResult<Vec<HabitCompletionRecord>> {
        use schema::habit_completions::dsl;
        use schema::habits::dsl as habits_dsl;

        self.with_conn(move |conn| {
            let rows: Vec<(i64, String, NaiveDate)> = dsl::habit_completions
                .inner_join(habits_dsl::habits)
                .select((dsl::id, habits_dsl::name, dsl::date))
                .order((dsl::date.desc(), dsl::id.desc()))
                .load(conn)?;
            Ok(rows
                .into_iter()
                .map(|(id, habit, date)| HabitCompletionRecord {
                    id: HabitCompletionId::new(id),
                    habit,
                    date,
                })
                .collect())
        })
        .await
    }

    async fn update_completion(
        &self,
        id: HabitCompletionId,
        patch: CompletionPatch,
    ) -> RepositoryResult<()> {
        use schema::habit_completions::dsl;

        self.with_conn(move |conn| {
            let row: Option<HabitCompletionRow> = dsl::habit_completions
                .find(id.value())
                .first(conn)
                .optional()?;
            let row = row.ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "habit_completion not found",
                    ErrorContext::new("update_completion")
                        .with_entity("habit_completion")
                        .with_entity_id(id),
                )
            })?;

            let date = patch.date.unwrap_or(row.date);
            diesel::update(dsl::habit_completions.find(id.value()))
                .set(dsl::date.eq(date))
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    async fn delete_completion(&self, id: HabitCompletionId) -> RepositoryResult<()> {
        use schema::habit_completions::dsl;

        self.with_conn(move |conn| {
            let deleted =
                diesel::delete(dsl::habit_completions.find(id.value())).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::not_found_with_context(
                    "habit_completion not found",
                    ErrorContext::new("delete_completion")
                        .with_entity("habit_completion")
                        .with_entity_id(id),
                ));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl StudySessionRepository for SqliteRepository {
    async fn replace_sessions(&self, rows: Vec<NewStudySession>) -> RepositoryResult<usize> {
        use schema::study_sessions::dsl;

        let new_rows: Vec<NewStudySessionRow> = rows
            .into_iter()
            .map(|row| NewStudySessionRow {
                date: row.date,
                subject: row.subject,
                duration_minutes: row.duration_minutes,
                notes: row.notes,
            })
            .collect();

        self.with_conn(move |conn| {
            conn.transaction::<usize, diesel::result::Error, _>(|conn| {
                diesel::delete(dsl::study_sessions).execute(conn)?;
                diesel::insert_into(dsl::study_sessions)
                    .values(new_rows.clone())
                    .execute(conn)
            })
            .map_err(RepositoryError::from)
        })
        .await
    }

    async fn list_sessions(&self) -> RepositoryResult<Vec<StudySession>> {
        use schema::study_sessions::dsl;

        self.with_conn(move |conn| {
            let rows: Vec<StudySessionRow> = dsl::study_sessions
                .order((dsl::date.desc(), dsl::id.desc()))
                .load(conn)?;
            Ok(rows.into_iter().map(StudySession::from).collect())
        })
        .await
    }

    async fn sessions_since(&self, cutoff: NaiveDate) -> RepositoryResult<Vec<StudySession>> {
        use schema::study_sessions::dsl;

        self.with_conn(move |conn| {
            let rows: Vec<StudySessionRow> = dsl::study_sessions
                .filter(dsl::date.ge(cutoff))
                .order((dsl::date.asc(), dsl::id.asc()))
                .load(conn)?;
            Ok(rows.into_iter().map(StudySession::from).collect())
        })
        .await
    }

    async fn update_session(
        &self,
        id: StudySessionId,
        patch: SessionPatch,
    ) -> RepositoryResult<()> {
        use schema::study_sessions::dsl;

        self.with_conn(move |conn| {
            let row: Option<StudySessionRow> = dsl::study_sessions
                .find(id.value())
                .first(conn)
                .optional()?;
            let row = row.ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "study_session not found",
                    ErrorContext::new("update_session")
                        .with_entity("study_session")
                        .with_entity_id(id),
                )
            })?;

            let date = patch.date.unwrap_or(row.date);
            let subject = patch.subject.clone().unwrap_or(row.subject);
            let duration_minutes = patch.duration_minutes.unwrap_or(row.duration_minutes);
            let notes = patch.notes.clone().unwrap_or(row.notes);

            diesel::update(dsl::study_sessions.find(id.value()))
                .set((
                    dsl::date.eq(date),
                    dsl::subject.eq(subject),
                    dsl::duration_minutes.eq(duration_minutes),
                    dsl::notes.eq(notes),
                ))
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    async fn delete_session(&self, id: StudySessionId) -> RepositoryResult<()> {
        use schema::study_sessions::dsl;

        self.with_conn(move |conn| {
            let deleted = diesel::delete(dsl::study_sessions.find(id.value())).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::not_found_with_context(
                    "study_session not found",
                    ErrorContext::new("delete_session")
                        .with_entity("study_session")
                        .with_entity_id(id),
                ));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl FullRepository for SqliteRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(move |conn| {
            diesel::sql_query("SELECT 1")
                .execute(conn)
                .map_err(RepositoryError::from)?;
            Ok(true)
        })
        .await
    }
}
