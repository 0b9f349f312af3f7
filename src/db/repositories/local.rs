//! In-memory repository implementation.
//!
//! Backs unit tests and local development. All data lives in a single
//! `RwLock`-guarded store; ids are handed out from per-table counters and
//! never reused within a process.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::api::{
    Habit, HabitCompletion, HabitCompletionId, HabitCompletionRecord, HabitId, MoodLog, MoodLogId,
    NewMoodLog, NewStudySession, StudySession, StudySessionId,
};
use crate::db::repository::{
    CompletionPatch, ErrorContext, FullRepository, HabitRepository, MoodPatch, MoodRepository,
    RepositoryError, RepositoryResult, SessionPatch, StudySessionRepository,
};

#[derive(Debug, Default)]
struct Store {
    moods: Vec<MoodLog>,
    habits: Vec<Habit>,
    completions: Vec<HabitCompletion>,
    sessions: Vec<StudySession>,
    next_mood_id: i64,
    next_habit_id: i64,
    next_completion_id: i64,
    next_session_id: i64,
}

/// In-memory repository.
#[derive(Debug, Default)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(entity: &str, id: impl ToString, operation: &str) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("{} not found", entity),
        ErrorContext::new(operation)
            .with_entity(entity)
            .with_entity_id(id.to_string()),
    )
}

#[async_trait]
impl MoodRepository for LocalRepository {
    async fn insert_mood(&self, entry: NewMoodLog) -> RepositoryResult<MoodLogId> {
        let mut store = self.store.write();
        store.next_mood_id += 1;
        let id = MoodLogId::new(store.next_mood_id);
        store.moods.push(MoodLog {
            id,
            date: entry.date,
            rating: entry.rating,
            label: entry.label,
            emoji: entry.emoji,
            journal: entry.journal,
        });
        Ok(id)
    }

    async fn latest_mood(&self) -> RepositoryResult<Option<MoodLog>> {
        let store = self.store.read();
        Ok(store
            .moods
            .iter()
            .max_by_key(|log| (log.date, log.id))
            .cloned())
    }

    async fn recent_moods(&self, limit: usize) -> RepositoryResult<Vec<MoodLog>> {
        let store = self.store.read();
        let mut moods = store.moods.clone();
        moods.sort_by_key(|log| std::cmp::Reverse((log.date, log.id)));
        moods.truncate(limit);
        Ok(moods)
    }

    async fn moods_since(&self, cutoff: NaiveDate) -> RepositoryResult<Vec<MoodLog>> {
        let store = self.store.read();
        let mut moods: Vec<MoodLog> = store
            .moods
            .iter()
            .filter(|log| log.date >= cutoff)
            .cloned()
            .collect();
        moods.sort_by_key(|log| (log.date, log.id));
        Ok(moods)
    }

    async fn list_moods(&self) -> RepositoryResult<Vec<MoodLog>> {
        let store = self.store.read();
        let mut moods = store.moods.clone();
        moods.sort_by_key(|log| std::cmp::Reverse((log.date, log.id)));
        Ok(moods)
    }

    async fn update_mood(&self, id: MoodLogId, patch: MoodPatch) -> RepositoryResult<()> {
        let mut store = self.store.write();
        let log = store
            .moods
            .iter_mut()
            .find(|log| log.id == id)
            .ok_or_else(|| not_found("mood_log", id, "update_mood"))?;

        if let Some(date) = patch.date {
            log.date = date;
        }
        if let Some(rating) = patch.rating {
            log.rating = rating;
        }
        if let Some(journal) = patch.journal {
            log.journal = journal;
        }
        Ok(())
    }

    async fn delete_mood(&self, id: MoodLogId) -> RepositoryResult<()> {
        let mut store = self.store.write();
        let before = store.moods.len();
        store.moods.retain(|log| log.id != id);
        if store.moods.len() == before {
            return Err(not_found("mood_log", id, "delete_mood"));
        }
        Ok(())
    }
}

#[async_trait]
impl HabitRepository for LocalRepository {
    async fn insert_habit(&self, name: &str) -> RepositoryResult<HabitId> {
        let mut store = self.store.write();
        if store.habits.iter().any(|habit| habit.name == name) {
            return Err(RepositoryError::validation_with_context(
                "Habit already exists",
                ErrorContext::new("insert_habit")
                    .with_entity("habit")
                    .with_details(format!("name={}", name)),
            ));
        }
        store.next_habit_id += 1;
        let id = HabitId::new(store.next_habit_id);
        store.habits.push(Habit {
            id,
            name: name.to_string(),
        });
        Ok(id)
    }

    async fn list_habits(&self) -> RepositoryResult<Vec<Habit>> {
        Ok(self.store.read().habits.clone())
    }

    async fn get_habit(&self, id: HabitId) -> RepositoryResult<Habit> {
        self.store
            .read()
            .habits
            .iter()
            .find(|habit| habit.id == id)
            .cloned()
            .ok_or_else(|| not_found("habit", id, "get_habit"))
    }

    async fn record_completion(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
    ) -> RepositoryResult<bool> {
        let mut store = self.store.write();
        if !store.habits.iter().any(|habit| habit.id == habit_id) {
            return Err(not_found("habit", habit_id, "record_completion"));
        }
        let already_done = store
            .completions
            .iter()
            .any(|completion| completion.habit_id == habit_id && completion.date == date);
        if already_done {
            return Ok(false);
        }
        store.next_completion_id += 1;
        let id = HabitCompletionId::new(store.next_completion_id);
        store.completions.push(HabitCompletion {
            id,
            habit_id,
            date,
        });
        Ok(true)
    }

    async fn completions_on(&self, date: NaiveDate) -> RepositoryResult<Vec<HabitCompletion>> {
        let store = self.store.read();
        Ok(store
            .completions
            .iter()
            .filter(|completion| completion.date == date)
            .cloned()
            .collect())
    }

    async fn completions_since(
        &self,
        cutoff: NaiveDate,
    ) -> RepositoryResult<Vec<HabitCompletion>> {
        let store = self.store.read();
        Ok(store
            .completions
            .iter()
            .filter(|completion| completion.date >= cutoff)
            .cloned()
            .collect())
    }

    async fn completion_records(&self) -> RepositoryResult<Vec<HabitCompletionRecord>> {
        let store = self.store.read();
        let mut records: Vec<HabitCompletionRecord> = store
            .completions
            .iter()
            .filter_map(|completion| {
                store
                    .habits
                    .iter()
                    .find(|habit| habit.id == completion.habit_id)
                    .map(|habit| HabitCompletionRecord {
                        id: completion.id,
                        habit: habit.name.clone(),
                        date: completion.date,
                    })
            })
            .collect();
        records.sort_by_key(|record| std::cmp::Reverse((record.date, record.id)));
        Ok(records)
    }

    async fn update_completion(
        &self,
        id: HabitCompletionId,
        patch: CompletionPatch,
    ) -> RepositoryResult<()> {
        let mut store = self.store.write();
        let completion = store
            .completions
            .iter_mut()
            .find(|completion| completion.id == id)
            .ok_or_else(|| not_found("habit_completion", id, "update_completion"))?;

        if let Some(date) = patch.date {
            completion.date = date;
        }
        Ok(())
    }

    async fn delete_completion(&self, id: HabitCompletionId) -> RepositoryResult<()> {
        let mut store = self.store.write();
        let before = store.completions.len();
        store.completions.retain(|completion| completion.id != id);
        if store.completions.len() == before {
            return Err(not_found("habit_completion", id, "delete_completion"));
        }
        Ok(())
    }
}

#[async_trait]
impl StudySessionRepository for LocalRepository {
    async fn replace_sessions(&self, rows: Vec<NewStudySession>) -> RepositoryResult<usize> {
        let mut store = self.store.write();
        store.sessions.clear();
        let count = rows.len();
        for row in rows {
            store.next_session_id += 1;
            let id = StudySessionId::new(store.next_session_id);
            store.sessions.push(StudySession {
                id,
                date: row.date,
                subject: row.subject,
                duration_minutes: row.duration_minutes,
                notes: row.notes,
            });
        }
        Ok(count)
    }

    async fn list_sessions(&self) -> RepositoryResult<Vec<StudySession>> {
        let store = self.store.read();
        let mut sessions = store.sessions.clone();
        sessions.sort_by_key(|session| std::cmp::Reverse((session.date, session.id)));
        Ok(sessions)
    }

    async fn sessions_since(&self, cutoff: NaiveDate) -> RepositoryResult<Vec<StudySession>> {
        let store = self.store.read();
        let mut sessions: Vec<StudySession> = store
            .sessions
            .iter()
            .filter(|session| session.date >= cutoff)
            .cloned()
            .collect();
        sessions.sort_by_key(|session| (session.date, session.id));
        Ok(sessions)
    }

    async fn update_session(
        &self,
        id: StudySessionId,
        patch: SessionPatch,
    ) -> RepositoryResult<()> {
        let mut store = self.store.write();
        let session = store
            .sessions
            .iter_mut()
            .find(|session| session.id == id)
            .ok_or_else(|| not_found("study_session", id, "update_session"))?;

        if let Some(date) = patch.date {
            session.date = date;
        }
        if let Some(subject) = patch.subject {
            session.subject = subject;
        }
        if let Some(duration_minutes) = patch.duration_minutes {
            session.duration_minutes = duration_minutes;
        }
        if let Some(notes) = patch.notes {
            session.notes = notes;
        }
        Ok(())
    }

    async fn delete_session(&self, id: StudySessionId) -> RepositoryResult<()> {
        let mut store = self.store.write();
        let before = store.sessions.len();
        store.sessions.retain(|session| session.id != id);
        if store.sessions.len() == before {
            return Err(not_found("study_session", id, "delete_session"));
        }
        Ok(())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
