use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::{habit_completions, habits, mood_logs, study_sessions};
use crate::api::{
    Habit, HabitCompletion, HabitCompletionId, HabitId, MoodLog, MoodLogId, StudySession,
    StudySessionId,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mood_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MoodLogRow {
    pub id: i64,
    pub date: NaiveDate,
    pub mood_rating: i32,
    pub mood_label: String,
    pub mood_emoji: String,
    pub journal_entry: Option<String>,
}

impl From<MoodLogRow> for MoodLog {
    fn from(row: MoodLogRow) -> Self {
        Self {
            id: MoodLogId::new(row.id),
            date: row.date,
            rating: row.mood_rating,
            label: row.mood_label,
            emoji: row.mood_emoji,
            journal: row.journal_entry,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = mood_logs)]
pub struct NewMoodLogRow {
    pub date: NaiveDate,
    pub mood_rating: i32,
    pub mood_label: String,
    pub mood_emoji: String,
    pub journal_entry: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = habits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HabitRow {
    pub id: i64,
    pub name: String,
}

impl From<HabitRow> for Habit {
    fn from(row: HabitRow) -> Self {
        Self {
            id: HabitId::new(row.id),
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = habits)]
pub struct NewHabitRow {
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = habit_completions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HabitCompletionRow {
    pub id: i64,
    pub habit_id: i64,
    pub date: NaiveDate,
}

impl From<HabitCompletionRow> for HabitCompletion {
    fn from(row: HabitCompletionRow) -> Self {
        Self {
            id: HabitCompletionId::new(row.id),
            habit_id: HabitId::new(row.habit_id),
            date: row.date,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = habit_completions)]
pub struct NewHabitCompletionRow {
    pub habit_id: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = study_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StudySessionRow {
    pub id: i64,
    pub date: NaiveDate,
    pub subject: String,
    pub duration_minutes: i32,
    pub notes: String,
}

impl From<StudySessionRow> for StudySession {
    fn from(row: StudySessionRow) -> Self {
        Self {
            id: StudySessionId::new(row.id),
            date: row.date,
            subject: row.subject,
            duration_minutes: row.duration_minutes,
            notes: row.notes,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = study_sessions)]
pub struct NewStudySessionRow {
    pub date: NaiveDate,
    pub subject: String,
    pub duration_minutes: i32,
    pub notes: String,
}
