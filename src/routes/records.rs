use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{HabitCompletionRecord, MoodLog, MoodLogId, StudySession, StudySessionId};

// =========================================================
// Records page types
// =========================================================

/// A mood log row as shown on the records page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRecord {
    pub id: MoodLogId,
    pub date: NaiveDate,
    pub rating: i32,
    pub journal: Option<String>,
}

impl From<&MoodLog> for MoodRecord {
    fn from(log: &MoodLog) -> Self {
        Self {
            id: log.id,
            date: log.date,
            rating: log.rating,
            journal: log.journal.clone(),
        }
    }
}

/// A study session row as shown on the records page. Stored minutes are
/// converted to hours with two decimals at this boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: StudySessionId,
    pub date: NaiveDate,
    pub subject: String,
    pub hours: f64,
    pub notes: String,
}

impl From<&StudySession> for SessionRecord {
    fn from(session: &StudySession) -> Self {
        Self {
            id: session.id,
            date: session.date,
            subject: session.subject.clone(),
            hours: (session.hours().value() * 100.0).round() / 100.0,
            notes: session.notes.clone(),
        }
    }
}

/// All logged data, one section per table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsData {
    pub moods: Vec<MoodRecord>,
    pub completions: Vec<HabitCompletionRecord>,
    pub sessions: Vec<SessionRecord>,
}

impl RecordsData {
    /// Keep only rows with a string field containing `query`,
    /// case-insensitively. An empty query keeps everything.
    pub fn filtered(self, query: &str) -> Self {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self;
        }

        Self {
            moods: self
                .moods
                .into_iter()
                .filter(|record| mood_matches(record, &query))
                .collect(),
            completions: self
                .completions
                .into_iter()
                .filter(|record| completion_matches(record, &query))
                .collect(),
            sessions: self
                .sessions
                .into_iter()
                .filter(|record| session_matches(record, &query))
                .collect(),
        }
    }
}

fn contains_ci(haystack: &str, lowered_query: &str) -> bool {
    haystack.to_lowercase().contains(lowered_query)
}

fn mood_matches(record: &MoodRecord, query: &str) -> bool {
    contains_ci(&record.date.to_string(), query)
        || record
            .journal
            .as_deref()
            .is_some_and(|journal| contains_ci(journal, query))
}

fn completion_matches(record: &HabitCompletionRecord, query: &str) -> bool {
    contains_ci(&record.habit, query) || contains_ci(&record.date.to_string(), query)
}

fn session_matches(record: &SessionRecord, query: &str) -> bool {
    contains_ci(&record.subject, query)
        || contains_ci(&record.notes, query)
        || contains_ci(&record.date.to_string(), query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HabitCompletionId;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn sample() -> RecordsData {
        RecordsData {
            moods: vec![
                MoodRecord {
                    id: MoodLogId::new(1),
                    date: date(1),
                    rating: 8,
                    journal: Some("Great morning run".to_string()),
                },
                MoodRecord {
                    id: MoodLogId::new(2),
                    date: date(2),
                    rating: 3,
                    journal: None,
                },
            ],
            completions: vec![HabitCompletionRecord {
                id: HabitCompletionId::new(1),
                habit: "Morning walk".to_string(),
                date: date(2),
            }],
            sessions: vec![SessionRecord {
                id: StudySessionId::new(1),
                date: date(3),
                subject: "Math".to_string(),
                hours: 1.5,
                notes: "integrals".to_string(),
            }],
        }
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let data = sample().filtered("  ");
        assert_eq!(data.moods.len(), 2);
        assert_eq!(data.completions.len(), 1);
        assert_eq!(data.sessions.len(), 1);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let data = sample().filtered("MORNING");
        assert_eq!(data.moods.len(), 1);
        assert_eq!(data.completions.len(), 1);
        assert!(data.sessions.is_empty());
    }

    #[test]
    fn test_query_matches_subject() {
        let data = sample().filtered("math");
        assert!(data.moods.is_empty());
        assert_eq!(data.sessions.len(), 1);
    }

    #[test]
    fn test_query_matches_date_text() {
        let data = sample().filtered("2024-06-02");
        assert_eq!(data.moods.len(), 1);
        assert_eq!(data.completions.len(), 1);
        assert!(data.sessions.is_empty());
    }

    #[test]
    fn test_session_record_converts_minutes_to_hours() {
        let session = StudySession {
            id: StudySessionId::new(9),
            date: date(4),
            subject: "Math".to_string(),
            duration_minutes: 100,
            notes: String::new(),
        };
        let record = SessionRecord::from(&session);
        assert!((record.hours - 1.67).abs() < 1e-9);
    }
}
