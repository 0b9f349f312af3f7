//! Shared data models re-exported for database layer consumers.

pub use crate::api::{
    Habit, HabitCompletion, HabitCompletionId, HabitCompletionRecord, HabitId, MoodLog, MoodLogId,
    NewMoodLog, NewStudySession, StudySession, StudySessionId,
};
pub use crate::routes::records::{MoodRecord, RecordsData, SessionRecord};
pub use crate::routes::trackers::{HabitStatus, MoodTrendPoint};
