//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::dashboard::DailyHours;
pub use crate::routes::dashboard::DashboardData;
pub use crate::routes::dashboard::HabitCount;
pub use crate::routes::dashboard::HabitOverview;
pub use crate::routes::dashboard::MoodOverview;
pub use crate::routes::dashboard::StudyBreakdown;
pub use crate::routes::dashboard::SubjectHours;
pub use crate::routes::records::MoodRecord;
pub use crate::routes::records::RecordsData;
pub use crate::routes::records::SessionRecord;
pub use crate::routes::schedule::GeneratedSchedule;
pub use crate::routes::schedule::GenerateOutcome;
pub use crate::routes::schedule::PlannerSnapshot;
pub use crate::routes::schedule::SaveResult;
pub use crate::routes::schedule::SubjectView;
pub use crate::routes::trackers::HabitStatus;
pub use crate::routes::trackers::MoodSnapshot;
pub use crate::routes::trackers::MoodTrendPoint;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use crate::models::Weekday;

/// Mood log identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MoodLogId(pub i64);

/// Habit identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HabitId(pub i64);

/// Habit completion identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HabitCompletionId(pub i64);

/// Study session identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudySessionId(pub i64);

impl MoodLogId {
    pub fn new(value: i64) -> Self {
        MoodLogId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl HabitId {
    pub fn new(value: i64) -> Self {
        HabitId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl HabitCompletionId {
    pub fn new(value: i64) -> Self {
        HabitCompletionId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl StudySessionId {
    pub fn new(value: i64) -> Self {
        StudySessionId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MoodLogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for HabitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for HabitCompletionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for StudySessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Label for the free-time slot injected into each day.
///
/// This pseudo-subject appears at most once per day and is never written to
/// durable storage.
pub const OTHER_ACTIVITIES: &str = "Other Activities";

/// Legacy free-time label; also excluded when persisting a schedule.
pub const FREE_TIME: &str = "Free Time";

/// Whether a slot label names free time rather than a real subject.
pub fn is_free_time_label(label: &str) -> bool {
    label == OTHER_ACTIVITIES || label == FREE_TIME
}

/// Subjects and their difficulty weights, in insertion order.
///
/// Difficulty is expected in 1-5 but the registry does not enforce it; the
/// allocator treats it as a plain proportional weight. Insertion order is
/// significant: it breaks ties when picking the hardest subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRegistry {
    subjects: IndexMap<String, u8>,
}

impl SubjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subject, or update its difficulty if already present.
    /// Updating keeps the original insertion position.
    pub fn add(&mut self, name: impl Into<String>, difficulty: u8) {
        self.subjects.insert(name.into(), difficulty);
    }

    /// Remove a subject. Returns false if it was not registered.
    pub fn remove(&mut self, name: &str) -> bool {
        self.subjects.shift_remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<u8> {
        self.subjects.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Subject names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &String> + '_ {
        self.subjects.keys()
    }

    /// (name, difficulty) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, u8)> + '_ {
        self.subjects.iter().map(|(name, diff)| (name, *diff))
    }

    /// Sum of all difficulty weights.
    pub fn total_difficulty(&self) -> u32 {
        self.subjects.values().map(|d| *d as u32).sum()
    }

    /// Subject with the maximum difficulty.
    ///
    /// Ties are broken by insertion order: the first subject registered with
    /// the maximum weight wins.
    pub fn hardest(&self) -> Option<&str> {
        let mut best: Option<(&str, u8)> = None;
        for (name, diff) in self.iter() {
            match best {
                Some((_, best_diff)) if diff <= best_diff => {}
                _ => best = Some((name.as_str(), diff)),
            }
        }
        best.map(|(name, _)| name)
    }
}

/// One scheduled block of time within a day: a subject (or the free-time
/// pseudo-subject) and its hours, rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSlot {
    pub subject: String,
    pub hours: qtty::Hours,
}

impl PlannedSlot {
    pub fn new(subject: impl Into<String>, hours: f64) -> Self {
        Self {
            subject: subject.into(),
            hours: qtty::Hours::new(hours),
        }
    }
}

/// A full week of planned study time, keyed by weekday in Monday-first order.
///
/// Produced atomically by the allocator; every generation replaces the whole
/// value. All seven keys are always present, even when every day is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: IndexMap<Weekday, Vec<PlannedSlot>>,
}

impl WeeklySchedule {
    /// A schedule with all seven days present and empty.
    pub fn empty() -> Self {
        let mut days = IndexMap::with_capacity(7);
        for day in Weekday::ALL {
            days.insert(day, Vec::new());
        }
        Self { days }
    }

    /// Slots for one day.
    pub fn day(&self, day: Weekday) -> &[PlannedSlot] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the slots for one day.
    pub fn set_day(&mut self, day: Weekday, slots: Vec<PlannedSlot>) {
        self.days.insert(day, slots);
    }

    /// (weekday, slots) pairs in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[PlannedSlot])> + '_ {
        self.days.iter().map(|(day, slots)| (*day, slots.as_slice()))
    }

    /// Sum of hours for one day.
    pub fn day_total(&self, day: Weekday) -> f64 {
        self.day(day).iter().map(|slot| slot.hours.value()).sum()
    }

    /// Total hours per subject across the whole week, in first-seen order.
    /// Includes the free-time pseudo-subject.
    pub fn subject_totals(&self) -> IndexMap<String, f64> {
        let mut totals: IndexMap<String, f64> = IndexMap::new();
        for (_, slots) in self.iter() {
            for slot in slots {
                *totals.entry(slot.subject.clone()).or_insert(0.0) += slot.hours.value();
            }
        }
        totals
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::empty()
    }
}

/// A logged mood entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodLog {
    pub id: MoodLogId,
    pub date: NaiveDate,
    /// Rating on the 1-10 scale
    pub rating: i32,
    /// Label derived from the rating at log time
    pub label: String,
    /// Emoji derived from the rating at log time
    pub emoji: String,
    /// Optional free-text journal entry
    pub journal: Option<String>,
}

/// A mood entry about to be stored (no id yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMoodLog {
    pub date: NaiveDate,
    pub rating: i32,
    pub label: String,
    pub emoji: String,
    pub journal: Option<String>,
}

/// A tracked habit. Names are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
}

/// One day's completion of a habit. At most one per (habit, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCompletion {
    pub id: HabitCompletionId,
    pub habit_id: HabitId,
    pub date: NaiveDate,
}

/// Habit completion joined with its habit name, for the records view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCompletionRecord {
    pub id: HabitCompletionId,
    pub habit: String,
    pub date: NaiveDate,
}

/// A stored study session. Durations are whole minutes in storage; hour
/// conversion happens at the display boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: StudySessionId,
    pub date: NaiveDate,
    pub subject: String,
    pub duration_minutes: i32,
    pub notes: String,
}

impl StudySession {
    /// Duration as hours.
    pub fn hours(&self) -> qtty::Hours {
        qtty::time::Minutes::new(self.duration_minutes as f64).to::<qtty::time::Hour>()
    }
}

/// A study session about to be stored (no id yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudySession {
    pub date: NaiveDate,
    pub subject: String,
    pub duration_minutes: i32,
    pub notes: String,
}
