//! Planner session state.
//!
//! One planning session's working state: the subject registry built up by
//! the user, the daily hour setting, the last generated schedule, and the
//! checksum of the last persisted snapshot. The session is an explicit value
//! owned by the caller (the HTTP state holds one per process), never global.

use rand::Rng;

use crate::api::{SubjectRegistry, WeeklySchedule};
use crate::scheduler::allocator::generate_weekly_schedule;

/// Default daily study budget in hours.
pub const DEFAULT_HOURS_PER_DAY: f64 = 6.0;

/// Session-scoped planner state.
#[derive(Debug, Clone)]
pub struct PlannerSession {
    subjects: SubjectRegistry,
    hours_per_day: f64,
    schedule: Option<WeeklySchedule>,
    saved_checksum: Option<String>,
}

impl PlannerSession {
    pub fn new() -> Self {
        Self {
            subjects: SubjectRegistry::new(),
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            schedule: None,
            saved_checksum: None,
        }
    }

    pub fn subjects(&self) -> &SubjectRegistry {
        &self.subjects
    }

    pub fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }

    /// Last generated schedule, if any.
    pub fn schedule(&self) -> Option<&WeeklySchedule> {
        self.schedule.as_ref()
    }

    /// Add or update a subject. Invalidates the cached schedule and the
    /// saved-snapshot marker, since the inputs changed.
    pub fn add_subject(&mut self, name: impl Into<String>, difficulty: u8) {
        self.subjects.add(name, difficulty);
        self.invalidate();
    }

    /// Remove a subject. Returns false if it was not registered.
    pub fn remove_subject(&mut self, name: &str) -> bool {
        let removed = self.subjects.remove(name);
        if removed {
            self.invalidate();
        }
        removed
    }

    /// Change the daily hour budget. Invalidates the cached schedule.
    pub fn set_hours_per_day(&mut self, hours: f64) {
        self.hours_per_day = hours;
        self.invalidate();
    }

    /// Generate a fresh schedule from the current subjects and settings,
    /// replacing any previous one.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &WeeklySchedule {
        let schedule = generate_weekly_schedule(&self.subjects, self.hours_per_day, rng);
        self.saved_checksum = None;
        self.schedule.insert(schedule)
    }

    /// Record the checksum of the snapshot that was just persisted.
    pub fn mark_saved(&mut self, checksum: impl Into<String>) {
        self.saved_checksum = Some(checksum.into());
    }

    /// Checksum of the last persisted snapshot, if the current schedule has
    /// been saved.
    pub fn saved_checksum(&self) -> Option<&str> {
        self.saved_checksum.as_deref()
    }

    fn invalidate(&mut self) {
        self.schedule = None;
        self.saved_checksum = None;
    }
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_session_defaults() {
        let session = PlannerSession::new();
        assert!(session.subjects().is_empty());
        assert_eq!(session.hours_per_day(), DEFAULT_HOURS_PER_DAY);
        assert!(session.schedule().is_none());
        assert!(session.saved_checksum().is_none());
    }

    #[test]
    fn test_generate_caches_schedule() {
        let mut session = PlannerSession::new();
        session.add_subject("Math", 5);

        let mut rng = SmallRng::seed_from_u64(7);
        session.generate(&mut rng);

        let schedule = session.schedule().expect("schedule cached");
        assert!(!schedule.day(crate::models::Weekday::Monday).is_empty());
    }

    #[test]
    fn test_adding_subject_invalidates_schedule() {
        let mut session = PlannerSession::new();
        session.add_subject("Math", 5);

        let mut rng = SmallRng::seed_from_u64(7);
        session.generate(&mut rng);
        session.mark_saved("abc123");

        session.add_subject("History", 2);
        assert!(session.schedule().is_none());
        assert!(session.saved_checksum().is_none());
    }

    #[test]
    fn test_changing_hours_invalidates_schedule() {
        let mut session = PlannerSession::new();
        session.add_subject("Math", 5);

        let mut rng = SmallRng::seed_from_u64(7);
        session.generate(&mut rng);
        session.set_hours_per_day(4.0);

        assert!(session.schedule().is_none());
        assert_eq!(session.hours_per_day(), 4.0);
    }

    #[test]
    fn test_remove_missing_subject_keeps_schedule() {
        let mut session = PlannerSession::new();
        session.add_subject("Math", 5);

        let mut rng = SmallRng::seed_from_u64(7);
        session.generate(&mut rng);

        assert!(!session.remove_subject("Physics"));
        assert!(session.schedule().is_some());
    }

    #[test]
    fn test_regenerate_clears_saved_marker() {
        let mut session = PlannerSession::new();
        session.add_subject("Math", 5);

        let mut rng = SmallRng::seed_from_u64(7);
        session.generate(&mut rng);
        session.mark_saved("abc123");
        assert_eq!(session.saved_checksum(), Some("abc123"));

        session.generate(&mut rng);
        assert!(session.saved_checksum().is_none());
    }
}
