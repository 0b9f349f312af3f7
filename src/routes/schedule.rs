use serde::{Deserialize, Serialize};

use crate::api::{PlannedSlot, WeeklySchedule};
use crate::models::Weekday;
use crate::routes::dashboard::SubjectHours;

// =========================================================
// Schedule page types
// =========================================================

/// One subject as shown in the planner sidebar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectView {
    pub name: String,
    pub difficulty: u8,
}

/// Current planner session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerSnapshot {
    pub subjects: Vec<SubjectView>,
    pub hours_per_day: f64,
    /// Last generated schedule, if one exists for the current inputs
    pub schedule: Option<WeeklySchedule>,
    /// Whether the current schedule has been persisted
    pub saved: bool,
}

/// A freshly generated weekly plan plus its presentation views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    /// The full week, Monday-first
    pub schedule: WeeklySchedule,
    /// The week rotated so today comes first
    pub day_order: Vec<Weekday>,
    pub today: Weekday,
    /// Today's slots, for the "focus for today" panel
    pub today_tasks: Vec<PlannedSlot>,
    /// Total hours per subject across the week, for the distribution chart
    pub distribution: Vec<SubjectHours>,
    /// Mood-derived encouragement, when a mood has been logged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a generation request: either a schedule, or a hold when the
/// latest mood is low and regeneration was not forced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerateOutcome {
    Generated(GeneratedSchedule),
    HeldForLowMood {
        notice: String,
        suggested_habit: String,
    },
}

/// Result of persisting the current schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResult {
    /// False when the identical snapshot was already saved
    pub saved: bool,
    pub sessions_written: usize,
    pub checksum: String,
}
