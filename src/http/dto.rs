//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Most page DTOs are re-exported from the routes module since they already
//! derive Serialize/Deserialize.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Dashboard
    DailyHours, DashboardData, HabitCount, HabitOverview, MoodOverview, StudyBreakdown,
    SubjectHours,
    // Records
    MoodRecord, RecordsData, SessionRecord,
    // Schedule
    GenerateOutcome, GeneratedSchedule, PlannerSnapshot, SaveResult, SubjectView,
    // Trackers
    HabitStatus, MoodSnapshot, MoodTrendPoint,
};

/// Request body for adding a subject to the planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSubjectRequest {
    /// Subject name
    pub name: String,
    /// Difficulty weight (1-5)
    pub difficulty: u8,
}

/// Request body for changing the daily hour budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetHoursRequest {
    /// Available study hours per day (1-24)
    pub hours_per_day: f64,
}

/// Query parameters for schedule generation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerateQuery {
    /// Regenerate even when the latest mood is low
    #[serde(default)]
    pub force: bool,
}

/// Request body for logging a mood.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogMoodRequest {
    /// Rating on the 1-10 scale
    pub rating: i32,
    /// Optional journal entry
    #[serde(default)]
    pub journal: Option<String>,
}

/// Response for a logged mood.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogMoodResponse {
    pub id: i64,
    pub mood: MoodSnapshot,
}

/// Query parameters for the mood trend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MoodTrendQuery {
    /// Number of most recent entries to include (default: 7)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Request body for adding a habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddHabitRequest {
    pub name: String,
}

/// Response for a habit completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteHabitResponse {
    /// False when the habit had already been completed today
    pub completed: bool,
}

/// Query parameters for the dashboard endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardQuery {
    /// Time frame: "7d" (default) or "30d"
    #[serde(default)]
    pub window: Option<String>,
}

/// Query parameters for the records endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RecordsQuery {
    /// Keyword filter applied across string fields
    #[serde(default)]
    pub q: Option<String>,
}

/// Request body for editing a mood record.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateMoodRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub journal: Option<String>,
}

/// Request body for editing a habit completion record.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateCompletionRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Request body for editing a study session record. Hours are converted to
/// stored minutes at this boundary.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateSessionRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub hours: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
