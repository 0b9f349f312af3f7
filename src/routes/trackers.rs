use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::Habit;
use crate::models::mood;

// =========================================================
// Daily trackers page types
// =========================================================

/// A mood rating together with its derived emoji and label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodSnapshot {
    pub rating: i32,
    pub emoji: String,
    pub label: String,
}

impl MoodSnapshot {
    /// Build the snapshot for a rating using the mood scale mapping.
    pub fn from_rating(rating: i32) -> Self {
        let descriptor = mood::describe(rating);
        Self {
            rating,
            emoji: descriptor.emoji.to_string(),
            label: descriptor.label.to_string(),
        }
    }
}

/// One point on the mood trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodTrendPoint {
    pub date: NaiveDate,
    pub rating: i32,
}

/// A habit and whether it has been completed today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitStatus {
    pub habit: Habit,
    pub completed_today: bool,
}
