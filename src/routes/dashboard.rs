use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::routes::trackers::MoodTrendPoint;

// =========================================================
// Dashboard page types
// =========================================================

/// Total study hours for one subject within the selected time frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectHours {
    pub subject: String,
    pub hours: qtty::Hours,
}

/// Total study hours for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyHours {
    pub date: NaiveDate,
    pub hours: qtty::Hours,
}

/// Completion count for one habit within the selected time frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCount {
    pub habit: String,
    pub count: usize,
}

/// Study-effort section of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyBreakdown {
    pub by_subject: Vec<SubjectHours>,
    pub over_time: Vec<DailyHours>,
    /// Most studied subject, shown as a metric card
    pub top_subject: Option<SubjectHours>,
    pub total_hours: qtty::Hours,
}

/// Mood section of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodOverview {
    pub points: Vec<MoodTrendPoint>,
    /// Average rating over the time frame, one decimal
    pub average: Option<f64>,
}

/// Habit section of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitOverview {
    pub counts: Vec<HabitCount>,
    pub top_habit: Option<HabitCount>,
}

/// Complete dashboard payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    /// Length of the selected time frame in days (7 or 30)
    pub window_days: i64,
    pub study: StudyBreakdown,
    pub mood: MoodOverview,
    pub habits: HabitOverview,
    /// Canned companion insight derived from the latest mood and habits
    pub insight: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_hours_clone() {
        let entry = SubjectHours {
            subject: "Math".to_string(),
            hours: qtty::Hours::new(12.5),
        };
        let cloned = entry.clone();
        assert_eq!(cloned.hours.value(), 12.5);
    }

    #[test]
    fn test_dashboard_data_serializes() {
        let data = DashboardData {
            window_days: 7,
            study: StudyBreakdown {
                by_subject: vec![],
                over_time: vec![],
                top_subject: None,
                total_hours: qtty::Hours::new(0.0),
            },
            mood: MoodOverview {
                points: vec![],
                average: None,
            },
            habits: HabitOverview {
                counts: vec![],
                top_habit: None,
            },
            insight: "Log your mood to get insights.".to_string(),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["window_days"], 7);
        assert!(json["study"]["by_subject"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_hours_serialize_as_plain_numbers() {
        let entry = DailyHours {
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            hours: qtty::Hours::new(2.5),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["hours"], 2.5);
    }
}
