//! Schedule generation orchestration.
//!
//! The allocator itself is pure; this service wraps it with the mood gate
//! and builds the presentation views (today-first ordering, weekly
//! distribution) that the schedule page shows.

use crate::api::{GeneratedSchedule, SubjectHours, WeeklySchedule};
use crate::models::week::day_order_from;
use crate::models::{mood, Weekday};

/// Habit suggested while generation is held for a low mood.
pub const SUGGESTED_RECOVERY_HABIT: &str = "Take a 20-minute walk";

/// Outcome of the mood gate checked before generating a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodGate {
    /// Generate, optionally showing an encouragement message.
    Proceed { message: Option<String> },
    /// Do not generate; suggest recovering first.
    Hold {
        notice: String,
        suggested_habit: String,
    },
}

/// Check the latest mood rating before generating.
///
/// A rating below the low-mood cutoff holds generation unless the user
/// explicitly asked to regenerate (`force`). With no mood logged there is
/// nothing to gate on.
pub fn evaluate_mood_gate(latest_rating: Option<i32>, force: bool) -> MoodGate {
    match latest_rating {
        Some(rating) if mood::is_low(rating) && !force => MoodGate::Hold {
            notice: "Your mood seems low today. Take a break and focus on a habit \
                     to feel better before studying."
                .to_string(),
            suggested_habit: SUGGESTED_RECOVERY_HABIT.to_string(),
        },
        Some(rating) => MoodGate::Proceed {
            message: encouragement(rating),
        },
        None => MoodGate::Proceed { message: None },
    }
}

/// Encouragement text shown next to a fresh schedule, keyed off the latest
/// mood. Low ratings get none (the gate message covers that case).
pub fn encouragement(rating: i32) -> Option<String> {
    if mood::is_great(rating) {
        Some("Your mood is great! Let's get this done. 🎉".to_string())
    } else if !mood::is_low(rating) {
        Some(
            "Remember, a little progress each day adds up to big results. Let's plan it out!"
                .to_string(),
        )
    } else {
        None
    }
}

/// Total hours per subject across the week, in first-seen order.
pub fn weekly_distribution(schedule: &WeeklySchedule) -> Vec<SubjectHours> {
    schedule
        .subject_totals()
        .into_iter()
        .map(|(subject, hours)| SubjectHours {
            subject,
            hours: qtty::Hours::new(hours),
        })
        .collect()
}

/// Build the schedule page payload for a generated schedule.
pub fn build_generated_view(
    schedule: &WeeklySchedule,
    today: Weekday,
    message: Option<String>,
) -> GeneratedSchedule {
    GeneratedSchedule {
        schedule: schedule.clone(),
        day_order: day_order_from(today).to_vec(),
        today,
        today_tasks: schedule.day(today).to_vec(),
        distribution: weekly_distribution(schedule),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PlannedSlot;

    #[test]
    fn test_gate_holds_on_low_mood() {
        let gate = evaluate_mood_gate(Some(2), false);
        match gate {
            MoodGate::Hold {
                suggested_habit, ..
            } => assert_eq!(suggested_habit, SUGGESTED_RECOVERY_HABIT),
            other => panic!("expected hold, got {:?}", other),
        }
    }

    #[test]
    fn test_gate_force_overrides_low_mood() {
        let gate = evaluate_mood_gate(Some(2), true);
        assert!(matches!(gate, MoodGate::Proceed { message: None }));
    }

    #[test]
    fn test_gate_proceeds_without_mood_data() {
        assert_eq!(
            evaluate_mood_gate(None, false),
            MoodGate::Proceed { message: None }
        );
    }

    #[test]
    fn test_gate_great_mood_message() {
        let gate = evaluate_mood_gate(Some(9), false);
        match gate {
            MoodGate::Proceed { message: Some(msg) } => assert!(msg.contains("great")),
            other => panic!("expected proceed with message, got {:?}", other),
        }
    }

    #[test]
    fn test_gate_middling_mood_message() {
        let gate = evaluate_mood_gate(Some(5), false);
        match gate {
            MoodGate::Proceed { message: Some(msg) } => assert!(msg.contains("progress")),
            other => panic!("expected proceed with message, got {:?}", other),
        }
    }

    #[test]
    fn test_weekly_distribution_sums_across_days() {
        let mut schedule = WeeklySchedule::empty();
        schedule.set_day(Weekday::Monday, vec![PlannedSlot::new("Math", 2.0)]);
        schedule.set_day(Weekday::Tuesday, vec![PlannedSlot::new("Math", 3.0)]);

        let distribution = weekly_distribution(&schedule);
        assert_eq!(distribution.len(), 1);
        assert_eq!(distribution[0].subject, "Math");
        assert!((distribution[0].hours.value() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_generated_view_rotates_days() {
        let mut schedule = WeeklySchedule::empty();
        schedule.set_day(Weekday::Thursday, vec![PlannedSlot::new("Math", 6.0)]);

        let view = build_generated_view(&schedule, Weekday::Thursday, None);
        assert_eq!(view.day_order[0], Weekday::Thursday);
        assert_eq!(view.today_tasks.len(), 1);
        assert_eq!(view.today_tasks[0].subject, "Math");
    }
}
