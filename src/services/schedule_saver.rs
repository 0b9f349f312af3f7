//! Schedule persistence.
//!
//! Converts a generated weekly schedule into study session rows and stores
//! them. Saving always replaces the whole table (the dashboard reads the
//! saved plan as the single source of truth), free-time slots are never
//! persisted, and hours become whole minutes at this boundary.

use chrono::{Duration, NaiveDate};

use crate::api::{is_free_time_label, NewStudySession, WeeklySchedule};
use crate::db::checksum::calculate_checksum;
use crate::db::repository::{FullRepository, RepositoryResult};

/// Result of a save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// False when the identical snapshot was already saved
    pub saved: bool,
    pub sessions_written: usize,
    pub checksum: String,
}

/// Checksum of a schedule's serialized form, used to skip redundant saves.
pub fn schedule_checksum(schedule: &WeeklySchedule) -> String {
    let serialized =
        serde_json::to_string(schedule).unwrap_or_else(|_| "<unserializable>".to_string());
    calculate_checksum(&serialized)
}

/// Study session rows for one week of the schedule, dated from `week_start`
/// (the Monday of the target week). Free-time slots are skipped.
pub fn sessions_for_week(
    schedule: &WeeklySchedule,
    week_start: NaiveDate,
) -> Vec<NewStudySession> {
    let mut rows = Vec::new();
    for (day_index, (_, slots)) in schedule.iter().enumerate() {
        let date = week_start + Duration::days(day_index as i64);
        for slot in slots {
            if is_free_time_label(&slot.subject) {
                continue;
            }
            let minutes = slot
                .hours
                .to::<qtty::time::Minute>()
                .value()
                .round() as i32;
            rows.push(NewStudySession {
                date,
                subject: slot.subject.clone(),
                duration_minutes: minutes,
                notes: String::new(),
            });
        }
    }
    rows
}

/// Persist a schedule, replacing all previously stored study sessions.
///
/// When `last_checksum` matches the current snapshot the save is skipped and
/// the outcome reports `saved: false`.
pub async fn persist_weekly_schedule(
    repo: &dyn FullRepository,
    schedule: &WeeklySchedule,
    week_start: NaiveDate,
    last_checksum: Option<&str>,
) -> RepositoryResult<SaveOutcome> {
    let checksum = schedule_checksum(schedule);
    if last_checksum == Some(checksum.as_str()) {
        return Ok(SaveOutcome {
            saved: false,
            sessions_written: 0,
            checksum,
        });
    }

    let rows = sessions_for_week(schedule, week_start);
    let sessions_written = repo.replace_sessions(rows).await?;
    log::info!(
        "saved weekly schedule: {} sessions from {}",
        sessions_written,
        week_start
    );

    Ok(SaveOutcome {
        saved: true,
        sessions_written,
        checksum,
    })
}
