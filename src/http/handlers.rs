//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic. The planner session lock is never held
//! across an await; handlers finish repository calls first.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::dto::{
    AddHabitRequest, AddSubjectRequest, CompleteHabitResponse, DashboardQuery, GenerateQuery,
    HealthResponse, LogMoodRequest, LogMoodResponse, MessageResponse, MoodTrendQuery,
    RecordsQuery, SetHoursRequest, UpdateCompletionRequest, UpdateMoodRequest,
    UpdateSessionRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    GenerateOutcome, Habit, HabitCompletionId, HabitId, MoodLogId, MoodSnapshot, PlannerSnapshot,
    RecordsData, SaveResult, StudySessionId, SubjectView,
};
use crate::db::repository::{CompletionPatch, MoodPatch, SessionPatch};
use crate::db::services as db_services;
use crate::models::{week, Weekday};
use crate::scheduler::PlannerSession;
use crate::services::trends::TimeFrame;
use crate::services::{planner, schedule_saver, trends, MoodGate};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn snapshot(session: &PlannerSession) -> PlannerSnapshot {
    PlannerSnapshot {
        subjects: session
            .subjects()
            .iter()
            .map(|(name, difficulty)| SubjectView {
                name: name.clone(),
                difficulty,
            })
            .collect(),
        hours_per_day: session.hours_per_day(),
        schedule: session.schedule().cloned(),
        saved: session.saved_checksum().is_some(),
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the database
/// is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Planner
// =============================================================================

/// GET /v1/planner
///
/// Current planner session state.
pub async fn get_planner(State(state): State<AppState>) -> HandlerResult<PlannerSnapshot> {
    let session = state.planner.read();
    Ok(Json(snapshot(&session)))
}

/// POST /v1/planner/subjects
///
/// Add a subject (or update its difficulty) in the planner session.
pub async fn add_subject(
    State(state): State<AppState>,
    Json(request): Json<AddSubjectRequest>,
) -> HandlerResult<PlannerSnapshot> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Subject name must not be empty".to_string()));
    }
    if !(1..=5).contains(&request.difficulty) {
        return Err(AppError::BadRequest(
            "Difficulty must be between 1 and 5".to_string(),
        ));
    }

    let mut session = state.planner.write();
    session.add_subject(name, request.difficulty);
    Ok(Json(snapshot(&session)))
}

/// DELETE /v1/planner/subjects/{name}
///
/// Remove a subject from the planner session.
pub async fn remove_subject(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> HandlerResult<PlannerSnapshot> {
    let mut session = state.planner.write();
    if !session.remove_subject(&name) {
        return Err(AppError::NotFound(format!("Subject {} not found", name)));
    }
    Ok(Json(snapshot(&session)))
}

/// PUT /v1/planner/hours
///
/// Change the daily hour budget. The allocator itself does not validate the
/// budget, so the bounds are enforced here.
pub async fn set_hours(
    State(state): State<AppState>,
    Json(request): Json<SetHoursRequest>,
) -> HandlerResult<PlannerSnapshot> {
    if !(1.0..=24.0).contains(&request.hours_per_day) {
        return Err(AppError::BadRequest(
            "Hours per day must be between 1 and 24".to_string(),
        ));
    }

    let mut session = state.planner.write();
    session.set_hours_per_day(request.hours_per_day);
    Ok(Json(snapshot(&session)))
}

/// POST /v1/planner/schedule
///
/// Generate a new weekly schedule. The latest mood rating gates generation:
/// a low mood holds the request unless `force=true` is passed.
pub async fn generate_schedule(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> HandlerResult<GenerateOutcome> {
    if state.planner.read().subjects().is_empty() {
        return Err(AppError::BadRequest(
            "Add at least one subject before generating a schedule".to_string(),
        ));
    }

    let latest_rating = db_services::latest_mood_rating(state.repository.as_ref()).await?;

    match planner::evaluate_mood_gate(latest_rating, query.force) {
        MoodGate::Hold {
            notice,
            suggested_habit,
        } => Ok(Json(GenerateOutcome::HeldForLowMood {
            notice,
            suggested_habit,
        })),
        MoodGate::Proceed { message } => {
            let today_day = Weekday::from_date(today());
            let mut session = state.planner.write();
            let mut rng = SmallRng::from_entropy();
            let schedule = session.generate(&mut rng).clone();
            let view = planner::build_generated_view(&schedule, today_day, message);
            Ok(Json(GenerateOutcome::Generated(view)))
        }
    }
}

/// POST /v1/planner/schedule/save
///
/// Persist the current schedule, replacing all stored study sessions.
/// Saving the identical snapshot twice is detected and skipped.
pub async fn save_schedule(State(state): State<AppState>) -> HandlerResult<SaveResult> {
    let (schedule, last_checksum) = {
        let session = state.planner.read();
        match session.schedule() {
            Some(schedule) => (
                schedule.clone(),
                session.saved_checksum().map(|c| c.to_string()),
            ),
            None => {
                return Err(AppError::BadRequest(
                    "Generate a schedule before saving".to_string(),
                ))
            }
        }
    };

    let week_start = week::start_of_week(today());
    let outcome = schedule_saver::persist_weekly_schedule(
        state.repository.as_ref(),
        &schedule,
        week_start,
        last_checksum.as_deref(),
    )
    .await?;

    if outcome.saved {
        state.planner.write().mark_saved(outcome.checksum.clone());
    }

    Ok(Json(SaveResult {
        saved: outcome.saved,
        sessions_written: outcome.sessions_written,
        checksum: outcome.checksum,
    }))
}

// =============================================================================
// Daily Trackers
// =============================================================================

/// POST /v1/mood
///
/// Log today's mood.
pub async fn log_mood(
    State(state): State<AppState>,
    Json(request): Json<LogMoodRequest>,
) -> HandlerResult<LogMoodResponse> {
    if !(1..=10).contains(&request.rating) {
        return Err(AppError::BadRequest(
            "Mood rating must be between 1 and 10".to_string(),
        ));
    }

    let id = db_services::log_mood(
        state.repository.as_ref(),
        today(),
        request.rating,
        request.journal,
    )
    .await?;

    Ok(Json(LogMoodResponse {
        id: id.value(),
        mood: MoodSnapshot::from_rating(request.rating),
    }))
}

/// GET /v1/mood/trend
///
/// The most recent mood entries as chart points, oldest first.
pub async fn get_mood_trend(
    State(state): State<AppState>,
    Query(query): Query<MoodTrendQuery>,
) -> HandlerResult<Vec<crate::api::MoodTrendPoint>> {
    let limit = query.limit.unwrap_or(7);
    let trend = db_services::mood_trend(state.repository.as_ref(), limit).await?;
    Ok(Json(trend))
}

/// GET /v1/habits
///
/// All habits with their completed-today flag.
pub async fn list_habits(
    State(state): State<AppState>,
) -> HandlerResult<Vec<crate::api::HabitStatus>> {
    let statuses = db_services::habit_statuses(state.repository.as_ref(), today()).await?;
    Ok(Json(statuses))
}

/// POST /v1/habits
///
/// Create a new habit. Duplicate names are rejected.
pub async fn add_habit(
    State(state): State<AppState>,
    Json(request): Json<AddHabitRequest>,
) -> HandlerResult<Habit> {
    let id = db_services::add_habit(state.repository.as_ref(), &request.name).await?;
    Ok(Json(Habit {
        id,
        name: request.name.trim().to_string(),
    }))
}

/// POST /v1/habits/{habit_id}/complete
///
/// Mark a habit complete for today. Completing twice in one day is reported
/// rather than duplicated.
pub async fn complete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<i64>,
) -> HandlerResult<CompleteHabitResponse> {
    let completed = db_services::complete_habit(
        state.repository.as_ref(),
        HabitId::new(habit_id),
        today(),
    )
    .await?;

    Ok(Json(CompleteHabitResponse { completed }))
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /v1/dashboard
///
/// Full dashboard payload for the selected time frame.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> HandlerResult<crate::api::DashboardData> {
    let frame = match query.window.as_deref() {
        None => TimeFrame::default(),
        Some(value) => TimeFrame::parse(value)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown time frame: {}", value)))?,
    };

    let mut rng = SmallRng::from_entropy();
    let data = trends::build_dashboard(state.repository.as_ref(), frame, today(), &mut rng)
        .await?;
    Ok(Json(data))
}

// =============================================================================
// Records
// =============================================================================

/// GET /v1/records
///
/// All logged data, optionally filtered by keyword.
pub async fn get_records(
    State(state): State<AppState>,
    Query(query): Query<RecordsQuery>,
) -> HandlerResult<RecordsData> {
    let records = db_services::records_data(state.repository.as_ref()).await?;
    let records = match query.q.as_deref() {
        Some(q) => records.filtered(q),
        None => records,
    };
    Ok(Json(records))
}

/// PUT /v1/records/moods/{id}
pub async fn update_mood(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMoodRequest>,
) -> HandlerResult<MessageResponse> {
    if let Some(rating) = request.rating {
        if !(1..=10).contains(&rating) {
            return Err(AppError::BadRequest(
                "Mood rating must be between 1 and 10".to_string(),
            ));
        }
    }

    state
        .repository
        .update_mood(
            MoodLogId::new(id),
            MoodPatch {
                date: request.date,
                rating: request.rating,
                journal: request.journal.map(Some),
            },
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Mood log updated".to_string(),
    }))
}

/// DELETE /v1/records/moods/{id}
pub async fn delete_mood(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<MessageResponse> {
    state.repository.delete_mood(MoodLogId::new(id)).await?;
    Ok(Json(MessageResponse {
        message: "Mood log deleted".to_string(),
    }))
}

/// PUT /v1/records/completions/{id}
pub async fn update_completion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCompletionRequest>,
) -> HandlerResult<MessageResponse> {
    state
        .repository
        .update_completion(
            HabitCompletionId::new(id),
            CompletionPatch { date: request.date },
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Habit completion updated".to_string(),
    }))
}

/// DELETE /v1/records/completions/{id}
pub async fn delete_completion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<MessageResponse> {
    state
        .repository
        .delete_completion(HabitCompletionId::new(id))
        .await?;
    Ok(Json(MessageResponse {
        message: "Habit completion deleted".to_string(),
    }))
}

/// PUT /v1/records/sessions/{id}
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateSessionRequest>,
) -> HandlerResult<MessageResponse> {
    let duration_minutes = request
        .hours
        .map(|hours| qtty::Hours::new(hours).to::<qtty::time::Minute>().value().round() as i32);

    state
        .repository
        .update_session(
            StudySessionId::new(id),
            SessionPatch {
                date: request.date,
                subject: request.subject,
                duration_minutes,
                notes: request.notes,
            },
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Study session updated".to_string(),
    }))
}

/// DELETE /v1/records/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<MessageResponse> {
    state
        .repository
        .delete_session(StudySessionId::new(id))
        .await?;
    Ok(Json(MessageResponse {
        message: "Study session deleted".to_string(),
    }))
}
