//! Dashboard trend computations.
//!
//! Pure aggregation over repository data: study time per subject and per
//! date, mood averages, and habit completion counts, each scoped to a
//! selected time frame. The cutoff date is always computed from a caller
//! supplied `today` so these functions stay deterministic.

use chrono::{Duration, NaiveDate};
use indexmap::IndexMap;
use rand::Rng;

use crate::api::{
    DailyHours, DashboardData, Habit, HabitCompletion, HabitCount, HabitOverview, MoodLog,
    MoodOverview, MoodTrendPoint, StudyBreakdown, StudySession, SubjectHours,
};
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::services::insights::generate_insight;

/// Dashboard time frame selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFrame {
    Last7Days,
    Last30Days,
}

impl TimeFrame {
    /// Window length in days.
    pub fn days(&self) -> i64 {
        match self {
            TimeFrame::Last7Days => 7,
            TimeFrame::Last30Days => 30,
        }
    }

    /// First date included in the window ending at `today`.
    pub fn cutoff(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(self.days())
    }

    /// Parse a query value like "7d" or "30d".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "7d" | "7" => Some(TimeFrame::Last7Days),
            "30d" | "30" => Some(TimeFrame::Last30Days),
            _ => None,
        }
    }
}

impl Default for TimeFrame {
    fn default() -> Self {
        TimeFrame::Last7Days
    }
}

/// Total study hours per subject, in first-seen order.
pub fn study_by_subject(sessions: &[StudySession]) -> Vec<SubjectHours> {
    let mut totals: IndexMap<String, f64> = IndexMap::new();
    for session in sessions {
        *totals.entry(session.subject.clone()).or_insert(0.0) += session.hours().value();
    }
    totals
        .into_iter()
        .map(|(subject, hours)| SubjectHours {
            subject,
            hours: qtty::Hours::new(hours),
        })
        .collect()
}

/// Most studied subject.
pub fn top_subject(by_subject: &[SubjectHours]) -> Option<SubjectHours> {
    by_subject
        .iter()
        .max_by(|a, b| {
            a.hours
                .value()
                .partial_cmp(&b.hours.value())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .cloned()
}

/// Total study hours across all sessions.
pub fn total_study_hours(sessions: &[StudySession]) -> qtty::Hours {
    qtty::Hours::new(sessions.iter().map(|s| s.hours().value()).sum())
}

/// Total study hours per date, oldest first.
pub fn study_over_time(sessions: &[StudySession]) -> Vec<DailyHours> {
    let mut totals: IndexMap<NaiveDate, f64> = IndexMap::new();
    for session in sessions {
        *totals.entry(session.date).or_insert(0.0) += session.hours().value();
    }
    let mut series: Vec<DailyHours> = totals
        .into_iter()
        .map(|(date, hours)| DailyHours {
            date,
            hours: qtty::Hours::new(hours),
        })
        .collect();
    series.sort_by_key(|point| point.date);
    series
}

/// Mood entries as chart points, oldest first.
pub fn mood_points(moods: &[MoodLog]) -> Vec<MoodTrendPoint> {
    let mut points: Vec<MoodTrendPoint> = moods
        .iter()
        .map(|log| MoodTrendPoint {
            date: log.date,
            rating: log.rating,
        })
        .collect();
    points.sort_by_key(|point| point.date);
    points
}

/// Average mood rating, rounded to one decimal.
pub fn average_mood(moods: &[MoodLog]) -> Option<f64> {
    if moods.is_empty() {
        return None;
    }
    let sum: i64 = moods.iter().map(|log| log.rating as i64).sum();
    let average = sum as f64 / moods.len() as f64;
    Some((average * 10.0).round() / 10.0)
}

/// Completion count per habit, including habits with zero completions,
/// in habit creation order.
pub fn completion_counts(habits: &[Habit], completions: &[HabitCompletion]) -> Vec<HabitCount> {
    habits
        .iter()
        .map(|habit| HabitCount {
            habit: habit.name.clone(),
            count: completions
                .iter()
                .filter(|completion| completion.habit_id == habit.id)
                .count(),
        })
        .collect()
}

/// Most completed habit, if any habit has at least one completion.
pub fn top_habit(counts: &[HabitCount]) -> Option<HabitCount> {
    counts
        .iter()
        .max_by_key(|count| count.count)
        .filter(|count| count.count > 0)
        .cloned()
}

/// Assemble the complete dashboard payload for one time frame.
///
/// The trend sections are scoped to the window; the insight always uses the
/// overall latest mood and the full habit list, matching the companion's
/// behavior of commenting on "today" regardless of the chart window.
pub async fn build_dashboard<R: Rng + ?Sized + Send>(
    repo: &dyn FullRepository,
    frame: TimeFrame,
    today: NaiveDate,
    rng: &mut R,
) -> RepositoryResult<DashboardData> {
    let cutoff = frame.cutoff(today);

    let sessions = repo.sessions_since(cutoff).await?;
    let moods = repo.moods_since(cutoff).await?;
    let habits = repo.list_habits().await?;
    let completions = repo.completions_since(cutoff).await?;
    let latest_mood = repo.latest_mood().await?;

    let by_subject = study_by_subject(&sessions);
    let counts = completion_counts(&habits, &completions);

    Ok(DashboardData {
        window_days: frame.days(),
        study: StudyBreakdown {
            top_subject: top_subject(&by_subject),
            over_time: study_over_time(&sessions),
            total_hours: total_study_hours(&sessions),
            by_subject,
        },
        mood: MoodOverview {
            points: mood_points(&moods),
            average: average_mood(&moods),
        },
        habits: HabitOverview {
            top_habit: top_habit(&counts),
            counts,
        },
        insight: generate_insight(latest_mood.as_ref(), &habits, rng),
    })
}
