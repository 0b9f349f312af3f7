//! Weekly schedule allocator.
//!
//! Distributes a weekly budget of study hours across subjects in proportion
//! to their difficulty weights, one day at a time. Daily visiting order is
//! shuffled and each slice is jittered, so two runs rarely produce the same
//! plan; callers that need reproducibility inject a seeded RNG.
//!
//! Invariants the allocator maintains:
//! - the output always has all seven weekdays, Monday first;
//! - every day's emitted hours sum to the daily budget within 0.1;
//! - each slice is rounded to one decimal before being committed.

use rand::seq::SliceRandom;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::api::{PlannedSlot, SubjectRegistry, WeeklySchedule, OTHER_ACTIVITIES};
use crate::models::Weekday;

/// Fraction of the daily budget reserved for free time, at most.
const FREE_TIME_FRACTION: f64 = 0.2;

/// Jitter band applied to each subject's ideal daily share.
const JITTER_LOW: f64 = 0.8;
const JITTER_HIGH: f64 = 1.2;

/// Round to one decimal place, the resolution of all emitted hours.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Generate a weekly schedule from subject difficulties and a daily budget.
///
/// An empty registry yields a schedule with seven empty days. `hours_per_day`
/// is expected positive; non-positive values degenerate to empty or
/// meaningless allocations without failing (see module docs in
/// [`crate::scheduler`]).
///
/// Each subject's weekly target is its proportional share of
/// `hours_per_day * 7`, rounded to one decimal. Days are then filled
/// Monday through Sunday:
///
/// 1. subjects are visited in a fresh random order each day; each draws a
///    jittered slice of its remaining weekly budget, clamped to what the
///    subject and the day still have available;
/// 2. up to 20% of the day goes to an `"Other Activities"` slot when more
///    than 0.3 hours remain;
/// 3. whatever is still left lands on the hardest subject, whose weekly
///    budget may go negative (repaid implicitly later in the week);
/// 4. a final adjustment on the hardest subject reconciles per-slice
///    rounding so the day's total matches the budget within 0.1.
pub fn generate_weekly_schedule<R: Rng + ?Sized>(
    subjects: &SubjectRegistry,
    hours_per_day: f64,
    rng: &mut R,
) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::empty();

    if subjects.is_empty() {
        return schedule;
    }

    let total_difficulty = subjects.total_difficulty() as f64;
    let weekly_target = hours_per_day * 7.0;

    // Per-subject hours still to place this week, in registry order.
    let mut remaining_alloc: Vec<(String, f64)> = subjects
        .iter()
        .map(|(name, difficulty)| {
            let share = round1(weekly_target * (difficulty as f64) / total_difficulty);
            (name.clone(), share)
        })
        .collect();

    let hardest = match subjects.hardest() {
        Some(name) => name.to_string(),
        None => return schedule,
    };

    for (day_index, day) in Weekday::ALL.into_iter().enumerate() {
        let mut todays_slots: Vec<PlannedSlot> = Vec::new();
        let mut remaining_today = hours_per_day;

        let mut visit_order: Vec<usize> = (0..remaining_alloc.len()).collect();
        visit_order.shuffle(rng);

        for subject_index in visit_order {
            if remaining_today <= 0.0 {
                continue;
            }
            let budget = remaining_alloc[subject_index].1;
            if budget <= 0.0 {
                continue;
            }

            let days_left = 7 - day_index;
            let ideal_share = if days_left > 0 {
                budget / days_left as f64
            } else {
                budget
            };

            let jitter = rng.gen_range(JITTER_LOW..=JITTER_HIGH);
            let mut slice = round1(jitter * ideal_share);
            slice = slice.min(budget).min(remaining_today);

            if slice > 0.0 {
                let name = remaining_alloc[subject_index].0.clone();
                todays_slots.push(PlannedSlot::new(name, slice));
                remaining_alloc[subject_index].1 -= slice;
                remaining_today -= slice;
            }
        }

        // Free time slot, capped at a fifth of the day.
        let max_free = round1(hours_per_day * FREE_TIME_FRACTION);
        if remaining_today > 0.3 {
            let free_time = remaining_today.min(max_free);
            if free_time >= 0.1 {
                todays_slots.push(PlannedSlot::new(OTHER_ACTIVITIES, round1(free_time)));
                remaining_today -= free_time;
            }
        }

        // Whatever is left goes to the hardest subject. Its weekly budget may
        // go negative here; later days then draw less for it.
        if remaining_today > 0.0 {
            todays_slots.push(PlannedSlot::new(hardest.clone(), round1(remaining_today)));
            if let Some(entry) = remaining_alloc.iter_mut().find(|(name, _)| *name == hardest) {
                entry.1 -= remaining_today;
            }
        }

        // Reconcile per-slice rounding so the day totals the exact budget.
        let total_today = round1(todays_slots.iter().map(|slot| slot.hours.value()).sum());
        let diff = round1(hours_per_day - total_today);
        if diff.abs() >= 0.1 {
            if let Some(slot) = todays_slots.iter_mut().find(|slot| slot.subject == hardest) {
                slot.hours = qtty::Hours::new(round1(slot.hours.value() + diff));
            } else {
                todays_slots.push(PlannedSlot::new(hardest.clone(), round1(diff)));
            }
            if let Some(entry) = remaining_alloc.iter_mut().find(|(name, _)| *name == hardest) {
                entry.1 -= diff;
            }
        }

        schedule.set_day(day, todays_slots);
    }

    schedule
}

/// Generate a schedule with a fresh entropy-seeded RNG.
///
/// Production entry point; tests use [`generate_weekly_schedule`] with a
/// seeded RNG instead.
pub fn generate_weekly_schedule_entropy(
    subjects: &SubjectRegistry,
    hours_per_day: f64,
) -> WeeklySchedule {
    let mut rng = SmallRng::from_entropy();
    generate_weekly_schedule(subjects, hours_per_day, &mut rng)
}
