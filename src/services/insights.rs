//! Companion insight generation.
//!
//! Produces the short, canned insight text shown on the dashboard. The text
//! depends on the latest mood rating and the tracked habits; quote and habit
//! picks use the injected RNG so tests can pin them down.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::api::{Habit, MoodLog};
use crate::models::mood;

/// Motivational quotes shown for middling moods.
pub const MOTIVATIONAL_QUOTES: [&str; 4] = [
    "The secret of getting ahead is getting started.",
    "The best way to predict the future is to create it.",
    "Don't watch the clock; do what it does. Keep going.",
    "The future belongs to those who believe in the beauty of their dreams.",
];

/// Build the dashboard insight from the latest mood and tracked habits.
///
/// With no mood logged the rating is treated as the lowest band, which
/// steers the user toward the trackers page.
pub fn generate_insight<R: Rng + ?Sized>(
    latest_mood: Option<&MoodLog>,
    habits: &[Habit],
    rng: &mut R,
) -> String {
    let rating = latest_mood.map(|log| log.rating).unwrap_or(0);

    if rating > mood::GREAT_MOOD_CUTOFF {
        return format!(
            "You're doing great with a mood of {}/10! Keep up the good work and stay positive.",
            rating
        );
    }

    if rating >= mood::LOW_MOOD_CUTOFF {
        let quote = MOTIVATIONAL_QUOTES
            .choose(rng)
            .copied()
            .unwrap_or(MOTIVATIONAL_QUOTES[0]);
        return format!(
            "It looks like your mood is a bit low today at {}/10. Here's some motivation: '{}'",
            rating, quote
        );
    }

    match habits.choose(rng) {
        Some(habit) => format!(
            "Your mood is quite low today. Your Smart Companion suggests focusing on a habit \
             to feel better. How about '{}'?",
            habit.name
        ),
        None => "Your mood is quite low today. Please add a habit in the Daily Trackers page \
                 to get a suggestion."
            .to_string(),
    }
}
