//! Mood scale mapping.
//!
//! Mood ratings run 1-10. Each rating maps to an emoji and a short label
//! shown in the trackers UI; the thresholds below also drive the schedule
//! generation gate and the dashboard insight text.

/// Ratings below this hold schedule generation until the user recovers.
pub const LOW_MOOD_CUTOFF: i32 = 4;

/// Ratings above this earn a congratulatory message.
pub const GREAT_MOOD_CUTOFF: i32 = 7;

/// Emoji and label for a mood rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodDescriptor {
    pub emoji: &'static str,
    pub label: &'static str,
}

/// Map a 1-10 rating to its emoji and label.
pub fn describe(rating: i32) -> MoodDescriptor {
    let (emoji, label) = if rating <= 2 {
        ("😢", "Very Sad")
    } else if rating <= 4 {
        ("😞", "Sad")
    } else if rating <= 6 {
        ("😐", "Neutral")
    } else if rating <= 8 {
        ("🙂", "Happy")
    } else if rating == 9 {
        ("😄", "Very Happy")
    } else {
        ("🤩", "Excited")
    };
    MoodDescriptor { emoji, label }
}

/// Whether a rating is low enough to gate schedule generation.
pub fn is_low(rating: i32) -> bool {
    rating < LOW_MOOD_CUTOFF
}

/// Whether a rating is high enough to celebrate.
pub fn is_great(rating: i32) -> bool {
    rating > GREAT_MOOD_CUTOFF
}
