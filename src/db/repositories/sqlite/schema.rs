diesel::table! {
    mood_logs (id) {
        id -> BigInt,
        date -> Date,
        mood_rating -> Integer,
        mood_label -> Text,
        mood_emoji -> Text,
        journal_entry -> Nullable<Text>,
    }
}

diesel::table! {
    habits (id) {
        id -> BigInt,
        name -> Text,
    }
}

diesel::table! {
    habit_completions (id) {
        id -> BigInt,
        habit_id -> BigInt,
        date -> Date,
    }
}

diesel::table! {
    study_sessions (id) {
        id -> BigInt,
        date -> Date,
        subject -> Text,
        duration_minutes -> Integer,
        notes -> Text,
    }
}

diesel::joinable!(habit_completions -> habits (habit_id));

diesel::allow_tables_to_appear_in_same_query!(habit_completions, habits);
