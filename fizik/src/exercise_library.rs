//! Built-in exercise names and suggestion lookup.

use std::collections::HashSet;

pub const DEFAULT_SUGGESTIONS: usize = 8;
pub const MAX_SUGGESTIONS: usize = 50;

/// Common lifts offered before the user has logged anything.
pub const EXERCISES: &[&str] = &[
    // Push
    "Bench Press",
    "Incline Bench Press",
    "Overhead Press",
    "Dumbbell Shoulder Press",
    "Push-Up",
    "Dips",
    "Cable Fly",
    "Lateral Raise",
    "Triceps Pushdown",
    "Skull Crushers",
    // Pull
    "Deadlift",
    "Barbell Row",
    "Dumbbell Row",
    "Pull-Up",
    "Chin-Up",
    "Lat Pulldown",
    "Face Pull",
    "Biceps Curl",
    "Hammer Curl",
    "Rear Delt Fly",
    // Legs
    "Back Squat",
    "Front Squat",
    "Leg Press",
    "Romanian Deadlift",
    "Lunge",
    "Bulgarian Split Squat",
    "Leg Extension",
    "Leg Curl",
    "Calf Raise",
    // Core
    "Plank",
    "Hanging Leg Raise",
    "Cable Crunch",
    "Ab Wheel Rollout",
];

/// Suggest exercise names containing `query` (case-insensitive).
///
/// The user's own names come first, then the built-in list; duplicates that
/// differ only in case are shown once. An empty query matches everything.
pub fn suggest<'a>(query: &str, own: impl IntoIterator<Item = &'a str>, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    let mut seen = HashSet::new();

    own.into_iter()
        .chain(EXERCISES.iter().copied())
        .filter(|name| name.to_lowercase().contains(&needle))
        .filter(|name| seen.insert(name.to_lowercase()))
        .take(limit)
        .map(str::to_string)
        .collect()
}
