//! Per-exercise history derived from a user's workouts.
//!
//! Everything here is a pure function over already-loaded workouts; nothing
//! is stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use utoipa::ToSchema;

use crate::db::models::workouts::WorkoutDBResponse;

/// Sets shown in the "recent sets" list.
pub const RECENT_SETS: usize = 12;

/// One performed set of an exercise, tagged with the workout's date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryPoint {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub reps: f64,
    pub weight: f64,
}

/// Every distinct exercise name, sorted case-insensitively.
pub fn exercise_names(workouts: &[WorkoutDBResponse]) -> Vec<String> {
    let names: BTreeSet<&str> = workouts.iter().flat_map(|w| &w.exercises).map(|e| e.name.as_str()).collect();
    let mut names: Vec<String> = names.into_iter().map(str::to_string).collect();
    names.sort_by_cached_key(|name| name.to_lowercase());
    names
}

/// All sets of `name`, oldest date first.
///
/// Only the first exercise with that name in each workout contributes. The sort
/// is stable, so sets from the same date keep their input order.
pub fn series(workouts: &[WorkoutDBResponse], name: &str) -> Vec<HistoryPoint> {
    let mut points: Vec<HistoryPoint> = workouts
        .iter()
        .filter_map(|w| w.exercises.iter().find(|e| e.name == name).map(|e| (w.date, e)))
        .flat_map(|(date, exercise)| {
            exercise.sets.iter().map(move |set| HistoryPoint {
                date,
                reps: set.reps,
                weight: set.weight,
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// The heaviest set; the earliest one wins a tie.
pub fn personal_best(series: &[HistoryPoint]) -> Option<HistoryPoint> {
    series
        .iter()
        .copied()
        .reduce(|best, p| if p.weight > best.weight { p } else { best })
}

/// The exercise logged most often, counting each exercise entry once
/// regardless of its set count. Ties go to the name encountered first.
pub fn default_exercise(workouts: &[WorkoutDBResponse]) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (order, exercise) in workouts.iter().flat_map(|w| &w.exercises).enumerate() {
        counts.entry(exercise.name.as_str()).or_insert((0, order)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| count_a.cmp(count_b).then(first_b.cmp(first_a)))
        .map(|(name, _)| name.to_string())
}

/// The last `n` points of a series, newest first.
pub fn recent_sets(series: &[HistoryPoint], n: usize) -> Vec<HistoryPoint> {
    series.iter().rev().take(n).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::workouts::{Exercise, SetEntry};
    use chrono::Utc;
    use uuid::Uuid;

    fn workout(date: &str, exercises: &[(&str, &[(f64, f64)])]) -> WorkoutDBResponse {
        WorkoutDBResponse {
            id: Uuid::now_v7(),
            owner_id: Uuid::nil(),
            title: "Session".to_string(),
            date: date.parse().unwrap(),
            exercises: exercises
                .iter()
                .map(|(name, sets)| Exercise {
                    name: name.to_string(),
                    sets: sets.iter().map(|&(reps, weight)| SetEntry { reps, weight }).collect(),
                })
                .collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn point(date: &str, reps: f64, weight: f64) -> HistoryPoint {
        HistoryPoint {
            date: date.parse().unwrap(),
            reps,
            weight,
        }
    }

    #[test]
    fn test_series_and_personal_best() {
        // Listed newest first, as the store returns them
        let workouts = vec![
            workout("2024-01-10", &[("Squat", &[(5.0, 120.0)])]),
            workout("2024-01-01", &[("Squat", &[(5.0, 100.0)])]),
        ];

        let points = series(&workouts, "Squat");
        assert_eq!(points, vec![point("2024-01-01", 5.0, 100.0), point("2024-01-10", 5.0, 120.0)]);
        assert_eq!(personal_best(&points), Some(point("2024-01-10", 5.0, 120.0)));
    }

    #[test]
    fn test_series_uses_first_matching_exercise_per_workout() {
        let workouts = vec![workout(
            "2024-01-01",
            &[("Squat", &[(5.0, 100.0), (3.0, 110.0)]), ("Squat", &[(1.0, 140.0)])],
        )];

        let points = series(&workouts, "Squat");
        assert_eq!(points, vec![point("2024-01-01", 5.0, 100.0), point("2024-01-01", 3.0, 110.0)]);
    }

    #[test]
    fn test_series_is_case_sensitive_and_empty_for_unknown() {
        let workouts = vec![workout("2024-01-01", &[("Squat", &[(5.0, 100.0)])])];
        assert!(series(&workouts, "squat").is_empty());
        assert!(series(&[], "Squat").is_empty());
    }

    #[test]
    fn test_personal_best_tie_keeps_first() {
        let points = vec![point("2024-01-01", 5.0, 100.0), point("2024-02-01", 8.0, 100.0)];
        assert_eq!(personal_best(&points), Some(point("2024-01-01", 5.0, 100.0)));
        assert_eq!(personal_best(&[]), None);
    }

    #[test]
    fn test_exercise_names_sorted_and_distinct() {
        let workouts = vec![
            workout("2024-01-02", &[("Squat", &[(5.0, 100.0)]), ("Bench Press", &[(5.0, 60.0)])]),
            workout("2024-01-01", &[("Squat", &[(5.0, 90.0)]), ("Deadlift", &[(5.0, 140.0)])]),
        ];
        assert_eq!(exercise_names(&workouts), vec!["Bench Press", "Deadlift", "Squat"]);
    }

    #[test]
    fn test_exercise_names_ignore_case_when_sorting() {
        let workouts = vec![workout(
            "2024-01-01",
            &[("Squat", &[(5.0, 100.0)]), ("bench press", &[(5.0, 60.0)]), ("Zercher", &[(5.0, 60.0)]), ("arnold press", &[(10.0, 20.0)])],
        )];
        assert_eq!(exercise_names(&workouts), vec!["arnold press", "bench press", "Squat", "Zercher"]);
    }

    #[test]
    fn test_default_exercise_counts_entries_not_sets() {
        let workouts = vec![
            workout("2024-01-03", &[("Bench Press", &[(5.0, 60.0), (5.0, 60.0), (5.0, 60.0), (5.0, 60.0)])]),
            workout("2024-01-02", &[("Squat", &[(5.0, 100.0)])]),
            workout("2024-01-01", &[("Squat", &[(5.0, 90.0)])]),
        ];
        assert_eq!(default_exercise(&workouts).as_deref(), Some("Squat"));
    }

    #[test]
    fn test_default_exercise_tie_goes_to_first_seen() {
        let workouts = vec![
            workout("2024-01-02", &[("Deadlift", &[(5.0, 140.0)])]),
            workout("2024-01-01", &[("Bench Press", &[(5.0, 60.0)])]),
        ];
        assert_eq!(default_exercise(&workouts).as_deref(), Some("Deadlift"));
        assert_eq!(default_exercise(&[]), None);
    }

    #[test]
    fn test_recent_sets_newest_first() {
        let points: Vec<_> = (1..=15).map(|d| point(&format!("2024-01-{d:02}"), 5.0, d as f64)).collect();

        let recent = recent_sets(&points, RECENT_SETS);
        assert_eq!(recent.len(), 12);
        assert_eq!(recent[0].weight, 15.0);
        assert_eq!(recent[11].weight, 4.0);

        assert_eq!(recent_sets(&points[..2], RECENT_SETS).len(), 2);
    }
}
