//! End-to-end tests over the full router with an in-memory store.

use crate::{
    api::{
        handlers::health::HealthResponse,
        models::{history::HistoryResponse, workouts::WorkoutResponse},
    },
    test_utils::{bearer, create_test_app, register_user},
    workouts::normalize::{MISSING_TITLE_OR_DATE, NO_EXERCISES, NO_NONZERO_SETS},
};
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

async fn create_workout(server: &TestServer, token: &str, body: Value) -> WorkoutResponse {
    let response = server.post("/api/workouts").add_header("authorization", bearer(token)).json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

fn squat_day(date: &str, weights: &[f64]) -> Value {
    json!({
        "title": format!("Legs {date}"),
        "date": date,
        "exercises": [{
            "name": "SQUAT",
            "sets": weights.iter().map(|w| json!({"reps": 5, "weight": w})).collect::<Vec<_>>(),
        }]
    })
}

#[test_log::test(tokio::test)]
async fn test_health_needs_no_auth() {
    let server = create_test_app();

    let response = server.get("/api/health").await;
    response.assert_status_ok();
    let body: HealthResponse = response.json();
    assert!(body.ok);
    assert!(body.uptime_secs >= 0.0);
}

#[test_log::test(tokio::test)]
async fn test_protected_routes_require_token() {
    let server = create_test_app();

    for path in ["/api/me", "/api/workouts", "/api/history", "/api/exercises"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert!(body["error"].is_string(), "{path}");
    }

    server
        .get("/api/workouts")
        .add_header("authorization", "Bearer not-a-token")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn test_workout_crud_round_trip() {
    let server = create_test_app();
    let alice = register_user(&server, "alice").await;

    let created = create_workout(
        &server,
        &alice.token,
        json!({
            "title": "  Push day ",
            "date": "2024-03-01",
            "exercises": [{"name": " Bench Press ", "sets": [{"reps": 5, "weight": 80}, {"reps": "5", "weight": "82.5"}]}]
        }),
    )
    .await;
    assert_eq!(created.title, "Push day");
    assert_eq!(created.exercises[0].name, "Bench Press");
    assert_eq!(created.exercises[0].sets[1].weight, 82.5);

    let fetched: WorkoutResponse = server
        .get(&format!("/api/workouts/{}", created.id))
        .add_header("authorization", bearer(&alice.token))
        .await
        .json();
    assert_eq!(fetched, created);

    let response = server
        .put(&format!("/api/workouts/{}", created.id))
        .add_header("authorization", bearer(&alice.token))
        .json(&json!({"title": "Heavy push"}))
        .await;
    response.assert_status_ok();
    let updated: WorkoutResponse = response.json();
    assert_eq!(updated.title, "Heavy push");
    assert_eq!(updated.date, created.date);
    assert_eq!(updated.exercises, created.exercises);

    server
        .delete(&format!("/api/workouts/{}", created.id))
        .add_header("authorization", bearer(&alice.token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/workouts/{}", created.id))
        .add_header("authorization", bearer(&alice.token))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete(&format!("/api/workouts/{}", created.id))
        .add_header("authorization", bearer(&alice.token))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let recreated = create_workout(
        &server,
        &alice.token,
        json!({"title": "Heavy push", "date": "2024-03-01", "exercises": [{"name": "Bench Press", "sets": [{"reps": 5, "weight": 80}]}]}),
    )
    .await;
    assert_ne!(recreated.id, created.id);
}

#[test_log::test(tokio::test)]
async fn test_list_is_newest_date_first_then_newest_created() {
    let server = create_test_app();
    let alice = register_user(&server, "alice").await;

    let older = create_workout(&server, &alice.token, squat_day("2024-01-01", &[100.0])).await;
    let first_same_day = create_workout(&server, &alice.token, squat_day("2024-02-01", &[100.0])).await;
    let second_same_day = create_workout(&server, &alice.token, squat_day("2024-02-01", &[105.0])).await;

    let listed: Vec<WorkoutResponse> = server
        .get("/api/workouts")
        .add_header("authorization", bearer(&alice.token))
        .await
        .json();
    let ids: Vec<_> = listed.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![second_same_day.id, first_same_day.id, older.id]);
}

#[test_log::test(tokio::test)]
async fn test_workouts_are_private_to_their_owner() {
    let server = create_test_app();
    let alice = register_user(&server, "alice").await;
    let bob = register_user(&server, "bob").await;

    let workout = create_workout(&server, &alice.token, squat_day("2024-01-01", &[100.0])).await;
    let path = format!("/api/workouts/{}", workout.id);

    server.get(&path).add_header("authorization", bearer(&bob.token)).await.assert_status(StatusCode::NOT_FOUND);
    server
        .put(&path)
        .add_header("authorization", bearer(&bob.token))
        .json(&json!({"title": "mine now"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server.delete(&path).add_header("authorization", bearer(&bob.token)).await.assert_status(StatusCode::NOT_FOUND);

    let bobs: Vec<WorkoutResponse> = server.get("/api/workouts").add_header("authorization", bearer(&bob.token)).await.json();
    assert!(bobs.is_empty());

    let still_there: WorkoutResponse = server.get(&path).add_header("authorization", bearer(&alice.token)).await.json();
    assert_eq!(still_there.title, workout.title);
}

#[test_log::test(tokio::test)]
async fn test_malformed_workout_id_is_bad_request() {
    let server = create_test_app();
    let alice = register_user(&server, "alice").await;

    let response = server.get("/api/workouts/not-a-uuid").add_header("authorization", bearer(&alice.token)).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid id");
}

#[test_log::test(tokio::test)]
async fn test_create_validation_messages() {
    let server = create_test_app();
    let alice = register_user(&server, "alice").await;

    let cases = [
        (json!({"date": "2024-01-01", "exercises": []}), MISSING_TITLE_OR_DATE),
        (json!({"title": "   ", "date": "2024-01-01"}), MISSING_TITLE_OR_DATE),
        (json!({"title": "Empty", "date": "2024-01-01", "exercises": []}), NO_EXERCISES),
        (
            json!({"title": "Nameless", "date": "2024-01-01", "exercises": [{"name": 42, "sets": [{"reps": 5, "weight": 50}]}]}),
            NO_EXERCISES,
        ),
        (
            json!({"title": "Zeroes", "date": "2024-01-01", "exercises": [{"name": "Plank", "sets": [{"reps": "lots", "weight": -5}]}]}),
            NO_NONZERO_SETS,
        ),
    ];

    for (body, message) in cases {
        let response = server.post("/api/workouts").add_header("authorization", bearer(&alice.token)).json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["error"], message, "body {body}");
    }

    let listed: Vec<WorkoutResponse> = server.get("/api/workouts").add_header("authorization", bearer(&alice.token)).await.json();
    assert!(listed.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_rejected_update_leaves_workout_unchanged() {
    let server = create_test_app();
    let alice = register_user(&server, "alice").await;
    let workout = create_workout(&server, &alice.token, squat_day("2024-01-01", &[100.0])).await;
    let path = format!("/api/workouts/{}", workout.id);

    server
        .put(&path)
        .add_header("authorization", bearer(&alice.token))
        .json(&json!({"title": "Renamed", "exercises": []}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let unchanged: WorkoutResponse = server.get(&path).add_header("authorization", bearer(&alice.token)).await.json();
    assert_eq!(unchanged, workout);
}

#[test_log::test(tokio::test)]
async fn test_history_series_and_personal_best() {
    let server = create_test_app();
    let alice = register_user(&server, "alice").await;

    create_workout(&server, &alice.token, squat_day("2024-01-01", &[100.0, 110.0])).await;
    create_workout(&server, &alice.token, squat_day("2024-01-08", &[120.0, 115.0])).await;
    create_workout(
        &server,
        &alice.token,
        json!({"title": "Bench", "date": "2024-01-03", "exercises": [{"name": "Bench Press", "sets": [{"reps": 5, "weight": 80}]}]}),
    )
    .await;

    let response = server
        .get("/api/history")
        .add_query_param("exercise", "SQUAT")
        .add_header("authorization", bearer(&alice.token))
        .await;
    response.assert_status_ok();
    let history: HistoryResponse = response.json();

    assert_eq!(history.exercises, vec!["Bench Press".to_string(), "SQUAT".to_string()]);
    assert_eq!(history.exercise.as_deref(), Some("SQUAT"));
    let weights: Vec<f64> = history.points.iter().map(|p| p.weight).collect();
    assert_eq!(weights, vec![100.0, 110.0, 120.0, 115.0]);
    assert_eq!(history.personal_best.map(|p| p.weight), Some(120.0));
    assert_eq!(history.recent_sets.first().map(|p| p.weight), Some(115.0));

    // Without a filter the most frequently logged exercise is charted
    let history: HistoryResponse = server.get("/api/history").add_header("authorization", bearer(&alice.token)).await.json();
    assert_eq!(history.exercise.as_deref(), Some("SQUAT"));
}

#[test_log::test(tokio::test)]
async fn test_history_for_new_user_is_empty() {
    let server = create_test_app();
    let alice = register_user(&server, "alice").await;

    let history: HistoryResponse = server.get("/api/history").add_header("authorization", bearer(&alice.token)).await.json();
    assert!(history.exercises.is_empty());
    assert!(history.exercise.is_none());
    assert!(history.points.is_empty());
    assert!(history.personal_best.is_none());
}

#[test_log::test(tokio::test)]
async fn test_exercise_suggestions_prefer_own_names() {
    let server = create_test_app();
    let alice = register_user(&server, "alice").await;
    create_workout(
        &server,
        &alice.token,
        json!({"title": "Odd", "date": "2024-01-01", "exercises": [{"name": "Zercher Squat", "sets": [{"reps": 5, "weight": 60}]}]}),
    )
    .await;

    let suggestions: Vec<String> = server
        .get("/api/exercises")
        .add_query_param("q", "squat")
        .add_header("authorization", bearer(&alice.token))
        .await
        .json();
    assert_eq!(suggestions.first().map(String::as_str), Some("Zercher Squat"));
    assert!(suggestions.iter().any(|s| s == "Back Squat"));

    let limited: Vec<String> = server
        .get("/api/exercises")
        .add_query_param("limit", 2)
        .add_header("authorization", bearer(&alice.token))
        .await
        .json();
    assert_eq!(limited.len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_openapi_document_is_served() {
    let server = create_test_app();

    let response = server.get("/api/openapi.json").await;
    response.assert_status_ok();
    let doc: Value = response.json();
    assert!(doc["paths"]["/workouts/{id}"].is_object());

    server.get("/docs").await.assert_status_ok();
}

#[test_log::test(tokio::test)]
async fn test_malformed_list_entries_are_cleaned_not_rejected() {
    let server = create_test_app();
    let alice = register_user(&server, "alice").await;

    let null_set = create_workout(
        &server,
        &alice.token,
        json!({"title": "Legs", "date": "2024-06-01", "exercises": [{"name": "Squat", "sets": [{"reps": 5, "weight": 100}, null]}]}),
    )
    .await;
    assert_eq!(null_set.exercises[0].sets.len(), 1);

    let null_exercise = create_workout(
        &server,
        &alice.token,
        json!({"title": "Legs", "date": "2024-06-01", "exercises": [null, {"name": "Squat", "sets": [{"reps": 5, "weight": 100}]}]}),
    )
    .await;
    assert_eq!(null_exercise.exercises.len(), 1);
    assert_eq!(null_exercise.exercises[0].name, "Squat");

    let string_sets = create_workout(
        &server,
        &alice.token,
        json!({"title": "Push", "date": "2024-06-01", "exercises": [
            {"name": "Squat", "sets": "abc"},
            {"name": "Bench Press", "sets": [{"reps": 5, "weight": 80}]}
        ]}),
    )
    .await;
    let names: Vec<_> = string_sets.exercises.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Bench Press"]);

    let response = server
        .put(&format!("/api/workouts/{}", string_sets.id))
        .add_header("authorization", bearer(&alice.token))
        .json(&json!({"exercises": [null, {"name": "Dips", "sets": [{"reps": 12, "weight": 0}, 3]}]}))
        .await;
    response.assert_status_ok();
    let updated: WorkoutResponse = response.json();
    assert_eq!(updated.exercises.len(), 1);
    assert_eq!(updated.exercises[0].name, "Dips");
    assert_eq!(updated.exercises[0].sets.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_timestamp_dates_use_the_utc_day() {
    let server = create_test_app();
    let alice = register_user(&server, "alice").await;

    let workout = create_workout(
        &server,
        &alice.token,
        json!({"title": "Late", "date": "2024-06-01T23:30:00-05:00", "exercises": [{"name": "Squat", "sets": [{"reps": 5, "weight": 100}]}]}),
    )
    .await;
    assert_eq!(workout.date.to_string(), "2024-06-02");
}

#[test_log::test(tokio::test)]
async fn test_history_exercise_names_sort_case_insensitively() {
    let server = create_test_app();
    let alice = register_user(&server, "alice").await;
    create_workout(
        &server,
        &alice.token,
        json!({"title": "Mixed", "date": "2024-06-01", "exercises": [
            {"name": "Squat", "sets": [{"reps": 5, "weight": 100}]},
            {"name": "bench press", "sets": [{"reps": 5, "weight": 80}]}
        ]}),
    )
    .await;

    let history: HistoryResponse = server.get("/api/history").add_header("authorization", bearer(&alice.token)).await.json();
    assert_eq!(history.exercises, vec!["bench press".to_string(), "Squat".to_string()]);
}
