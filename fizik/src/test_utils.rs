//! Shared fixtures for unit and end-to-end tests.

use crate::{
    AppState,
    api::models::auth::AuthResponse,
    config::{Config, DatabaseConfig, PasswordConfig},
    db::MemoryStore,
};
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;

pub fn create_test_config() -> Config {
    let mut config = Config {
        database_url: None,
        database: DatabaseConfig::Memory,
        secret_key: Some("test-secret-key-for-session-tokens".to_string()),
        ..Default::default()
    };
    // Cheap hashing keeps the suite fast; the algorithm is unchanged.
    config.auth.native.password = PasswordConfig {
        min_length: 1,
        max_length: 128,
        argon2_memory_kib: 1024,
        argon2_iterations: 1,
        argon2_parallelism: 1,
    };
    config
}

pub fn create_test_state() -> AppState {
    AppState::builder()
        .store(Arc::new(MemoryStore::new()))
        .config(create_test_config())
        .build()
}

/// A server over the full router, backed by a fresh in-memory store.
pub fn create_test_app() -> TestServer {
    let router = crate::build_router(create_test_state()).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Register `username` with a fixed password and return the session.
pub async fn register_user(server: &TestServer, username: &str) -> AuthResponse {
    let response = server
        .post("/api/auth/register")
        .json(&json!({"username": username, "password": "hunter2"}))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}
