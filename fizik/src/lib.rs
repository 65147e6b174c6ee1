//! # fizik: a personal strength-training log
//!
//! `fizik` is the backend for a workout logging app. Users register with a username and
//! password, log workouts made of exercises and sets, and look back at how the weight they
//! lift for a given exercise has moved over time.
//!
//! ## Architecture
//!
//! The HTTP layer is [Axum](https://github.com/tokio-rs/axum). Persistence sits behind the
//! [`db::Store`] trait with two implementations: an in-process [`db::MemoryStore`] for
//! development and tests, and [`db::PgStore`] on PostgreSQL for anything that should survive a
//! restart. Which one is used is decided by the `database` section of the configuration.
//!
//! ### Request Flow
//!
//! Every request under `/api` except `health`, `auth/register` and `auth/login` must carry an
//! `Authorization: Bearer <token>` header. The [`api::models::users::CurrentUser`] extractor
//! verifies the token and yields the caller's id, which the handlers pass down to
//! [`workouts::WorkoutService`] so that every read and write is scoped to the caller's own
//! workouts. Workout payloads are normalized on the way in ([`workouts::normalize`]) and history
//! is computed on the way out ([`history`]) from the caller's workout list.
//!
//! ## Configuration
//!
//! Configuration is loaded from a YAML file (default `config.yaml`) and `FIZIK_`-prefixed
//! environment variables. See [`config`] for the full set of options.
//!
//! ```bash
//! FIZIK_SECRET_KEY=change-me fizik -f config.yaml
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod exercise_library;
pub mod history;
mod openapi;
pub mod telemetry;
mod types;
pub mod workouts;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod test;

use crate::{
    config::{CorsOrigin, DatabaseConfig},
    db::{MemoryStore, PgStore, Store},
    openapi::ApiDoc,
};
use axum::{
    Json, Router,
    http::{self, HeaderValue, Method},
    routing::{get, post},
};
use bon::Builder;
pub use config::Config;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{sync::Arc, time::Duration, time::Instant};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{UserId, WorkoutId};

/// Application state shared across all request handlers.
///
/// ```ignore
/// let state = AppState::builder()
///     .store(Arc::new(MemoryStore::new()))
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Config,
    #[builder(default = Instant::now())]
    pub started_at: Instant,
}

/// Get the fizik database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

fn optional_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Build the configured store. For PostgreSQL this connects, runs migrations, and also
/// returns the pool so it can be closed on shutdown.
async fn setup_store(config: &Config) -> anyhow::Result<(Arc<dyn Store>, Option<PgPool>)> {
    match &config.database {
        DatabaseConfig::Memory => {
            info!("Using in-memory store; data will be lost on shutdown");
            Ok((Arc::new(MemoryStore::new()), None))
        }
        DatabaseConfig::External { url, pool } => {
            info!("Using external database");
            let pg = PgPoolOptions::new()
                .max_connections(pool.max_connections)
                .min_connections(pool.min_connections)
                .acquire_timeout(Duration::from_secs(pool.acquire_timeout_secs))
                .idle_timeout(optional_secs(pool.idle_timeout_secs))
                .max_lifetime(optional_secs(pool.max_lifetime_secs))
                .connect(url)
                .await?;
            migrator().run(&pg).await?;
            Ok((Arc::new(PgStore::new(pg.clone())), Some(pg)))
        }
    }
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.auth.security.cors;

    let allow_origin = if cors_config.allowed_origins.iter().any(|origin| matches!(origin, CorsOrigin::Wildcard)) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([http::header::AUTHORIZATION, http::header::CONTENT_TYPE])
        .allow_credentials(cors_config.allow_credentials);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router: the `/api` routes, API docs, CORS and tracing.
///
/// # Errors
///
/// Returns an error if the CORS configuration cannot be turned into header values.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        .route("/health", get(api::handlers::health::health))
        // Authentication
        .route("/auth/register", post(api::handlers::auth::register))
        .route("/auth/login", post(api::handlers::auth::login))
        .route("/auth/password-change", post(api::handlers::auth::change_password))
        .route("/me", get(api::handlers::auth::me))
        // Workouts
        .route(
            "/workouts",
            get(api::handlers::workouts::list_workouts).post(api::handlers::workouts::create_workout),
        )
        .route(
            "/workouts/{id}",
            get(api::handlers::workouts::get_workout)
                .put(api::handlers::workouts::update_workout)
                .delete(api::handlers::workouts::delete_workout),
        )
        // History and suggestions
        .route("/history", get(api::handlers::history::get_history))
        .route("/exercises", get(api::handlers::exercises::suggest_exercises))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state.clone());

    let router = Router::new()
        .nest("/api", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let router = router.layer(create_cors_layer(&state.config)?);

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The assembled server.
///
/// 1. **Create**: [`Application::new`] builds the store (running migrations for PostgreSQL)
///    and the router
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: When the shutdown future resolves, in-flight requests finish and the
///    database pool is closed
pub struct Application {
    router: Router,
    config: Config,
    pool: Option<PgPool>,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting fizik with configuration: {:#?}", config);

        let (store, pool) = setup_store(&config).await?;
        let app_state = AppState::builder().store(store).config(config.clone()).build();
        let router = build_router(app_state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "fizik listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        if let Some(pool) = self.pool {
            info!("Closing database connections...");
            pool.close().await;
        }

        Ok(())
    }
}
