use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{extract::FromRef, routing::get, Router};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::debug;

use crate::api::handlers::{self, SharedReadingService};
use crate::openapi::configure_swagger_routes;

/// Base path of the reading resource
pub const READINGS_PATH: &str = "/api/bpcalc";

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub readings: SharedReadingService,
    pub started_at: Instant,
    pub environment: Arc<str>,
}

impl AppState {
    pub fn new(readings: SharedReadingService, environment: impl Into<Arc<str>>) -> Self {
        Self {
            readings,
            started_at: Instant::now(),
            environment: environment.into(),
        }
    }
}

impl FromRef<AppState> for SharedReadingService {
    fn from_ref(state: &AppState) -> Self {
        state.readings.clone()
    }
}

/// Create the application router
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    debug!("Creating application router");

    let collection = get(handlers::list_readings).post(handlers::create_reading);
    let member = get(handlers::get_reading).delete(handlers::delete_reading);

    // Served with and without the trailing slash
    let reading_routes = Router::new()
        .route(READINGS_PATH, collection.clone())
        .route(&format!("{}/", READINGS_PATH), collection)
        .route(&format!("{}/:id", READINGS_PATH), member.clone())
        .route(&format!("{}/:id/", READINGS_PATH), member);

    debug!("Reading routes configured");

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(reading_routes)
        .merge(configure_swagger_routes())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
