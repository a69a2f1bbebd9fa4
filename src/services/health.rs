use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::database::Store;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub store: StoreHealth,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreHealth {
    pub status: String,
    pub response_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let state = AppState {
            store,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        Self { router }
    }
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let start = std::time::Instant::now();
    let ping = state.store.ping().await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    let (status_code, status, error) = match ping {
        Ok(()) => (StatusCode::OK, "healthy", None),
        Err(e) => {
            tracing::warn!("Health check store ping failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", Some(e.to_string()))
        }
    };

    let health_response = HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: StoreHealth {
            status: status.to_string(),
            response_time_ms,
            error,
        },
        uptime_seconds: uptime,
    };

    (status_code, Json(health_response))
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    match state.store.ping().await {
        Ok(_) => Ok(Json("ready")),
        Err(_) => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}
