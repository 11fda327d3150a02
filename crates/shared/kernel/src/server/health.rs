use super::response::ApiResponse;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde::Serialize;
use stagehand_database::Database;
use stagehand_domain::constants::SYSTEM_TAG;
use std::sync::LazyLock;
use std::time::Instant;
use utoipa::ToSchema;

/// Health check payload.
#[derive(Debug, Serialize, ToSchema)]
pub(super) struct HealthStatus {
    /// `up` when the database answers, `degraded` otherwise
    status: &'static str,
    version: &'static str,
    /// Uptime in seconds
    uptime: u64,
    database: bool,
}

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = OK, description = "Service and database are up", body = ApiResponse<HealthStatus>),
        (status = SERVICE_UNAVAILABLE, description = "Database unreachable", body = ApiResponse<HealthStatus>),
    ),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(database): State<Database>) -> impl IntoResponse {
    let (status, body) = report(database.is_healthy().await);

    (
        status,
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        body,
    )
}

fn report(healthy: bool) -> (StatusCode, ApiResponse<HealthStatus>) {
    let payload = HealthStatus {
        status: if healthy { "up" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime: START_TIME.elapsed().as_secs(),
        database: healthy,
    };

    if healthy {
        (StatusCode::OK, ApiResponse::ok(payload))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, ApiResponse::failed(payload, "Database unavailable"))
    }
}
