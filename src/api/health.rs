use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::OnceLock;
use std::time::Instant;

use crate::domain::Role;
use crate::services::auth_service::{hash_password, verify_password};
use crate::services::jwt_service::JwtService;

#[derive(Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: f64,
    pub version: String,
    pub database: String,
    pub services: ServicesHealth,
}

#[derive(Debug, Serialize)]
pub struct ServicesHealth {
    pub jwt_service: String,
    pub password_hashing: String,
}

static START_TIME: OnceLock<Instant> = OnceLock::new();

pub fn init_health_check() {
    START_TIME.get_or_init(Instant::now);
}

fn uptime_seconds() -> f64 {
    START_TIME.get_or_init(Instant::now).elapsed().as_secs_f64()
}

fn status_label(ok: bool) -> String {
    if ok { "healthy" } else { "unhealthy" }.to_string()
}

// GET /
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "school system API running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// GET /health - process is up; dependency state is reported, not enforced
pub async fn health_check(Extension(pool): Extension<PgPool>) -> Json<HealthResponse> {
    let database_ok = ping_database(&pool).await;

    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        uptime: uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: status_label(database_ok),
        services: check_services_health(),
    })
}

// GET /health/ready - Readiness probe
pub async fn readiness_check(Extension(pool): Extension<PgPool>) -> impl IntoResponse {
    if ping_database(&pool).await {
        (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ready",
                "timestamp": Utc::now().to_rfc3339()
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "not_ready",
                "timestamp": Utc::now().to_rfc3339(),
                "error": "database_connection_failed"
            })),
        )
    }
}

// GET /health/live - Liveness probe
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "alive",
            "timestamp": Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

async fn ping_database(pool: &PgPool) -> bool {
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "database health check failed");
            false
        }
    }
}

fn check_services_health() -> ServicesHealth {
    ServicesHealth {
        jwt_service: status_label(jwt_round_trip().is_ok()),
        password_hashing: status_label(password_round_trip().is_ok()),
    }
}

fn jwt_round_trip() -> anyhow::Result<()> {
    let jwt_service = JwtService::new("health_check_secret");
    let token = jwt_service.generate_token(1, "health@check.local", Role::Student)?;
    jwt_service.verify_token(&token)?;
    Ok(())
}

fn password_round_trip() -> anyhow::Result<()> {
    let hash = hash_password("health_check_password")?;
    anyhow::ensure!(
        verify_password("health_check_password", &hash)?,
        "password verification failed"
    );
    Ok(())
}
