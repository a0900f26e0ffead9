use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Extension},
    handler::Handler,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use chrono::Duration;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::api;
use crate::config::{AppConfig, DatabaseConfig};
use crate::domain::Role;
use crate::handler::auth::{require_auth, require_roles};
use crate::handler::errors::handle_404;
use crate::handler::logging::request_logging_middleware;
use crate::handler::rate_limit::{RateLimiter, rate_limit_middleware};
use crate::handler::security::{build_cors_layer, with_security_headers};
use crate::repository::sqlx_impl::{PgComputerRepository, PgUserRepository};
use crate::repository::{ComputerRepository, UserRepository};
use crate::services::auth_service::AuthService;
use crate::services::computer_service::ComputerService;
use crate::services::jwt_service::JwtService;

/// Everything the handlers reach through request extensions.
pub struct AppServices<U: UserRepository, C: ComputerRepository> {
    pub jwt: Arc<JwtService>,
    pub auth: Arc<AuthService<U>>,
    pub computers: Arc<ComputerService<C>>,
}

impl<U: UserRepository, C: ComputerRepository> AppServices<U, C> {
    pub fn new(user_repo: Arc<U>, computer_repo: Arc<C>, jwt: Arc<JwtService>) -> Self {
        Self {
            auth: Arc::new(AuthService::new(user_repo, jwt.clone())),
            computers: Arc::new(ComputerService::new(computer_repo)),
            jwt,
        }
    }
}

pub type PgAppServices = AppServices<PgUserRepository, PgComputerRepository>;

pub fn jwt_service_from_config(config: &AppConfig) -> Arc<JwtService> {
    Arc::new(JwtService::with_ttl(
        &config.jwt_secret,
        Duration::hours(config.jwt_expiration_hours),
    ))
}

impl PgAppServices {
    pub fn from_pool(pool: &PgPool, config: &AppConfig) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgComputerRepository::new(pool.clone())),
            jwt_service_from_config(config),
        )
    }
}

pub async fn connect_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .idle_timeout(config.idle_timeout)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub fn build_router<U: UserRepository, C: ComputerRepository>(
    services: AppServices<U, C>,
    pool: PgPool,
    config: &AppConfig,
) -> anyhow::Result<Router> {
    let public_router = Router::new()
        .route("/", get(api::health::service_info))
        .route("/health", get(api::health::health_check))
        .route("/health/ready", get(api::health::readiness_check))
        .route("/health/live", get(api::health::liveness_check))
        .route("/api/auth/login", post(api::auth::login_api::<U>))
        .route("/api/auth/verify", get(api::auth::verify_api::<U>));

    let protected_router = Router::new()
        .route("/api/auth/me", get(api::auth::me_api::<U>))
        .route(
            "/api/computers",
            get(api::computers::list_computers::<C>).post(
                api::computers::create_computer::<C>
                    .layer(from_fn(require_roles(vec![Role::Admin, Role::Teacher]))),
            ),
        )
        .route(
            "/api/computers/{id}",
            get(api::computers::get_computer::<C>)
                .put(
                    api::computers::update_computer::<C>
                        .layer(from_fn(require_roles(vec![Role::Admin, Role::Teacher]))),
                )
                .delete(
                    api::computers::delete_computer::<C>
                        .layer(from_fn(require_roles(vec![Role::Admin]))),
                ),
        )
        .route_layer(from_fn(require_auth));

    let limiter = RateLimiter::new(config.rate_limit_max_requests, config.rate_limit_window);

    let app = Router::new()
        .merge(public_router)
        .merge(protected_router)
        .fallback(handle_404)
        // Extensions
        .layer(Extension(services.auth))
        .layer(Extension(services.computers))
        .layer(Extension(services.jwt))
        .layer(Extension(pool))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(from_fn_with_state(limiter, rate_limit_middleware))
        .layer(from_fn(request_logging_middleware))
        .layer(build_cors_layer(&config.frontend_url)?);

    Ok(with_security_headers(app))
}
