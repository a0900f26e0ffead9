use axum::{
    extract::{
        Extension, Json, Path, Query,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::ComputerStatus;
use crate::handler::errors::ErrorResponse;
use crate::handler::validation::{
    ComputerPayload, ComputerUpdatePayload, validate_computer, validate_computer_update,
};
use crate::repository::{Computer, ComputerFilter, ComputerRepository};
use crate::services::computer_service::ComputerService;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

fn computer_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ErrorResponse> {
    path.map(|Path(id)| id)
        .map_err(|_| ErrorResponse::bad_request("computer id must be an integer"))
}

/// GET /api/computers
pub async fn list_computers<C: ComputerRepository>(
    Extension(service): Extension<Arc<ComputerService<C>>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Computer>>, ErrorResponse> {
    let Query(query) = query.map_err(|e| ErrorResponse::bad_request(e.body_text()))?;

    let status = query
        .status
        .as_deref()
        .map(str::parse::<ComputerStatus>)
        .transpose()
        .map_err(|e| ErrorResponse::bad_request(e.to_string()))?;

    let computers = service.list_computers(ComputerFilter { status }).await?;
    Ok(Json(computers))
}

/// GET /api/computers/{id}
pub async fn get_computer<C: ComputerRepository>(
    Extension(service): Extension<Arc<ComputerService<C>>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Computer>, ErrorResponse> {
    let id = computer_id(path)?;
    Ok(Json(service.get_computer(id).await?))
}

/// POST /api/computers
pub async fn create_computer<C: ComputerRepository>(
    Extension(service): Extension<Arc<ComputerService<C>>>,
    payload: Result<Json<ComputerPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Computer>), ErrorResponse> {
    let Json(payload) = payload?;
    let req = validate_computer(&payload)?;

    let computer = service.create_computer(req).await?;
    Ok((StatusCode::CREATED, Json(computer)))
}

/// PUT /api/computers/{id}
pub async fn update_computer<C: ComputerRepository>(
    Extension(service): Extension<Arc<ComputerService<C>>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ComputerUpdatePayload>, JsonRejection>,
) -> Result<Json<Computer>, ErrorResponse> {
    let id = computer_id(path)?;
    let Json(payload) = payload?;
    let changes = validate_computer_update(&payload)?;

    Ok(Json(service.update_computer(id, changes).await?))
}

/// DELETE /api/computers/{id}
pub async fn delete_computer<C: ComputerRepository>(
    Extension(service): Extension<Arc<ComputerService<C>>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ErrorResponse> {
    let id = computer_id(path)?;
    service.delete_computer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
