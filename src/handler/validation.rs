//! Request payloads as clients send them and the checks that turn them into
//! domain values. Runs before any database access.

use serde::Deserialize;

use crate::domain::{ComputerCode, ComputerStatus, Email, Password};
use crate::handler::errors::ErrorResponse;
use crate::repository::ComputerChanges;
use crate::services::computer_service::CreateComputerRequest;

#[derive(Debug, Default, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ComputerPayload {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ComputerUpdatePayload {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn validate_login(payload: &LoginPayload) -> Result<(Email, Password), ErrorResponse> {
    let (Some(email), Some(password)) = (
        present(payload.email.as_deref()),
        payload.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(ErrorResponse::bad_request(
            "email and password are required",
        ));
    };

    let email = Email::try_from(email).map_err(|e| ErrorResponse::bad_request(e.to_string()))?;
    let password =
        Password::try_from(password).map_err(|e| ErrorResponse::bad_request(e.to_string()))?;

    Ok((email, password))
}

pub fn validate_computer(payload: &ComputerPayload) -> Result<CreateComputerRequest, ErrorResponse> {
    let (Some(code), Some(description)) = (
        present(payload.code.as_deref()),
        present(payload.description.as_deref()),
    ) else {
        return Err(ErrorResponse::bad_request(
            "code and description are required",
        ));
    };

    let code = ComputerCode::try_from(code).map_err(|e| ErrorResponse::bad_request(e.to_string()))?;

    Ok(CreateComputerRequest {
        code,
        description: description.trim().to_string(),
    })
}

pub fn validate_computer_update(
    payload: &ComputerUpdatePayload,
) -> Result<ComputerChanges, ErrorResponse> {
    let code = payload
        .code
        .as_deref()
        .map(ComputerCode::try_from)
        .transpose()
        .map_err(|e| ErrorResponse::bad_request(e.to_string()))?;

    let description = match payload.description.as_deref().map(str::trim) {
        Some("") => return Err(ErrorResponse::bad_request("description must not be empty")),
        other => other.map(str::to_string),
    };

    let status = payload
        .status
        .as_deref()
        .map(str::parse::<ComputerStatus>)
        .transpose()
        .map_err(|e| ErrorResponse::bad_request(e.to_string()))?;

    let changes = ComputerChanges {
        code: code.map(|c| c.to_string()),
        description,
        status,
    };

    if changes.is_empty() {
        return Err(ErrorResponse::bad_request("no fields to update"));
    }

    Ok(changes)
}
