use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ComputerStatus, Role};

#[derive(Debug, Clone, Serialize, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Computer {
    pub id: i64,
    pub code: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: ComputerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComputer {
    pub code: String,
    pub description: String,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputerChanges {
    pub code: Option<String>,
    pub description: Option<String>,
    pub status: Option<ComputerStatus>,
}

impl ComputerChanges {
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.description.is_none() && self.status.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComputerFilter {
    pub status: Option<ComputerStatus>,
}

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn insert_user(&self, new_user: NewUser) -> Result<User>;
}

#[async_trait]
pub trait ComputerRepository: Send + Sync + 'static {
    async fn list(&self, filter: ComputerFilter) -> Result<Vec<Computer>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Computer>>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Computer>>;
    async fn insert(&self, new_computer: NewComputer) -> Result<Computer>;
    async fn update(&self, id: i64, changes: ComputerChanges) -> Result<Option<Computer>>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub mod sqlx_impl;
