use crate::domain::ComputerCode;
use crate::repository::{
    Computer, ComputerChanges, ComputerFilter, ComputerRepository, NewComputer,
};
use crate::services::ServiceError;
use crate::services::error::is_unique_violation;
use anyhow::Result;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CreateComputerRequest {
    pub code: ComputerCode,
    pub description: String,
}

#[derive(Clone)]
pub struct ComputerService<C: ComputerRepository> {
    pub computer_repo: Arc<C>,
}

impl<C: ComputerRepository> ComputerService<C> {
    pub fn new(computer_repo: Arc<C>) -> Self {
        Self { computer_repo }
    }

    pub async fn list_computers(&self, filter: ComputerFilter) -> Result<Vec<Computer>> {
        self.computer_repo.list(filter).await
    }

    pub async fn get_computer(&self, id: i64) -> Result<Computer> {
        self.computer_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("computer not found").into())
    }

    pub async fn create_computer(&self, req: CreateComputerRequest) -> Result<Computer> {
        if self
            .computer_repo
            .find_by_code(req.code.as_ref())
            .await?
            .is_some()
        {
            return Err(duplicate_code());
        }

        let computer = self
            .computer_repo
            .insert(NewComputer {
                code: req.code.to_string(),
                description: req.description,
            })
            .await
            .map_err(map_unique_violation)?;

        tracing::info!(computer_id = computer.id, code = %computer.code, "computer added");

        Ok(computer)
    }

    pub async fn update_computer(&self, id: i64, changes: ComputerChanges) -> Result<Computer> {
        if changes.is_empty() {
            return Err(ServiceError::validation("no fields to update").into());
        }

        self.computer_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("computer not found"))?;

        if let Some(code) = changes.code.as_deref() {
            if let Some(existing) = self.computer_repo.find_by_code(code).await? {
                if existing.id != id {
                    return Err(duplicate_code());
                }
            }
        }

        let computer = self
            .computer_repo
            .update(id, changes)
            .await
            .map_err(map_unique_violation)?
            .ok_or_else(|| anyhow::Error::from(ServiceError::not_found("computer not found")))?;

        tracing::info!(computer_id = computer.id, status = %computer.status, "computer updated");

        Ok(computer)
    }

    pub async fn delete_computer(&self, id: i64) -> Result<()> {
        if !self.computer_repo.delete(id).await? {
            return Err(ServiceError::not_found("computer not found").into());
        }

        tracing::info!(computer_id = id, "computer removed");

        Ok(())
    }
}

fn duplicate_code() -> anyhow::Error {
    ServiceError::conflict("computer code already exists").into()
}

fn map_unique_violation(err: anyhow::Error) -> anyhow::Error {
    if is_unique_violation(&err) {
        duplicate_code()
    } else {
        err
    }
}
