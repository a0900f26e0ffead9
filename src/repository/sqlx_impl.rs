use super::{
    Computer, ComputerChanges, ComputerFilter, ComputerRepository, NewComputer, NewUser, User,
    UserRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, email, password, role, created_at";
const COMPUTER_COLUMNS: &str = "id, code, description, status, created_at, updated_at";

pub struct PgUserRepository {
    pub pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let rec = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(rec)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let rec = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(rec)
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User> {
        let rec = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password, role) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(rec)
    }
}

pub struct PgComputerRepository {
    pub pool: PgPool,
}

impl PgComputerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComputerRepository for PgComputerRepository {
    async fn list(&self, filter: ComputerFilter) -> Result<Vec<Computer>> {
        let recs = sqlx::query_as::<_, Computer>(&format!(
            "SELECT {COMPUTER_COLUMNS} FROM computers \
             WHERE ($1::TEXT IS NULL OR status = $1) ORDER BY id"
        ))
        .bind(filter.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;
        Ok(recs)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Computer>> {
        let rec = sqlx::query_as::<_, Computer>(&format!(
            "SELECT {COMPUTER_COLUMNS} FROM computers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(rec)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Computer>> {
        let rec = sqlx::query_as::<_, Computer>(&format!(
            "SELECT {COMPUTER_COLUMNS} FROM computers WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(rec)
    }

    async fn insert(&self, new_computer: NewComputer) -> Result<Computer> {
        let rec = sqlx::query_as::<_, Computer>(&format!(
            "INSERT INTO computers (code, description, status) VALUES ($1, $2, 'available') \
             RETURNING {COMPUTER_COLUMNS}"
        ))
        .bind(&new_computer.code)
        .bind(&new_computer.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(rec)
    }

    async fn update(&self, id: i64, changes: ComputerChanges) -> Result<Option<Computer>> {
        let rec = sqlx::query_as::<_, Computer>(&format!(
            "UPDATE computers SET \
                code = COALESCE($2, code), \
                description = COALESCE($3, description), \
                status = COALESCE($4, status), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {COMPUTER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.code.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?;
        Ok(rec)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM computers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
