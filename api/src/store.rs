use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::models::user::User;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(inner: sqlx::Error) -> Self {
        match inner {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<User, StoreError>;
    /// Fails with `Database` when the email is already taken.
    async fn create(&self, email: &str, password: &str) -> Result<User, StoreError>;
}

const USER_COLUMNS: &str = "id, email, password, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteUserStore {
    db: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let db = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self::new(db))
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.db).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<User, StoreError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
                .bind(id)
                .fetch_one(&self.db)
                .await?;
        Ok(user)
    }

    async fn create(&self, email: &str, password: &str) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password) VALUES (?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(password)
        .fetch_one(&self.db)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(e) => {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        tracing::warn!(%email, "email already registered");
                    }
                }
                Err(StoreError::Database(e))
            }
        }
    }
}
