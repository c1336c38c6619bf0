//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB collections.
//!
//! # ID Convention
//!
//! 全栈统一使用 "table:id" 格式，通过 `surrealdb::RecordId` 处理所有 ID：
//!   - 解析: `let id: RecordId = "menu_item:abc".parse()?;`
//!   - 创建: `RecordId::from_table_key("menu_item", "abc")`
//!   - CRUD: `db.select(id)` / `db.delete(id)` 直接使用 RecordId

pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod user;
pub mod waiter;

pub use dining_table::DiningTableRepository;
pub use menu_item::MenuItemRepository;
pub use order::{OrderFilter, OrderRepository};
pub use user::UserRepository;
pub use waiter::WaiterRepository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Document count of a collection (seed guard)
    pub async fn count(&self, table: &str) -> RepoResult<i64> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            count: i64,
        }

        // Table names are internal constants, never user input
        let rows: Vec<CountRow> = self
            .db
            .query(format!("SELECT count() AS count FROM {table} GROUP ALL"))
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }
}
