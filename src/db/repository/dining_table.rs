//! Dining Table Repository
//!
//! Occupancy writes happen here; the release-on-serve path is a single
//! transactional statement owned by the order repository.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DiningTable, DiningTableCreate, TableStatus};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all tables
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table ORDER BY number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let table: Option<DiningTable> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Find table by number
    pub async fn find_by_number(&self, number: i64) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE number = $number LIMIT 1")
            .bind(("number", number))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new dining table
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        // Check duplicate number
        if self.find_by_number(data.number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table {} already exists",
                data.number
            )));
        }

        let table = DiningTable {
            id: None,
            number: data.number,
            status: TableStatus::Available,
            waiter: None,
        };

        let created: Option<DiningTable> = self
            .base
            .db()
            .create("dining_table")
            .content(table)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Mark a table occupied by a waiter.
    ///
    /// Last writer wins: an already-occupied table is silently reassigned
    /// to the new waiter.
    pub async fn occupy(&self, number: i64, waiter: RecordId) -> RepoResult<DiningTable> {
        self.base
            .db()
            .query("UPDATE dining_table SET status = 'occupied', waiter = $waiter WHERE number = $number")
            .bind(("waiter", waiter))
            .bind(("number", number))
            .await?
            .check()?;

        self.find_by_number(number)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", number)))
    }

    /// Hard delete a dining table
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
