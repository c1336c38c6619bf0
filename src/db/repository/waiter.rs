//! Waiter Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Waiter, WaiterCreate, WaiterUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct WaiterRepository {
    base: BaseRepository,
}

impl WaiterRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all waiters
    pub async fn find_all(&self) -> RepoResult<Vec<Waiter>> {
        let waiters: Vec<Waiter> = self
            .base
            .db()
            .query("SELECT * FROM waiter ORDER BY name")
            .await?
            .take(0)?;
        Ok(waiters)
    }

    /// Find waiter by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Waiter>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let waiter: Option<Waiter> = self.base.db().select(thing).await?;
        Ok(waiter)
    }

    /// Create a new waiter
    pub async fn create(&self, data: WaiterCreate) -> RepoResult<Waiter> {
        let waiter = Waiter {
            id: None,
            name: data.name,
            user: data.user,
        };

        let created: Option<Waiter> = self.base.db().create("waiter").content(waiter).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create waiter".to_string()))
    }

    /// Update a waiter
    pub async fn update(&self, id: &str, data: WaiterUpdate) -> RepoResult<Waiter> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Waiter {} not found", id)))?;

        let name = data.name.unwrap_or(existing.name);
        let user = data.user.or(existing.user);

        self.base
            .db()
            .query("UPDATE $thing SET name = $name, user = $user")
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("user", user))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Waiter {} not found", id)))
    }

    /// Hard delete a waiter
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
