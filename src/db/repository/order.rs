//! Order Repository
//!
//! Status writes are driven by the lifecycle engine in [`crate::orders`];
//! this layer owns the SurrealQL, including the transactional serve-and-release
//! statement.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderStatus};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// List filters — every field optional, combined with AND
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub waiter: Option<RecordId>,
    pub table_number: Option<i64>,
    /// Unix millis, inclusive
    pub from: Option<i64>,
    /// Unix millis, exclusive
    pub to: Option<i64>,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a fully-built order (items already price-snapshotted)
    pub async fn insert(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create("order").content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// List orders matching a filter, newest first
    pub async fn find_all(&self, filter: OrderFilter) -> RepoResult<Vec<Order>> {
        let mut clauses: Vec<&str> = Vec::new();
        if filter.status.is_some() {
            clauses.push("status = $status");
        }
        if filter.waiter.is_some() {
            clauses.push("waiter = $waiter");
        }
        if filter.table_number.is_some() {
            clauses.push("table_number = $table_number");
        }
        if filter.from.is_some() {
            clauses.push("created_at >= $from");
        }
        if filter.to.is_some() {
            clauses.push("created_at < $to");
        }

        let mut sql = String::from("SELECT * FROM order");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let orders: Vec<Order> = self
            .base
            .db()
            .query(sql)
            .bind(("status", filter.status.map(|s| s.as_str())))
            // Orders store the waiter link in its string form
            .bind(("waiter", filter.waiter.map(|w| w.to_string())))
            .bind(("table_number", filter.table_number))
            .bind(("from", filter.from))
            .bind(("to", filter.to))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Kitchen work queue: pending and approved orders, oldest first
    pub async fn find_kitchen_queue(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE status IN ['pending', 'approved'] ORDER BY created_at",
            )
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Active (non-served, non-cancelled) orders for a waiter, newest first
    pub async fn find_active_by_waiter(&self, waiter: RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE waiter = $waiter AND status NOT IN ['served', 'cancelled'] ORDER BY created_at DESC",
            )
            .bind(("waiter", waiter.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Set a non-terminal status (pending/approved/ready transitions)
    pub async fn set_status(&self, id: &RecordId, status: OrderStatus) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("status", status.as_str()))
            .await?;
        result
            .take::<Option<Order>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Mark an order served and, when it was the last active order for its
    /// (table, waiter) pair, release the table — one transaction, so two
    /// concurrent serves cannot interleave between the count and the update.
    ///
    /// Returns the updated order and whether the table was released.
    pub async fn serve_and_release(
        &self,
        id: &RecordId,
        table_number: i64,
        waiter: &RecordId,
    ) -> RepoResult<(Order, bool)> {
        self.base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                UPDATE $thing SET status = 'served';
                LET $remaining = array::len(
                    SELECT VALUE id FROM order
                    WHERE table_number = $table_number
                    AND waiter = $waiter
                    AND status NOT IN ['served', 'cancelled']
                );
                IF $remaining = 0 THEN
                    UPDATE dining_table SET status = 'available', waiter = NONE
                    WHERE number = $table_number
                END;
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("thing", id.clone()))
            .bind(("table_number", table_number))
            .bind(("waiter", waiter.to_string()))
            .await?
            // Nothing is taken from the response, so surface statement errors here
            .check()?;

        let order = self
            .find_by_id(&id.to_string())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        // Informational only; the release itself happened inside the transaction
        let mut table_result = self
            .base
            .db()
            .query("SELECT VALUE status FROM dining_table WHERE number = $table_number LIMIT 1")
            .bind(("table_number", table_number))
            .await?;
        let statuses: Vec<String> = table_result.take(0)?;
        let released = statuses.first().map(|s| s == "available").unwrap_or(false);

        Ok((order, released))
    }

    /// Record a cancellation with its mandatory reason.
    ///
    /// Deliberately does not touch the table: a cancelled order leaves
    /// occupancy to the next serve.
    pub async fn cancel(&self, id: &RecordId, reason: String) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = 'cancelled', cancel_reason = $reason RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("reason", reason))
            .await?;
        result
            .take::<Option<Order>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
