//! Database Module
//!
//! Embedded SurrealDB (kv-rocksdb) storage. The handle is opened once at
//! process start and passed explicitly through [`crate::core::ServerState`];
//! no global lazy connection cache.

pub mod models;
pub mod repository;
pub mod seed;

use crate::utils::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "foh";
const DATABASE: &str = "foh";

/// Open the embedded database at `path` and select the namespace/database.
///
/// The returned handle is cheap to clone; dropping the last clone closes
/// the store at shutdown.
pub async fn connect(path: &Path) -> Result<Surreal<Db>, AppError> {
    let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

    tracing::info!(path = %path.display(), "Database connection established (SurrealDB RocksDB)");

    Ok(db)
}
