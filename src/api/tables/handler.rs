//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate};
use crate::db::repository::DiningTableRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "tables";

fn repo(state: &ServerState) -> DiningTableRepository {
    DiningTableRepository::new(state.get_db())
}

/// GET /api/tables - 列出所有餐台 (按台号排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    Ok(Json(repo(&state).find_all().await?))
}

/// GET /api/manager/tables/:id - 单个餐台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let table = repo(&state)
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;
    Ok(Json(table))
}

/// POST /api/manager/tables - 创建餐台 (台号唯一)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    if payload.number < 1 {
        return Err(AppError::validation("Table number must be positive"));
    }
    let table = repo(&state).create(payload).await?;
    state.bump_version(RESOURCE);
    Ok(Json(table))
}

/// DELETE /api/manager/tables/:id - 删除餐台
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = repo(&state).delete(&id).await?;
    if deleted {
        state.bump_version(RESOURCE);
    }
    Ok(Json(deleted))
}
