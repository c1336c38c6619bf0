//! Waiter API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Waiter, WaiterCreate, WaiterUpdate};
use crate::db::repository::WaiterRepository;
use crate::utils::{AppError, AppResult};

fn repo(state: &ServerState) -> WaiterRepository {
    WaiterRepository::new(state.get_db())
}

/// GET /api/manager/waiters - 列出所有服务员
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Waiter>>> {
    Ok(Json(repo(&state).find_all().await?))
}

/// GET /api/manager/waiters/:id - 单个服务员
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Waiter>> {
    let waiter = repo(&state)
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Waiter {} not found", id)))?;
    Ok(Json(waiter))
}

/// POST /api/manager/waiters - 创建服务员
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<WaiterCreate>,
) -> AppResult<Json<Waiter>> {
    Ok(Json(repo(&state).create(payload).await?))
}

/// PUT /api/manager/waiters/:id - 更新服务员
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<WaiterUpdate>,
) -> AppResult<Json<Waiter>> {
    Ok(Json(repo(&state).update(&id, payload).await?))
}

/// DELETE /api/manager/waiters/:id - 删除服务员
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    Ok(Json(repo(&state).delete(&id).await?))
}
