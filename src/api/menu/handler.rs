//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::utils::{AppError, AppResult, validation};

const RESOURCE: &str = "menu";

fn repo(state: &ServerState) -> MenuItemRepository {
    MenuItemRepository::new(state.get_db())
}

/// GET /api/menu - 完整菜单 (含下架菜品)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(repo(&state).find_all().await?))
}

/// GET /api/menu/available - 仅可点菜品 (点单界面)
pub async fn list_available(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(repo(&state).find_available().await?))
}

/// GET /api/manager/menu/:id - 单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let item = repo(&state)
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(Json(item))
}

/// POST /api/manager/menu - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validation::validate_required_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    validation::validate_amount(payload.price, "price")?;
    validation::validate_optional_text(&payload.image_url, "image_url", validation::MAX_URL_LEN)?;
    if let Some(cost) = payload.cost_of_goods {
        validation::validate_amount(cost, "cost_of_goods")?;
    }

    let item = repo(&state).create(payload).await?;
    state.bump_version(RESOURCE);
    Ok(Json(item))
}

/// PUT /api/manager/menu/:id - 更新菜品 (含上下架)
///
/// 价格变更只影响之后创建的订单。
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(price) = payload.price {
        validation::validate_amount(price, "price")?;
    }
    validation::validate_optional_text(&payload.image_url, "image_url", validation::MAX_URL_LEN)?;
    if let Some(cost) = payload.cost_of_goods {
        validation::validate_amount(cost, "cost_of_goods")?;
    }

    let item = repo(&state).update(&id, payload).await?;
    state.bump_version(RESOURCE);
    Ok(Json(item))
}

/// DELETE /api/manager/menu/:id - 删除菜品
///
/// 历史订单不受影响 (名称与价格在订单内有快照)。
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
