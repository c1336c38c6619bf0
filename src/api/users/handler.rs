//! User API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::auth::UserInfo;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{UserCreate, UserUpdate};
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::{AppError, AppResult};

fn repo(state: &ServerState) -> UserRepository {
    UserRepository::new(state.get_db())
}

/// GET /api/admin/users - 列出所有用户
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserInfo>>> {
    let users = repo(&state).find_all().await?;
    Ok(Json(users.into_iter().map(UserInfo::from).collect()))
}

/// GET /api/admin/users/:id - 单个用户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserInfo>> {
    let user = repo(&state)
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;
    Ok(Json(user.into()))
}

/// POST /api/admin/users - 创建用户
///
/// 管理员创建的账号默认 approved，无需再审批。
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<UserInfo>> {
    let user = repo(&state).create(payload).await?;

    security_log!(
        "INFO",
        "user_created",
        operator = current_user.id.clone(),
        email = user.email.clone(),
        role = user.role.as_str()
    );

    Ok(Json(user.into()))
}

/// PUT /api/admin/users/:id - 更新用户 (含审批)
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserInfo>> {
    let user = repo(&state).update(&id, payload).await?;

    security_log!(
        "INFO",
        "user_updated",
        operator = current_user.id.clone(),
        user_id = id.clone()
    );

    Ok(Json(user.into()))
}

/// DELETE /api/admin/users/:id - 删除用户
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    if current_user.id == id {
        return Err(AppError::business_rule("Cannot delete your own account"));
    }

    let deleted = repo(&state).delete(&id).await?;

    if deleted {
        security_log!(
            "INFO",
            "user_deleted",
            operator = current_user.id.clone(),
            user_id = id.clone()
        );
    }

    Ok(Json(deleted))
}
