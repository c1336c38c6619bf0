//! Authentication Handlers
//!
//! Handles login, registration, logout, and current-user lookup.

use std::time::Duration;

use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header::SET_COOKIE},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::{AUTH_COOKIE, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{Role, User, UserCreate, UserStatus};
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub role: Role,
}

/// 对外的用户信息 (不含密码哈希)
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: i64,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            name: user.name,
            email: user.email,
            role: user.role,
            status: user.status,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

fn session_cookie(token: &str, max_age_seconds: i64) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        AUTH_COOKIE, token, max_age_seconds
    ))
    .map_err(|e| AppError::internal(format!("Failed to build session cookie: {}", e)))
}

/// POST /api/auth/login - 登录
///
/// 验证凭据后签发 JWT，通过 HttpOnly cookie 下发；
/// 响应体同时携带令牌以兼容 Bearer 客户端。
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<(HeaderMap, Json<LoginResponse>)> {
    req.validate()?;

    let repo = UserRepository::new(state.get_db());
    let user = repo.find_by_email(&req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent email enumeration
    let user = match user {
        Some(u) => u,
        None => {
            security_log!("WARN", "login_failed", email = req.email.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !password_valid {
        security_log!("WARN", "login_failed", email = req.email.clone());
        return Err(AppError::invalid_credentials());
    }

    if user.status != UserStatus::Approved {
        return Err(AppError::forbidden("Account is pending approval"));
    }

    let jwt_service = state.get_jwt_service();
    let user_id = user.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
    let token = jwt_service
        .generate_token(&user_id, &user.name, &user.email, user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    security_log!(
        "INFO",
        "login_success",
        user_id = user_id.clone(),
        role = user.role.as_str()
    );
    tracing::info!(user_id = %user_id, role = %user.role, "User logged in");

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        session_cookie(&token, jwt_service.expiration_seconds())?,
    );

    Ok((
        headers,
        Json(LoginResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// POST /api/auth/register - 自助注册
///
/// 新账号状态为 pending，需管理员审批后方可登录。
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<UserInfo>> {
    req.validate()?;

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .create(UserCreate {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
            status: Some(UserStatus::Pending),
        })
        .await?;

    security_log!(
        "INFO",
        "user_registered",
        email = user.email.clone(),
        role = user.role.as_str()
    );

    Ok(Json(user.into()))
}

/// GET /api/auth/me - 当前用户信息
pub async fn me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User no longer exists"))?;
    Ok(Json(user.into()))
}

/// POST /api/auth/logout - 登出 (清除 cookie)
pub async fn logout(
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<(HeaderMap, Json<AppResponse<()>>)> {
    security_log!("INFO", "logout", user_id = current_user.id.clone());

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, session_cookie("", 0)?);
    Ok((headers, ok_with_message((), "Logged out")))
}
