//! Auth API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/auth/login | POST | 登录，签发 HttpOnly cookie | 无 |
//! | /api/auth/register | POST | 自助注册 (pending 状态) | 无 |
//! | /api/auth/me | GET | 当前用户信息 | 需要 |
//! | /api/auth/logout | POST | 登出，清除 cookie | 需要 |

mod handler;

pub use handler::UserInfo;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/register", post(handler::register))
        .route("/me", get(handler::me))
        .route("/logout", post(handler::logout))
}
