//! User API 模块 (仅管理员)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/admin/users | GET | 列出所有用户 |
//! | /api/admin/users | POST | 创建用户 (默认 approved) |
//! | /api/admin/users/{id} | GET | 单个用户 |
//! | /api/admin/users/{id} | PUT | 更新 (含审批: status → approved) |
//! | /api/admin/users/{id} | DELETE | 删除用户 |

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}", put(handler::update))
        .route("/{id}", delete(handler::delete))
}
