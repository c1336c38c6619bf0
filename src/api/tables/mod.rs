//! Dining Table API 模块
//!
//! 列表对所有已登录角色开放 (服务员选台需要)；
//! 增删在 /api/manager 前缀下。占用状态只由订单引擎变更。

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let shared = Router::new().route("/api/tables", get(handler::list));

    let manage = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}", delete(handler::delete));

    shared.merge(Router::new().nest("/api/manager/tables", manage))
}
