//! Menu API 模块
//!
//! 列表对所有已登录角色开放 (下单选菜需要)；
//! 管理操作在 /api/manager 前缀下。改价不影响历史订单的价格快照。

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let shared = Router::new()
        .route("/api/menu", get(handler::list))
        .route("/api/menu/available", get(handler::list_available));

    let manage = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}", put(handler::update))
        .route("/{id}", delete(handler::delete));

    shared.merge(Router::new().nest("/api/manager/menu", manage))
}
