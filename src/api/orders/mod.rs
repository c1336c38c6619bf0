//! Order API 模块
//!
//! | 路径 | 方法 | 说明 | 角色 |
//! |------|------|------|------|
//! | /api/waiter/orders | POST | 下单 (快照价格 + 占台) | waiter/admin |
//! | /api/waiter/orders/active | GET | 本服务员的进行中订单 | waiter/admin |
//! | /api/kitchen/orders | GET | 后厨队列 (pending/approved, 先进先出) | kitchen/admin |
//! | /api/orders | GET | 按条件列出订单 | 已登录 |
//! | /api/orders/{id} | GET | 单个订单 | 已登录 |
//! | /api/orders/{id}/status | PUT | 推进状态 | 已登录 |
//! | /api/orders/{id}/cancel | POST | 取消 (强制理由) | 已登录 |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/waiter/orders", post(handler::create))
        .route("/api/waiter/orders/active", get(handler::active_for_waiter))
        .route("/api/kitchen/orders", get(handler::kitchen_queue))
        .route("/api/orders", get(handler::list))
        .route("/api/orders/{id}", get(handler::get_by_id))
        .route("/api/orders/{id}/status", put(handler::set_status))
        .route("/api/orders/{id}/cancel", post(handler::cancel))
}
