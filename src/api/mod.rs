//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查 (公共)
//! - [`auth`] - 登录/注册/登出
//! - [`users`] - 用户管理 (管理员)
//! - [`waiters`] - 服务员管理 (经理)
//! - [`tables`] - 餐台管理
//! - [`menu`] - 菜单管理
//! - [`orders`] - 订单生命周期
//! - [`reports`] - 营收/利润报表与导出 (经理)
//! - [`upload`] - 菜品图片上传 (经理)
//! - [`refresh`] - 资源版本轮询
//!
//! 角色限制不在各路由里做：认证中间件按
//! [`crate::auth::policy`] 的前缀表统一判定。

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod auth;
pub mod health;
pub mod menu;
pub mod orders;
pub mod refresh;
pub mod reports;
pub mod tables;
pub mod upload;
pub mod users;
pub mod waiters;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(waiters::router())
        .merge(tables::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(reports::router())
        .merge(upload::router())
        .merge(refresh::router())
        // Health API - public route
        .merge(health::router())
}

/// Build a fully configured application with all middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // JWT authentication + role policy - executes before routes, injects CurrentUser
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        .with_state(state)
}
