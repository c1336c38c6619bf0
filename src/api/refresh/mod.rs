//! 刷新信号路由
//!
//! 仪表盘轮询各资源的版本号，只有版本变化时才重新拉取数据。

use std::collections::BTreeMap;

use axum::{Json, Router, extract::State, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/refresh", get(versions))
}

/// GET /api/refresh - 所有资源的当前版本号
///
/// 从未变更过的资源不出现在映射中 (客户端按 0 处理)。
pub async fn versions(State(state): State<ServerState>) -> Json<BTreeMap<String, u64>> {
    Json(state.resource_versions.snapshot().into_iter().collect())
}
