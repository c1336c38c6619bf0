//! Report API 模块 (经理/管理员)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/manager/reports/summary | GET | 营收汇总 |
//! | /api/manager/reports/by-waiter | GET | 按服务员营收 |
//! | /api/manager/reports/items | GET | 菜品排行 |
//! | /api/manager/reports/profit | GET | 利润汇总 |
//! | /api/manager/reports/export/{kind} | GET | CSV 导出 (orders/summary/items/users) |
//!
//! 全部接受 `from`/`to` (Unix 毫秒, [from, to)) 日期范围参数；
//! 聚合只统计 served 订单。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/manager/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/summary", get(handler::summary))
        .route("/by-waiter", get(handler::by_waiter))
        .route("/items", get(handler::items))
        .route("/profit", get(handler::profit))
        .route("/export/{kind}", get(handler::export_csv))
}
