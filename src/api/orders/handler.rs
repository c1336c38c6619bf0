//! Order API Handlers
//!
//! 状态变更全部走 [`OrderLifecycle`]，处理函数只做解析和版本递增。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderStatus};
use crate::db::repository::{OrderFilter, OrderRepository};
use crate::orders::OrderLifecycle;
use crate::utils::{AppError, AppResult};

const RESOURCE_ORDERS: &str = "orders";
const RESOURCE_TABLES: &str = "tables";

fn lifecycle(state: &ServerState) -> OrderLifecycle {
    OrderLifecycle::new(state.get_db())
}

/// 列表过滤参数 (全部可选)
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub table_number: Option<i64>,
    /// 服务员记录 ID ("waiter:xyz")
    pub waiter: Option<String>,
    /// Unix 毫秒，含
    pub from: Option<i64>,
    /// Unix 毫秒，不含
    pub to: Option<i64>,
}

impl OrderListQuery {
    fn into_filter(self) -> Result<OrderFilter, AppError> {
        let waiter = self
            .waiter
            .map(|w| {
                w.parse::<RecordId>()
                    .map_err(|_| AppError::validation(format!("Invalid waiter ID: {}", w)))
            })
            .transpose()?;
        Ok(OrderFilter {
            status: self.status,
            waiter,
            table_number: self.table_number,
            from: self.from,
            to: self.to,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CancelRequest {
    #[validate(length(min = 10, max = 500, message = "reason must be 10 to 500 characters"))]
    pub reason: String,
}

/// 状态变更响应：订单 + 是否释放了餐台
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub order: Order,
    pub table_released: bool,
}

/// POST /api/waiter/orders - 下单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = lifecycle(&state).create(payload).await?;

    state.bump_version(RESOURCE_ORDERS);
    state.bump_version(RESOURCE_TABLES);
    tracing::info!(
        order_id = order.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        table = order.table_number,
        "Order created"
    );

    Ok(Json(order))
}

/// GET /api/waiter/orders/active?waiter=waiter:xyz - 进行中订单
pub async fn active_for_waiter(
    State(state): State<ServerState>,
    Query(query): Query<ActiveQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let waiter: RecordId = query
        .waiter
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid waiter ID: {}", query.waiter)))?;
    let orders = OrderRepository::new(state.get_db())
        .find_active_by_waiter(waiter)
        .await?;
    Ok(Json(orders))
}

#[derive(Debug, Deserialize)]
pub struct ActiveQuery {
    pub waiter: String,
}

/// GET /api/kitchen/orders - 后厨队列 (最早的先做)
pub async fn kitchen_queue(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.get_db()).find_kitchen_queue().await?;
    Ok(Json(orders))
}

/// GET /api/orders - 按条件列出订单 (最新在前)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let filter = query.into_filter()?;
    let orders = OrderRepository::new(state.get_db()).find_all(filter).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - 单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = OrderRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/status - 推进订单状态
///
/// 非法跳转返回 422；served 时可能附带释放餐台。
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SetStatusRequest>,
) -> AppResult<Json<StatusResponse>> {
    let outcome = lifecycle(&state).transition(&id, payload.status).await?;

    state.bump_version(RESOURCE_ORDERS);
    if outcome.table_released {
        state.bump_version(RESOURCE_TABLES);
    }
    tracing::info!(
        order_id = id,
        status = payload.status.as_str(),
        released = outcome.table_released,
        "Order status changed"
    );

    Ok(Json(StatusResponse {
        order: outcome.order,
        table_released: outcome.table_released,
    }))
}

/// POST /api/orders/:id/cancel - 取消订单
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CancelRequest>,
) -> AppResult<Json<Order>> {
    payload.validate()?;

    let order = lifecycle(&state).cancel(&id, &payload.reason).await?;

    state.bump_version(RESOURCE_ORDERS);
    tracing::info!(order_id = id, "Order cancelled");

    Ok(Json(order))
}
