//! Report API Handlers
//!
//! 取数 (served + 日期范围) 在仓储层，聚合在 [`crate::reports`] 的纯函数里。

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{Order, OrderStatus};
use crate::db::repository::{MenuItemRepository, OrderFilter, OrderRepository, UserRepository, WaiterRepository};
use crate::reports::{self, ItemSales, ProfitSummary, RevenueSummary};
use crate::utils::{AppError, AppResult};

/// 日期范围参数，Unix 毫秒，[from, to)
#[derive(Debug, Deserialize, Default)]
pub struct DateRangeQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

/// served 订单，可选日期范围
async fn fetch_served(state: &ServerState, range: &DateRangeQuery) -> AppResult<Vec<Order>> {
    let orders = OrderRepository::new(state.get_db())
        .find_all(OrderFilter {
            status: Some(OrderStatus::Served),
            waiter: None,
            table_number: None,
            from: range.from,
            to: range.to,
        })
        .await?;
    Ok(orders)
}

/// GET /api/manager/reports/summary - 营收汇总
pub async fn summary(
    State(state): State<ServerState>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Json<RevenueSummary>> {
    let orders = fetch_served(&state, &range).await?;
    Ok(Json(reports::revenue_summary(&orders)))
}

/// 按服务员营收行，姓名已解析
#[derive(Debug, Serialize)]
pub struct NamedWaiterRevenue {
    pub waiter: String,
    pub name: String,
    pub order_count: usize,
    pub total_revenue: f64,
}

/// GET /api/manager/reports/by-waiter - 按服务员营收
///
/// 已删除的服务员显示为 "Unknown"，报表不失败。
pub async fn by_waiter(
    State(state): State<ServerState>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<NamedWaiterRevenue>>> {
    let orders = fetch_served(&state, &range).await?;
    let rows = reports::revenue_by_waiter(&orders);

    let names: HashMap<String, String> = WaiterRepository::new(state.get_db())
        .find_all()
        .await?
        .into_iter()
        .filter_map(|w| w.id.as_ref().map(|id| (id.to_string(), w.name.clone())))
        .collect();

    Ok(Json(
        rows.into_iter()
            .map(|row| NamedWaiterRevenue {
                name: names
                    .get(&row.waiter)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                waiter: row.waiter,
                order_count: row.order_count,
                total_revenue: row.total_revenue,
            })
            .collect(),
    ))
}

/// GET /api/manager/reports/items - 菜品排行 (营收降序)
pub async fn items(
    State(state): State<ServerState>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<ItemSales>>> {
    let orders = fetch_served(&state, &range).await?;
    Ok(Json(reports::item_ranking(&orders)))
}

/// GET /api/manager/reports/profit - 利润汇总
///
/// 单位成本来自当前菜单目录；已删除或未填成本的菜品按零成本计。
pub async fn profit(
    State(state): State<ServerState>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Json<ProfitSummary>> {
    let orders = fetch_served(&state, &range).await?;

    let costs: HashMap<String, f64> = MenuItemRepository::new(state.get_db())
        .find_all()
        .await?
        .into_iter()
        .filter_map(|item| {
            match (item.id.as_ref(), item.cost_of_goods) {
                (Some(id), Some(cost)) => Some((id.to_string(), cost)),
                _ => None,
            }
        })
        .collect();

    Ok(Json(reports::profit_summary(&orders, &costs)))
}

fn csv_response(filename: &str, body: String) -> Result<Response, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
            .map_err(|e| AppError::internal(format!("Invalid export filename: {}", e)))?,
    );
    Ok((headers, body).into_response())
}

/// GET /api/manager/reports/export/:kind - CSV 导出
///
/// kind ∈ orders | summary | items | users
pub async fn export_csv(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Response> {
    match kind.as_str() {
        "orders" => {
            // 订单导出含所有状态 (取消原因也在内)，仅按日期过滤
            let orders = OrderRepository::new(state.get_db())
                .find_all(OrderFilter {
                    from: range.from,
                    to: range.to,
                    ..OrderFilter::default()
                })
                .await?;
            csv_response("orders.csv", reports::csv::orders_csv(&orders))
        }
        "summary" => {
            let orders = fetch_served(&state, &range).await?;
            let summary = reports::revenue_summary(&orders);
            csv_response("summary.csv", reports::csv::summary_csv(&summary))
        }
        "items" => {
            let orders = fetch_served(&state, &range).await?;
            let items = reports::item_ranking(&orders);
            csv_response("items.csv", reports::csv::items_csv(&items))
        }
        "users" => {
            let users = UserRepository::new(state.get_db()).find_all().await?;
            csv_response("users.csv", reports::csv::users_csv(&users))
        }
        other => Err(AppError::not_found(format!("Unknown export '{}'", other))),
    }
}
