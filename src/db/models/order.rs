//! Order Model
//!
//! 订单是核心交易实体。订单行内嵌于订单文档，单价在下单时快照，
//! 菜单后续改价不影响历史订单合计。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use std::fmt;
use surrealdb::RecordId;

/// Order lifecycle status
///
/// Forward-only: pending → approved → ready → served.
/// Cancellation is a terminal branch from any pre-served state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Served and cancelled orders accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Served | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Embedded order line — price is a creation-time snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    /// Name snapshot so reports survive menu deletions
    pub name: String,
    pub quantity: i64,
    /// Unit price at order time
    pub price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub table_number: i64,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    #[serde(with = "serde_helpers::record_id")]
    pub waiter: RecordId,
    /// Server-side creation timestamp, Unix millis
    pub created_at: i64,
    pub cancel_reason: Option<String>,
}

impl Order {
    /// Order total from snapshot prices
    pub fn total(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

/// Order line input for creation (price is looked up server-side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    pub quantity: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_number: i64,
    #[serde(with = "serde_helpers::record_id")]
    pub waiter: RecordId,
    pub items: Vec<OrderItemInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64, quantity: i64) -> OrderItem {
        OrderItem {
            menu_item: RecordId::from_table_key("menu_item", "x"),
            name: "Item".into(),
            quantity,
            price,
        }
    }

    #[test]
    fn total_uses_snapshot_prices() {
        let order = Order {
            id: None,
            table_number: 3,
            items: vec![item(4.5, 2), item(10.0, 1)],
            status: OrderStatus::Pending,
            waiter: RecordId::from_table_key("waiter", "w1"),
            created_at: 0,
            cancel_reason: None,
        };
        assert_eq!(order.total(), 19.0);
    }
}
