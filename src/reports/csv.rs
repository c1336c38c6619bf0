//! CSV 导出
//!
//! 服务端组装 CSV 文本，RFC-4180 风格转义
//! (包含逗号/引号/换行的字段加引号，内部引号双写)。

use chrono::DateTime;

use crate::db::models::{Order, User};
use crate::reports::aggregate::{ItemSales, RevenueSummary};

/// Quote a field when it contains a delimiter, quote, or newline
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row(out: &mut String, fields: &[String]) {
    let escaped: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
    out.push_str(&escaped.join(","));
    out.push_str("\r\n");
}

/// Unix millis → RFC 3339, raw millis when out of range
fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| millis.to_string())
}

/// 订单明细导出: 每单一行
pub fn orders_csv(orders: &[Order]) -> String {
    let mut out = String::new();
    write_row(
        &mut out,
        &[
            "id".into(),
            "table_number".into(),
            "waiter".into(),
            "status".into(),
            "created_at".into(),
            "item_count".into(),
            "total".into(),
            "cancel_reason".into(),
        ],
    );
    for order in orders {
        write_row(
            &mut out,
            &[
                order.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
                order.table_number.to_string(),
                order.waiter.to_string(),
                order.status.to_string(),
                format_timestamp(order.created_at),
                order.items.iter().map(|i| i.quantity).sum::<i64>().to_string(),
                format!("{:.2}", order.total()),
                order.cancel_reason.clone().unwrap_or_default(),
            ],
        );
    }
    out
}

/// 营收汇总导出: 单行
pub fn summary_csv(summary: &RevenueSummary) -> String {
    let mut out = String::new();
    write_row(
        &mut out,
        &[
            "total_revenue".into(),
            "order_count".into(),
            "average_order_value".into(),
        ],
    );
    write_row(
        &mut out,
        &[
            format!("{:.2}", summary.total_revenue),
            summary.order_count.to_string(),
            format!("{:.2}", summary.average_order_value),
        ],
    );
    out
}

/// 菜品排行导出
pub fn items_csv(items: &[ItemSales]) -> String {
    let mut out = String::new();
    write_row(
        &mut out,
        &[
            "menu_item".into(),
            "name".into(),
            "quantity".into(),
            "revenue".into(),
        ],
    );
    for item in items {
        write_row(
            &mut out,
            &[
                item.menu_item.clone(),
                item.name.clone(),
                item.quantity.to_string(),
                format!("{:.2}", item.revenue),
            ],
        );
    }
    out
}

/// 用户列表导出 (不含密码哈希)
pub fn users_csv(users: &[User]) -> String {
    let mut out = String::new();
    write_row(
        &mut out,
        &[
            "id".into(),
            "name".into(),
            "email".into(),
            "role".into(),
            "status".into(),
            "created_at".into(),
        ],
    );
    for user in users {
        write_row(
            &mut out,
            &[
                user.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
                user.name.clone(),
                user.email.clone(),
                user.role.as_str().to_string(),
                user.status.as_str().to_string(),
                format_timestamp(user.created_at),
            ],
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{OrderItem, OrderStatus};
    use surrealdb::RecordId;

    #[test]
    fn escaping_quotes_and_commas() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn orders_csv_includes_totals_and_escaped_reason() {
        let order = Order {
            id: Some(RecordId::from_table_key("order", "o1")),
            table_number: 4,
            items: vec![OrderItem {
                menu_item: RecordId::from_table_key("menu_item", "a"),
                name: "Soup".into(),
                quantity: 2,
                price: 5.5,
            }],
            status: OrderStatus::Cancelled,
            waiter: RecordId::from_table_key("waiter", "w1"),
            created_at: 0,
            cancel_reason: Some("customer left, food untouched".into()),
        };

        let csv = orders_csv(&[order]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,table_number,waiter,status,created_at,item_count,total,cancel_reason"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("11.00"));
        assert!(row.contains("\"customer left, food untouched\""));
    }

    #[test]
    fn summary_csv_shape() {
        let csv = summary_csv(&RevenueSummary {
            total_revenue: 40.0,
            order_count: 2,
            average_order_value: 20.0,
        });
        assert_eq!(csv, "total_revenue,order_count,average_order_value\r\n40.00,2,20.00\r\n");
    }
}
