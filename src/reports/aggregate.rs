//! 营收/利润聚合
//!
//! 纯函数：输入订单切片 (已按 served / 日期范围过滤)，每次请求重新计算，
//! 不维护任何存储的聚合。金额全部来自下单时的价格快照。

use std::collections::HashMap;

use serde::Serialize;

use crate::db::models::Order;

/// 营收汇总
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RevenueSummary {
    pub total_revenue: f64,
    pub order_count: usize,
    pub average_order_value: f64,
}

/// 按服务员的营收行
#[derive(Debug, Clone, Serialize)]
pub struct WaiterRevenue {
    /// 服务员记录 ID ("waiter:xyz")，姓名由调用方解析
    pub waiter: String,
    pub order_count: usize,
    pub total_revenue: f64,
}

/// 按菜品的销量/营收行
#[derive(Debug, Clone, Serialize)]
pub struct ItemSales {
    /// 菜品记录 ID ("menu_item:xyz")
    pub menu_item: String,
    /// 下单时的名称快照
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// 按菜品的利润行
#[derive(Debug, Clone, Serialize)]
pub struct ItemProfit {
    pub menu_item: String,
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
}

/// 利润汇总
#[derive(Debug, Clone, Serialize)]
pub struct ProfitSummary {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub items: Vec<ItemProfit>,
}

/// 总营收、单数、平均单价。空输入返回全零。
pub fn revenue_summary(orders: &[Order]) -> RevenueSummary {
    let total_revenue: f64 = orders.iter().map(Order::total).sum();
    let order_count = orders.len();
    let average_order_value = if order_count == 0 {
        0.0
    } else {
        total_revenue / order_count as f64
    };

    RevenueSummary {
        total_revenue,
        order_count,
        average_order_value,
    }
}

/// 按服务员汇总营收，按营收降序 (并列时按 ID 升序，保证输出稳定)
pub fn revenue_by_waiter(orders: &[Order]) -> Vec<WaiterRevenue> {
    let mut by_waiter: HashMap<String, (usize, f64)> = HashMap::new();
    for order in orders {
        let entry = by_waiter.entry(order.waiter.to_string()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += order.total();
    }

    let mut rows: Vec<WaiterRevenue> = by_waiter
        .into_iter()
        .map(|(waiter, (order_count, total_revenue))| WaiterRevenue {
            waiter,
            order_count,
            total_revenue,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_revenue
            .partial_cmp(&a.total_revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.waiter.cmp(&b.waiter))
    });
    rows
}

/// 按菜品汇总销量与营收，按营收降序
pub fn item_ranking(orders: &[Order]) -> Vec<ItemSales> {
    let mut by_item: HashMap<String, ItemSales> = HashMap::new();
    for order in orders {
        for line in &order.items {
            let key = line.menu_item.to_string();
            let entry = by_item.entry(key.clone()).or_insert_with(|| ItemSales {
                menu_item: key,
                name: line.name.clone(),
                quantity: 0,
                revenue: 0.0,
            });
            entry.quantity += line.quantity;
            entry.revenue += line.line_total();
        }
    }

    let mut rows: Vec<ItemSales> = by_item.into_values().collect();
    rows.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.menu_item.cmp(&b.menu_item))
    });
    rows
}

/// 利润汇总
///
/// `costs` 是菜品 ID → 单位成本 的映射 (当前菜单目录)。
/// 缺失的成本按零处理：利润率上界，不让报表因数据缺口失败。
pub fn profit_summary(orders: &[Order], costs: &HashMap<String, f64>) -> ProfitSummary {
    let mut items: Vec<ItemProfit> = item_ranking(orders)
        .into_iter()
        .map(|sales| {
            let unit_cost = costs.get(&sales.menu_item).copied().unwrap_or(0.0);
            let cost = unit_cost * sales.quantity as f64;
            ItemProfit {
                profit: sales.revenue - cost,
                menu_item: sales.menu_item,
                name: sales.name,
                quantity: sales.quantity,
                revenue: sales.revenue,
                cost,
            }
        })
        .collect();
    items.sort_by(|a, b| {
        b.profit
            .partial_cmp(&a.profit)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.menu_item.cmp(&b.menu_item))
    });

    let total_revenue: f64 = items.iter().map(|i| i.revenue).sum();
    let total_cost: f64 = items.iter().map(|i| i.cost).sum();

    ProfitSummary {
        total_revenue,
        total_cost,
        total_profit: total_revenue - total_cost,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{OrderItem, OrderStatus};
    use surrealdb::RecordId;

    fn order(waiter: &str, lines: &[(&str, &str, i64, f64)]) -> Order {
        Order {
            id: None,
            table_number: 1,
            items: lines
                .iter()
                .map(|(id, name, quantity, price)| OrderItem {
                    menu_item: RecordId::from_table_key("menu_item", *id),
                    name: (*name).into(),
                    quantity: *quantity,
                    price: *price,
                })
                .collect(),
            status: OrderStatus::Served,
            waiter: RecordId::from_table_key("waiter", waiter),
            created_at: 0,
            cancel_reason: None,
        }
    }

    #[test]
    fn empty_input_yields_zeros() {
        let summary = revenue_summary(&[]);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.order_count, 0);
        assert_eq!(summary.average_order_value, 0.0);

        assert!(revenue_by_waiter(&[]).is_empty());
        assert!(item_ranking(&[]).is_empty());

        let profit = profit_summary(&[], &HashMap::new());
        assert_eq!(profit.total_profit, 0.0);
        assert!(profit.items.is_empty());
    }

    #[test]
    fn summary_totals_and_average() {
        let orders = vec![
            order("w1", &[("a", "Soup", 2, 5.0)]),   // 10
            order("w2", &[("b", "Steak", 1, 30.0)]), // 30
        ];
        let summary = revenue_summary(&orders);
        assert_eq!(summary.total_revenue, 40.0);
        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.average_order_value, 20.0);
    }

    #[test]
    fn by_waiter_sorted_descending() {
        let orders = vec![
            order("w1", &[("a", "Soup", 1, 5.0)]),
            order("w2", &[("b", "Steak", 2, 30.0)]),
            order("w1", &[("a", "Soup", 1, 5.0)]),
        ];
        let rows = revenue_by_waiter(&orders);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].waiter, "waiter:w2");
        assert_eq!(rows[0].total_revenue, 60.0);
        assert_eq!(rows[1].waiter, "waiter:w1");
        assert_eq!(rows[1].order_count, 2);
    }

    #[test]
    fn item_ranking_merges_lines_across_orders() {
        let orders = vec![
            order("w1", &[("a", "Soup", 2, 5.0), ("b", "Steak", 1, 30.0)]),
            order("w2", &[("a", "Soup", 3, 5.0)]),
        ];
        let rows = item_ranking(&orders);
        assert_eq!(rows[0].name, "Steak");
        assert_eq!(rows[0].revenue, 30.0);
        assert_eq!(rows[1].name, "Soup");
        assert_eq!(rows[1].quantity, 5);
        assert_eq!(rows[1].revenue, 25.0);
    }

    #[test]
    fn missing_cost_counts_as_zero() {
        let orders = vec![order("w1", &[("a", "Soup", 2, 5.0), ("b", "Steak", 1, 30.0)])];
        let mut costs = HashMap::new();
        costs.insert("menu_item:b".to_string(), 12.0);

        let profit = profit_summary(&orders, &costs);
        assert_eq!(profit.total_revenue, 40.0);
        assert_eq!(profit.total_cost, 12.0);
        assert_eq!(profit.total_profit, 28.0);

        let soup = profit.items.iter().find(|i| i.name == "Soup").unwrap();
        assert_eq!(soup.cost, 0.0);
        assert_eq!(soup.profit, 10.0);
    }
}
