//! 报表模块 - 请求时聚合与 CSV 导出
//!
//! 聚合全部是纯函数，处理函数负责取数 (served + 日期范围过滤在仓储层完成)。

pub mod aggregate;
pub mod csv;

pub use aggregate::{
    ItemProfit, ItemSales, ProfitSummary, RevenueSummary, WaiterRevenue, item_ranking,
    profit_summary, revenue_by_waiter, revenue_summary,
};
