//! FOH Server - 餐厅前厅管理服务
//!
//! # 架构概述
//!
//! 本模块是前厅 (Front of House) 服务的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储与仓储层
//! - **认证** (`auth`): JWT + Argon2 认证体系，集中角色策略
//! - **订单** (`orders`): 订单生命周期状态机与餐台占用释放
//! - **报表** (`reports`): 营收/利润聚合与 CSV 导出
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、角色策略
//! ├── db/            # 数据库层 (模型、仓储、种子数据)
//! ├── orders/        # 订单生命周期引擎
//! ├── reports/       # 聚合与 CSV 导出
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod reports;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use db::models::{Order, OrderStatus, Role};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
    ($level:expr, $event:expr) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
        );
    };
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 文件可选，缺失时静默跳过
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    if config.is_production() {
        let _ = config.ensure_work_dir_structure();
        init_logger_with_file(None, config.log_dir().to_str());
    } else {
        init_logger();
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ______ ____  __  __
   / ____// __ \/ / / /
  / /_   / / / / /_/ /
 / __/  / /_/ / __  /
/_/     \____/_/ /_/  server
    "#
    );
}
