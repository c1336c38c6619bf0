//! 认证模块 - JWT 令牌、角色策略与中间件
//!
//! # 模块结构
//!
//! - [`jwt`] - 令牌签发与验证 (HttpOnly cookie + Bearer 兼容)
//! - [`policy`] - 路由前缀 → 允许角色 的集中策略表
//! - [`middleware`] - 认证 + 角色检查中间件
//! - [`extractor`] - `CurrentUser` 提取器

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod policy;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;

/// HttpOnly cookie carrying the session token
pub const AUTH_COOKIE: &str = "foh_token";
