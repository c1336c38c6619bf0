//! 订单模块 - 生命周期状态机与编排
//!
//! [`lifecycle`] 是唯一允许改变订单状态的入口：
//! 处理函数不直接调用订单仓储的写方法。

pub mod lifecycle;

pub use lifecycle::{OrderLifecycle, TransitionOutcome, validate_transition};
