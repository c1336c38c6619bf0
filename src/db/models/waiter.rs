//! Waiter Model
//!
//! 服务员档案，独立于登录账号 (可选关联 user)

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Waiter profile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waiter {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Linked login account, if any
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::option_record_id")]
    pub user: Option<RecordId>,
}

/// Create waiter payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaiterCreate {
    pub name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub user: Option<RecordId>,
}

/// Update waiter payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaiterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub user: Option<RecordId>,
}
