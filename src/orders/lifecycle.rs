//! 订单生命周期引擎
//!
//! 状态机与订单编排：创建 (快照价格 + 占台)、状态推进、取消。
//! 所有状态变更都先经过 [`validate_transition`]，非法跳转在
//! 数据库写入之前被拒绝。

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Order, OrderCreate, OrderItem, OrderStatus};
use crate::db::repository::{
    DiningTableRepository, MenuItemRepository, OrderRepository, WaiterRepository,
};
use crate::utils::{AppError, AppResult, validation::MIN_CANCEL_REASON_LEN};

/// Allowed transitions, exhaustive.
///
/// pending → approved → ready → served; any pre-served state may cancel.
pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), AppError> {
    use OrderStatus::*;

    let allowed = matches!(
        (from, to),
        (Pending, Approved)
            | (Approved, Ready)
            | (Ready, Served)
            | (Pending, Cancelled)
            | (Approved, Cancelled)
            | (Ready, Cancelled)
    );

    if allowed {
        Ok(())
    } else {
        Err(AppError::business_rule(format!(
            "Cannot transition order from '{}' to '{}'",
            from, to
        )))
    }
}

/// 状态推进结果
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub order: Order,
    /// 本次 serve 是否释放了餐台
    pub table_released: bool,
}

/// 订单编排服务
///
/// 持有订单、餐台、菜单仓储，负责跨表的业务规则。
#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderRepository,
    tables: DiningTableRepository,
    menu: MenuItemRepository,
    waiters: WaiterRepository,
}

impl OrderLifecycle {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            tables: DiningTableRepository::new(db.clone()),
            menu: MenuItemRepository::new(db.clone()),
            waiters: WaiterRepository::new(db),
        }
    }

    pub fn orders(&self) -> &OrderRepository {
        &self.orders
    }

    /// 创建订单
    ///
    /// 1. 校验订单行 (非空、数量 >= 1)
    /// 2. 校验餐台与服务员存在
    /// 3. 服务端查价并快照 (单价、名称)
    /// 4. 写入订单 (pending, 服务端时间戳)
    /// 5. 占台 (后写覆盖: 最新订单决定餐台归属)
    pub async fn create(&self, data: OrderCreate) -> AppResult<Order> {
        if data.items.is_empty() {
            return Err(AppError::validation("Order must contain at least one item"));
        }
        if data.items.iter().any(|i| i.quantity < 1) {
            return Err(AppError::validation("Item quantity must be at least 1"));
        }

        if self.tables.find_by_number(data.table_number).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Table {} not found",
                data.table_number
            )));
        }
        if self.waiters.find_by_id(&data.waiter.to_string()).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Waiter {} not found",
                data.waiter
            )));
        }

        let mut items = Vec::with_capacity(data.items.len());
        for input in &data.items {
            let id = input.menu_item.to_string();
            let menu_item = self
                .menu
                .find_by_id(&id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;

            if !menu_item.is_available {
                return Err(AppError::business_rule(format!(
                    "Menu item '{}' is not available",
                    menu_item.name
                )));
            }

            items.push(OrderItem {
                menu_item: input.menu_item.clone(),
                name: menu_item.name,
                quantity: input.quantity,
                price: menu_item.price,
            });
        }

        let order = Order {
            id: None,
            table_number: data.table_number,
            items,
            status: OrderStatus::Pending,
            waiter: data.waiter.clone(),
            created_at: Utc::now().timestamp_millis(),
            cancel_reason: None,
        };

        let created = self.orders.insert(order).await?;

        // 占台: 即使餐台已被占用也覆盖 (后下的订单决定归属)
        self.tables.occupy(data.table_number, data.waiter).await?;

        Ok(created)
    }

    /// 推进订单状态 (approved / ready / served)
    ///
    /// 取消走 [`OrderLifecycle::cancel`]，此处显式拒绝。
    pub async fn transition(&self, id: &str, to: OrderStatus) -> AppResult<TransitionOutcome> {
        if to == OrderStatus::Cancelled {
            return Err(AppError::validation(
                "Use the cancel operation to cancel an order",
            ));
        }
        if to == OrderStatus::Pending {
            return Err(AppError::business_rule(
                "Cannot transition order back to 'pending'",
            ));
        }

        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
        let order_id = order
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Stored order has no id"))?;

        validate_transition(order.status, to)?;

        if to == OrderStatus::Served {
            let (updated, table_released) = self
                .orders
                .serve_and_release(&order_id, order.table_number, &order.waiter)
                .await?;
            if table_released {
                tracing::info!(table = order.table_number, "Table released");
            }
            Ok(TransitionOutcome {
                order: updated,
                table_released,
            })
        } else {
            let updated = self.orders.set_status(&order_id, to).await?;
            Ok(TransitionOutcome {
                order: updated,
                table_released: false,
            })
        }
    }

    /// 取消订单 (强制理由，最少 10 字符)
    ///
    /// 不释放餐台：占用保持到该餐台最后一单 serve。
    pub async fn cancel(&self, id: &str, reason: &str) -> AppResult<Order> {
        let reason = reason.trim();
        if reason.chars().count() < MIN_CANCEL_REASON_LEN {
            return Err(AppError::validation(format!(
                "Cancellation reason must be at least {} characters",
                MIN_CANCEL_REASON_LEN
            )));
        }

        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
        let order_id = order
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Stored order has no id"))?;

        validate_transition(order.status, OrderStatus::Cancelled)?;

        Ok(self.orders.cancel(&order_id, reason.to_string()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn forward_path_is_allowed() {
        assert!(validate_transition(Pending, Approved).is_ok());
        assert!(validate_transition(Approved, Ready).is_ok());
        assert!(validate_transition(Ready, Served).is_ok());
    }

    #[test]
    fn skipping_steps_is_rejected() {
        assert!(validate_transition(Pending, Ready).is_err());
        assert!(validate_transition(Pending, Served).is_err());
        assert!(validate_transition(Approved, Served).is_err());
    }

    #[test]
    fn backward_moves_are_rejected() {
        assert!(validate_transition(Approved, Pending).is_err());
        assert!(validate_transition(Ready, Approved).is_err());
        assert!(validate_transition(Served, Ready).is_err());
    }

    #[test]
    fn cancellation_from_any_pre_served_state() {
        assert!(validate_transition(Pending, Cancelled).is_ok());
        assert!(validate_transition(Approved, Cancelled).is_ok());
        assert!(validate_transition(Ready, Cancelled).is_ok());
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for to in [Pending, Approved, Ready, Served, Cancelled] {
            assert!(validate_transition(Served, to).is_err());
            assert!(validate_transition(Cancelled, to).is_err());
        }
    }

    #[test]
    fn self_transition_is_rejected() {
        for s in [Pending, Approved, Ready, Served, Cancelled] {
            assert!(validate_transition(s, s).is_err());
        }
    }
}
