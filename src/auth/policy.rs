//! Route Access Policy
//!
//! Centralized mapping of route prefix → allowed roles, evaluated once in the
//! auth middleware. Replaces ad-hoc role string comparisons scattered across
//! handlers.
//!
//! | 前缀 | 允许角色 |
//! |------|----------|
//! | `/api/admin` | admin |
//! | `/api/manager` | manager, admin |
//! | `/api/waiter` | waiter, admin |
//! | `/api/kitchen` | kitchen, admin |
//!
//! 其余 `/api` 路由仅要求已登录。

use crate::db::models::Role;

/// Prefix rules, checked in order; first match wins
const ROUTE_POLICY: &[(&str, &[Role])] = &[
    ("/api/admin", &[Role::Admin]),
    ("/api/manager", &[Role::Manager, Role::Admin]),
    ("/api/waiter", &[Role::Waiter, Role::Admin]),
    ("/api/kitchen", &[Role::Kitchen, Role::Admin]),
];

/// Roles allowed for a path, or `None` when the path has no prefix rule
/// (authentication only).
pub fn allowed_roles(path: &str) -> Option<&'static [Role]> {
    ROUTE_POLICY
        .iter()
        .find(|(prefix, _)| path.starts_with(prefix))
        .map(|(_, roles)| *roles)
}

/// Whether `role` may access `path`
pub fn is_allowed(path: &str, role: Role) -> bool {
    match allowed_roles(path) {
        Some(roles) => roles.contains(&role),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_prefix_is_admin_only() {
        assert!(is_allowed("/api/admin/users", Role::Admin));
        assert!(!is_allowed("/api/admin/users", Role::Manager));
        assert!(!is_allowed("/api/admin/users", Role::Waiter));
        assert!(!is_allowed("/api/admin/users", Role::Kitchen));
    }

    #[test]
    fn manager_prefix_allows_manager_and_admin() {
        assert!(is_allowed("/api/manager/menu", Role::Manager));
        assert!(is_allowed("/api/manager/menu", Role::Admin));
        assert!(!is_allowed("/api/manager/menu", Role::Waiter));
    }

    #[test]
    fn waiter_and_kitchen_prefixes() {
        assert!(is_allowed("/api/waiter/orders", Role::Waiter));
        assert!(is_allowed("/api/waiter/orders", Role::Admin));
        assert!(!is_allowed("/api/waiter/orders", Role::Kitchen));

        assert!(is_allowed("/api/kitchen/orders", Role::Kitchen));
        assert!(!is_allowed("/api/kitchen/orders", Role::Manager));
    }

    #[test]
    fn unprefixed_routes_only_need_authentication() {
        for role in [Role::Admin, Role::Manager, Role::Waiter, Role::Kitchen] {
            assert!(is_allowed("/api/orders/order:1/status", role));
            assert!(is_allowed("/api/menu", role));
        }
    }
}
