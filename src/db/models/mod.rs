//! Database Models
//!
//! Serde-mapped documents for the SurrealDB collections.

pub mod serde_helpers;

pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod user;
pub mod waiter;

pub use dining_table::{DiningTable, DiningTableCreate, TableStatus};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{Order, OrderCreate, OrderItem, OrderItemInput, OrderStatus};
pub use user::{Role, User, UserCreate, UserId, UserStatus, UserUpdate};
pub use waiter::{Waiter, WaiterCreate, WaiterUpdate};
