//! End-to-end order lifecycle against a temp RocksDB instance:
//! creation with price snapshots, strict status transitions, table
//! occupancy and release, cancellation.

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use foh_server::db::models::{
    MenuItem, MenuItemUpdate, OrderCreate, OrderItemInput, OrderStatus, TableStatus, Waiter,
};
use foh_server::db::repository::{DiningTableRepository, MenuItemRepository, WaiterRepository};
use foh_server::db::{connect, seed};
use foh_server::orders::OrderLifecycle;

struct Fixture {
    db: Surreal<Db>,
    _tmp: tempfile::TempDir,
    waiters: Vec<Waiter>,
    menu: Vec<MenuItem>,
}

async fn fixture() -> Fixture {
    let tmp = tempfile::tempdir().unwrap();
    let db = connect(tmp.path()).await.unwrap();
    seed::seed_if_empty(&db).await.unwrap();

    let waiters = WaiterRepository::new(db.clone()).find_all().await.unwrap();
    let menu = MenuItemRepository::new(db.clone()).find_all().await.unwrap();

    Fixture {
        db,
        _tmp: tmp,
        waiters,
        menu,
    }
}

fn order_input(waiter: &Waiter, items: &[(&MenuItem, i64)], table_number: i64) -> OrderCreate {
    OrderCreate {
        table_number,
        waiter: waiter.id.clone().unwrap(),
        items: items
            .iter()
            .map(|(item, quantity)| OrderItemInput {
                menu_item: item.id.clone().unwrap(),
                quantity: *quantity,
            })
            .collect(),
    }
}

async fn table_state(db: &Surreal<Db>, number: i64) -> (TableStatus, Option<RecordId>) {
    let table = DiningTableRepository::new(db.clone())
        .find_by_number(number)
        .await
        .unwrap()
        .unwrap();
    (table.status, table.waiter)
}

#[tokio::test]
async fn create_snapshots_prices_and_occupies_table() {
    let fx = fixture().await;
    let engine = OrderLifecycle::new(fx.db.clone());
    let waiter = &fx.waiters[0];
    let item = &fx.menu[0];

    let order = engine
        .create(order_input(waiter, &[(item, 2)], 3))
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].price, item.price);
    assert_eq!(order.total(), item.price * 2.0);

    let (status, table_waiter) = table_state(&fx.db, 3).await;
    assert_eq!(status, TableStatus::Occupied);
    assert_eq!(table_waiter, waiter.id.clone());

    // Later menu price edits do not rewrite the snapshot
    let item_id = item.id.as_ref().unwrap().to_string();
    MenuItemRepository::new(fx.db.clone())
        .update(
            &item_id,
            MenuItemUpdate {
                price: Some(item.price + 100.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let reloaded = engine
        .orders()
        .find_by_id(&order.id.as_ref().unwrap().to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.total(), item.price * 2.0);
}

#[tokio::test]
async fn out_of_sequence_transitions_are_rejected() {
    let fx = fixture().await;
    let engine = OrderLifecycle::new(fx.db.clone());

    let order = engine
        .create(order_input(&fx.waiters[0], &[(&fx.menu[0], 1)], 1))
        .await
        .unwrap();
    let id = order.id.as_ref().unwrap().to_string();

    // pending → ready and pending → served both skip a step
    assert!(engine.transition(&id, OrderStatus::Ready).await.is_err());
    assert!(engine.transition(&id, OrderStatus::Served).await.is_err());

    // The full forward path works
    engine.transition(&id, OrderStatus::Approved).await.unwrap();
    engine.transition(&id, OrderStatus::Ready).await.unwrap();
    let outcome = engine.transition(&id, OrderStatus::Served).await.unwrap();
    assert_eq!(outcome.order.status, OrderStatus::Served);

    // Terminal: nothing more is accepted
    assert!(engine.transition(&id, OrderStatus::Approved).await.is_err());
}

#[tokio::test]
async fn last_served_order_releases_the_table() {
    let fx = fixture().await;
    let engine = OrderLifecycle::new(fx.db.clone());
    let waiter = &fx.waiters[0];

    let first = engine
        .create(order_input(waiter, &[(&fx.menu[0], 1)], 5))
        .await
        .unwrap();
    let second = engine
        .create(order_input(waiter, &[(&fx.menu[1], 1)], 5))
        .await
        .unwrap();

    let serve = |engine: OrderLifecycle, id: String| async move {
        engine.transition(&id, OrderStatus::Approved).await.unwrap();
        engine.transition(&id, OrderStatus::Ready).await.unwrap();
        engine.transition(&id, OrderStatus::Served).await.unwrap()
    };

    let outcome = serve(engine.clone(), first.id.as_ref().unwrap().to_string()).await;
    assert!(!outcome.table_released, "second order still active");
    let (status, _) = table_state(&fx.db, 5).await;
    assert_eq!(status, TableStatus::Occupied);

    let outcome = serve(engine.clone(), second.id.as_ref().unwrap().to_string()).await;
    assert!(outcome.table_released, "no active orders remain");
    let (status, table_waiter) = table_state(&fx.db, 5).await;
    assert_eq!(status, TableStatus::Available);
    assert!(table_waiter.is_none());
}

#[tokio::test]
async fn creating_against_occupied_table_reassigns_it() {
    let fx = fixture().await;
    let engine = OrderLifecycle::new(fx.db.clone());
    let (alice, bruno) = (&fx.waiters[0], &fx.waiters[1]);

    engine
        .create(order_input(alice, &[(&fx.menu[0], 1)], 2))
        .await
        .unwrap();
    let (_, table_waiter) = table_state(&fx.db, 2).await;
    assert_eq!(table_waiter, alice.id.clone());

    // Bruno takes over the table without any error
    engine
        .create(order_input(bruno, &[(&fx.menu[1], 1)], 2))
        .await
        .unwrap();
    let (status, table_waiter) = table_state(&fx.db, 2).await;
    assert_eq!(status, TableStatus::Occupied);
    assert_eq!(table_waiter, bruno.id.clone());
}

#[tokio::test]
async fn cancellation_needs_a_reason_and_keeps_the_table() {
    let fx = fixture().await;
    let engine = OrderLifecycle::new(fx.db.clone());

    let order = engine
        .create(order_input(&fx.waiters[0], &[(&fx.menu[0], 1)], 7))
        .await
        .unwrap();
    let id = order.id.as_ref().unwrap().to_string();

    assert!(engine.cancel(&id, "too short").await.is_err());

    let cancelled = engine
        .cancel(&id, "customer changed their mind")
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(
        cancelled.cancel_reason.as_deref(),
        Some("customer changed their mind")
    );

    // Cancellation does not release the table
    let (status, _) = table_state(&fx.db, 7).await;
    assert_eq!(status, TableStatus::Occupied);

    // Terminal: cannot cancel twice or progress
    assert!(engine.cancel(&id, "another valid reason here").await.is_err());
    assert!(engine.transition(&id, OrderStatus::Approved).await.is_err());
}

#[tokio::test]
async fn create_validates_inputs() {
    let fx = fixture().await;
    let engine = OrderLifecycle::new(fx.db.clone());
    let waiter = &fx.waiters[0];

    // Empty order
    let mut input = order_input(waiter, &[], 1);
    assert!(engine.create(input).await.is_err());

    // Zero quantity
    input = order_input(waiter, &[(&fx.menu[0], 0)], 1);
    assert!(engine.create(input).await.is_err());

    // Unknown table
    input = order_input(waiter, &[(&fx.menu[0], 1)], 999);
    assert!(engine.create(input).await.is_err());

    // Unknown menu item
    input = order_input(waiter, &[(&fx.menu[0], 1)], 1);
    input.items[0].menu_item = RecordId::from_table_key("menu_item", "missing");
    assert!(engine.create(input).await.is_err());

    // Valid baseline still passes
    input = order_input(waiter, &[(&fx.menu[0], 1)], 1);
    assert!(engine.create(input).await.is_ok());
}
