//! Seeding fixtures must be created exactly once, no matter how many times
//! the server starts against the same data directory.

use foh_server::db::repository::{
    DiningTableRepository, MenuItemRepository, UserRepository, WaiterRepository,
};
use foh_server::db::{connect, seed};

#[tokio::test]
async fn seeding_twice_yields_one_copy_of_fixtures() {
    let tmp = tempfile::tempdir().unwrap();
    let db = connect(tmp.path()).await.unwrap();

    seed::seed_if_empty(&db).await.unwrap();
    let users_after_first = UserRepository::new(db.clone()).find_all().await.unwrap();
    let tables_after_first = DiningTableRepository::new(db.clone()).find_all().await.unwrap();

    // Second run must be a no-op
    seed::seed_if_empty(&db).await.unwrap();

    let users = UserRepository::new(db.clone()).find_all().await.unwrap();
    let waiters = WaiterRepository::new(db.clone()).find_all().await.unwrap();
    let tables = DiningTableRepository::new(db.clone()).find_all().await.unwrap();
    let menu = MenuItemRepository::new(db.clone()).find_all().await.unwrap();

    assert_eq!(users.len(), users_after_first.len());
    assert_eq!(users.len(), 1, "one default admin");
    assert_eq!(waiters.len(), 2);
    assert_eq!(tables.len(), tables_after_first.len());
    assert_eq!(tables.len(), 8);
    assert_eq!(menu.len(), 6);
}

#[tokio::test]
async fn seeding_skips_non_empty_collections_independently() {
    let tmp = tempfile::tempdir().unwrap();
    let db = connect(tmp.path()).await.unwrap();

    // Pre-populate only the waiter collection
    WaiterRepository::new(db.clone())
        .create(foh_server::db::models::WaiterCreate {
            name: "Existing".to_string(),
            user: None,
        })
        .await
        .unwrap();

    seed::seed_if_empty(&db).await.unwrap();

    let waiters = WaiterRepository::new(db.clone()).find_all().await.unwrap();
    assert_eq!(waiters.len(), 1, "non-empty collection untouched");

    let tables = DiningTableRepository::new(db.clone()).find_all().await.unwrap();
    assert_eq!(tables.len(), 8, "empty collections still seeded");
}
