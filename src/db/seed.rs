//! First-run seeding
//!
//! Populates empty collections with fixture data. Each collection is guarded
//! by a document-count check, so invoking the seed twice leaves exactly one
//! copy of every fixture.

use crate::db::models::{
    DiningTableCreate, MenuItemCreate, Role, UserCreate, UserStatus, WaiterCreate,
};
use crate::db::repository::{
    BaseRepository, DiningTableRepository, MenuItemRepository, RepoResult, UserRepository,
    WaiterRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Number of tables created on first run
const SEED_TABLE_COUNT: i64 = 8;

/// Default admin credentials — replace in production via the users API
const ADMIN_EMAIL: &str = "admin@foh.local";
const ADMIN_PASSWORD: &str = "admin1234";

/// Seed all collections that are currently empty.
pub async fn seed_if_empty(db: &Surreal<Db>) -> RepoResult<()> {
    seed_users(db).await?;
    seed_waiters(db).await?;
    seed_tables(db).await?;
    seed_menu(db).await?;
    Ok(())
}

async fn seed_users(db: &Surreal<Db>) -> RepoResult<()> {
    let base = BaseRepository::new(db.clone());
    if base.count("user").await? > 0 {
        return Ok(());
    }

    let repo = UserRepository::new(db.clone());
    repo.create(UserCreate {
        name: "Administrator".to_string(),
        email: ADMIN_EMAIL.to_string(),
        password: ADMIN_PASSWORD.to_string(),
        role: Role::Admin,
        status: Some(UserStatus::Approved),
    })
    .await?;

    tracing::info!(email = ADMIN_EMAIL, "Seeded default admin user");
    Ok(())
}

async fn seed_waiters(db: &Surreal<Db>) -> RepoResult<()> {
    let base = BaseRepository::new(db.clone());
    if base.count("waiter").await? > 0 {
        return Ok(());
    }

    let repo = WaiterRepository::new(db.clone());
    for name in ["Alice", "Bruno"] {
        repo.create(WaiterCreate {
            name: name.to_string(),
            user: None,
        })
        .await?;
    }

    tracing::info!("Seeded waiters");
    Ok(())
}

async fn seed_tables(db: &Surreal<Db>) -> RepoResult<()> {
    let base = BaseRepository::new(db.clone());
    if base.count("dining_table").await? > 0 {
        return Ok(());
    }

    let repo = DiningTableRepository::new(db.clone());
    for number in 1..=SEED_TABLE_COUNT {
        repo.create(DiningTableCreate { number }).await?;
    }

    tracing::info!(count = SEED_TABLE_COUNT, "Seeded dining tables");
    Ok(())
}

async fn seed_menu(db: &Surreal<Db>) -> RepoResult<()> {
    let base = BaseRepository::new(db.clone());
    if base.count("menu_item").await? > 0 {
        return Ok(());
    }

    let repo = MenuItemRepository::new(db.clone());
    let fixtures = [
        ("Margherita Pizza", 9.5, "Mains", Some(2.8)),
        ("Carbonara", 11.0, "Mains", Some(3.1)),
        ("Caesar Salad", 7.0, "Starters", Some(1.9)),
        ("Bruschetta", 5.5, "Starters", None),
        ("Tiramisu", 6.0, "Desserts", Some(1.5)),
        ("Espresso", 2.0, "Drinks", Some(0.4)),
    ];

    for (name, price, category, cost_of_goods) in fixtures {
        repo.create(MenuItemCreate {
            name: name.to_string(),
            price,
            category: category.to_string(),
            cost_of_goods,
            ingredients: Vec::new(),
            image_url: None,
        })
        .await?;
    }

    tracing::info!("Seeded menu items");
    Ok(())
}
