//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all menu items
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find available menu items only (waiter ordering view)
    pub async fn find_available(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE is_available = true ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let item = MenuItem {
            id: None,
            name: data.name,
            price: data.price,
            category: data.category,
            is_available: true,
            cost_of_goods: data.cost_of_goods,
            ingredients: data.ingredients,
            image_url: data.image_url,
        };

        let created: Option<MenuItem> = self.base.db().create("menu_item").content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item.
    ///
    /// Price edits only affect future orders; existing orders keep their
    /// creation-time snapshot.
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        let name = data.name.unwrap_or(existing.name);
        let price = data.price.unwrap_or(existing.price);
        let category = data.category.unwrap_or(existing.category);
        let is_available = data.is_available.unwrap_or(existing.is_available);
        let cost_of_goods = data.cost_of_goods.or(existing.cost_of_goods);
        let ingredients = data.ingredients.unwrap_or(existing.ingredients);
        let image_url = data.image_url.or(existing.image_url);

        self.base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name,
                    price = $price,
                    category = $category,
                    is_available = $is_available,
                    cost_of_goods = $cost_of_goods,
                    ingredients = $ingredients,
                    image_url = $image_url"#,
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("price", price))
            .bind(("category", category))
            .bind(("is_available", is_available))
            .bind(("cost_of_goods", cost_of_goods))
            .bind(("ingredients", ingredients))
            .bind(("image_url", image_url))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
