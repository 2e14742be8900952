//! Menu tree operations: menus, categories, items and ingredients.
//!
//! The `list_*` functions fetch one level of the tree for a whole
//! restaurant in a single query, so assembling a restaurant's full menu
//! costs four queries regardless of its size.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{
    Menu, MenuCategory, MenuItem, MenuItemIngredient, NewMenu, NewMenuCategory, NewMenuItem,
};
use crate::validation::{validate_price, validate_required, validate_spice_level, validate_time};

/// Create a menu under a restaurant.
pub async fn create_menu(pool: &SqlitePool, restaurant_id: i64, menu: &NewMenu) -> Result<Menu> {
    validate_required("menu name", &menu.name)?;
    if let Some(start) = &menu.start_time {
        validate_time("start time", start)?;
    }
    if let Some(end) = &menu.end_time {
        validate_time("end time", end)?;
    }

    let result = sqlx::query(
        r#"
        INSERT INTO menus (restaurant_id, name, description, start_time, end_time, is_active)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(restaurant_id)
    .bind(&menu.name)
    .bind(&menu.description)
    .bind(&menu.start_time)
    .bind(&menu.end_time)
    .bind(menu.is_active)
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, Menu>(
        r#"
        SELECT id, restaurant_id, name, description, start_time, end_time, is_active
        FROM menus
        WHERE id = ?
        "#,
    )
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Create a category under a menu.
pub async fn create_category(
    pool: &SqlitePool,
    menu_id: i64,
    category: &NewMenuCategory,
) -> Result<MenuCategory> {
    validate_required("category name", &category.name)?;

    let result = sqlx::query(
        r#"
        INSERT INTO menu_categories (menu_id, name, description, display_order)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(menu_id)
    .bind(&category.name)
    .bind(&category.description)
    .bind(category.display_order)
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, MenuCategory>(
        r#"
        SELECT id, menu_id, name, description, display_order
        FROM menu_categories
        WHERE id = ?
        "#,
    )
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Create an item and its ingredients under a category.
///
/// The item and its ingredients are written in one transaction.
pub async fn create_item(
    pool: &SqlitePool,
    category_id: i64,
    item: &NewMenuItem,
) -> Result<MenuItem> {
    validate_required("item name", &item.name)?;
    validate_price(item.price)?;
    if let Some(level) = item.spice_level {
        validate_spice_level(level)?;
    }
    for ingredient in &item.ingredients {
        validate_required("ingredient name", &ingredient.name)?;
    }

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO menu_items (
            category_id, name, description, price, image_url, is_vegetarian, is_vegan,
            is_gluten_free, spice_level, contains_nuts, contains_dairy, contains_alcohol,
            popular, chef_special, display_order, is_active
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(category_id)
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.price)
    .bind(&item.image_url)
    .bind(item.is_vegetarian)
    .bind(item.is_vegan)
    .bind(item.is_gluten_free)
    .bind(item.spice_level)
    .bind(item.contains_nuts)
    .bind(item.contains_dairy)
    .bind(item.contains_alcohol)
    .bind(item.popular)
    .bind(item.chef_special)
    .bind(item.display_order)
    .bind(item.is_active)
    .execute(&mut *tx)
    .await?;

    let item_id = result.last_insert_rowid();

    for ingredient in &item.ingredients {
        sqlx::query(
            r#"
            INSERT INTO menu_item_ingredients (menu_item_id, name, is_allergen)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(item_id)
        .bind(&ingredient.name)
        .bind(ingredient.is_allergen)
        .execute(&mut *tx)
        .await?;
    }

    let row = sqlx::query_as::<_, MenuItem>(
        r#"
        SELECT id, category_id, name, description, price, image_url, is_vegetarian, is_vegan,
               is_gluten_free, spice_level, contains_nuts, contains_dairy, contains_alcohol,
               popular, chef_special, display_order, is_active
        FROM menu_items
        WHERE id = ?
        "#,
    )
    .bind(item_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(row)
}

/// Activate or deactivate a menu item.
pub async fn set_item_active(pool: &SqlitePool, item_id: i64, is_active: bool) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE menu_items
        SET is_active = ?
        WHERE id = ?
        "#,
    )
    .bind(is_active)
    .bind(item_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("MenuItem", item_id));
    }

    Ok(())
}

/// Activate or deactivate a whole menu.
pub async fn set_menu_active(pool: &SqlitePool, menu_id: i64, is_active: bool) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE menus
        SET is_active = ?
        WHERE id = ?
        "#,
    )
    .bind(is_active)
    .bind(menu_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("Menu", menu_id));
    }

    Ok(())
}

/// List every menu of a restaurant, ordered by id.
pub async fn list_menus(pool: &SqlitePool, restaurant_id: i64) -> Result<Vec<Menu>> {
    let rows = sqlx::query_as::<_, Menu>(
        r#"
        SELECT id, restaurant_id, name, description, start_time, end_time, is_active
        FROM menus
        WHERE restaurant_id = ?
        ORDER BY id
        "#,
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List every category across a restaurant's menus, by display order then id.
pub async fn list_categories(pool: &SqlitePool, restaurant_id: i64) -> Result<Vec<MenuCategory>> {
    let rows = sqlx::query_as::<_, MenuCategory>(
        r#"
        SELECT c.id, c.menu_id, c.name, c.description, c.display_order
        FROM menu_categories c
        JOIN menus m ON m.id = c.menu_id
        WHERE m.restaurant_id = ?
        ORDER BY c.display_order, c.id
        "#,
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List every item across a restaurant's menus, by display order then id.
pub async fn list_items(pool: &SqlitePool, restaurant_id: i64) -> Result<Vec<MenuItem>> {
    let rows = sqlx::query_as::<_, MenuItem>(
        r#"
        SELECT i.id, i.category_id, i.name, i.description, i.price, i.image_url,
               i.is_vegetarian, i.is_vegan, i.is_gluten_free, i.spice_level,
               i.contains_nuts, i.contains_dairy, i.contains_alcohol, i.popular,
               i.chef_special, i.display_order, i.is_active
        FROM menu_items i
        JOIN menu_categories c ON c.id = i.category_id
        JOIN menus m ON m.id = c.menu_id
        WHERE m.restaurant_id = ?
        ORDER BY i.display_order, i.id
        "#,
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List every ingredient across a restaurant's menu items, by id.
pub async fn list_ingredients(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> Result<Vec<MenuItemIngredient>> {
    let rows = sqlx::query_as::<_, MenuItemIngredient>(
        r#"
        SELECT g.id, g.menu_item_id, g.name, g.is_allergen
        FROM menu_item_ingredients g
        JOIN menu_items i ON i.id = g.menu_item_id
        JOIN menu_categories c ON c.id = i.category_id
        JOIN menus m ON m.id = c.menu_id
        WHERE m.restaurant_id = ?
        ORDER BY g.id
        "#,
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
