//! Restaurant CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewRestaurant, Restaurant};
use crate::validation::validate_required;

const RESTAURANT_COLUMNS: &str = "id, name, description, logo_url, website, primary_color, \
     secondary_color, chatbot_greeting, cuisine_type, price_range, is_active, \
     cached_context_key, context_refreshed_at, created_at, updated_at";

/// Create a new restaurant and return the stored row.
pub async fn create_restaurant(pool: &SqlitePool, restaurant: &NewRestaurant) -> Result<Restaurant> {
    validate_required("restaurant name", &restaurant.name)?;

    let result = sqlx::query(
        r#"
        INSERT INTO restaurants (
            name, description, logo_url, website, primary_color, secondary_color,
            chatbot_greeting, cuisine_type, price_range
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&restaurant.name)
    .bind(&restaurant.description)
    .bind(&restaurant.logo_url)
    .bind(&restaurant.website)
    .bind(&restaurant.primary_color)
    .bind(&restaurant.secondary_color)
    .bind(&restaurant.chatbot_greeting)
    .bind(&restaurant.cuisine_type)
    .bind(&restaurant.price_range)
    .execute(pool)
    .await?;

    get_restaurant(pool, result.last_insert_rowid()).await
}

/// Get a restaurant by ID.
pub async fn get_restaurant(pool: &SqlitePool, id: i64) -> Result<Restaurant> {
    find_restaurant(pool, id)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Restaurant", id))
}

/// Get a restaurant by ID, returning `None` when it does not exist.
pub async fn find_restaurant(pool: &SqlitePool, id: i64) -> Result<Option<Restaurant>> {
    let sql = format!("SELECT {} FROM restaurants WHERE id = ?", RESTAURANT_COLUMNS);
    let restaurant = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(restaurant)
}

/// List all restaurants.
pub async fn list_restaurants(pool: &SqlitePool) -> Result<Vec<Restaurant>> {
    let sql = format!("SELECT {} FROM restaurants ORDER BY id", RESTAURANT_COLUMNS);
    let restaurants = sqlx::query_as::<_, Restaurant>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(restaurants)
}

/// Update a restaurant's display attributes.
///
/// The cache pointer columns are left alone; use [`set_context_pointer`]
/// and [`clear_context_pointer`] for those.
pub async fn update_restaurant(pool: &SqlitePool, restaurant: &Restaurant) -> Result<()> {
    validate_required("restaurant name", &restaurant.name)?;

    let result = sqlx::query(
        r#"
        UPDATE restaurants
        SET name = ?, description = ?, logo_url = ?, website = ?, primary_color = ?,
            secondary_color = ?, chatbot_greeting = ?, cuisine_type = ?, price_range = ?,
            is_active = ?, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(&restaurant.name)
    .bind(&restaurant.description)
    .bind(&restaurant.logo_url)
    .bind(&restaurant.website)
    .bind(&restaurant.primary_color)
    .bind(&restaurant.secondary_color)
    .bind(&restaurant.chatbot_greeting)
    .bind(&restaurant.cuisine_type)
    .bind(&restaurant.price_range)
    .bind(restaurant.is_active)
    .bind(restaurant.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("Restaurant", restaurant.id));
    }

    Ok(())
}

/// Delete a restaurant and, through cascading foreign keys, everything it owns.
pub async fn delete_restaurant(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM restaurants
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("Restaurant", id));
    }

    Ok(())
}

/// Point the restaurant at a new context snapshot.
pub async fn set_context_pointer(
    pool: &SqlitePool,
    id: i64,
    cache_key: &str,
    refreshed_at: &str,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE restaurants
        SET cached_context_key = ?, context_refreshed_at = ?
        WHERE id = ?
        "#,
    )
    .bind(cache_key)
    .bind(refreshed_at)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("Restaurant", id));
    }

    Ok(())
}

/// Forget the restaurant's context snapshot pointer.
pub async fn clear_context_pointer(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE restaurants
        SET cached_context_key = NULL, context_refreshed_at = NULL
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("Restaurant", id));
    }

    Ok(())
}

/// Count total restaurants.
pub async fn count_restaurants(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM restaurants
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
