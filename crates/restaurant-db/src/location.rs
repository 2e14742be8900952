//! Restaurant location operations.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{Location, NewLocation};
use crate::validation::validate_required;

/// Add a location to a restaurant.
pub async fn create_location(
    pool: &SqlitePool,
    restaurant_id: i64,
    location: &NewLocation,
) -> Result<Location> {
    validate_required("address line 1", &location.address_line1)?;
    validate_required("city", &location.city)?;

    let result = sqlx::query(
        r#"
        INSERT INTO locations (
            restaurant_id, address_line1, address_line2, city, state, postal_code,
            country, phone, email, latitude, longitude, is_primary
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(restaurant_id)
    .bind(&location.address_line1)
    .bind(&location.address_line2)
    .bind(&location.city)
    .bind(&location.state)
    .bind(&location.postal_code)
    .bind(&location.country)
    .bind(&location.phone)
    .bind(&location.email)
    .bind(location.latitude)
    .bind(location.longitude)
    .bind(location.is_primary)
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, Location>(
        r#"
        SELECT id, restaurant_id, address_line1, address_line2, city, state, postal_code,
               country, phone, email, latitude, longitude, is_primary
        FROM locations
        WHERE id = ?
        "#,
    )
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// List a restaurant's locations in insertion order.
pub async fn list_locations(pool: &SqlitePool, restaurant_id: i64) -> Result<Vec<Location>> {
    let rows = sqlx::query_as::<_, Location>(
        r#"
        SELECT id, restaurant_id, address_line1, address_line2, city, state, postal_code,
               country, phone, email, latitude, longitude, is_primary
        FROM locations
        WHERE restaurant_id = ?
        ORDER BY id
        "#,
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
