//! Operating hours operations.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{NewOperatingHours, OperatingHours};
use crate::validation::{validate_day_of_week, validate_time};

/// Day labels indexed by `day_of_week` (0 = Monday).
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Label for a day-of-week value, or `None` when out of range.
pub fn day_name(day_of_week: i64) -> Option<&'static str> {
    usize::try_from(day_of_week)
        .ok()
        .and_then(|index| DAY_NAMES.get(index).copied())
}

/// Add an hours row for one day.
pub async fn create_hours(
    pool: &SqlitePool,
    restaurant_id: i64,
    hours: &NewOperatingHours,
) -> Result<OperatingHours> {
    validate_day_of_week(hours.day_of_week)?;
    validate_time("open time", &hours.open_time)?;
    validate_time("close time", &hours.close_time)?;

    let result = sqlx::query(
        r#"
        INSERT INTO operating_hours (restaurant_id, day_of_week, open_time, close_time, is_closed)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(restaurant_id)
    .bind(hours.day_of_week)
    .bind(&hours.open_time)
    .bind(&hours.close_time)
    .bind(hours.is_closed)
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, OperatingHours>(
        r#"
        SELECT id, restaurant_id, day_of_week, open_time, close_time, is_closed
        FROM operating_hours
        WHERE id = ?
        "#,
    )
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// List a restaurant's hours ordered by day, then by id.
pub async fn list_hours(pool: &SqlitePool, restaurant_id: i64) -> Result<Vec<OperatingHours>> {
    let rows = sqlx::query_as::<_, OperatingHours>(
        r#"
        SELECT id, restaurant_id, day_of_week, open_time, close_time, is_closed
        FROM operating_hours
        WHERE restaurant_id = ?
        ORDER BY day_of_week, id
        "#,
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Whether the restaurant is open on `day_of_week` at wall-clock `time`.
///
/// Uses the lowest-id row for the day. Times are compared as strings, so a
/// range that crosses midnight (close before open) is never open. Both
/// sides should use the same format ("HH:MM" or "HH:MM:SS").
pub fn is_open_at(hours: &[OperatingHours], day_of_week: i64, time: &str) -> bool {
    let row = hours
        .iter()
        .filter(|row| row.day_of_week == day_of_week)
        .min_by_key(|row| row.id);

    match row {
        Some(row) if !row.is_closed => {
            row.open_time.as_str() <= time && time <= row.close_time.as_str()
        }
        _ => false,
    }
}
