//! Reservation settings operations.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{ReservationPolicy, ReservationSettings};
use crate::validation::{validate_party_size, ValidationError};

/// Create or replace the reservation settings of a restaurant.
pub async fn upsert_reservation_settings(
    pool: &SqlitePool,
    restaurant_id: i64,
    policy: &ReservationPolicy,
) -> Result<ReservationSettings> {
    validate_party_size(policy.min_party_size, policy.max_party_size)?;
    if policy.reservation_interval <= 0 {
        return Err(ValidationError::OutOfRange {
            field: "reservation interval".to_string(),
            min: 1,
            max: i64::MAX,
            actual: policy.reservation_interval,
        }
        .into());
    }
    if policy.advance_reservation_days < 0 {
        return Err(ValidationError::OutOfRange {
            field: "advance reservation days".to_string(),
            min: 0,
            max: i64::MAX,
            actual: policy.advance_reservation_days,
        }
        .into());
    }

    sqlx::query(
        r#"
        INSERT INTO reservation_settings (
            restaurant_id, accepts_reservations, min_party_size, max_party_size,
            reservation_interval, advance_reservation_days, special_instructions
        )
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(restaurant_id) DO UPDATE SET
            accepts_reservations = excluded.accepts_reservations,
            min_party_size = excluded.min_party_size,
            max_party_size = excluded.max_party_size,
            reservation_interval = excluded.reservation_interval,
            advance_reservation_days = excluded.advance_reservation_days,
            special_instructions = excluded.special_instructions
        "#,
    )
    .bind(restaurant_id)
    .bind(policy.accepts_reservations)
    .bind(policy.min_party_size)
    .bind(policy.max_party_size)
    .bind(policy.reservation_interval)
    .bind(policy.advance_reservation_days)
    .bind(&policy.special_instructions)
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, ReservationSettings>(
        r#"
        SELECT id, restaurant_id, accepts_reservations, min_party_size, max_party_size,
               reservation_interval, advance_reservation_days, special_instructions
        FROM reservation_settings
        WHERE restaurant_id = ?
        "#,
    )
    .bind(restaurant_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Get a restaurant's reservation settings, if it has any.
pub async fn get_reservation_settings(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> Result<Option<ReservationSettings>> {
    let row = sqlx::query_as::<_, ReservationSettings>(
        r#"
        SELECT id, restaurant_id, accepts_reservations, min_party_size, max_party_size,
               reservation_interval, advance_reservation_days, special_instructions
        FROM reservation_settings
        WHERE restaurant_id = ?
        "#,
    )
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
