//! FAQ operations.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{Faq, NewFaq};
use crate::validation::validate_required;

/// Add an FAQ entry to a restaurant.
pub async fn create_faq(pool: &SqlitePool, restaurant_id: i64, faq: &NewFaq) -> Result<Faq> {
    validate_required("question", &faq.question)?;
    validate_required("answer", &faq.answer)?;

    let result = sqlx::query(
        r#"
        INSERT INTO faqs (restaurant_id, question, answer, category, display_order, is_active)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(restaurant_id)
    .bind(&faq.question)
    .bind(&faq.answer)
    .bind(&faq.category)
    .bind(faq.display_order)
    .bind(faq.is_active)
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, Faq>(
        r#"
        SELECT id, restaurant_id, question, answer, category, display_order, is_active
        FROM faqs
        WHERE id = ?
        "#,
    )
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// List all FAQs of a restaurant, active or not, in insertion order.
pub async fn list_faqs(pool: &SqlitePool, restaurant_id: i64) -> Result<Vec<Faq>> {
    let rows = sqlx::query_as::<_, Faq>(
        r#"
        SELECT id, restaurant_id, question, answer, category, display_order, is_active
        FROM faqs
        WHERE restaurant_id = ?
        ORDER BY id
        "#,
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
