//! Chatbot exchange log operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{ChatbotLog, NewChatbotLog};
use crate::validation::{validate_rating, ValidationError};

/// Record one exchange and return its id.
pub async fn insert_log(pool: &SqlitePool, log: &NewChatbotLog<'_>) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO chatbot_logs (
            restaurant_id, session_id, user_input, chatbot_response, error_detail, timestamp
        )
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(log.restaurant_id)
    .bind(log.session_id)
    .bind(log.user_input)
    .bind(log.chatbot_response)
    .bind(log.error_detail)
    .bind(log.timestamp)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Get a log entry by ID.
pub async fn get_log(pool: &SqlitePool, id: i64) -> Result<ChatbotLog> {
    sqlx::query_as::<_, ChatbotLog>(
        r#"
        SELECT id, restaurant_id, session_id, user_input, chatbot_response, error_detail,
               timestamp, feedback_rating, feedback_text
        FROM chatbot_logs
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::not_found("ChatbotLog", id))
}

/// List the exchanges of a session, oldest first.
pub async fn list_session_logs(pool: &SqlitePool, session_id: &str) -> Result<Vec<ChatbotLog>> {
    let rows = sqlx::query_as::<_, ChatbotLog>(
        r#"
        SELECT id, restaurant_id, session_id, user_input, chatbot_response, error_detail,
               timestamp, feedback_rating, feedback_text
        FROM chatbot_logs
        WHERE session_id = ?
        ORDER BY id
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List a restaurant's most recent exchanges, newest first.
pub async fn list_recent_logs(
    pool: &SqlitePool,
    restaurant_id: i64,
    limit: i64,
) -> Result<Vec<ChatbotLog>> {
    let rows = sqlx::query_as::<_, ChatbotLog>(
        r#"
        SELECT id, restaurant_id, session_id, user_input, chatbot_response, error_detail,
               timestamp, feedback_rating, feedback_text
        FROM chatbot_logs
        WHERE restaurant_id = ?
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(restaurant_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Attach a rating and optional comment to a logged exchange.
///
/// The rating is validated before the row is touched. Feedback is recorded
/// once; a second submission for the same entry is rejected.
pub async fn set_feedback(
    pool: &SqlitePool,
    id: i64,
    rating: i64,
    feedback_text: Option<&str>,
) -> Result<()> {
    validate_rating(rating)?;

    let result = sqlx::query(
        r#"
        UPDATE chatbot_logs
        SET feedback_rating = ?, feedback_text = ?
        WHERE id = ? AND feedback_rating IS NULL
        "#,
    )
    .bind(rating)
    .bind(feedback_text)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        let exists = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM chatbot_logs WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        if exists > 0 {
            return Err(ValidationError::FeedbackAlreadySubmitted(id).into());
        }
        return Err(DatabaseError::not_found("ChatbotLog", id));
    }

    Ok(())
}

/// Count logged exchanges for a restaurant.
pub async fn count_logs(pool: &SqlitePool, restaurant_id: i64) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM chatbot_logs WHERE restaurant_id = ?
        "#,
    )
    .bind(restaurant_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
