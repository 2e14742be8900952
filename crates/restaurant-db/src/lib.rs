//! SQLite persistence layer for restaurant chatbot data.
//!
//! This crate provides async database operations for restaurants, their
//! locations, hours, menus, FAQs and reservation policy, plus the log of
//! chatbot exchanges, using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use restaurant_db::{models::NewRestaurant, restaurant, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:restaurant_chatbot.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create a restaurant
//!     let created = restaurant::create_restaurant(
//!         db.pool(),
//!         &NewRestaurant {
//!             name: "Bella Italia".to_string(),
//!             cuisine_type: Some("Italian".to_string()),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//!     println!("created restaurant {}", created.id);
//!
//!     Ok(())
//! }
//! ```

pub mod chatbot_log;
pub mod error;
pub mod faq;
pub mod hours;
pub mod location;
pub mod menu;
pub mod models;
pub mod reservation;
pub mod restaurant;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{
    ChatbotLog, Faq, Location, Menu, MenuCategory, MenuItem, MenuItemIngredient, NewChatbotLog,
    NewFaq, NewIngredient, NewLocation, NewMenu, NewMenuCategory, NewMenuItem, NewOperatingHours,
    NewRestaurant, OperatingHours, ReservationPolicy, ReservationSettings, Restaurant,
};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> restaurant_db::Result<()> {
    /// // File database
    /// let db = restaurant_db::Database::connect("sqlite:data/restaurants.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = restaurant_db::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_restaurant_crud() {
        let db = test_db().await;

        // Create
        let created = restaurant::create_restaurant(
            db.pool(),
            &NewRestaurant {
                name: "Bella Italia".to_string(),
                cuisine_type: Some("Italian".to_string()),
                price_range: Some("$$".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(created.is_active);
        assert!(created.cached_context_key.is_none());

        // Read
        let fetched = restaurant::get_restaurant(db.pool(), created.id).await.unwrap();
        assert_eq!(fetched.name, "Bella Italia");

        // Update
        let updated = Restaurant {
            chatbot_greeting: Some("Benvenuti!".to_string()),
            ..fetched
        };
        restaurant::update_restaurant(db.pool(), &updated).await.unwrap();
        let fetched = restaurant::get_restaurant(db.pool(), created.id).await.unwrap();
        assert_eq!(fetched.chatbot_greeting.as_deref(), Some("Benvenuti!"));

        // List
        let restaurants = restaurant::list_restaurants(db.pool()).await.unwrap();
        assert_eq!(restaurants.len(), 1);

        // Delete
        restaurant::delete_restaurant(db.pool(), created.id).await.unwrap();
        let result = restaurant::get_restaurant(db.pool(), created.id).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = test_db().await;

        let result = restaurant::create_restaurant(db.pool(), &NewRestaurant::named("  ")).await;
        assert!(matches!(
            result,
            Err(DatabaseError::Validation(ValidationError::Empty(_)))
        ));
        assert_eq!(restaurant::count_restaurants(db.pool()).await.unwrap(), 0);
    }
}
