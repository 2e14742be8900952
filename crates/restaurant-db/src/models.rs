//! Database models.
//!
//! Row types derive `FromRow` and mirror their tables one to one. The
//! `New*` types carry the caller-supplied fields for inserts; ids and
//! timestamps are assigned by the database.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A restaurant and its display attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    /// UI branding colors.
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    /// Custom greeting used by the chatbot.
    pub chatbot_greeting: Option<String>,
    pub cuisine_type: Option<String>,
    /// Price tier such as "$$".
    pub price_range: Option<String>,
    pub is_active: bool,
    /// Blob key of the most recent context snapshot.
    pub cached_context_key: Option<String>,
    /// When the snapshot pointer was last set.
    pub context_refreshed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields for creating a restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRestaurant {
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub chatbot_greeting: Option<String>,
    pub cuisine_type: Option<String>,
    pub price_range: Option<String>,
}

impl NewRestaurant {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A physical location of a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: i64,
    pub restaurant_id: i64,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_primary: bool,
}

/// Fields for creating a location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_primary: bool,
}

/// Opening hours for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OperatingHours {
    pub id: i64,
    pub restaurant_id: i64,
    /// 0 = Monday through 6 = Sunday.
    pub day_of_week: i64,
    /// Wall-clock time, "HH:MM" or "HH:MM:SS".
    pub open_time: String,
    pub close_time: String,
    pub is_closed: bool,
}

/// Fields for creating an hours row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOperatingHours {
    pub day_of_week: i64,
    pub open_time: String,
    pub close_time: String,
    pub is_closed: bool,
}

impl NewOperatingHours {
    /// An open day.
    pub fn open(day_of_week: i64, open_time: &str, close_time: &str) -> Self {
        Self {
            day_of_week,
            open_time: open_time.to_string(),
            close_time: close_time.to_string(),
            is_closed: false,
        }
    }

    /// A closed day. Stored times are kept for reference only.
    pub fn closed(day_of_week: i64) -> Self {
        Self {
            day_of_week,
            open_time: "00:00".to_string(),
            close_time: "00:00".to_string(),
            is_closed: true,
        }
    }
}

/// A menu (Breakfast, Lunch, Dinner, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Menu {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Availability window.
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_active: bool,
}

/// Fields for creating a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMenu {
    pub name: String,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_active: bool,
}

impl NewMenu {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            start_time: None,
            end_time: None,
            is_active: true,
        }
    }
}

/// A section of a menu (Appetizers, Entrees, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MenuCategory {
    pub id: i64,
    pub menu_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i64,
}

/// Fields for creating a menu category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMenuCategory {
    pub name: String,
    pub description: Option<String>,
    pub display_order: i64,
}

impl NewMenuCategory {
    pub fn named(name: impl Into<String>, display_order: i64) -> Self {
        Self {
            name: name.into(),
            description: None,
            display_order,
        }
    }
}

/// A dish on a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MenuItem {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    /// 0 (not spicy) to 5 (very spicy).
    pub spice_level: Option<i64>,
    pub contains_nuts: bool,
    pub contains_dairy: bool,
    pub contains_alcohol: bool,
    pub popular: bool,
    pub chef_special: bool,
    pub display_order: i64,
    pub is_active: bool,
}

/// Fields for creating a menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub spice_level: Option<i64>,
    pub contains_nuts: bool,
    pub contains_dairy: bool,
    pub contains_alcohol: bool,
    pub popular: bool,
    pub chef_special: bool,
    pub display_order: i64,
    pub is_active: bool,
    /// Ingredients inserted together with the item.
    pub ingredients: Vec<NewIngredient>,
}

impl NewMenuItem {
    /// An active item with no dietary flags set.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            image_url: None,
            is_vegetarian: false,
            is_vegan: false,
            is_gluten_free: false,
            spice_level: None,
            contains_nuts: false,
            contains_dairy: false,
            contains_alcohol: false,
            popular: false,
            chef_special: false,
            display_order: 0,
            is_active: true,
            ingredients: Vec::new(),
        }
    }
}

/// An ingredient of a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MenuItemIngredient {
    pub id: i64,
    pub menu_item_id: i64,
    pub name: String,
    pub is_allergen: bool,
}

/// Fields for creating an ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    pub is_allergen: bool,
}

impl NewIngredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_allergen: false,
        }
    }

    pub fn allergen(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_allergen: true,
        }
    }
}

/// A frequently asked question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Faq {
    pub id: i64,
    pub restaurant_id: i64,
    pub question: String,
    pub answer: String,
    /// Free-text grouping label (Reservations, Menu, Hours, ...).
    pub category: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
}

/// Fields for creating an FAQ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
}

impl NewFaq {
    pub fn new(
        category: Option<&str>,
        question: impl Into<String>,
        answer: impl Into<String>,
        display_order: i64,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            category: category.map(str::to_string),
            display_order,
            is_active: true,
        }
    }
}

/// Reservation policy of a restaurant (at most one row per restaurant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ReservationSettings {
    pub id: i64,
    pub restaurant_id: i64,
    pub accepts_reservations: bool,
    pub min_party_size: i64,
    pub max_party_size: i64,
    /// Slot granularity in minutes.
    pub reservation_interval: i64,
    /// How many days ahead a booking can be made.
    pub advance_reservation_days: i64,
    pub special_instructions: Option<String>,
}

/// Fields for creating or replacing reservation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationPolicy {
    pub accepts_reservations: bool,
    pub min_party_size: i64,
    pub max_party_size: i64,
    pub reservation_interval: i64,
    pub advance_reservation_days: i64,
    pub special_instructions: Option<String>,
}

impl Default for ReservationPolicy {
    fn default() -> Self {
        Self {
            accepts_reservations: true,
            min_party_size: 1,
            max_party_size: 10,
            reservation_interval: 30,
            advance_reservation_days: 30,
            special_instructions: None,
        }
    }
}

/// One logged chatbot exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChatbotLog {
    pub id: i64,
    pub restaurant_id: i64,
    pub session_id: String,
    pub user_input: String,
    pub chatbot_response: String,
    /// Upstream error detail for failed exchanges.
    pub error_detail: Option<String>,
    pub timestamp: String,
    /// User rating, 1 to 5.
    pub feedback_rating: Option<i64>,
    pub feedback_text: Option<String>,
}

impl ChatbotLog {
    /// Whether the exchange failed to produce a model answer.
    pub fn is_failed(&self) -> bool {
        self.error_detail.is_some()
    }
}

/// Fields for recording an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatbotLog<'a> {
    pub restaurant_id: i64,
    pub session_id: &'a str,
    pub user_input: &'a str,
    pub chatbot_response: &'a str,
    pub error_detail: Option<&'a str>,
    pub timestamp: &'a str,
}
