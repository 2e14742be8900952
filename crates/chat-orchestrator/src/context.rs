//! The context document: a denormalized, chatbot-ready view of one restaurant.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Current document schema version. Cached documents with any other
/// version are rebuilt.
pub const SCHEMA_VERSION: u32 = 1;

/// Label used for FAQs without a category.
pub const DEFAULT_FAQ_CATEGORY: &str = "General";

/// Everything the chatbot knows about a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextDocument {
    pub schema_version: u32,
    pub restaurant_info: RestaurantInfo,
    pub locations: Vec<LocationEntry>,
    pub hours: Vec<HoursEntry>,
    pub menus: Vec<MenuEntry>,
    /// FAQ groups in first-seen category order.
    pub faqs: IndexMap<String, Vec<FaqEntry>>,
    /// Present only when the restaurant has reservation settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservations: Option<ReservationEntry>,
}

impl ContextDocument {
    /// Serialize to the stored JSON form.
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Parse a stored document.
    pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Whether the document was produced by the current schema.
    pub fn is_current(&self) -> bool {
        self.schema_version == SCHEMA_VERSION
    }

    /// The hours entry for a day label such as "Sunday".
    pub fn hours_for(&self, day: &str) -> Option<&HoursEntry> {
        self.hours.iter().find(|entry| entry.day.eq_ignore_ascii_case(day))
    }

    /// The location flagged as primary, if any.
    pub fn primary_location(&self) -> Option<&LocationEntry> {
        self.locations.iter().find(|location| location.is_primary)
    }

    /// Total number of menu items across all menus and categories.
    pub fn item_count(&self) -> usize {
        self.menus
            .iter()
            .flat_map(|menu| &menu.categories)
            .map(|category| category.items.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantInfo {
    pub name: String,
    pub description: Option<String>,
    pub cuisine_type: Option<String>,
    pub price_range: Option<String>,
    pub website: Option<String>,
}

/// A location flattened to a single address line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_primary: bool,
}

/// Hours for one day; `hours` is null when the restaurant is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursEntry {
    pub day: String,
    pub is_closed: bool,
    pub hours: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub categories: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<ItemEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub dietary_info: DietaryInfo,
    pub popular: bool,
    pub chef_special: bool,
    /// Ingredient names in insertion order.
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryInfo {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub contains_nuts: bool,
    pub contains_dairy: bool,
    pub contains_alcohol: bool,
    pub spice_level: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Reservation policy as shown to the chatbot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationEntry {
    pub accepts_reservations: bool,
    pub min_party_size: i64,
    pub max_party_size: i64,
    /// Minutes between bookable slots.
    pub reservation_interval: i64,
    pub advance_reservation_days: i64,
    pub special_instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContextDocument {
        ContextDocument {
            schema_version: SCHEMA_VERSION,
            restaurant_info: RestaurantInfo {
                name: "Bella Italia".to_string(),
                description: None,
                cuisine_type: Some("Italian".to_string()),
                price_range: Some("$$".to_string()),
                website: None,
            },
            locations: vec![],
            hours: vec![
                HoursEntry {
                    day: "Monday".to_string(),
                    is_closed: true,
                    hours: None,
                },
                HoursEntry {
                    day: "Sunday".to_string(),
                    is_closed: false,
                    hours: Some("12:00 - 21:00".to_string()),
                },
            ],
            menus: vec![],
            faqs: IndexMap::new(),
            reservations: None,
        }
    }

    #[test]
    fn test_reservations_key_omitted_when_absent() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("reservations").is_none());
        assert_eq!(json["schema_version"], 1);
    }

    #[test]
    fn test_closed_hours_serialize_as_null() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json["hours"][0]["hours"].is_null());
        assert_eq!(json["hours"][1]["hours"], "12:00 - 21:00");
    }

    #[test]
    fn test_hours_for() {
        let doc = sample();
        assert_eq!(
            doc.hours_for("sunday").and_then(|h| h.hours.as_deref()),
            Some("12:00 - 21:00")
        );
        assert!(doc.hours_for("Friday").is_none());
    }

    #[test]
    fn test_stored_form_parses_back() {
        let doc = sample();
        let bytes = doc.to_json_bytes().unwrap();
        let parsed = ContextDocument::from_json_slice(&bytes).unwrap();
        assert_eq!(parsed, doc);
        assert!(parsed.is_current());
    }
}
