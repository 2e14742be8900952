//! Folds a restaurant's relational rows into a [`ContextDocument`].

use std::collections::HashMap;

use indexmap::IndexMap;
use restaurant_db::{
    faq, hours, location, menu, reservation, restaurant, Database, Faq, Location, Menu,
    MenuCategory, MenuItem, MenuItemIngredient, OperatingHours, ReservationSettings, Restaurant,
};
use tracing::{debug, warn};

use crate::context::{
    CategoryEntry, ContextDocument, DietaryInfo, FaqEntry, HoursEntry, ItemEntry, LocationEntry,
    MenuEntry, ReservationEntry, RestaurantInfo, DEFAULT_FAQ_CATEGORY, SCHEMA_VERSION,
};
use crate::error::AssembleError;

/// Builds context documents from the restaurant store.
///
/// Assembly only reads: one query for the restaurant and one per child
/// table or menu level, regardless of how much data the restaurant has.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    db: Database,
}

impl ContextAssembler {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Build the context document for a restaurant.
    pub async fn assemble(&self, restaurant_id: i64) -> Result<ContextDocument, AssembleError> {
        let pool = self.db.pool();

        let restaurant = restaurant::find_restaurant(pool, restaurant_id)
            .await?
            .ok_or(AssembleError::NotFound(restaurant_id))?;

        let locations = location::list_locations(pool, restaurant_id).await?;
        let hours = hours::list_hours(pool, restaurant_id).await?;
        let menus = menu::list_menus(pool, restaurant_id).await?;
        let categories = menu::list_categories(pool, restaurant_id).await?;
        let items = menu::list_items(pool, restaurant_id).await?;
        let ingredients = menu::list_ingredients(pool, restaurant_id).await?;
        let faqs = faq::list_faqs(pool, restaurant_id).await?;
        let reservations = reservation::get_reservation_settings(pool, restaurant_id).await?;

        let document = ContextDocument {
            schema_version: SCHEMA_VERSION,
            restaurant_info: restaurant_info(&restaurant),
            locations: format_locations(&locations),
            hours: format_hours(&hours),
            menus: build_menus(&menus, &categories, &items, &ingredients),
            faqs: group_faqs(&faqs),
            reservations: reservations.as_ref().map(reservation_entry),
        };

        debug!(
            "Assembled context for restaurant {}: {} menus, {} items, {} FAQ groups",
            restaurant_id,
            document.menus.len(),
            document.item_count(),
            document.faqs.len()
        );

        Ok(document)
    }
}

fn restaurant_info(restaurant: &Restaurant) -> RestaurantInfo {
    RestaurantInfo {
        name: restaurant.name.clone(),
        description: restaurant.description.clone(),
        cuisine_type: restaurant.cuisine_type.clone(),
        price_range: restaurant.price_range.clone(),
        website: restaurant.website.clone(),
    }
}

/// Join the non-empty address parts with ", ".
pub fn format_address(location: &Location) -> String {
    [
        Some(location.address_line1.as_str()),
        location.address_line2.as_deref(),
        Some(location.city.as_str()),
        location.state.as_deref(),
        Some(location.postal_code.as_str()),
        Some(location.country.as_str()),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

/// Flatten locations, keeping the primary flag only on the lowest-id
/// location that carries it.
pub fn format_locations(locations: &[Location]) -> Vec<LocationEntry> {
    let primary_id = locations
        .iter()
        .filter(|location| location.is_primary)
        .map(|location| location.id)
        .min();

    let flagged = locations.iter().filter(|location| location.is_primary).count();
    if flagged > 1 {
        if let Some(first) = locations.first() {
            warn!(
                "Restaurant {} has {} primary locations; using location {:?}",
                first.restaurant_id, flagged, primary_id
            );
        }
    }

    locations
        .iter()
        .map(|location| LocationEntry {
            address: format_address(location),
            phone: location.phone.clone(),
            email: location.email.clone(),
            is_primary: Some(location.id) == primary_id,
        })
        .collect()
}

/// One entry per day that has a row, Monday first.
///
/// When several rows exist for a day the lowest id wins. A closed day
/// always has `hours = None`.
pub fn format_hours(rows: &[OperatingHours]) -> Vec<HoursEntry> {
    let mut by_day: [Option<&OperatingHours>; 7] = [None; 7];

    for row in rows {
        let Some(slot) = usize::try_from(row.day_of_week)
            .ok()
            .and_then(|day| by_day.get_mut(day))
        else {
            warn!(
                "Skipping hours row {} with invalid day {}",
                row.id, row.day_of_week
            );
            continue;
        };
        if slot.map_or(true, |existing| row.id < existing.id) {
            *slot = Some(row);
        }
    }

    by_day
        .iter()
        .zip(hours::DAY_NAMES)
        .filter_map(|(row, day)| {
            row.map(|row| HoursEntry {
                day: day.to_string(),
                is_closed: row.is_closed,
                hours: (!row.is_closed)
                    .then(|| format!("{} - {}", row.open_time, row.close_time)),
            })
        })
        .collect()
}

/// Nest the menu levels, keeping active menus and items only and dropping
/// categories left without items.
///
/// Input slices are expected in display order (as the store lists them).
pub fn build_menus(
    menus: &[Menu],
    categories: &[MenuCategory],
    items: &[MenuItem],
    ingredients: &[MenuItemIngredient],
) -> Vec<MenuEntry> {
    let mut ingredients_by_item: HashMap<i64, Vec<String>> = HashMap::new();
    for ingredient in ingredients {
        ingredients_by_item
            .entry(ingredient.menu_item_id)
            .or_default()
            .push(ingredient.name.clone());
    }

    let mut items_by_category: HashMap<i64, Vec<ItemEntry>> = HashMap::new();
    for item in items.iter().filter(|item| item.is_active) {
        let entry = item_entry(
            item,
            ingredients_by_item.remove(&item.id).unwrap_or_default(),
        );
        items_by_category
            .entry(item.category_id)
            .or_default()
            .push(entry);
    }

    let mut categories_by_menu: HashMap<i64, Vec<CategoryEntry>> = HashMap::new();
    for category in categories {
        let Some(items) = items_by_category.remove(&category.id) else {
            continue;
        };
        categories_by_menu
            .entry(category.menu_id)
            .or_default()
            .push(CategoryEntry {
                id: category.id,
                name: category.name.clone(),
                description: category.description.clone(),
                items,
            });
    }

    menus
        .iter()
        .filter(|menu| menu.is_active)
        .map(|menu| MenuEntry {
            id: menu.id,
            name: menu.name.clone(),
            description: menu.description.clone(),
            start_time: menu.start_time.clone(),
            end_time: menu.end_time.clone(),
            categories: categories_by_menu.remove(&menu.id).unwrap_or_default(),
        })
        .collect()
}

fn item_entry(item: &MenuItem, ingredients: Vec<String>) -> ItemEntry {
    ItemEntry {
        id: item.id,
        name: item.name.clone(),
        description: item.description.clone(),
        price: item.price,
        image_url: item.image_url.clone(),
        dietary_info: DietaryInfo {
            vegetarian: item.is_vegetarian,
            vegan: item.is_vegan,
            gluten_free: item.is_gluten_free,
            contains_nuts: item.contains_nuts,
            contains_dairy: item.contains_dairy,
            contains_alcohol: item.contains_alcohol,
            spice_level: item.spice_level,
        },
        popular: item.popular,
        chef_special: item.chef_special,
        ingredients,
    }
}

/// Group active FAQs by category in first-seen order, each group sorted by
/// display order. Blank categories fall under [`DEFAULT_FAQ_CATEGORY`].
pub fn group_faqs(faqs: &[Faq]) -> IndexMap<String, Vec<FaqEntry>> {
    let mut groups: IndexMap<String, Vec<(i64, FaqEntry)>> = IndexMap::new();

    for faq in faqs.iter().filter(|faq| faq.is_active) {
        let category = faq
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or(DEFAULT_FAQ_CATEGORY);

        groups.entry(category.to_string()).or_default().push((
            faq.display_order,
            FaqEntry {
                question: faq.question.clone(),
                answer: faq.answer.clone(),
            },
        ));
    }

    groups
        .into_iter()
        .map(|(category, mut entries)| {
            entries.sort_by_key(|(order, _)| *order);
            (category, entries.into_iter().map(|(_, entry)| entry).collect())
        })
        .collect()
}

fn reservation_entry(settings: &ReservationSettings) -> ReservationEntry {
    ReservationEntry {
        accepts_reservations: settings.accepts_reservations,
        min_party_size: settings.min_party_size,
        max_party_size: settings.max_party_size,
        reservation_interval: settings.reservation_interval,
        advance_reservation_days: settings.advance_reservation_days,
        special_instructions: settings.special_instructions.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours_row(id: i64, day: i64, is_closed: bool) -> OperatingHours {
        OperatingHours {
            id,
            restaurant_id: 1,
            day_of_week: day,
            open_time: "11:00".to_string(),
            close_time: "22:00".to_string(),
            is_closed,
        }
    }

    fn faq_row(id: i64, category: Option<&str>, order: i64, question: &str) -> Faq {
        Faq {
            id,
            restaurant_id: 1,
            question: question.to_string(),
            answer: format!("Answer to {}", question),
            category: category.map(str::to_string),
            display_order: order,
            is_active: true,
        }
    }

    fn location_row(id: i64, line2: Option<&str>, state: Option<&str>, primary: bool) -> Location {
        Location {
            id,
            restaurant_id: 1,
            address_line1: "12 Via Roma".to_string(),
            address_line2: line2.map(str::to_string),
            city: "Boston".to_string(),
            state: state.map(str::to_string),
            postal_code: "02110".to_string(),
            country: "USA".to_string(),
            phone: Some("555-0100".to_string()),
            email: None,
            latitude: None,
            longitude: None,
            is_primary: primary,
        }
    }

    #[test]
    fn test_closed_day_has_null_hours() {
        let entries = format_hours(&[hours_row(1, 0, true), hours_row(2, 6, false)]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].day, "Monday");
        assert!(entries[0].is_closed);
        assert!(entries[0].hours.is_none());
        assert_eq!(entries[1].day, "Sunday");
        assert_eq!(entries[1].hours.as_deref(), Some("11:00 - 22:00"));
    }

    #[test]
    fn test_hours_follow_day_order_and_lowest_id() {
        let mut later = hours_row(5, 2, false);
        later.open_time = "09:00".to_string();
        let rows = vec![hours_row(9, 4, false), later, hours_row(3, 2, true), hours_row(7, 9, false)];

        let entries = format_hours(&rows);
        let days: Vec<_> = entries.iter().map(|e| e.day.as_str()).collect();
        assert_eq!(days, vec!["Wednesday", "Friday"]);
        assert!(entries[0].is_closed);
    }

    #[test]
    fn test_faq_grouping_is_stable() {
        let faqs = vec![
            faq_row(1, Some("Menu"), 2, "Do you have vegan pasta?"),
            faq_row(2, Some("Reservations"), 1, "Can I book online?"),
            faq_row(3, Some("Menu"), 1, "Is the bread homemade?"),
        ];

        let groups = group_faqs(&faqs);
        let keys: Vec<_> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Menu", "Reservations"]);

        let menu: Vec<_> = groups["Menu"].iter().map(|f| f.question.as_str()).collect();
        assert_eq!(menu, vec!["Is the bread homemade?", "Do you have vegan pasta?"]);
    }

    #[test]
    fn test_faq_blank_category_and_inactive() {
        let mut hidden = faq_row(3, Some("Menu"), 0, "Hidden?");
        hidden.is_active = false;
        let faqs = vec![faq_row(1, None, 0, "Parking?"), faq_row(2, Some("  "), 1, "Wifi?"), hidden];

        let groups = group_faqs(&faqs);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[DEFAULT_FAQ_CATEGORY].len(), 2);
    }

    #[test]
    fn test_format_address_skips_empty_parts() {
        assert_eq!(
            format_address(&location_row(1, None, Some("MA"), false)),
            "12 Via Roma, Boston, MA, 02110, USA"
        );
        assert_eq!(
            format_address(&location_row(1, Some(""), None, false)),
            "12 Via Roma, Boston, 02110, USA"
        );
    }

    #[test]
    fn test_primary_tie_break_lowest_id() {
        let locations = vec![
            location_row(4, None, None, true),
            location_row(2, None, None, true),
            location_row(3, None, None, false),
        ];

        let entries = format_locations(&locations);
        let flags: Vec<_> = entries.iter().map(|e| e.is_primary).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn test_build_menus_filters_inactive() {
        let menus = vec![
            Menu {
                id: 1,
                restaurant_id: 1,
                name: "Dinner".to_string(),
                description: None,
                start_time: Some("17:00".to_string()),
                end_time: Some("22:00".to_string()),
                is_active: true,
            },
            Menu {
                id: 2,
                restaurant_id: 1,
                name: "Retired".to_string(),
                description: None,
                start_time: None,
                end_time: None,
                is_active: false,
            },
        ];
        let category = |id: i64, menu_id: i64, name: &str| MenuCategory {
            id,
            menu_id,
            name: name.to_string(),
            description: None,
            display_order: 0,
        };
        let categories = vec![category(10, 1, "Pasta"), category(11, 1, "Seasonal"), category(12, 2, "Old")];
        let item = |id: i64, category_id: i64, is_active: bool| MenuItem {
            id,
            category_id,
            name: format!("Item {}", id),
            description: None,
            price: 12.5,
            image_url: None,
            is_vegetarian: true,
            is_vegan: false,
            is_gluten_free: false,
            spice_level: Some(1),
            contains_nuts: false,
            contains_dairy: true,
            contains_alcohol: false,
            popular: false,
            chef_special: false,
            display_order: 0,
            is_active,
        };
        let items = vec![item(100, 10, true), item(101, 11, false), item(102, 12, true)];
        let ingredients = vec![MenuItemIngredient {
            id: 1,
            menu_item_id: 100,
            name: "Basil".to_string(),
            is_allergen: false,
        }];

        let built = build_menus(&menus, &categories, &items, &ingredients);

        assert_eq!(built.len(), 1);
        assert_eq!(built[0].categories.len(), 1);
        let pasta = &built[0].categories[0];
        assert_eq!(pasta.name, "Pasta");
        assert_eq!(pasta.items[0].ingredients, vec!["Basil"]);
        assert!(pasta.items[0].dietary_info.vegetarian);
        assert!(pasta.items[0].dietary_info.contains_dairy);
    }

    #[test]
    fn test_no_menus() {
        assert!(build_menus(&[], &[], &[], &[]).is_empty());
    }
}
