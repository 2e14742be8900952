//! Shared fixtures for the chat-orchestrator integration tests.

#![allow(dead_code)]

use restaurant_db::{
    faq, hours, location, menu, reservation, restaurant, Database, NewFaq, NewIngredient,
    NewLocation, NewMenu, NewMenuCategory, NewMenuItem, NewOperatingHours, NewRestaurant,
    ReservationPolicy,
};

pub const BELLA_GREETING: &str = "Buongiorno! Welcome to Bella Italia. How can I assist you today?";
pub const SUNDAY_HOURS: &str = "12:00 - 21:00";

pub async fn test_db() -> Database {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    db.migrate().await.unwrap();
    db
}

/// A restaurant with hours, two locations, one active and one retired
/// menu, FAQs in two categories and a reservation policy.
pub async fn seed_bella_italia(db: &Database) -> i64 {
    let pool = db.pool();

    let id = restaurant::create_restaurant(
        pool,
        &NewRestaurant {
            name: "Bella Italia".to_string(),
            description: Some("Family-run trattoria".to_string()),
            cuisine_type: Some("Italian".to_string()),
            price_range: Some("$$".to_string()),
            chatbot_greeting: Some(BELLA_GREETING.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id;

    location::create_location(
        pool,
        id,
        &NewLocation {
            address_line1: "123 Pasta Street".to_string(),
            city: "Foodville".to_string(),
            state: Some("CA".to_string()),
            postal_code: "90210".to_string(),
            country: "USA".to_string(),
            phone: Some("555-123-4567".to_string()),
            is_primary: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();

    hours::create_hours(pool, id, &NewOperatingHours::closed(0)).await.unwrap();
    for day in 1..=5 {
        hours::create_hours(pool, id, &NewOperatingHours::open(day, "11:00", "22:00"))
            .await
            .unwrap();
    }
    hours::create_hours(pool, id, &NewOperatingHours::open(6, "12:00", "21:00"))
        .await
        .unwrap();

    let dinner = menu::create_menu(pool, id, &NewMenu::named("Dinner")).await.unwrap();
    let pasta = menu::create_category(pool, dinner.id, &NewMenuCategory::named("Pasta", 1))
        .await
        .unwrap();
    let seasonal = menu::create_category(pool, dinner.id, &NewMenuCategory::named("Seasonal", 2))
        .await
        .unwrap();

    let mut carbonara = NewMenuItem::new("Spaghetti Carbonara", 16.5);
    carbonara.contains_dairy = true;
    carbonara.popular = true;
    carbonara.ingredients = vec![
        NewIngredient::new("Spaghetti"),
        NewIngredient::allergen("Egg"),
        NewIngredient::new("Pancetta"),
    ];
    menu::create_item(pool, pasta.id, &carbonara).await.unwrap();

    let mut primavera = NewMenuItem::new("Pasta Primavera", 14.0);
    primavera.is_vegetarian = true;
    primavera.display_order = 2;
    menu::create_item(pool, pasta.id, &primavera).await.unwrap();

    let mut truffle = NewMenuItem::new("Truffle Risotto", 28.0);
    truffle.is_active = false;
    menu::create_item(pool, seasonal.id, &truffle).await.unwrap();

    let mut lunch = NewMenu::named("Lunch");
    lunch.is_active = false;
    let lunch = menu::create_menu(pool, id, &lunch).await.unwrap();
    let panini = menu::create_category(pool, lunch.id, &NewMenuCategory::named("Panini", 1))
        .await
        .unwrap();
    menu::create_item(pool, panini.id, &NewMenuItem::new("Caprese Panino", 9.0))
        .await
        .unwrap();

    faq::create_faq(pool, id, &NewFaq::new(Some("Menu"), "Is the pasta homemade?", "Yes, daily.", 2))
        .await
        .unwrap();
    faq::create_faq(
        pool,
        id,
        &NewFaq::new(Some("Reservations"), "Can I book online?", "Yes, on our website.", 1),
    )
    .await
    .unwrap();
    faq::create_faq(pool, id, &NewFaq::new(Some("Menu"), "Do you have vegan options?", "Several.", 1))
        .await
        .unwrap();

    reservation::upsert_reservation_settings(
        pool,
        id,
        &ReservationPolicy {
            max_party_size: 12,
            special_instructions: Some("Parties over 8 please call ahead.".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    id
}

/// A restaurant with nothing but a name.
pub async fn seed_bare(db: &Database, name: &str) -> i64 {
    restaurant::create_restaurant(db.pool(), &NewRestaurant::named(name))
        .await
        .unwrap()
        .id
}
