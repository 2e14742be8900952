//! System prompt construction.

use restaurant_db::Restaurant;

use crate::context::ContextDocument;

/// Behavioral directives, in the order they appear in the prompt.
pub const DIRECTIVES: [&str; 8] = [
    "Be polite, friendly, and helpful like a waiter would be.",
    "If asked about menu items, provide details about ingredients, pricing, and dietary information.",
    "If asked about hours, provide the correct operating hours for the requested day.",
    "If asked about location, provide the address and contact information.",
    "If asked about reservations, provide the reservation policy and how to make a reservation.",
    "If asked a question you don't have information for, apologize and offer to connect them with the restaurant directly.",
    "Keep responses concise and conversational, like a helpful waiter would.",
    "Do not mention that you're an AI or that you're using provided information.",
];

/// The parts of a restaurant the persona is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantIdentity {
    pub name: String,
    pub greeting: Option<String>,
}

impl RestaurantIdentity {
    pub fn new(name: impl Into<String>, greeting: Option<String>) -> Self {
        Self {
            name: name.into(),
            greeting,
        }
    }

    pub fn from_restaurant(restaurant: &Restaurant) -> Self {
        Self::new(restaurant.name.clone(), restaurant.chatbot_greeting.clone())
    }

    /// The custom greeting, or the default one when unset or blank.
    pub fn greeting(&self) -> String {
        match self.greeting.as_deref().map(str::trim) {
            Some(greeting) if !greeting.is_empty() => greeting.to_string(),
            _ => default_greeting(&self.name),
        }
    }
}

pub fn default_greeting(name: &str) -> String {
    format!("Welcome to {}! How can I help you today?", name)
}

/// Render the system prompt for a restaurant.
///
/// The output is a pure function of its inputs: persona, the document as
/// pretty-printed JSON, then the directives with the greeting rule last.
pub fn build_system_prompt(
    identity: &RestaurantIdentity,
    document: &ContextDocument,
) -> serde_json::Result<String> {
    let context = serde_json::to_string_pretty(document)?;

    let mut prompt = format!(
        "You are a helpful waiter assistant for {name}.\n\
         Your name is \"{name} Assistant\".\n\
         \n\
         Use the following restaurant information to answer customer questions:\n\
         {context}\n\
         \n",
        name = identity.name,
        context = context,
    );

    for directive in DIRECTIVES {
        prompt.push_str("- ");
        prompt.push_str(directive);
        prompt.push('\n');
    }
    prompt.push_str(&format!(
        "- If greeting the user, use the custom greeting if available: \"{}\"",
        identity.greeting()
    ));

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{HoursEntry, RestaurantInfo, SCHEMA_VERSION};
    use indexmap::IndexMap;

    fn document() -> ContextDocument {
        ContextDocument {
            schema_version: SCHEMA_VERSION,
            restaurant_info: RestaurantInfo {
                name: "Bella Italia".to_string(),
                description: None,
                cuisine_type: Some("Italian".to_string()),
                price_range: None,
                website: None,
            },
            locations: vec![],
            hours: vec![HoursEntry {
                day: "Sunday".to_string(),
                is_closed: false,
                hours: Some("12:00 - 21:00".to_string()),
            }],
            menus: vec![],
            faqs: IndexMap::new(),
            reservations: None,
        }
    }

    #[test]
    fn test_prompt_structure() {
        let identity = RestaurantIdentity::new("Bella Italia", None);
        let prompt = build_system_prompt(&identity, &document()).unwrap();

        assert!(prompt.starts_with("You are a helpful waiter assistant for Bella Italia.\n"));
        assert!(prompt.contains("Your name is \"Bella Italia Assistant\"."));
        assert!(prompt.contains("\"hours\": \"12:00 - 21:00\""));

        let bullets: Vec<_> = prompt.lines().filter(|l| l.starts_with("- ")).collect();
        assert_eq!(bullets.len(), DIRECTIVES.len() + 1);
        assert_eq!(bullets[0], format!("- {}", DIRECTIVES[0]));
        assert!(bullets[8].contains("Welcome to Bella Italia! How can I help you today?"));
    }

    #[test]
    fn test_custom_greeting() {
        let identity =
            RestaurantIdentity::new("Bella Italia", Some("Benvenuti a Bella Italia!".to_string()));
        let prompt = build_system_prompt(&identity, &document()).unwrap();
        assert!(prompt.ends_with("\"Benvenuti a Bella Italia!\""));
    }

    #[test]
    fn test_blank_greeting_falls_back() {
        let identity = RestaurantIdentity::new("Trattoria", Some("   ".to_string()));
        assert_eq!(identity.greeting(), "Welcome to Trattoria! How can I help you today?");
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let identity = RestaurantIdentity::new("Bella Italia", None);
        let doc = document();
        assert_eq!(
            build_system_prompt(&identity, &doc).unwrap(),
            build_system_prompt(&identity, &doc).unwrap()
        );
    }
}
