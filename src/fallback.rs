//! Demo listings and the fixed category list, used when the backend is out of
//! reach or has no endpoint for the data.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::filters::FilterState;
use crate::models::{Category, EventRecord};
use crate::normalize::normalize_event;
use crate::utils::contains_ignore_case;

pub const DEMO_MESSAGE: &str = "Using demo data";

static DEMO_EVENTS: Lazy<Vec<EventRecord>> = Lazy::new(|| {
    demo_payloads()
        .iter()
        .map(|raw| {
            let mut record = normalize_event(raw);
            record.is_saved = raw.get("isSaved").and_then(Value::as_bool).unwrap_or(false);
            record
        })
        .collect()
});

/// The demo set narrowed by the same structured predicates the backend
/// applies. Free text is left to the local search.
pub fn demo_events(filters: &FilterState) -> Vec<EventRecord> {
    DEMO_EVENTS
        .iter()
        .filter(|event| {
            filters.category.is_empty() || contains_ignore_case(&event.service_type, &filters.category)
        })
        .filter(|event| {
            filters.location.is_empty() || contains_ignore_case(&event.location, &filters.location)
        })
        .filter(|event| filters.budget.contains(event.min_price))
        .filter(|event| filters.min_rating <= 0.0 || event.rating >= filters.min_rating)
        .filter(|event| !filters.verified_only || event.verified)
        .cloned()
        .collect()
}

pub fn default_categories() -> Vec<Category> {
    [
        ("1", "Wedding", 24),
        ("2", "Music", 18),
        ("3", "Business", 15),
        ("4", "Food", 22),
        ("5", "Sports", 12),
        ("6", "Education", 8),
        ("7", "Wellness", 14),
        ("8", "Religious", 9),
    ]
    .into_iter()
    .map(|(id, name, count)| Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: category_icon(name).to_string(),
        color: category_color(name).to_string(),
        count,
    })
    .collect()
}

pub fn category_icon(name: &str) -> &'static str {
    match name.to_lowercase().as_str() {
        "wedding" => "heart",
        "music" => "musical-notes",
        "business" => "business",
        "corporate" => "briefcase",
        "food" => "restaurant",
        "sports" => "basketball",
        "education" => "school",
        "wellness" => "fitness",
        "health" => "medkit",
        "religious" => "star",
        "cultural" => "flower",
        "entertainment" => "film",
        "technology" => "laptop",
        "art" => "palette",
        "fashion" => "shirt",
        "charity" => "hand-left",
        "conference" => "mic",
        "party" => "wine",
        "birthday" => "gift",
        _ => "grid",
    }
}

pub fn category_color(name: &str) -> &'static str {
    match name.to_lowercase().as_str() {
        "wedding" => "#FF69B4",
        "music" => "#FF6B6B",
        "business" | "corporate" => "#4ECDC4",
        "food" => "#118AB2",
        "sports" => "#FF8C00",
        "education" => "#2E8B57",
        "wellness" | "health" => "#9370DB",
        "religious" | "cultural" => "#06D6A0",
        "entertainment" => "#FFD166",
        "technology" => "#073B4C",
        "art" => "#EF476F",
        "fashion" => "#FF9A8B",
        "charity" => "#7209B7",
        "conference" => "#3A86FF",
        "party" => "#FF006E",
        "birthday" => "#FB5607",
        _ => "#6C757D",
    }
}

fn demo_payloads() -> Vec<Value> {
    vec![
        demo("1", "Summer Music Festival 2024", "Music", "2024-06-15", "Mumbai", 1500, 4.8, 120, false, true,
            "Annual summer music festival featuring top artists", "Music Events Co.",
            "https://images.unsplash.com/photo-1533174072545-7a4b6ad7a6c3?w=800"),
        demo("2", "Tech Innovation Summit", "Tech", "2024-07-22", "Bangalore", 3000, 4.9, 85, true, true,
            "Technology and innovation conference", "Tech Hub India",
            "https://images.unsplash.com/photo-1540575467063-178a50c2df87?w=800"),
        demo("3", "Sarah & John Wedding", "Wedding", "2024-08-05", "Delhi", 500_000, 4.7, 45, false, false,
            "Beautiful wedding ceremony", "Perfect Weddings",
            "https://images.unsplash.com/photo-1519225421980-715cb0215aed?w=800"),
        demo("4", "Food & Wine Expo", "Food", "2024-09-12", "Mumbai", 800, 4.6, 210, false, true,
            "Food and wine tasting event", "Foodie Events",
            "https://images.unsplash.com/photo-1555939594-58d7cb561ad1?w=800"),
        demo("5", "Yoga Retreat Weekend", "Wellness", "2024-10-18", "Goa", 5000, 4.9, 89, true, true,
            "Weekend yoga and meditation retreat", "Wellness Center",
            "https://images.unsplash.com/photo-1544367567-0f2fcb009e0b?w=800"),
        demo("6", "Startup Pitch Night", "Business", "2024-11-25", "Bangalore", 0, 4.5, 56, false, false,
            "Startup pitching competition", "Startup India",
            "https://images.unsplash.com/photo-1559136555-9303baea8ebd?w=800"),
        demo("7", "Wedding Planner Conference", "Wedding", "2024-12-10", "Delhi", 2500, 4.8, 78, false, true,
            "Conference for wedding planners", "Wedding Professionals",
            "https://images.unsplash.com/photo-1465495976277-4387d4b0e4a6?w=800"),
        demo("8", "Free Community Music Jam", "Music", "2024-06-20", "Mumbai", 0, 4.3, 34, false, false,
            "Free community music event", "Local Artists Group",
            "https://images.unsplash.com/photo-1511379938547-c1f69419868d?w=800"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn demo(
    id: &str,
    name: &str,
    category: &str,
    date: &str,
    city: &str,
    price: u64,
    rating: f64,
    reviews: u64,
    is_saved: bool,
    verified: bool,
    description: &str,
    vendor: &str,
    image: &str,
) -> Value {
    json!({
        "_id": id,
        "name": name,
        "category": category,
        "date": date,
        "location": { "city": city },
        "price": price,
        "images": [image],
        "rating": rating,
        "reviews": reviews,
        "isSaved": is_saved,
        "verified": verified,
        "description": description,
        "vendorName": vendor,
    })
}
