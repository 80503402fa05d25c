//! Turns whatever shape the backend answered with into canonical records.
//!
//! The search backend has shipped several envelope and field layouts over
//! time. Each accessor below lists the places it looks, first hit wins:
//!
//! | field          | lookup order                                                |
//! |----------------|-------------------------------------------------------------|
//! | results        | `data.results`, `results`, `[]`                             |
//! | total          | `data.total`, `total`, `0`                                  |
//! | id             | `_id`, `id`, `""`                                           |
//! | title          | `name`, `title`, `""`                                       |
//! | service type   | `serviceType`, `category`, `"General"`                      |
//! | date           | `createdAt` (RFC 3339), `date`, `"Coming Soon"`             |
//! | location       | `city`, `location.city`, `location` (string), fallback text |
//! | min / max      | `pricing.min` / `pricing.max`, `price`, `0`                 |
//! | budget         | `pricing.average`, `pricing.min`, `price`, `0`              |
//! | image          | `featuredImage`, `image`, `images[0]`, placeholder          |
//! | review count   | `reviewCount`, `reviews`, `0`                               |
//! | vendor         | `businessName`, `vendorName`, `name`, `""`                  |

use chrono::DateTime;
use serde_json::{Map, Value};

use crate::models::EventRecord;

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200";
pub const UNKNOWN_LOCATION: &str = "Location not set";
pub const DEFAULT_SERVICE_TYPE: &str = "General";
pub const UNDATED: &str = "Coming Soon";

#[derive(Debug, Clone, PartialEq)]
pub struct SearchEnvelope {
    pub success: bool,
    pub results: Vec<Value>,
    pub total: u64,
    pub message: Option<String>,
}

pub fn search_envelope(response: &Value) -> SearchEnvelope {
    let results = path(response, &["data", "results"])
        .or_else(|| response.get("results"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let total = path(response, &["data", "total"])
        .and_then(as_u64)
        .filter(|total| *total > 0)
        .or_else(|| response.get("total").and_then(as_u64))
        .unwrap_or(0);

    SearchEnvelope {
        success: response
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(true),
        results,
        total,
        message: text(response, "message"),
    }
}

/// Single-event endpoints wrap the payload in `data`, or don't.
pub fn item_payload(response: &Value) -> &Value {
    match response.get("data") {
        Some(data) if !data.is_null() => data,
        _ => response,
    }
}

pub fn normalize_event(raw: &Value) -> EventRecord {
    let pricing = raw.get("pricing");
    let price = number(raw, "price");

    EventRecord {
        id: text(raw, "_id")
            .or_else(|| text(raw, "id"))
            .unwrap_or_default(),
        title: text(raw, "name")
            .or_else(|| text(raw, "title"))
            .unwrap_or_default(),
        service_type: text(raw, "serviceType")
            .or_else(|| text(raw, "category"))
            .unwrap_or_else(|| DEFAULT_SERVICE_TYPE.to_string()),
        date: display_date(raw),
        location: text(raw, "city")
            .or_else(|| path(raw, &["location", "city"]).and_then(non_empty_str))
            .or_else(|| text(raw, "location"))
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        area: text(raw, "area").unwrap_or_default(),
        address: text(raw, "address").unwrap_or_default(),
        image: text(raw, "featuredImage")
            .or_else(|| text(raw, "image"))
            .or_else(|| path(raw, &["images", "0"]).and_then(non_empty_str))
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        budget: pricing
            .and_then(|p| number(p, "average").or_else(|| number(p, "min")))
            .or(price)
            .unwrap_or(0.0),
        min_price: pricing
            .and_then(|p| number(p, "min"))
            .or(price)
            .unwrap_or(0.0),
        max_price: pricing
            .and_then(|p| number(p, "max"))
            .or(price)
            .unwrap_or(0.0),
        rating: number(raw, "rating").unwrap_or(0.0),
        review_count: raw
            .get("reviewCount")
            .and_then(as_u64)
            .or_else(|| raw.get("reviews").and_then(as_u64))
            .unwrap_or(0),
        verified: raw.get("verified").and_then(Value::as_bool).unwrap_or(false),
        vendor_name: text(raw, "businessName")
            .or_else(|| text(raw, "vendorName"))
            .or_else(|| text(raw, "name"))
            .unwrap_or_default(),
        contact: raw
            .get("contact")
            .filter(|c| c.is_object())
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())),
        description: text(raw, "description").unwrap_or_default(),
        search_keywords: strings(raw, "searchKeywords"),
        service_areas: strings(raw, "serviceAreas"),
        years_in_business: raw.get("yearsInBusiness").and_then(as_u64).unwrap_or(0),
        total_bookings: raw.get("totalBookings").and_then(as_u64).unwrap_or(0),
        completed_bookings: raw.get("completedBookings").and_then(as_u64).unwrap_or(0),
        response_time: text(raw, "responseTime").unwrap_or_default(),
        response_rate: number(raw, "responseRate").unwrap_or(0.0),
        is_saved: false,
    }
}

fn display_date(raw: &Value) -> String {
    if let Some(created) = text(raw, "createdAt") {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&created) {
            return parsed.format("%b %e, %Y").to_string();
        }
    }
    text(raw, "date").unwrap_or_else(|| UNDATED.to_string())
}

fn path<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(value, |current, key| match current {
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => current.get(*key),
    })
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(non_empty_str)
}

fn number(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn strings(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_shapes() {
        let cases = [
            (
                "nested data",
                json!({"success": true, "data": {"results": [{"id": "a"}], "total": 42}}),
                1,
                42,
            ),
            (
                "flat",
                json!({"results": [{"id": "a"}, {"id": "b"}], "total": 7}),
                2,
                7,
            ),
            ("empty object", json!({}), 0, 0),
            (
                "nested results, flat total",
                json!({"data": {"results": [{"id": "a"}]}, "total": 3}),
                1,
                3,
            ),
            ("results not an array", json!({"results": "nope"}), 0, 0),
        ];

        for (name, response, count, total) in cases {
            let envelope = search_envelope(&response);
            assert_eq!(envelope.results.len(), count, "{name}: result count");
            assert_eq!(envelope.total, total, "{name}: total");
            assert!(envelope.success, "{name}: success defaults true");
        }
    }

    #[test]
    fn envelope_keeps_explicit_failure_and_message() {
        let envelope = search_envelope(&json!({"success": false, "message": "down"}));
        assert!(!envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("down"));
    }

    #[test]
    fn id_and_title_priority() {
        let cases = [
            (json!({"_id": "mongo", "id": "plain"}), "mongo"),
            (json!({"id": "plain"}), "plain"),
            (json!({}), ""),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_event(&raw).id, expected);
        }

        let cases = [
            (json!({"name": "By Name", "title": "By Title"}), "By Name"),
            (json!({"title": "By Title"}), "By Title"),
            (json!({"name": "  "}), ""),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_event(&raw).title, expected);
        }
    }

    #[test]
    fn location_priority() {
        let cases = [
            (json!({"city": "Pune", "location": {"city": "Goa"}}), "Pune"),
            (json!({"location": {"city": "Goa"}}), "Goa"),
            (json!({"location": "Delhi NCR"}), "Delhi NCR"),
            (json!({}), UNKNOWN_LOCATION),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_event(&raw).location, expected);
        }
    }

    #[test]
    fn pricing_priority() {
        let record = normalize_event(&json!({
            "pricing": {"min": 1000, "max": 5000, "average": 2500},
            "price": 99
        }));
        assert_eq!(
            (record.min_price, record.max_price, record.budget),
            (1000.0, 5000.0, 2500.0)
        );

        let record = normalize_event(&json!({"pricing": {"min": 1000}}));
        assert_eq!(record.budget, 1000.0);
        assert_eq!(record.max_price, 0.0);

        let record = normalize_event(&json!({"price": 1500}));
        assert_eq!(
            (record.min_price, record.max_price, record.budget),
            (1500.0, 1500.0, 1500.0)
        );
    }

    #[test]
    fn vendor_service_and_image_priority() {
        let record = normalize_event(&json!({
            "name": "Jam",
            "businessName": "Biz",
            "vendorName": "Vendor",
            "category": "Music",
            "images": ["first.jpg", "second.jpg"]
        }));
        assert_eq!(record.vendor_name, "Biz");
        assert_eq!(record.service_type, "Music");
        assert_eq!(record.image, "first.jpg");

        let record = normalize_event(&json!({"name": "Jam", "serviceType": "dj"}));
        assert_eq!(record.vendor_name, "Jam");
        assert_eq!(record.service_type, "dj");
        assert_eq!(record.image, PLACEHOLDER_IMAGE);

        let record = normalize_event(&json!({}));
        assert_eq!(record.service_type, DEFAULT_SERVICE_TYPE);
    }

    #[test]
    fn dates_prefer_created_at() {
        let record = normalize_event(&json!({"createdAt": "2024-06-15T10:00:00Z", "date": "x"}));
        assert_eq!(record.date, "Jun 15, 2024");
        assert_eq!(normalize_event(&json!({"date": "2024-06-15"})).date, "2024-06-15");
        assert_eq!(normalize_event(&json!({"createdAt": "garbage"})).date, UNDATED);
    }

    #[test]
    fn loose_fields_default_sanely() {
        let record = normalize_event(&json!({
            "reviews": 12,
            "rating": "4.5",
            "searchKeywords": ["dj", 7, "sangeet"],
            "contact": "not an object",
            "verified": true
        }));
        assert_eq!(record.review_count, 12);
        assert_eq!(record.rating, 4.5);
        assert_eq!(record.search_keywords, vec!["dj", "sangeet"]);
        assert_eq!(record.contact, json!({}));
        assert!(record.verified);
        assert!(!record.is_saved);
    }

    #[test]
    fn item_payload_unwraps_data() {
        let wrapped = json!({"data": {"id": "1"}});
        assert_eq!(item_payload(&wrapped), &json!({"id": "1"}));
        let bare = json!({"id": "2"});
        assert_eq!(item_payload(&bare), &bare);
    }
}
