use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub service_type: String,
    pub date: String,
    pub location: String,
    pub area: String,
    pub address: String,
    pub image: String,
    pub budget: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub rating: f64,
    pub review_count: u64,
    pub verified: bool,
    pub vendor_name: String,
    pub contact: serde_json::Value,
    pub description: String,
    pub search_keywords: Vec<String>,
    pub service_areas: Vec<String>,
    pub years_in_business: u64,
    pub total_bookings: u64,
    pub completed_bookings: u64,
    pub response_time: String,
    pub response_rate: f64,
    // client-only, never sent back to the backend
    pub is_saved: bool,
}

impl EventRecord {
    pub fn price_label(&self) -> String {
        if self.min_price <= 0.0 {
            "FREE".to_string()
        } else {
            format!("₹{}", self.min_price.round() as u64)
        }
    }

    pub fn location_label(&self) -> String {
        if self.area.is_empty() {
            self.location.clone()
        } else {
            format!("{}, {}", self.area, self.location)
        }
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        [
            &self.title,
            &self.service_type,
            &self.location,
            &self.vendor_name,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
            || self
                .search_keywords
                .iter()
                .any(|keyword| keyword.to_lowercase().contains(&needle))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub count: u32,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EventQueryResult {
    pub success: bool,
    pub data: Vec<EventRecord>,
    pub total: u64,
    pub message: String,
}

/// Outcome of a single-event call (fetch, save, unsave). Failures carry the
/// gateway error text for the alert but never a substitute payload.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ItemResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: String,
}

impl<T> ItemResult<T> {
    pub fn ok(data: T, message: &str) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: message.to_string(),
        }
    }

    pub fn failed(error: impl ToString, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::normalize::normalize_event;
    use serde_json::json;

    #[test]
    fn card_labels() {
        let cases = [
            (json!({"price": 0}), "FREE", "Location not set"),
            (json!({"price": 1499.6, "city": "Pune"}), "₹1500", "Pune"),
            (
                json!({"pricing": {"min": 800, "max": 2000}, "city": "Mumbai", "area": "Bandra"}),
                "₹800",
                "Bandra, Mumbai",
            ),
        ];
        for (raw, price, location) in cases {
            let record = normalize_event(&raw);
            assert_eq!(record.price_label(), price, "{raw}");
            assert_eq!(record.location_label(), location, "{raw}");
        }
    }
}
