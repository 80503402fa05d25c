use serde_json::{json, Map, Value};

use crate::fallback::{default_categories, demo_events, DEMO_MESSAGE};
use crate::filters::FilterState;
use crate::gateway::{ApiClient, GatewayError};
use crate::models::{Category, EventQueryResult, EventRecord, ItemResult};
use crate::normalize::{item_payload, normalize_event, search_envelope};

const SEARCH_ENDPOINT: &str = "/search";
const FETCHED_MESSAGE: &str = "Events fetched successfully";

#[derive(Clone)]
pub struct EventsApi {
    client: ApiClient,
}

impl EventsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// One search round trip. Never fails: any gateway error turns into the
    /// filtered demo set with `success: false`.
    pub async fn fetch_events(&self, filters: &FilterState) -> EventQueryResult {
        let body = search_request(filters, self.client.config().page_limit);
        tracing::debug!(request = %body, "fetching events");

        match self.search(&body).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(error = %err, "event search failed, serving demo data");
                let data = demo_events(filters);
                EventQueryResult {
                    success: false,
                    total: data.len() as u64,
                    data,
                    message: DEMO_MESSAGE.to_string(),
                }
            }
        }
    }

    async fn search(&self, body: &Value) -> Result<EventQueryResult, GatewayError> {
        let response = self.client.post(SEARCH_ENDPOINT, body).await?;
        let envelope = search_envelope(&response);
        let data: Vec<EventRecord> = envelope.results.iter().map(normalize_event).collect();
        tracing::info!(count = data.len(), total = envelope.total, "events fetched");
        if !envelope.success {
            tracing::warn!(message = ?envelope.message, "backend flagged search as unsuccessful");
        }

        // success=false is reserved for the demo fallback
        Ok(EventQueryResult {
            success: true,
            data,
            total: envelope.total,
            message: envelope
                .message
                .unwrap_or_else(|| FETCHED_MESSAGE.to_string()),
        })
    }

    /// The backend has no categories endpoint; the list is fixed.
    pub fn fetch_categories(&self) -> Vec<Category> {
        default_categories()
    }

    pub async fn fetch_event_by_id(&self, event_id: &str) -> ItemResult<EventRecord> {
        match self.client.get(&format!("/events/{event_id}"), &[]).await {
            Ok(response) => ItemResult::ok(
                normalize_event(item_payload(&response)),
                "Event fetched successfully",
            ),
            Err(err) => {
                tracing::warn!(event_id, error = %err, "event lookup failed");
                ItemResult::failed(err, "Failed to fetch event")
            }
        }
    }

    pub async fn save_event(&self, event_id: &str) -> ItemResult<Value> {
        let endpoint = format!("/events/{event_id}/save");
        match self.client.post(&endpoint, &Value::Object(Map::new())).await {
            Ok(response) => ItemResult::ok(item_payload(&response).clone(), "Event saved successfully"),
            Err(err) => {
                tracing::warn!(event_id, error = %err, "save failed");
                ItemResult::failed(err, "Failed to save event")
            }
        }
    }

    pub async fn unsave_event(&self, event_id: &str) -> ItemResult<Value> {
        let endpoint = format!("/events/{event_id}/save");
        match self.client.delete(&endpoint).await {
            Ok(response) => {
                ItemResult::ok(item_payload(&response).clone(), "Event removed from saved")
            }
            Err(err) => {
                tracing::warn!(event_id, error = %err, "unsave failed");
                ItemResult::failed(err, "Failed to remove event")
            }
        }
    }
}

/// Maps the filter object onto the backend's search body. Optional keys are
/// only present when the matching filter is set.
pub fn search_request(filters: &FilterState, default_limit: u32) -> Value {
    let limit = if filters.limit > 0 {
        filters.limit
    } else {
        default_limit
    };
    let mut map = Map::new();
    map.insert("page".into(), json!(filters.page.max(1)));
    map.insert("limit".into(), json!(limit));
    map.insert("sort".into(), json!(filters.sort_by.as_str()));

    let query = filters.query.trim();
    if !query.is_empty() {
        map.insert("query".into(), json!(query));
    }
    if !filters.category.is_empty() {
        map.insert("serviceId".into(), json!(filters.category));
    }
    if !filters.location.is_empty() {
        map.insert("city".into(), json!(filters.location));
    }
    if filters.budget.min > 0 {
        map.insert("minBudget".into(), json!(filters.budget.min));
    }
    if !filters.budget.is_default() && filters.budget.max > 0 {
        map.insert("maxBudget".into(), json!(filters.budget.max));
    }
    if filters.min_rating > 0.0 {
        map.insert("rating".into(), json!(filters.min_rating));
    }
    if filters.verified_only {
        map.insert("verified".into(), json!(true));
    }

    Value::Object(map)
}
