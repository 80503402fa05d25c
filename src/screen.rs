//! Controller for the event search screen: owns the filters and the result
//! set, and decides when to go back to the backend.

use crate::events_api::EventsApi;
use crate::filters::{FilterError, FilterKey, FilterManager, FilterState, FilterValue};
use crate::models::{Category, EventQueryResult, EventRecord};
use crate::results::ResultSet;

/// A search that has been issued but not yet applied.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub seq: u64,
    pub filters: FilterState,
}

pub struct SearchScreen {
    api: EventsApi,
    filters: FilterManager,
    results: ResultSet,
    categories: Vec<Category>,
    issued_seq: u64,
    applied_seq: u64,
    loading: bool,
    refreshing: bool,
    demo_mode: bool,
    last_message: Option<String>,
}

impl SearchScreen {
    pub fn new(api: EventsApi) -> Self {
        Self {
            api,
            filters: FilterManager::new(),
            results: ResultSet::new(),
            categories: Vec::new(),
            issued_seq: 0,
            applied_seq: 0,
            loading: false,
            refreshing: false,
            demo_mode: false,
            last_message: None,
        }
    }

    pub async fn mount(&mut self) {
        self.categories = self.api.fetch_categories();
        self.fetch().await;
    }

    pub fn filters(&self) -> &FilterState {
        self.filters.state()
    }

    pub fn active_filters(&self) -> &[FilterKey] {
        self.filters.active_filters()
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// True while the list is showing the bundled demo listings.
    pub fn is_demo_mode(&self) -> bool {
        self.demo_mode
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Sets one filter; a real change costs exactly one search.
    pub async fn update_filter(
        &mut self,
        key: FilterKey,
        value: impl Into<FilterValue>,
    ) -> Result<bool, FilterError> {
        let changed = self.filters.update_filter(key, value)?;
        if changed {
            self.fetch().await;
        }
        Ok(changed)
    }

    pub async fn clear_all_filters(&mut self) {
        self.filters.clear_all_filters();
        self.results.local_search("");
        self.fetch().await;
    }

    /// Per-keystroke narrowing of what is already loaded. No network.
    pub fn on_query_typed(&mut self, text: &str) {
        self.results.local_search(text);
    }

    /// The debounced query arrived; let the backend narrow too.
    pub async fn on_query_committed(&mut self, text: &str) {
        self.results.local_search(text);
        if self.filters.set_query(text) {
            self.fetch().await;
        }
    }

    pub async fn load_page(&mut self, page: u32) {
        if self.filters.set_page(page) {
            self.fetch().await;
        }
    }

    /// Pull-to-refresh.
    pub async fn refresh(&mut self) {
        self.refreshing = true;
        self.fetch().await;
        self.refreshing = false;
    }

    pub fn toggle_save(&mut self, id: &str) -> Option<bool> {
        self.results.toggle_saved(id)
    }

    pub fn open_event(&mut self, id: &str) -> Option<&EventRecord> {
        self.results.select(id)
    }

    pub fn close_event(&mut self) {
        self.results.close_detail();
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued_seq += 1;
        self.loading = true;
        FetchTicket {
            seq: self.issued_seq,
            filters: self.filters.state().clone(),
        }
    }

    /// Applies a finished search unless something newer already landed.
    /// Returns whether the result was used.
    pub fn apply_fetch(&mut self, seq: u64, result: EventQueryResult) -> bool {
        if seq <= self.applied_seq {
            tracing::debug!(seq, applied = self.applied_seq, "dropping stale search result");
            return false;
        }
        self.applied_seq = seq;
        if seq == self.issued_seq {
            self.loading = false;
        }
        self.demo_mode = !result.success;
        self.last_message = Some(result.message);
        self.results.replace(result.data, result.total);
        true
    }

    pub async fn run_fetch(&mut self, ticket: FetchTicket) -> bool {
        let result = self.api.fetch_events(&ticket.filters).await;
        self.apply_fetch(ticket.seq, result)
    }

    async fn fetch(&mut self) {
        let ticket = self.begin_fetch();
        self.run_fetch(ticket).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::filters::Budget;
    use crate::gateway::{test_server, ApiClient};
    use crate::normalize::normalize_event;
    use serde_json::json;

    fn screen_for(base_url: String) -> SearchScreen {
        let client = ApiClient::new(ApiConfig::new(base_url)).expect("client");
        SearchScreen::new(EventsApi::new(client))
    }

    fn result(ids: &[&str], total: u64) -> EventQueryResult {
        EventQueryResult {
            success: true,
            data: ids
                .iter()
                .map(|id| normalize_event(&json!({"id": id, "title": format!("Event {id}")})))
                .collect(),
            total,
            message: "ok".to_string(),
        }
    }

    const ONE_RESULT: &str =
        r#"{"success":true,"data":{"results":[{"_id":"r1","name":"Rooftop Jazz","city":"Pune"}],"total":30}}"#;

    #[tokio::test]
    async fn mount_loads_categories_and_first_page() {
        let (addr, mut rx) = test_server::serve(200, ONE_RESULT).await;
        let mut screen = screen_for(format!("http://{addr}/api"));

        screen.mount().await;

        assert_eq!(screen.categories().len(), 8);
        assert!(!screen.is_loading());
        assert!(!screen.is_demo_mode());
        assert_eq!(screen.results().filtered_count(), 1);
        assert_eq!(screen.results().footer_label(), "Showing 1 of 30 events");
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn each_filter_change_fetches_once() {
        let (addr, mut rx) = test_server::serve(200, ONE_RESULT).await;
        let mut screen = screen_for(format!("http://{addr}/api"));

        assert!(screen.update_filter(FilterKey::Location, "Pune").await.unwrap());
        let first = rx.recv().await.expect("search sent");
        assert!(first.body.contains(r#""city":"Pune""#));

        assert!(!screen.update_filter(FilterKey::Location, "Pune").await.unwrap());
        assert!(rx.try_recv().is_err(), "no-op change does not refetch");

        screen.clear_all_filters().await;
        let cleared = rx.recv().await.expect("search after clear");
        assert!(!cleared.body.contains("city"));
        assert!(screen.active_filters().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_shows_demo_listings() {
        let (addr, _rx) = test_server::serve(500, "down").await;
        let mut screen = screen_for(format!("http://{addr}/api"));

        screen.mount().await;
        assert!(screen.is_demo_mode());
        assert_eq!(screen.last_message(), Some("Using demo data"));
        assert_eq!(screen.results().filtered_count(), 7);

        screen
            .update_filter(FilterKey::Budget, Budget::new(0, 0))
            .await
            .unwrap();
        assert_eq!(screen.results().filtered_count(), 8);
    }

    #[tokio::test]
    async fn typed_text_narrows_locally_before_commit() {
        let (addr, mut rx) = test_server::serve(500, "down").await;
        let mut screen = screen_for(format!("http://{addr}/api"));
        screen.mount().await;
        let _ = rx.recv().await;

        screen.on_query_typed("music");
        assert_eq!(screen.results().filtered_count(), 2);
        assert!(rx.try_recv().is_err(), "typing alone never hits the network");

        screen.on_query_committed("music").await;
        let sent = rx.recv().await.expect("committed query searched");
        assert!(sent.body.contains(r#""query":"music""#));
        // demo data ignores free text, the local filter still applies
        assert_eq!(screen.results().filtered_count(), 2);
        assert_eq!(screen.results().results_label(), "2 results for \"music\"");
    }

    #[tokio::test]
    async fn committed_query_returns_to_first_page() {
        let (addr, mut rx) = test_server::serve(200, ONE_RESULT).await;
        let mut screen = screen_for(format!("http://{addr}/api"));

        screen.load_page(3).await;
        let paged = rx.recv().await.expect("page request");
        assert!(paged.body.contains(r#""page":3"#));

        screen.on_query_committed("jazz").await;
        let searched = rx.recv().await.expect("query request");
        assert!(searched.body.contains(r#""page":1"#), "{}", searched.body);
        assert!(searched.body.contains(r#""query":"jazz""#));
        assert_eq!(screen.filters().page, 1);
    }

    #[tokio::test]
    async fn unsuccessful_flag_from_backend_is_not_demo_mode() {
        let (addr, _rx) = test_server::serve(
            200,
            r#"{"success":false,"data":{"results":[{"_id":"r1","name":"Rooftop Jazz"}],"total":1}}"#,
        )
        .await;
        let mut screen = screen_for(format!("http://{addr}/api"));

        screen.mount().await;
        assert!(!screen.is_demo_mode());
        assert!(screen.results().get("r1").is_some());
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut screen = screen_for(ApiConfig::default().base_url);

        let older = screen.begin_fetch();
        let newer = screen.begin_fetch();

        assert!(screen.apply_fetch(newer.seq, result(&["new"], 1)));
        assert!(!screen.is_loading());
        assert!(!screen.apply_fetch(older.seq, result(&["old"], 1)));

        let ids: Vec<_> = screen.results().all().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["new"]);
    }

    #[test]
    fn in_order_results_apply_and_loading_tracks_latest() {
        let mut screen = screen_for(ApiConfig::default().base_url);

        let first = screen.begin_fetch();
        let second = screen.begin_fetch();
        assert!(screen.apply_fetch(first.seq, result(&["a"], 1)));
        assert!(screen.is_loading(), "second search still outstanding");
        assert!(screen.apply_fetch(second.seq, result(&["b"], 1)));
        assert!(!screen.is_loading());
    }

    #[test]
    fn refetch_discards_saved_toggles() {
        let mut screen = screen_for(ApiConfig::default().base_url);
        let ticket = screen.begin_fetch();
        screen.apply_fetch(ticket.seq, result(&["a", "b"], 2));

        screen.open_event("a");
        assert_eq!(screen.toggle_save("a"), Some(true));
        assert!(screen.results().selected().unwrap().is_saved);

        let ticket = screen.begin_fetch();
        screen.apply_fetch(ticket.seq, result(&["a", "b"], 2));
        assert!(!screen.results().get("a").unwrap().is_saved);
        screen.close_event();
        assert!(screen.results().selected().is_none());
    }
}
