//! In-memory result set behind the list and detail views.
//!
//! Records live in one map keyed by id. The filtered list and the open detail
//! view only hold ids, so flipping a saved flag is visible everywhere at once.

use std::collections::HashMap;

use crate::models::EventRecord;

#[derive(Debug, Default, Clone)]
pub struct ResultSet {
    records: HashMap<String, EventRecord>,
    order: Vec<String>,
    visible: Vec<String>,
    query: String,
    selected: Option<String>,
    total: u64,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a freshly fetched collection. Client-side saved toggles on the
    /// previous collection are dropped along with it.
    pub fn replace(&mut self, events: Vec<EventRecord>, total: u64) {
        self.records.clear();
        self.order.clear();
        for event in events {
            if self.records.contains_key(&event.id) {
                tracing::debug!(id = %event.id, "duplicate event id in results, keeping first");
                continue;
            }
            self.order.push(event.id.clone());
            self.records.insert(event.id.clone(), event);
        }
        self.total = if total > 0 {
            total
        } else {
            self.order.len() as u64
        };
        if let Some(id) = &self.selected {
            if !self.records.contains_key(id) {
                self.selected = None;
            }
        }
        self.refilter();
    }

    /// Instant local narrowing; blank queries show everything.
    pub fn local_search(&mut self, query: &str) {
        self.query = query.to_string();
        self.refilter();
    }

    fn refilter(&mut self) {
        let query = self.query.trim();
        self.visible = if query.is_empty() {
            self.order.clone()
        } else {
            self.order
                .iter()
                .filter(|id| {
                    self.records
                        .get(*id)
                        .is_some_and(|event| event.matches_query(query))
                })
                .cloned()
                .collect()
        };
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn all(&self) -> impl Iterator<Item = &EventRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn filtered(&self) -> impl Iterator<Item = &EventRecord> {
        self.visible.iter().filter_map(|id| self.records.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&EventRecord> {
        self.records.get(id)
    }

    pub fn filtered_count(&self) -> usize {
        self.visible.len()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Flips the saved flag and returns the new value, or `None` for an
    /// unknown id.
    pub fn toggle_saved(&mut self, id: &str) -> Option<bool> {
        let record = self.records.get_mut(id)?;
        record.is_saved = !record.is_saved;
        Some(record.is_saved)
    }

    pub fn select(&mut self, id: &str) -> Option<&EventRecord> {
        if self.records.contains_key(id) {
            self.selected = Some(id.to_string());
        }
        self.selected()
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&EventRecord> {
        self.selected.as_ref().and_then(|id| self.records.get(id))
    }

    pub fn results_label(&self) -> String {
        let count = self.filtered_count();
        let noun = if count == 1 { "result" } else { "results" };
        let query = self.query.trim();
        if query.is_empty() {
            format!("{count} {noun}")
        } else {
            format!("{count} {noun} for \"{query}\"")
        }
    }

    pub fn footer_label(&self) -> String {
        format!("Showing {} of {} events", self.filtered_count(), self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_event;
    use serde_json::json;

    fn record(id: &str, title: &str, extra: serde_json::Value) -> EventRecord {
        let mut raw = json!({"id": id, "title": title});
        if let (Some(base), Some(more)) = (raw.as_object_mut(), extra.as_object()) {
            base.extend(more.clone());
        }
        normalize_event(&raw)
    }

    fn sample() -> ResultSet {
        let mut set = ResultSet::new();
        set.replace(
            vec![
                record("1", "Summer Music Festival", json!({"city": "Mumbai", "vendorName": "Beat Co"})),
                record("2", "Tech Summit", json!({"serviceType": "conference", "city": "Bangalore"})),
                record(
                    "3",
                    "Royal Banquet",
                    json!({"city": "Jaipur", "searchKeywords": ["Wedding", "Reception"]}),
                ),
            ],
            40,
        );
        set
    }

    fn ids(set: &ResultSet) -> Vec<&str> {
        set.filtered().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn local_search_matches_each_field_case_insensitively() {
        let cases = [
            ("MUSIC", vec!["1"]),
            ("conf", vec!["2"]),
            ("jaipur", vec!["3"]),
            ("beat", vec!["1"]),
            ("wedd", vec!["3"]),
            ("zzz", vec![]),
        ];
        let mut set = sample();
        for (query, expected) in cases {
            set.local_search(query);
            assert_eq!(ids(&set), expected, "query {query:?}");
        }
    }

    #[test]
    fn blank_query_shows_everything() {
        let mut set = sample();
        set.local_search("tech");
        set.local_search("   ");
        assert_eq!(ids(&set), vec!["1", "2", "3"]);
    }

    #[test]
    fn toggling_twice_restores_and_views_agree() {
        let mut set = sample();
        set.local_search("summer");
        set.select("1");

        assert_eq!(set.toggle_saved("1"), Some(true));
        assert!(set.get("1").unwrap().is_saved);
        assert!(set.filtered().next().unwrap().is_saved);
        assert!(set.selected().unwrap().is_saved);

        assert_eq!(set.toggle_saved("1"), Some(false));
        assert!(!set.get("1").unwrap().is_saved);
        assert!(!set.filtered().next().unwrap().is_saved);
        assert!(!set.selected().unwrap().is_saved);

        assert_eq!(set.toggle_saved("missing"), None);
    }

    #[test]
    fn replace_drops_saved_flags_and_reapplies_query() {
        let mut set = sample();
        set.toggle_saved("2");
        set.local_search("tech");

        set.replace(
            vec![
                record("2", "Tech Summit", json!({})),
                record("4", "Tech Meetup", json!({})),
            ],
            0,
        );
        assert!(!set.get("2").unwrap().is_saved);
        assert_eq!(ids(&set), vec!["2", "4"]);
        assert_eq!(set.total(), 2, "zero total falls back to record count");
    }

    #[test]
    fn replace_closes_detail_for_vanished_record() {
        let mut set = sample();
        set.select("3");
        set.replace(vec![record("1", "Only One", json!({}))], 1);
        assert!(set.selected().is_none());
    }

    #[test]
    fn counts_can_diverge_from_server_total() {
        let mut set = sample();
        set.local_search("tech");
        assert_eq!(set.results_label(), "1 result for \"tech\"");
        assert_eq!(set.footer_label(), "Showing 1 of 40 events");
        set.local_search("");
        assert_eq!(set.results_label(), "3 results");
    }
}
