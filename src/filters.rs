//! Structured search filters and the active-filter chips derived from them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DEFAULT_PAGE_LIMIT;

pub const DEFAULT_BUDGET_MIN: u64 = 0;
pub const DEFAULT_BUDGET_MAX: u64 = 100_000;

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("filter {key:?} does not accept a {got} value")]
    TypeMismatch { key: FilterKey, got: &'static str },
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Budget {
    pub min: u64,
    pub max: u64,
}

impl Budget {
    /// Builds a range, swapping the bounds when they arrive reversed.
    pub fn new(min: u64, max: u64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min as f64 && (self.max == 0 || price <= self.max as f64)
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            min: DEFAULT_BUDGET_MIN,
            max: DEFAULT_BUDGET_MAX,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    #[serde(rename = "relevance")]
    Relevance,
    #[serde(rename = "rating")]
    Rating,
    #[serde(rename = "price_low")]
    PriceLowToHigh,
    #[serde(rename = "price_high")]
    PriceHighToLow,
    #[serde(rename = "newest")]
    Newest,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::Rating => "rating",
            SortKey::PriceLowToHigh => "price_low",
            SortKey::PriceHighToLow => "price_high",
            SortKey::Newest => "newest",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Relevance => "Most Relevant",
            SortKey::Rating => "Highest Rated",
            SortKey::PriceLowToHigh => "Price: Low to High",
            SortKey::PriceHighToLow => "Price: High to Low",
            SortKey::Newest => "Newest First",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Category,
    Location,
    Budget,
    MinRating,
    VerifiedOnly,
    SortBy,
}

impl FilterKey {
    /// Whether a non-default value for this key shows up as a removable chip.
    pub fn is_chip(&self) -> bool {
        !matches!(self, FilterKey::SortBy)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Text(String),
    Budget(Budget),
    Rating(f64),
    Flag(bool),
    Sort(SortKey),
}

impl FilterValue {
    fn kind(&self) -> &'static str {
        match self {
            FilterValue::Text(_) => "text",
            FilterValue::Budget(_) => "budget",
            FilterValue::Rating(_) => "rating",
            FilterValue::Flag(_) => "flag",
            FilterValue::Sort(_) => "sort",
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<Budget> for FilterValue {
    fn from(value: Budget) -> Self {
        FilterValue::Budget(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Rating(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

impl From<SortKey> for FilterValue {
    fn from(value: SortKey) -> Self {
        FilterValue::Sort(value)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub query: String,
    pub category: String,
    pub location: String,
    pub budget: Budget,
    pub min_rating: f64,
    pub verified_only: bool,
    pub sort_by: SortKey,
    pub page: u32,
    pub limit: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: String::new(),
            location: String::new(),
            budget: Budget::default(),
            min_rating: 0.0,
            verified_only: false,
            sort_by: SortKey::default(),
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl FilterState {
    pub fn is_set(&self, key: FilterKey) -> bool {
        match key {
            FilterKey::Category => !self.category.is_empty(),
            FilterKey::Location => !self.location.is_empty(),
            FilterKey::Budget => !self.budget.is_default(),
            FilterKey::MinRating => self.min_rating > 0.0,
            FilterKey::VerifiedOnly => self.verified_only,
            FilterKey::SortBy => self.sort_by != SortKey::default(),
        }
    }

    fn apply(&mut self, key: FilterKey, value: FilterValue) -> Result<bool, FilterError> {
        let changed = match (key, value) {
            (FilterKey::Category, FilterValue::Text(v)) => replace(&mut self.category, v),
            (FilterKey::Location, FilterValue::Text(v)) => replace(&mut self.location, v),
            (FilterKey::Budget, FilterValue::Budget(b)) => {
                replace(&mut self.budget, Budget::new(b.min, b.max))
            }
            (FilterKey::MinRating, FilterValue::Rating(r)) => {
                replace(&mut self.min_rating, r.clamp(0.0, 5.0))
            }
            (FilterKey::VerifiedOnly, FilterValue::Flag(f)) => replace(&mut self.verified_only, f),
            (FilterKey::SortBy, FilterValue::Sort(s)) => replace(&mut self.sort_by, s),
            (key, value) => {
                return Err(FilterError::TypeMismatch {
                    key,
                    got: value.kind(),
                })
            }
        };
        Ok(changed)
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Owns the filter object and keeps the chip list in step with it.
#[derive(Debug, Clone, Default)]
pub struct FilterManager {
    state: FilterState,
    active: Vec<FilterKey>,
}

impl FilterManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.state.query
    }

    /// Chip keys in the order they were switched on.
    pub fn active_filters(&self) -> &[FilterKey] {
        &self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Returns `Ok(true)` when the filter object actually changed.
    pub fn update_filter(
        &mut self,
        key: FilterKey,
        value: impl Into<FilterValue>,
    ) -> Result<bool, FilterError> {
        let changed = self.state.apply(key, value.into())?;
        if changed {
            // a filter change invalidates the page the user was on
            self.state.page = 1;
        }
        self.refresh_active(key);
        Ok(changed)
    }

    /// A new query starts from the first page again.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let changed = replace(&mut self.state.query, query.into());
        if changed {
            self.state.page = 1;
        }
        changed
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        replace(&mut self.state.page, page.max(1))
    }

    pub fn clear_all_filters(&mut self) {
        self.state = FilterState {
            limit: self.state.limit,
            ..FilterState::default()
        };
        self.active.clear();
    }

    fn refresh_active(&mut self, key: FilterKey) {
        if !key.is_chip() {
            return;
        }
        let set = self.state.is_set(key);
        let present = self.active.contains(&key);
        if set && !present {
            self.active.push(key);
        } else if !set && present {
            self.active.retain(|k| *k != key);
        }
    }
}
