// RoboSched - core/query.rs
//
// List query pipeline: free-text + categorical filter followed by a stable
// sort, over any record type that implements `Queryable`.
// All active filters are AND-combined.
// Core layer: pure logic, never mutates its input.

use crate::core::labels::LabeledEnum;
use crate::util::error::QueryError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

// =============================================================================
// Record contract
// =============================================================================

/// Comparable projection of a sort field.
///
/// Text compares case-insensitively (values are stored lower-cased);
/// ordinals compare by a fixed weight table defined by the record type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Text(String),
    Ordinal(u32),
}

impl SortValue {
    /// Case-insensitive text key.
    pub fn text(value: &str) -> Self {
        SortValue::Text(value.to_lowercase())
    }
}

/// A record that can be searched, filtered by category, and sorted.
pub trait Queryable {
    /// Categorical fields usable for equality filtering (e.g. role).
    type Field: Copy + Eq + Hash + Debug;

    /// Fields the list can be sorted by.
    type SortKey: Copy + Eq + Debug;

    /// Text fields searched by the free-text filter, in order.
    fn search_fields(&self) -> Vec<&str>;

    /// Canonical value of a categorical field.
    fn category(&self, field: Self::Field) -> &str;

    /// Comparable projection of a sort field.
    fn sort_value(&self, key: Self::SortKey) -> SortValue;

    /// Searchable text joined with single spaces.
    fn search_text(&self) -> String {
        self.search_fields().join(" ")
    }
}

// =============================================================================
// Query specification
// =============================================================================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Apply the direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl LabeledEnum for SortDirection {
    fn all() -> &'static [Self] {
        &[SortDirection::Asc, SortDirection::Desc]
    }

    fn value(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ascending",
            SortDirection::Desc => "descending",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SortDirection::Asc => "昇順",
            SortDirection::Desc => "降順",
        }
    }
}

/// One view over a record collection: text + categorical filter plus
/// sort key and direction.
///
/// An empty allowed-set for a field means "any value".
#[derive(Debug, Clone)]
pub struct QuerySpec<F, K> {
    /// Substring search (case-insensitive, trimmed). Empty = no filter.
    pub free_text: String,

    /// Allowed canonical values per categorical field.
    pub categorical_filters: HashMap<F, HashSet<String>>,

    /// Field the result is sorted by.
    pub sort_key: K,

    pub sort_direction: SortDirection,

    /// Compiled regex over the searchable text. None = no regex filter.
    pub regex_search: Option<Regex>,
}

impl<F: Copy + Eq + Hash, K: Copy + Eq> QuerySpec<F, K> {
    /// A spec with no filters, sorted by `sort_key`.
    pub fn new(sort_key: K, sort_direction: SortDirection) -> Self {
        Self {
            free_text: String::new(),
            categorical_filters: HashMap::new(),
            sort_key,
            sort_direction,
            regex_search: None,
        }
    }

    pub fn with_free_text(mut self, text: impl Into<String>) -> Self {
        self.free_text = text.into();
        self
    }

    /// Add `value` to the allowed set of `field`.
    pub fn allow(mut self, field: F, value: impl Into<String>) -> Self {
        self.categorical_filters
            .entry(field)
            .or_default()
            .insert(value.into());
        self
    }

    /// Replace the allowed set of `field`.
    pub fn set_allowed<I, S>(&mut self, field: F, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categorical_filters
            .insert(field, values.into_iter().map(Into::into).collect());
    }

    /// Allowed values of `field`; `None` or empty means unconstrained.
    pub fn allowed(&self, field: F) -> Option<&HashSet<String>> {
        self.categorical_filters.get(&field)
    }

    /// Set the regex search pattern, compiling it.
    /// An empty pattern clears the regex filter.
    pub fn set_regex(&mut self, pattern: &str) -> Result<(), QueryError> {
        if pattern.is_empty() {
            self.regex_search = None;
            return Ok(());
        }
        let regex = Regex::new(pattern).map_err(|e| QueryError::InvalidRegex {
            pattern: pattern.to_string(),
            source: e,
        })?;
        self.regex_search = Some(regex);
        Ok(())
    }

    /// Returns true if any filter (text, category, regex) is active.
    pub fn has_active_filters(&self) -> bool {
        !self.free_text.trim().is_empty()
            || self.categorical_filters.values().any(|set| !set.is_empty())
            || self.regex_search.is_some()
    }

    /// Returns true if the sort differs from `(default_key, Asc)`.
    pub fn has_active_sort(&self, default_key: K) -> bool {
        self.sort_key != default_key || self.sort_direction != SortDirection::Asc
    }

    pub fn clear_free_text(&mut self) {
        self.free_text.clear();
    }

    /// Remove one allowed value from a field's filter.
    pub fn remove_category_value(&mut self, field: F, value: &str) {
        if let Some(set) = self.categorical_filters.get_mut(&field) {
            set.remove(value);
        }
    }

    /// Drop every filter, keeping the sort.
    pub fn clear_filters(&mut self) {
        self.free_text.clear();
        self.categorical_filters.clear();
        self.regex_search = None;
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Run a query, returning indices into `records` in display order.
///
/// Indices let callers keep one owned collection and several views of it.
pub fn query_indices<R>(records: &[R], spec: &QuerySpec<R::Field, R::SortKey>) -> Vec<usize>
where
    R: Queryable,
{
    let needle = spec.free_text.trim().to_lowercase();

    let mut keyed: Vec<(usize, SortValue)> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_all(*record, spec, &needle))
        .map(|(idx, record)| (idx, record.sort_value(spec.sort_key)))
        .collect();

    keyed.sort_by(|(ia, a), (ib, b)| spec.sort_direction.apply(a.cmp(b)).then(ia.cmp(ib)));

    keyed.into_iter().map(|(idx, _)| idx).collect()
}

/// Run a query, returning the matching records in display order.
pub fn query<'a, R>(records: &'a [R], spec: &QuerySpec<R::Field, R::SortKey>) -> Vec<&'a R>
where
    R: Queryable,
{
    query_indices(records, spec)
        .into_iter()
        .map(|idx| &records[idx])
        .collect()
}

/// Check if a single record matches all active filters.
fn matches_all<R: Queryable>(
    record: &R,
    spec: &QuerySpec<R::Field, R::SortKey>,
    needle: &str,
) -> bool {
    // Categorical filters (empty set = any)
    for (field, allowed) in &spec.categorical_filters {
        if !allowed.is_empty() && !allowed.contains(record.category(*field)) {
            return false;
        }
    }

    if needle.is_empty() && spec.regex_search.is_none() {
        return true;
    }

    let text = record.search_text();

    // Text search (case-insensitive substring)
    if !needle.is_empty() && !text.to_lowercase().contains(needle) {
        return false;
    }

    // Regex search
    if let Some(ref regex) = spec.regex_search {
        if !regex.is_match(&text) {
            return false;
        }
    }

    true
}
