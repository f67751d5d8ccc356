//! Client-side local filter
//!
//! A free-text query applied over the already-fetched result set, entirely
//! client-side: it never issues a request and never mutates the source
//! rows. Matching is a case-insensitive substring test against a record's
//! name parts and address (see `Citizen::search_haystack`).

use crate::roster::Citizen;

/// Free-text filter over fetched rows
#[derive(Debug, Clone, Default)]
pub struct LocalFilter {
    query: String,
}

impl LocalFilter {
    /// Create an inactive filter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current query text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query text
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Clear the query
    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// True if the filter narrows anything (non-blank query)
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Case-insensitive substring test against one record
    #[must_use]
    pub fn matches(&self, citizen: &Citizen) -> bool {
        citizen
            .search_haystack()
            .contains(&self.query.trim().to_lowercase())
    }

    /// Narrow a fetched result set without mutating it
    ///
    /// Returns all rows when the filter is inactive.
    #[must_use]
    pub fn apply<'a>(&self, rows: &'a [Citizen]) -> Vec<&'a Citizen> {
        if !self.is_active() {
            return rows.iter().collect();
        }
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}
