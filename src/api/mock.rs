//! Mock registry API for testing
//!
//! Serves a fixed in-memory roster and scripted search results without any
//! network. Every call is recorded so tests can assert exactly which
//! requests a session issued (and, just as importantly, which it did not).

use super::error::{ApiError, Result};
use super::RosterApi;
use crate::filters::FilterCriteria;
use crate::roster::{Citizen, ResultSet, Statistics};
use std::cell::RefCell;

/// A recorded API call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Slice { start: u64, end: u64 },
    Search(serde_json::Map<String, serde_json::Value>),
    Fetch(i64),
    Update(i64),
    Statistics,
}

/// Scripted [`RosterApi`] implementation backed by an in-memory roster
#[derive(Debug, Default)]
pub struct MockRosterApi {
    roster: Vec<Citizen>,
    search_result: Option<ResultSet>,
    statistics: Option<Statistics>,
    fail_next: RefCell<bool>,
    calls: RefCell<Vec<ApiCall>>,
}

impl MockRosterApi {
    /// Create a mock serving the given roster
    #[must_use]
    pub fn new(roster: Vec<Citizen>) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    /// Script the result of the next (and every) search call
    #[must_use]
    pub fn with_search_result(mut self, result: ResultSet) -> Self {
        self.search_result = Some(result);
        self
    }

    /// Script the statistics response
    #[must_use]
    pub fn with_statistics(mut self, statistics: Statistics) -> Self {
        self.statistics = Some(statistics);
        self
    }

    /// Make the next call fail with an HTTP 500
    pub fn fail_next(&self) {
        *self.fail_next.borrow_mut() = true;
    }

    /// All calls recorded so far
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    /// Number of calls recorded so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, call: ApiCall) -> Result<()> {
        self.calls.borrow_mut().push(call);
        if std::mem::take(&mut *self.fail_next.borrow_mut()) {
            return Err(ApiError::Status(500));
        }
        Ok(())
    }
}

impl RosterApi for MockRosterApi {
    fn fetch_slice(&self, start: u64, end: u64) -> Result<ResultSet> {
        self.record(ApiCall::Slice { start, end })?;

        let len = self.roster.len() as u64;
        let start_idx = start.min(len) as usize;
        let end_idx = end.min(len) as usize;

        Ok(ResultSet {
            rows: self.roster[start_idx..end_idx].to_vec(),
            total_count: len,
        })
    }

    fn search(&self, criteria: &FilterCriteria) -> Result<ResultSet> {
        self.record(ApiCall::Search(criteria.to_request()))?;

        self.search_result.clone().ok_or_else(|| {
            ApiError::Malformed("mock has no scripted search result".to_string())
        })
    }

    fn fetch_citizen(&self, id: i64) -> Result<Citizen> {
        self.record(ApiCall::Fetch(id))?;

        self.roster
            .iter()
            .find(|citizen| citizen.id == id)
            .cloned()
            .ok_or(ApiError::Status(404))
    }

    fn update_citizen(&self, citizen: &Citizen) -> Result<Citizen> {
        self.record(ApiCall::Update(citizen.id))?;
        Ok(citizen.clone())
    }

    fn fetch_statistics(&self) -> Result<Statistics> {
        self.record(ApiCall::Statistics)?;

        self.statistics.clone().ok_or_else(|| {
            ApiError::Malformed("mock has no scripted statistics".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: i64) -> Vec<Citizen> {
        (1..=n).map(Citizen::with_id).collect()
    }

    #[test]
    fn test_slice_returns_window_and_full_count() {
        let mock = MockRosterApi::new(roster(57));

        let set = mock.fetch_slice(0, 10).unwrap();
        assert_eq!(set.rows.len(), 10);
        assert_eq!(set.total_count, 57);
        assert_eq!(set.rows[0].id, 1);

        assert_eq!(mock.calls(), vec![ApiCall::Slice { start: 0, end: 10 }]);
    }

    #[test]
    fn test_slice_clamps_past_the_end() {
        let mock = MockRosterApi::new(roster(5));

        let set = mock.fetch_slice(3, 10).unwrap();
        assert_eq!(set.rows.len(), 2);
        assert_eq!(set.total_count, 5);
    }

    #[test]
    fn test_fail_next_fails_exactly_once() {
        let mock = MockRosterApi::new(roster(3));
        mock.fail_next();

        assert!(matches!(
            mock.fetch_slice(0, 10),
            Err(ApiError::Status(500))
        ));
        assert!(mock.fetch_slice(0, 10).is_ok());
        assert_eq!(mock.call_count(), 2);
    }

    #[test]
    fn test_fetch_unknown_id_is_404() {
        let mock = MockRosterApi::new(roster(3));
        assert!(matches!(mock.fetch_citizen(99), Err(ApiError::Status(404))));
    }
}
