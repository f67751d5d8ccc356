//! Browse session management
//!
//! This module implements the core controller for browsing the roster: it
//! owns the pagination window, the server-side search criteria, the
//! client-side local filter, and the current result set, and it decides
//! which fetches to issue and when.
//!
//! # Architecture
//!
//! - **`BrowseSession`**: one instance per active view, owning all state
//! - **`ResultSource`**: tags whether the slice or the search results are
//!   authoritative; exactly one is at any time
//! - **Explicit commands**: fetches are triggered only by the command
//!   methods (`load`, `on_page_change`, `on_search`, ...), never implicitly
//! - **Fail soft**: fetch failures empty the result set and record a single
//!   user-facing message; they never propagate as `Err`
//!
//! # Fetch sequencing
//!
//! Every fetch takes a monotonically increasing ticket from `begin_fetch`;
//! `apply_fetch` discards any completion whose ticket is not the latest.
//! With the blocking HTTP client completions arrive in order, but the guard
//! keeps a slow stale response from ever overwriting a newer result if the
//! transport becomes concurrent.

use crate::api::{self, RosterApi};
use crate::browse::filter::LocalFilter;
use crate::browse::pager::PageWindow;
use crate::browse::source::ResultSource;
use crate::filters::FilterCriteria;
use crate::roster::{Citizen, ResultSet};

/// Message recorded when a roster slice fetch fails
pub const LOAD_FAILED: &str = "failed to load roster";
/// Message recorded when a search fetch fails
pub const SEARCH_FAILED: &str = "failed to execute search";

/// Result of submitting search criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Criteria were sent to the server
    Submitted,
    /// Every criterion was blank; no request was issued
    NoCriteria,
}

/// Browse session - owns all state for one roster view
pub struct BrowseSession<'a> {
    api: &'a dyn RosterApi,
    window: PageWindow,
    criteria: FilterCriteria,
    local: LocalFilter,
    source: ResultSource,
    results: ResultSet,
    error: Option<String>,
    loading: bool,
    /// Ticket of the most recently issued fetch
    seq: u64,
}

impl<'a> BrowseSession<'a> {
    /// Create a session at page 0 with the default page size
    ///
    /// No fetch is issued until `load` (or a command method) is called.
    #[must_use]
    pub fn new(api: &'a dyn RosterApi) -> Self {
        Self::with_window(api, PageWindow::new())
    }

    /// Create a session at a specific window (e.g. restored from a
    /// `page=N&rows=M` state token)
    #[must_use]
    pub fn with_window(api: &'a dyn RosterApi, window: PageWindow) -> Self {
        Self {
            api,
            window,
            criteria: FilterCriteria::new(),
            local: LocalFilter::new(),
            source: ResultSource::Slice,
            results: ResultSet::empty(),
            error: None,
            loading: false,
            seq: 0,
        }
    }

    /// Fetch the authoritative result set for the current state
    ///
    /// On success the result set is replaced wholesale and any previous
    /// error is cleared. On failure the result set becomes empty and a
    /// user-facing message is recorded. The loading flag is cleared on
    /// every exit path.
    pub fn load(&mut self) {
        let ticket = self.begin_fetch();
        let outcome = match self.source {
            ResultSource::Slice => self
                .api
                .fetch_slice(self.window.offset() as u64, self.window.end() as u64),
            ResultSource::Search => self.api.search(&self.criteria),
        };
        self.apply_fetch(ticket, outcome);
    }

    /// Start a fetch, marking the session loading and returning its ticket
    pub fn begin_fetch(&mut self) -> u64 {
        self.seq += 1;
        self.loading = true;
        self.seq
    }

    /// Apply a fetch completion
    ///
    /// A stale ticket (one superseded by a later `begin_fetch`) is
    /// discarded entirely: the newer fetch owns the result set and the
    /// loading flag.
    pub fn apply_fetch(&mut self, ticket: u64, outcome: api::Result<ResultSet>) {
        if ticket != self.seq {
            return;
        }

        match outcome {
            Ok(results) => {
                self.results = results;
                self.error = None;
            }
            Err(_) => {
                self.results = ResultSet::empty();
                self.error = Some(
                    match self.source {
                        ResultSource::Slice => LOAD_FAILED,
                        ResultSource::Search => SEARCH_FAILED,
                    }
                    .to_string(),
                );
            }
        }
        self.loading = false;
    }

    /// Jump to a page
    ///
    /// Re-fetches only while the slice is authoritative; search results
    /// are already complete client-side and are merely re-sliced.
    pub fn on_page_change(&mut self, page: usize) {
        self.window.set_page(page);
        if !self.source.is_search() {
            self.load();
        }
    }

    /// Change the page size, preserving the approximate position
    pub fn on_rows_per_page_change(&mut self, rows_per_page: usize) {
        self.window.set_rows_per_page(rows_per_page);
        if !self.source.is_search() {
            self.load();
        }
    }

    /// Submit search criteria
    ///
    /// An all-blank criteria set is a no-op: no request is issued and the
    /// session state is untouched. Otherwise the search source becomes
    /// authoritative, the page resets to 0 (page size unchanged), and the
    /// full match set is fetched.
    pub fn on_search(&mut self, criteria: FilterCriteria) -> SearchOutcome {
        if criteria.is_empty() {
            return SearchOutcome::NoCriteria;
        }

        self.criteria = criteria;
        self.source = ResultSource::Search;
        self.window.set_page(0);
        self.load();
        SearchOutcome::Submitted
    }

    /// Leave search mode
    ///
    /// Clears the criteria and the local query, makes the slice
    /// authoritative again, resets to page 0 (page size unchanged), and
    /// re-fetches the slice.
    pub fn on_reset_search(&mut self) {
        self.criteria.clear();
        self.local.clear();
        self.source = ResultSource::Slice;
        self.window.set_page(0);
        self.load();
    }

    /// Update the client-side local query
    ///
    /// The local filter only applies while search results are authoritative
    /// (a single slice page is not a meaningful haystack, and narrowing it
    /// would disagree with the server-reported totals). Returns false, and
    /// stores nothing, while search is inactive.
    pub fn set_local_query(&mut self, query: impl Into<String>) -> bool {
        if !self.source.is_search() {
            return false;
        }
        self.local.set_query(query);
        true
    }

    /// Current local query text
    #[must_use]
    pub fn local_query(&self) -> &str {
        self.local.query()
    }

    /// The rows visible in the current window
    ///
    /// Slice results arrive pre-paginated and are shown as-is. Search
    /// results are the full match set: the local filter narrows them (when
    /// active) and the window then slices them client-side.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&Citizen> {
        match self.source {
            ResultSource::Slice => self.results.rows.iter().collect(),
            ResultSource::Search => {
                let matched = self.local.apply(&self.results.rows);
                let start = self.window.offset().min(matched.len());
                let end = self.window.end().min(matched.len());
                matched[start..end].to_vec()
            }
        }
    }

    /// The total shown to the user
    ///
    /// The server-reported count, except while an active local query
    /// narrows search results, in which case it is the narrowed length.
    #[must_use]
    pub fn displayed_total(&self) -> u64 {
        if self.source.is_search() && self.local.is_active() {
            self.local.apply(&self.results.rows).len() as u64
        } else {
            self.results.total_count
        }
    }

    /// One-based span of the visible rows: (first, last, total)
    ///
    /// `(0, 0, total)` when the window is empty.
    #[must_use]
    pub fn page_span(&self) -> (u64, u64, u64) {
        let total = self.displayed_total();
        let shown = self.visible_rows().len() as u64;
        if shown == 0 {
            return (0, 0, total);
        }
        let first = self.window.offset() as u64 + 1;
        (first, first + shown - 1, total)
    }

    /// Current pagination window
    #[must_use]
    pub const fn window(&self) -> PageWindow {
        self.window
    }

    /// Active server-side criteria
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// True while an explicit search owns the results
    #[must_use]
    pub const fn search_active(&self) -> bool {
        self.source.is_search()
    }

    /// The last recorded user-facing error, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a fetch is outstanding
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The raw authoritative result set
    #[must_use]
    pub const fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Shareable `page=N&rows=M` token for resuming this window
    #[must_use]
    pub fn state_token(&self) -> String {
        self.window.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{ApiCall, MockRosterApi};
    use crate::filters::SearchField;

    fn roster(n: i64) -> Vec<Citizen> {
        (1..=n).map(Citizen::with_id).collect()
    }

    fn criteria(field: SearchField, value: &str) -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        criteria.set(field, value);
        criteria
    }

    #[test]
    fn test_load_fetches_first_slice() {
        let mock = MockRosterApi::new(roster(57));
        let mut session = BrowseSession::new(&mock);

        session.load();

        assert_eq!(session.visible_rows().len(), 10);
        assert_eq!(session.displayed_total(), 57);
        assert_eq!(session.page_span(), (1, 10, 57));
        assert!(!session.is_loading());
        assert_eq!(session.error(), None);
        assert_eq!(mock.calls(), vec![ApiCall::Slice { start: 0, end: 10 }]);
    }

    #[test]
    fn test_page_change_refetches_slice() {
        let mock = MockRosterApi::new(roster(57));
        let mut session = BrowseSession::new(&mock);
        session.load();

        session.on_page_change(2);

        assert_eq!(session.window().page(), 2);
        assert_eq!(session.page_span(), (21, 30, 57));
        assert_eq!(
            mock.calls().last(),
            Some(&ApiCall::Slice { start: 20, end: 30 })
        );
    }

    #[test]
    fn test_failed_load_is_fail_soft() {
        let mock = MockRosterApi::new(roster(57));
        mock.fail_next();
        let mut session = BrowseSession::new(&mock);

        session.load();

        assert!(session.visible_rows().is_empty());
        assert_eq!(session.displayed_total(), 0);
        assert_eq!(session.error(), Some(LOAD_FAILED));
        assert!(!session.is_loading());

        // The next success clears the banner
        session.load();
        assert_eq!(session.error(), None);
        assert_eq!(session.displayed_total(), 57);
    }

    #[test]
    fn test_empty_search_is_a_no_op() {
        let mock = MockRosterApi::new(roster(5));
        let mut session = BrowseSession::new(&mock);
        session.load();
        let calls_before = mock.call_count();

        let mut blank = FilterCriteria::new();
        blank.set(SearchField::LastName, "   ");
        let outcome = session.on_search(blank);

        assert_eq!(outcome, SearchOutcome::NoCriteria);
        assert!(!session.search_active());
        assert_eq!(mock.call_count(), calls_before);
    }

    #[test]
    fn test_search_resets_page_and_keeps_rows_per_page() {
        let mock = MockRosterApi::new(roster(57)).with_search_result(ResultSet {
            rows: roster(3),
            total_count: 3,
        });
        let mut session = BrowseSession::with_window(&mock, PageWindow::at(4, 25));
        session.load();

        let outcome = session.on_search(criteria(SearchField::LastName, "Ivanov"));

        assert_eq!(outcome, SearchOutcome::Submitted);
        assert!(session.search_active());
        assert_eq!(session.window().page(), 0);
        assert_eq!(session.window().rows_per_page(), 25);
        assert_eq!(session.page_span(), (1, 3, 3));
    }

    #[test]
    fn test_search_sends_only_active_criteria() {
        let mock = MockRosterApi::new(roster(5)).with_search_result(ResultSet::empty());
        let mut session = BrowseSession::new(&mock);

        let mut mixed = FilterCriteria::new();
        mixed.set(SearchField::LastName, "Ivanov");
        mixed.set(SearchField::City, "  ");
        session.on_search(mixed);

        let Some(ApiCall::Search(body)) = mock.calls().last().cloned() else {
            panic!("expected a search call");
        };
        assert_eq!(body.len(), 1);
        assert_eq!(body["last_name"], "Ivanov");
    }

    #[test]
    fn test_pagination_of_search_results_is_client_side() {
        let mock = MockRosterApi::new(roster(100)).with_search_result(ResultSet {
            rows: roster(30),
            total_count: 30,
        });
        let mut session = BrowseSession::new(&mock);
        session.on_search(criteria(SearchField::City, "Moscow"));
        let calls_after_search = mock.call_count();

        session.on_page_change(2);

        // No new request; rows 21..30 of the match set are shown
        assert_eq!(mock.call_count(), calls_after_search);
        let visible = session.visible_rows();
        assert_eq!(visible.len(), 10);
        assert_eq!(visible[0].id, 21);
        assert_eq!(session.page_span(), (21, 30, 30));

        session.on_rows_per_page_change(25);
        assert_eq!(mock.call_count(), calls_after_search);
    }

    #[test]
    fn test_reset_search_restores_slice() {
        let mock = MockRosterApi::new(roster(57)).with_search_result(ResultSet {
            rows: roster(3),
            total_count: 3,
        });
        let mut session = BrowseSession::new(&mock);
        session.on_search(criteria(SearchField::LastName, "Ivanov"));
        assert!(session.set_local_query("moscow"));

        session.on_reset_search();

        assert!(!session.search_active());
        assert!(session.criteria().is_empty());
        assert_eq!(session.local_query(), "");
        assert_eq!(session.window().page(), 0);
        assert_eq!(session.displayed_total(), 57);
        assert_eq!(
            mock.calls().last(),
            Some(&ApiCall::Slice { start: 0, end: 10 })
        );
    }

    #[test]
    fn test_local_query_narrows_search_results() {
        let mut matched = roster(20);
        for citizen in matched.iter_mut().take(4) {
            citizen.address = Some("Moscow".to_string());
        }
        let mock = MockRosterApi::new(Vec::new()).with_search_result(ResultSet {
            total_count: 20,
            rows: matched,
        });
        let mut session = BrowseSession::new(&mock);
        session.on_search(criteria(SearchField::Gender, "male"));

        assert!(session.set_local_query("moscow"));

        assert_eq!(session.displayed_total(), 4);
        assert_eq!(session.visible_rows().len(), 4);
        assert_eq!(session.page_span(), (1, 4, 4));
    }

    #[test]
    fn test_local_query_rejected_without_search() {
        let mock = MockRosterApi::new(roster(10));
        let mut session = BrowseSession::new(&mock);
        session.load();

        assert!(!session.set_local_query("moscow"));
        assert_eq!(session.local_query(), "");
        assert_eq!(session.visible_rows().len(), 10);
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mock = MockRosterApi::new(roster(57));
        let mut session = BrowseSession::new(&mock);

        let old = session.begin_fetch();
        let new = session.begin_fetch();

        session.apply_fetch(
            new,
            Ok(ResultSet {
                rows: roster(10),
                total_count: 57,
            }),
        );
        assert_eq!(session.displayed_total(), 57);
        assert!(!session.is_loading());

        // A slow completion of the older fetch must not win
        session.apply_fetch(
            old,
            Ok(ResultSet {
                rows: roster(3),
                total_count: 3,
            }),
        );
        assert_eq!(session.displayed_total(), 57);
        assert_eq!(session.visible_rows().len(), 10);
    }

    #[test]
    fn test_stale_failure_does_not_clobber_result() {
        let mock = MockRosterApi::new(roster(57));
        let mut session = BrowseSession::new(&mock);

        let old = session.begin_fetch();
        session.load();
        assert_eq!(session.displayed_total(), 57);

        session.apply_fetch(old, Err(crate::api::ApiError::Status(500)));
        assert_eq!(session.error(), None);
        assert_eq!(session.displayed_total(), 57);
    }

    #[test]
    fn test_state_token_round_trip() {
        let mock = MockRosterApi::new(roster(5));
        let mut session = BrowseSession::with_window(&mock, PageWindow::at(3, 25));

        let token = session.state_token();
        assert_eq!(token, "page=3&rows=25");

        session = BrowseSession::with_window(&mock, PageWindow::from_query(&token));
        assert_eq!(session.window(), PageWindow::at(3, 25));
    }
}
