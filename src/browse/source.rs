//! Authoritative result source selection
//!
//! Exactly one server-side source backs the visible rows at any time:
//! either the paged slice of the full roster, or the full match set of an
//! explicitly submitted search. Pagination behaves differently for each
//! (server-side for the slice, client-side for search results), so the
//! session dispatches on this tag rather than on ad-hoc flags.

/// Which server-side data source currently owns the result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultSource {
    /// Paged slice of the full unfiltered roster; the server returns one
    /// window at a time and the roster's total count.
    #[default]
    Slice,

    /// Full match set of the submitted criteria; fetched once, paginated
    /// client-side.
    Search,
}

impl ResultSource {
    /// True while an explicit search owns the results
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search)
    }
}
