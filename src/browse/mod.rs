//! Roster browsing core
//!
//! The pieces that make up a browse session, leaf to root: the pagination
//! window ([`pager::PageWindow`]), the authoritative result source tag
//! ([`source::ResultSource`]), the client-side local filter
//! ([`filter::LocalFilter`]), and the controller that orchestrates them
//! ([`session::BrowseSession`]).

pub mod filter;
pub mod pager;
pub mod session;
pub mod source;

pub use filter::LocalFilter;
pub use pager::{DEFAULT_ROWS_PER_PAGE, PageWindow};
pub use session::{BrowseSession, LOAD_FAILED, SEARCH_FAILED, SearchOutcome};
pub use source::ResultSource;
