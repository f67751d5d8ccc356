//! Pagination window state
//!
//! A page window is the pair `{page, rows_per_page}`; `page * rows_per_page`
//! is the zero-based offset into whichever result set is authoritative. The
//! window round-trips through a `page=N&rows=M` query string so a session
//! can be resumed or shared; anything malformed fails open to the defaults
//! instead of erroring.

use std::fmt;

/// Default page size when nothing else is specified
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Current pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: usize,
    rows_per_page: usize,
}

impl PageWindow {
    /// Create a window at page 0 with the default page size
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }

    /// Create a window at the given position
    ///
    /// A zero `rows_per_page` falls back to the default to keep the
    /// window invariant (`rows_per_page > 0`) intact.
    #[must_use]
    pub const fn at(page: usize, rows_per_page: usize) -> Self {
        Self {
            page,
            rows_per_page: if rows_per_page == 0 {
                DEFAULT_ROWS_PER_PAGE
            } else {
                rows_per_page
            },
        }
    }

    /// Current zero-based page
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Current page size
    #[must_use]
    pub const fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Zero-based offset of the first row of the window
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page * self.rows_per_page
    }

    /// Exclusive end offset of the window
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset() + self.rows_per_page
    }

    /// Jump to a page
    pub const fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change the page size, preserving the approximate position
    ///
    /// The new page is chosen so the first visible row stays close:
    /// `new_page = old_page * old_rows / new_rows` (integer floor).
    /// A zero size is ignored.
    pub const fn set_rows_per_page(&mut self, rows_per_page: usize) {
        if rows_per_page == 0 {
            return;
        }
        self.page = self.page * self.rows_per_page / rows_per_page;
        self.rows_per_page = rows_per_page;
    }

    /// Parse a `page=N&rows=M` query string
    ///
    /// Each value fails open independently: an unparsable or missing `page`
    /// becomes 0, an unparsable, missing or zero `rows` becomes the default.
    /// Unknown keys are ignored.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut window = Self::new();

        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key.trim() {
                "page" => {
                    if let Ok(page) = value.trim().parse() {
                        window.page = page;
                    }
                }
                "rows" => {
                    if let Ok(rows) = value.trim().parse::<usize>()
                        && rows > 0
                    {
                        window.rows_per_page = rows;
                    }
                }
                _ => {}
            }
        }

        window
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PageWindow {
    /// Render as the shareable `page=N&rows=M` query string
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page={}&rows={}", self.page, self.rows_per_page)
    }
}
