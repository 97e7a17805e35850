//! Query state owned by the controller.

use moviesearch_api::tmdb::{Movie, SearchMoviesParams};

/// Identifies one fetch/cache unit: (search string, 1-based page).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    /// Search string.
    pub query: String,
    /// 1-based page number.
    pub page: u32,
}

impl QueryKey {
    /// Creates a key.
    #[must_use]
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page,
        }
    }

    /// Request parameters for this key.
    #[must_use]
    pub fn params(&self) -> SearchMoviesParams {
        SearchMoviesParams::new(self.query.clone()).page(self.page)
    }
}

/// Current query, page, and selected movie.
///
/// Starts with an empty query on page 1 and no selection.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    query: String,
    page: u32,
    selected: Option<Movie>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            selected: None,
        }
    }
}

impl QueryState {
    /// Current search string.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current 1-based page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Currently selected movie.
    #[must_use]
    pub const fn selected(&self) -> Option<&Movie> {
        self.selected.as_ref()
    }

    /// Key for the current (query, page), or `None` while the query is empty.
    #[must_use]
    pub fn key(&self) -> Option<QueryKey> {
        if self.query.trim().is_empty() {
            return None;
        }
        Some(QueryKey::new(self.query.clone(), self.page))
    }

    /// Replaces the query. Returns `false` when unchanged.
    ///
    /// A changed query always resets the page to 1.
    pub(crate) fn set_query(&mut self, query: String) -> bool {
        if query == self.query {
            return false;
        }
        self.query = query;
        self.page = 1;
        true
    }

    /// Sets the page. Returns `false` when unchanged.
    pub(crate) fn set_page(&mut self, page: u32) -> bool {
        if page == self.page || page == 0 {
            return false;
        }
        self.page = page;
        true
    }

    pub(crate) fn select(&mut self, movie: Movie) {
        self.selected = Some(movie);
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
    }
}
