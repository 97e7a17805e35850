//! View derivation.
//!
//! `render` is a pure function of the query state and the cache snapshot.
//! It decides which parts of the screen exist; drawing is up to the UI.

use moviesearch_api::tmdb::Movie;

use crate::cache::QuerySnapshot;
use crate::pagination::{PaginationConfig, PaginationView};
use crate::query::QueryState;

/// Generic message shown in place of the grid when a fetch failed.
pub const ERROR_MESSAGE: &str = "There was an error, please try again...";

/// Derived state of the search screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No query yet.
    Idle,
    /// First fetch for the current key in flight.
    Loading,
    /// Last fetch for the current key failed.
    Error,
    /// Search completed with zero results.
    Empty,
    /// Results to show.
    Populated,
}

/// Everything the UI needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    /// Derived phase.
    pub phase: Phase,
    /// Current query.
    pub query: &'a str,
    /// Current 1-based page.
    pub page: u32,
    /// Total pages of the displayed response.
    pub total_pages: u32,
    /// Total results of the displayed response.
    pub total_results: u32,
    /// Show the loading indicator.
    pub show_loader: bool,
    /// Error message replacing the grid.
    pub error: Option<&'static str>,
    /// Grid contents; empty when the grid is hidden.
    pub movies: &'a [Movie],
    /// Pagination control, when shown.
    pub pagination: Option<PaginationView>,
    /// Detail overlay contents, when open.
    pub overlay: Option<&'a Movie>,
    /// Grid shows data of another page while the current page loads.
    pub is_stale: bool,
}

impl View<'_> {
    /// Whether the grid is rendered.
    #[must_use]
    pub const fn shows_grid(&self) -> bool {
        !self.movies.is_empty()
    }
}

/// Derives the view for `state` given the cache `snapshot`.
#[must_use]
pub fn render<'a>(
    state: &'a QueryState,
    snapshot: &'a QuerySnapshot,
    config: PaginationConfig,
) -> View<'a> {
    let data = snapshot.data.as_deref();

    let phase = if state.key().is_none() {
        Phase::Idle
    } else if snapshot.is_error {
        Phase::Error
    } else if snapshot.is_loading {
        Phase::Loading
    } else {
        match data {
            Some(response) if response.results.is_empty() => Phase::Empty,
            Some(_) => Phase::Populated,
            None => Phase::Loading,
        }
    };

    let settled = matches!(phase, Phase::Empty | Phase::Populated);
    let total_pages = data.map_or(0, |d| d.total_pages);

    let movies: &[Movie] = match data {
        Some(response) if settled => &response.results,
        _ => &[],
    };

    let pagination = if settled {
        let page_count = usize::try_from(total_pages).unwrap_or(usize::MAX);
        let selected = usize::try_from(state.page().saturating_sub(1)).unwrap_or(0);
        PaginationView::build(page_count, selected, config)
    } else {
        None
    };

    View {
        phase,
        query: state.query(),
        page: state.page(),
        total_pages,
        total_results: data.map_or(0, |d| d.total_results),
        show_loader: phase == Phase::Loading,
        error: (phase == Phase::Error).then_some(ERROR_MESSAGE),
        movies,
        pagination,
        overlay: state.selected(),
        is_stale: snapshot.is_placeholder,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;

    use super::*;
    use crate::test_support::{movie, response};

    fn state_with(query: &str, page: u32) -> QueryState {
        let mut state = QueryState::default();
        state.set_query(String::from(query));
        state.set_page(page);
        state
    }

    fn ready(total_pages: u32, titles: &[&str]) -> QuerySnapshot {
        QuerySnapshot {
            data: Some(Arc::new(response(1, total_pages, titles))),
            ..QuerySnapshot::default()
        }
    }

    #[test]
    fn test_idle() {
        // Arrange
        let state = QueryState::default();
        let snapshot = QuerySnapshot::default();

        // Act
        let view = render(&state, &snapshot, PaginationConfig::default());

        // Assert
        assert_eq!(view.phase, Phase::Idle);
        assert!(!view.show_loader);
        assert!(!view.shows_grid());
        assert!(view.pagination.is_none());
    }

    #[test]
    fn test_loading() {
        // Arrange
        let state = state_with("batman", 1);
        let snapshot = QuerySnapshot {
            is_loading: true,
            is_fetching: true,
            ..QuerySnapshot::default()
        };

        // Act
        let view = render(&state, &snapshot, PaginationConfig::default());

        // Assert
        assert_eq!(view.phase, Phase::Loading);
        assert!(view.show_loader);
        assert!(view.error.is_none());
    }

    #[test]
    fn test_error_replaces_grid() {
        // Arrange
        let state = state_with("batman", 1);
        let snapshot = QuerySnapshot {
            is_error: true,
            ..QuerySnapshot::default()
        };

        // Act
        let view = render(&state, &snapshot, PaginationConfig::default());

        // Assert
        assert_eq!(view.phase, Phase::Error);
        assert_eq!(view.error, Some(ERROR_MESSAGE));
        assert!(!view.shows_grid());
        assert!(view.pagination.is_none());
    }

    #[test]
    fn test_empty_result() {
        // Arrange
        let state = state_with("zzzzqqq", 1);
        let snapshot = ready(0, &[]);

        // Act
        let view = render(&state, &snapshot, PaginationConfig::default());

        // Assert
        assert_eq!(view.phase, Phase::Empty);
        assert!(!view.shows_grid());
        assert!(view.pagination.is_none());
    }

    #[test]
    fn test_single_page_hides_pagination() {
        // Arrange
        let state = state_with("batman", 1);
        let snapshot = ready(1, &["Batman", "Batman Returns"]);

        // Act
        let view = render(&state, &snapshot, PaginationConfig::default());

        // Assert
        assert_eq!(view.phase, Phase::Populated);
        assert_eq!(view.movies.len(), 2);
        assert!(view.pagination.is_none());
    }

    #[test]
    fn test_many_pages_show_pagination_at_current_page() {
        // Arrange
        let state = state_with("batman", 3);
        let snapshot = ready(20, &["Batman"]);

        // Act
        let view = render(&state, &snapshot, PaginationConfig::default());

        // Assert
        let pagination = view.pagination.unwrap();
        assert_eq!(pagination.page_count, 20);
        assert_eq!(pagination.selected, 2);
    }

    #[test]
    fn test_placeholder_is_stale_and_visible() {
        // Arrange
        let state = state_with("batman", 2);
        let mut snapshot = ready(20, &["Batman"]);
        snapshot.is_placeholder = true;
        snapshot.is_fetching = true;

        // Act
        let view = render(&state, &snapshot, PaginationConfig::default());

        // Assert
        assert_eq!(view.phase, Phase::Populated);
        assert!(view.is_stale);
        assert!(!view.show_loader);
        assert_eq!(view.movies.len(), 1);
        assert_eq!(view.pagination.unwrap().selected, 1);
    }

    #[test]
    fn test_overlay_follows_selection() {
        // Arrange
        let mut state = state_with("batman", 1);
        state.select(movie(7, "Batman"));
        let snapshot = ready(1, &["Batman"]);

        // Act
        let view = render(&state, &snapshot, PaginationConfig::default());

        // Assert
        assert_eq!(view.overlay.map(|m| m.id), Some(7));
    }
}
