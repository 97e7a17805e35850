//! Application controller.
//!
//! Owns the query state and the query cache. UI events go in through
//! `dispatch`; fetches to start and notifications to show come out as
//! `Command`s. After every transition the cache is re-observed and the
//! empty-result guard runs, so `view` always reflects the latest state.

use crate::cache::{QueryCache, QuerySnapshot};
use crate::fetch::FetchOutcome;
use crate::notification::Notification;
use crate::pagination::PaginationConfig;
use crate::query::{QueryKey, QueryState};
use crate::view::{self, View};

/// Input to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Trimmed, non-empty query from the search bar.
    Submit(String),
    /// Zero-based page index from the pagination control.
    PageChange(usize),
    /// Index of the activated grid cell.
    Select(usize),
    /// Detail overlay dismissed.
    CloseOverlay,
    /// Drop the cached result for the current key and fetch it again.
    Refresh,
    /// A fetch finished.
    FetchFinished(FetchOutcome),
}

/// Side effect requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a fetch for this key.
    Fetch(QueryKey),
    /// Show a notification.
    Notify(Notification),
}

/// Search screen controller.
#[derive(Debug)]
pub struct Controller {
    state: QueryState,
    cache: QueryCache,
    snapshot: QuerySnapshot,
    /// Last key the empty-result notification fired for.
    notified_for: Option<QueryKey>,
    pagination: PaginationConfig,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(PaginationConfig::default())
    }
}

impl Controller {
    /// Creates a controller with an empty query and an empty cache.
    #[must_use]
    pub fn new(pagination: PaginationConfig) -> Self {
        Self {
            state: QueryState::default(),
            cache: QueryCache::new(),
            snapshot: QuerySnapshot::default(),
            notified_for: None,
            pagination,
        }
    }

    /// Current query state.
    #[must_use]
    pub const fn state(&self) -> &QueryState {
        &self.state
    }

    /// Snapshot of the cache for the current key.
    #[must_use]
    pub const fn snapshot(&self) -> &QuerySnapshot {
        &self.snapshot
    }

    /// Describes what to draw.
    #[must_use]
    pub fn view(&self) -> View<'_> {
        view::render(&self.state, &self.snapshot, self.pagination)
    }

    /// Applies one event and returns the resulting commands.
    pub fn dispatch(&mut self, event: Event) -> Vec<Command> {
        let mut commands = Vec::new();

        match event {
            Event::Submit(query) => {
                if self.state.set_query(query) {
                    tracing::debug!(query = self.state.query(), "query changed");
                    self.notified_for = None;
                    self.request_current(&mut commands);
                }
            }
            Event::PageChange(index) => self.change_page(index, &mut commands),
            Event::Select(index) => {
                let movie = self.view().movies.get(index).cloned();
                if let Some(movie) = movie {
                    tracing::debug!(id = movie.id, title = %movie.title, "movie selected");
                    self.state.select(movie);
                }
            }
            Event::CloseOverlay => self.state.clear_selection(),
            Event::Refresh => {
                if let Some(key) = self.state.key()
                    && !self.snapshot.is_fetching
                {
                    tracing::debug!(query = %key.query, page = key.page, "refreshing");
                    self.cache.invalidate(&key);
                    self.request_current(&mut commands);
                }
            }
            Event::FetchFinished(outcome) => {
                if self.state.key().as_ref() != Some(&outcome.key) {
                    tracing::debug!(
                        query = %outcome.key.query,
                        page = outcome.key.page,
                        "storing superseded response"
                    );
                }
                self.cache.complete(outcome.key, outcome.result);
            }
        }

        commands.extend(self.sync());
        commands
    }

    /// Re-observes the cache and re-runs the empty-result guard.
    ///
    /// Safe to call on every frame: the guard fires at most once per key.
    pub fn sync(&mut self) -> Option<Command> {
        self.snapshot = self.cache.observe(self.state.key().as_ref());
        self.empty_result_guard().map(Command::Notify)
    }

    fn change_page(&mut self, index: usize, commands: &mut Vec<Command>) {
        if self.view().pagination.is_none() {
            return;
        }
        let Some(page) = index
            .checked_add(1)
            .and_then(|page| u32::try_from(page).ok())
        else {
            return;
        };
        let total_pages = self.snapshot.data.as_ref().map_or(0, |d| d.total_pages);
        if page > total_pages {
            tracing::debug!(page, total_pages, "ignoring out-of-range page");
            return;
        }
        if self.state.set_page(page) {
            tracing::debug!(page, "page changed");
            self.notified_for = None;
            self.request_current(commands);
        }
    }

    fn request_current(&mut self, commands: &mut Vec<Command>) {
        if let Some(key) = self.state.key()
            && self.cache.request(&key)
        {
            commands.push(Command::Fetch(key));
        }
    }

    fn empty_result_guard(&mut self) -> Option<Notification> {
        let key = self.state.key()?;
        let snapshot = &self.snapshot;
        if snapshot.is_loading || snapshot.is_fetching || snapshot.is_placeholder {
            return None;
        }
        let data = snapshot.data.as_ref()?;
        if !data.results.is_empty() || self.notified_for.as_ref() == Some(&key) {
            return None;
        }
        tracing::info!(query = %key.query, page = key.page, "search returned no results");
        self.notified_for = Some(key);
        Some(Notification::NoResults)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use moviesearch_api::tmdb::SearchMoviesResponse;

    use super::*;
    use crate::fetch::FetchError;
    use crate::test_support::response;
    use crate::view::Phase;

    fn key(query: &str, page: u32) -> QueryKey {
        QueryKey::new(query, page)
    }

    fn finished(key: QueryKey, response: SearchMoviesResponse) -> Event {
        Event::FetchFinished(FetchOutcome {
            key,
            result: Ok(response),
        })
    }

    fn failed(key: QueryKey) -> Event {
        Event::FetchFinished(FetchOutcome {
            key,
            result: Err(FetchError::new("HTTP 401")),
        })
    }

    /// Controller showing page 1 of "batman" with 20 pages.
    fn batman_loaded() -> Controller {
        let mut controller = Controller::default();
        controller.dispatch(Event::Submit(String::from("batman")));
        controller.dispatch(finished(
            key("batman", 1),
            response(1, 20, &["Batman", "Batman Returns", "The Batman"]),
        ));
        controller
    }

    #[test]
    fn test_initial_view_is_idle() {
        // Arrange & Act
        let controller = Controller::default();

        // Assert
        assert_eq!(controller.view().phase, Phase::Idle);
        assert_eq!(controller.state().page(), 1);
    }

    #[test]
    fn test_submit_requests_fetch_and_loads() {
        // Arrange
        let mut controller = Controller::default();

        // Act
        let commands = controller.dispatch(Event::Submit(String::from("batman")));

        // Assert
        assert_eq!(commands, vec![Command::Fetch(key("batman", 1))]);
        assert_eq!(controller.view().phase, Phase::Loading);
    }

    #[test]
    fn test_submit_same_query_is_ignored() {
        // Arrange
        let mut controller = batman_loaded();

        // Act
        let commands = controller.dispatch(Event::Submit(String::from("batman")));

        // Assert
        assert!(commands.is_empty());
        assert_eq!(controller.view().phase, Phase::Populated);
    }

    #[test]
    fn test_changed_query_resets_page() {
        // Arrange
        let mut controller = batman_loaded();
        controller.dispatch(Event::PageChange(4));
        assert_eq!(controller.state().page(), 5);

        // Act
        let commands = controller.dispatch(Event::Submit(String::from("joker")));

        // Assert
        assert_eq!(controller.state().page(), 1);
        assert_eq!(commands, vec![Command::Fetch(key("joker", 1))]);
        assert_eq!(controller.view().phase, Phase::Loading);
    }

    #[test]
    fn test_empty_result_notifies_once() {
        // Arrange
        let mut controller = Controller::default();
        controller.dispatch(Event::Submit(String::from("batman")));

        // Act
        let commands = controller.dispatch(finished(key("batman", 1), response(1, 0, &[])));
        let rerender = controller.sync();
        let rerender_again = controller.sync();

        // Assert
        assert_eq!(commands, vec![Command::Notify(Notification::NoResults)]);
        assert_eq!(rerender, None);
        assert_eq!(rerender_again, None);
        assert_eq!(controller.view().phase, Phase::Empty);
    }

    #[test]
    fn test_empty_result_notifies_again_for_new_query() {
        // Arrange
        let mut controller = Controller::default();
        controller.dispatch(Event::Submit(String::from("zzz")));
        controller.dispatch(finished(key("zzz", 1), response(1, 0, &[])));
        controller.dispatch(Event::Submit(String::from("qqq")));

        // Act
        let commands = controller.dispatch(finished(key("qqq", 1), response(1, 0, &[])));

        // Assert
        assert_eq!(commands, vec![Command::Notify(Notification::NoResults)]);
    }

    #[test]
    fn test_returning_to_cached_empty_query_notifies_again() {
        // Arrange
        let mut controller = Controller::default();
        controller.dispatch(Event::Submit(String::from("zzz")));
        controller.dispatch(finished(key("zzz", 1), response(1, 0, &[])));
        controller.dispatch(Event::Submit(String::from("batman")));

        // Act: cache hit, no fetch, guard runs on the cached data
        let commands = controller.dispatch(Event::Submit(String::from("zzz")));

        // Assert
        assert_eq!(commands, vec![Command::Notify(Notification::NoResults)]);
    }

    #[test]
    fn test_populated_result_does_not_notify() {
        // Arrange
        let mut controller = Controller::default();
        controller.dispatch(Event::Submit(String::from("batman")));

        // Act
        let commands = controller.dispatch(finished(key("batman", 1), response(1, 1, &["Batman"])));

        // Assert
        assert!(commands.is_empty());
        assert_eq!(controller.view().phase, Phase::Populated);
    }

    #[test]
    fn test_next_page_keeps_previous_results_visible() {
        // Arrange
        let mut controller = batman_loaded();
        assert!(controller.view().pagination.is_some());

        // Act
        let commands = controller.dispatch(Event::PageChange(1));

        // Assert
        assert_eq!(commands, vec![Command::Fetch(key("batman", 2))]);
        assert_eq!(controller.state().page(), 2);
        let view = controller.view();
        assert_eq!(view.phase, Phase::Populated);
        assert!(view.is_stale);
        assert!(!view.show_loader);
        assert_eq!(view.movies[0].title, "Batman");
    }

    #[test]
    fn test_next_page_resolves() {
        // Arrange
        let mut controller = batman_loaded();
        controller.dispatch(Event::PageChange(1));

        // Act
        controller.dispatch(finished(key("batman", 2), response(2, 20, &["Batman Begins"])));

        // Assert
        let view = controller.view();
        assert!(!view.is_stale);
        assert_eq!(view.movies[0].title, "Batman Begins");
        assert_eq!(view.pagination.unwrap().selected, 1);
    }

    #[test]
    fn test_superseded_page_is_not_displayed() {
        // Arrange
        let mut controller = batman_loaded();
        controller.dispatch(Event::PageChange(1));
        controller.dispatch(Event::PageChange(2));

        // Act: page 2 arrives after the user moved on to page 3
        let commands =
            controller.dispatch(finished(key("batman", 2), response(2, 20, &["Batman Begins"])));

        // Assert
        assert!(commands.is_empty());
        let view = controller.view();
        assert_eq!(controller.state().page(), 3);
        assert!(view.is_stale);
        assert_eq!(view.movies[0].title, "Batman");
    }

    #[test]
    fn test_cached_page_is_not_refetched() {
        // Arrange
        let mut controller = batman_loaded();
        controller.dispatch(Event::PageChange(1));
        controller.dispatch(finished(key("batman", 2), response(2, 20, &["Batman Begins"])));

        // Act
        let commands = controller.dispatch(Event::PageChange(0));

        // Assert
        assert!(commands.is_empty());
        assert_eq!(controller.view().movies[0].title, "Batman");
    }

    #[test]
    fn test_refresh_refetches_current_key() {
        // Arrange
        let mut controller = batman_loaded();

        // Act
        let commands = controller.dispatch(Event::Refresh);

        // Assert
        assert_eq!(commands, vec![Command::Fetch(key("batman", 1))]);
        assert_eq!(controller.view().phase, Phase::Loading);
    }

    #[test]
    fn test_refresh_without_query_is_noop() {
        // Arrange
        let mut controller = Controller::default();

        // Act
        let commands = controller.dispatch(Event::Refresh);

        // Assert
        assert!(commands.is_empty());
        assert_eq!(controller.view().phase, Phase::Idle);
    }

    #[test]
    fn test_page_change_ignored_for_current_or_out_of_range() {
        // Arrange
        let mut controller = batman_loaded();

        // Act
        let same = controller.dispatch(Event::PageChange(0));
        let beyond = controller.dispatch(Event::PageChange(20));

        // Assert
        assert!(same.is_empty());
        assert!(beyond.is_empty());
        assert_eq!(controller.state().page(), 1);
    }

    #[test]
    fn test_page_change_ignored_without_pagination() {
        // Arrange
        let mut controller = Controller::default();
        controller.dispatch(Event::Submit(String::from("batman")));
        controller.dispatch(finished(key("batman", 1), response(1, 1, &["Batman"])));

        // Act
        let commands = controller.dispatch(Event::PageChange(1));

        // Assert
        assert!(commands.is_empty());
        assert!(controller.view().pagination.is_none());
    }

    #[test]
    fn test_fetch_error_shows_error_view() {
        // Arrange
        let mut controller = Controller::default();
        controller.dispatch(Event::Submit(String::from("batman")));

        // Act
        let commands = controller.dispatch(failed(key("batman", 1)));

        // Assert
        assert!(commands.is_empty());
        let view = controller.view();
        assert_eq!(view.phase, Phase::Error);
        assert!(view.error.is_some());
        assert!(view.pagination.is_none());
        assert!(!view.shows_grid());
    }

    #[test]
    fn test_failed_key_is_fetched_again_on_new_search() {
        // Arrange
        let mut controller = Controller::default();
        controller.dispatch(Event::Submit(String::from("batman")));
        controller.dispatch(failed(key("batman", 1)));
        controller.dispatch(Event::Submit(String::from("joker")));

        // Act
        let commands = controller.dispatch(Event::Submit(String::from("batman")));

        // Assert
        assert_eq!(commands, vec![Command::Fetch(key("batman", 1))]);
    }

    #[test]
    fn test_error_stays_until_user_action() {
        // Arrange
        let mut controller = Controller::default();
        controller.dispatch(Event::Submit(String::from("batman")));
        controller.dispatch(failed(key("batman", 1)));

        // Act
        let rerender = controller.sync();

        // Assert
        assert_eq!(rerender, None);
        assert_eq!(controller.view().phase, Phase::Error);
    }

    #[test]
    fn test_select_then_close_restores_view() {
        // Arrange
        let mut controller = batman_loaded();
        let before_movies = controller.view().movies.to_vec();
        let before_pagination = controller.view().pagination;

        // Act
        let select_commands = controller.dispatch(Event::Select(1));
        let selected = controller.view().overlay.map(|m| m.title.clone());
        let close_commands = controller.dispatch(Event::CloseOverlay);

        // Assert
        assert!(select_commands.is_empty());
        assert!(close_commands.is_empty());
        assert_eq!(selected.as_deref(), Some("Batman Returns"));
        let view = controller.view();
        assert!(view.overlay.is_none());
        assert_eq!(view.movies, before_movies.as_slice());
        assert_eq!(view.pagination, before_pagination);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        // Arrange
        let mut controller = batman_loaded();

        // Act
        controller.dispatch(Event::Select(99));

        // Assert
        assert!(controller.view().overlay.is_none());
    }

    #[test]
    fn test_select_ignored_while_loading() {
        // Arrange
        let mut controller = Controller::default();
        controller.dispatch(Event::Submit(String::from("batman")));

        // Act
        controller.dispatch(Event::Select(0));

        // Assert
        assert!(controller.state().selected().is_none());
    }
}
