//! Movie browser state management.
//!
//! Wraps the search controller with the bits that only exist in a
//! terminal: keyboard focus, grid cursor and scrolling, the page strip
//! cursor, and the toast queue.

use std::time::Instant;

use moviesearch_api::tmdb::movie_page_url;
use moviesearch_core::{
    Command, Controller, Event, FetchOutcome, PageItem, QueryKey, SearchBar, Submission, View,
};

use super::toast::ToastQueue;
use crate::config::UiConfig;

/// Which component receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Search text field.
    Search,
    /// Result grid.
    Grid,
    /// Page strip.
    Pagination,
}

/// Grid geometry measured during the last draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Cells per row.
    pub columns: usize,
    /// Rows that fit on screen.
    pub rows: usize,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 1,
            rows: 1,
        }
    }
}

/// State for the movie browser TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    /// Search controller.
    pub controller: Controller,
    /// Search text field.
    pub search_bar: SearchBar,
    /// Active component.
    pub focus: Focus,
    /// On-screen notifications.
    pub toasts: ToastQueue,
    /// Index of the highlighted grid cell.
    grid_cursor: usize,
    /// First visible grid row.
    grid_scroll: usize,
    /// Last measured grid geometry.
    grid_layout: GridLayout,
    /// Zero-based page highlighted in the page strip.
    page_cursor: usize,
}

impl BrowserState {
    /// Creates the initial state: empty query, search field focused.
    #[must_use]
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            controller: Controller::new(ui.pagination()),
            search_bar: SearchBar::new(),
            focus: Focus::Search,
            toasts: ToastQueue::new(ui.toast_duration()),
            grid_cursor: 0,
            grid_scroll: 0,
            grid_layout: GridLayout::default(),
            page_cursor: 0,
        }
    }

    /// Current view of the controller.
    #[must_use]
    pub fn view(&self) -> View<'_> {
        self.controller.view()
    }

    /// Highlighted grid cell.
    #[must_use]
    pub const fn grid_cursor(&self) -> usize {
        self.grid_cursor
    }

    /// First visible grid row.
    #[must_use]
    pub const fn grid_scroll(&self) -> usize {
        self.grid_scroll
    }

    /// Highlighted page in the strip.
    #[must_use]
    pub const fn page_cursor(&self) -> usize {
        self.page_cursor
    }

    /// Records the geometry of the last draw and keeps the cursor visible.
    pub fn set_grid_layout(&mut self, layout: GridLayout) {
        self.grid_layout = GridLayout {
            columns: layout.columns.max(1),
            rows: layout.rows.max(1),
        };
        self.scroll_to_cursor();
    }

    // --- Search bar ---

    /// Moves focus to the search field.
    pub const fn focus_search(&mut self) {
        self.focus = Focus::Search;
    }

    /// Types a character into the search field.
    pub fn type_char(&mut self, ch: char) {
        self.search_bar.push(ch);
    }

    /// Deletes the last character of the search field.
    pub fn backspace(&mut self) {
        self.search_bar.pop();
    }

    /// Submits the search field. Returns keys to fetch.
    pub fn submit_search(&mut self, now: Instant) -> Vec<QueryKey> {
        match self.search_bar.submit() {
            Submission::Rejected(notification) => {
                self.toasts.push(notification, now);
                Vec::new()
            }
            Submission::Query(query) => {
                let before = self.controller.state().query().to_owned();
                let keys = self.dispatch(Event::Submit(query), now);
                if self.controller.state().query() != before {
                    self.reset_cursors();
                }
                self.focus = Focus::Grid;
                keys
            }
        }
    }

    // --- Grid ---

    /// Moves the grid cursor by whole cells (`dx`) or rows (`dy`).
    pub fn move_grid(&mut self, dx: isize, dy: isize) {
        let count = self.view().movies.len();
        if count == 0 {
            return;
        }
        let columns = self.grid_layout.columns;
        let step = dy
            .saturating_mul(isize::try_from(columns).unwrap_or(isize::MAX))
            .saturating_add(dx);
        let target = self.grid_cursor.saturating_add_signed(step);
        self.grid_cursor = target.min(count.saturating_sub(1));
        self.scroll_to_cursor();
    }

    /// Opens the detail overlay for the highlighted cell.
    pub fn open_selected(&mut self, now: Instant) -> Vec<QueryKey> {
        self.dispatch(Event::Select(self.grid_cursor), now)
    }

    /// Closes the detail overlay.
    pub fn close_overlay(&mut self, now: Instant) -> Vec<QueryKey> {
        self.dispatch(Event::CloseOverlay, now)
    }

    /// TMDB page of the movie in the overlay.
    #[must_use]
    pub fn overlay_url(&self) -> Option<String> {
        self.view().overlay.map(|movie| movie_page_url(movie.id))
    }

    // --- Pagination ---

    /// Cycles focus Search → Grid → Pagination (when shown) → Search.
    pub fn cycle_focus(&mut self) {
        let has_pagination = self.view().pagination.is_some();
        self.focus = match self.focus {
            Focus::Search => Focus::Grid,
            Focus::Grid if has_pagination => {
                self.sync_page_cursor();
                Focus::Pagination
            }
            Focus::Grid | Focus::Pagination => Focus::Search,
        };
    }

    /// Moves the strip cursor to the previous or next page.
    pub fn move_page_cursor(&mut self, forward: bool) {
        let Some(page_count) = self.view().pagination.map(|p| p.page_count) else {
            return;
        };
        self.page_cursor = if forward {
            self.page_cursor
                .saturating_add(1)
                .min(page_count.saturating_sub(1))
        } else {
            self.page_cursor.saturating_sub(1)
        };
    }

    /// Moves the strip cursor to the first or last page.
    pub fn jump_page_cursor(&mut self, to_end: bool) {
        let Some(pagination) = self.view().pagination else {
            return;
        };
        let target = if to_end {
            pagination.items.iter().rev().find_map(page_index)
        } else {
            pagination.items.iter().find_map(page_index)
        };
        if let Some(target) = target {
            self.page_cursor = target;
        }
    }

    /// Emits the highlighted page to the controller.
    pub fn confirm_page(&mut self, now: Instant) -> Vec<QueryKey> {
        self.change_page(self.page_cursor, now)
    }

    /// Goes to the previous page.
    pub fn previous_page(&mut self, now: Instant) -> Vec<QueryKey> {
        match self.view().pagination.and_then(|p| p.previous()) {
            Some(index) => self.change_page(index, now),
            None => Vec::new(),
        }
    }

    /// Goes to the next page.
    pub fn next_page(&mut self, now: Instant) -> Vec<QueryKey> {
        match self.view().pagination.and_then(|p| p.next()) {
            Some(index) => self.change_page(index, now),
            None => Vec::new(),
        }
    }

    fn change_page(&mut self, index: usize, now: Instant) -> Vec<QueryKey> {
        let before = self.controller.state().page();
        let keys = self.dispatch(Event::PageChange(index), now);
        if self.controller.state().page() != before {
            self.grid_cursor = 0;
            self.grid_scroll = 0;
            self.sync_page_cursor();
        }
        keys
    }

    /// Fetches the current page again.
    pub fn refresh(&mut self, now: Instant) -> Vec<QueryKey> {
        let keys = self.dispatch(Event::Refresh, now);
        self.clamp_grid_cursor();
        keys
    }

    // --- Controller plumbing ---

    /// Feeds a finished fetch back into the controller.
    pub fn on_fetch(&mut self, outcome: FetchOutcome, now: Instant) -> Vec<QueryKey> {
        let keys = self.dispatch(Event::FetchFinished(outcome), now);
        self.clamp_grid_cursor();
        keys
    }

    /// Periodic housekeeping: re-runs the notification guard and expires toasts.
    pub fn tick(&mut self, now: Instant) {
        if let Some(Command::Notify(notification)) = self.controller.sync() {
            self.toasts.push(notification, now);
        }
        self.toasts.expire(now);
    }

    /// Dispatches an event, shows notifications, and returns keys to fetch.
    fn dispatch(&mut self, event: Event, now: Instant) -> Vec<QueryKey> {
        let mut keys = Vec::new();
        for command in self.controller.dispatch(event) {
            match command {
                Command::Fetch(key) => keys.push(key),
                Command::Notify(notification) => self.toasts.push(notification, now),
            }
        }
        keys
    }

    fn reset_cursors(&mut self) {
        self.grid_cursor = 0;
        self.grid_scroll = 0;
        self.page_cursor = 0;
    }

    fn sync_page_cursor(&mut self) {
        if let Some(pagination) = self.view().pagination {
            self.page_cursor = pagination.selected;
        } else {
            self.page_cursor = 0;
        }
    }

    fn clamp_grid_cursor(&mut self) {
        let count = self.view().movies.len();
        self.grid_cursor = self.grid_cursor.min(count.saturating_sub(1));
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        let GridLayout { columns, rows } = self.grid_layout;
        let cursor_row = self.grid_cursor / columns.max(1);
        if cursor_row < self.grid_scroll {
            self.grid_scroll = cursor_row;
        } else if cursor_row >= self.grid_scroll.saturating_add(rows) {
            self.grid_scroll = cursor_row.saturating_sub(rows.saturating_sub(1));
        }
    }
}

const fn page_index(item: &PageItem) -> Option<usize> {
    match item {
        PageItem::Page(index) => Some(*index),
        PageItem::Break => None,
    }
}
