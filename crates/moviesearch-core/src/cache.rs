//! Query cache keyed by (query, page).
//!
//! The cache is the only place fetch results live. A response is stored
//! under the key it was requested for, whether or not that key is still
//! current; reads only ever look at the current key, so a superseded
//! response is kept but never displayed.

use std::collections::HashMap;
use std::sync::Arc;

use moviesearch_api::tmdb::SearchMoviesResponse;

use crate::fetch::FetchError;
use crate::query::QueryKey;

/// State of a single cache entry.
#[derive(Debug, Clone)]
enum EntryState {
    /// Fetch in flight.
    Pending,
    /// Last fetch succeeded.
    Ready(Arc<SearchMoviesResponse>),
    /// Last fetch failed.
    Failed(FetchError),
}

/// What the UI sees for the current key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySnapshot {
    /// Response to render, if any.
    pub data: Option<Arc<SearchMoviesResponse>>,
    /// `data` belongs to an earlier page of the same query.
    pub is_placeholder: bool,
    /// First fetch for this key in flight and nothing to show.
    pub is_loading: bool,
    /// A fetch for this key is in flight.
    pub is_fetching: bool,
    /// The last fetch for this key failed.
    pub is_error: bool,
}

/// Key-value store of search responses.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct QueryCache {
    /// Entries by key.
    entries: HashMap<QueryKey, EntryState>,
    /// Last key whose own data was handed out by `observe`.
    displayed: Option<QueryKey>,
}

impl QueryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, pending ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers interest in `key`.
    ///
    /// Returns `true` when the caller must start a fetch: the key is
    /// unknown or its last fetch failed. The key is then marked pending.
    /// Returns `false` on a cache hit or when a fetch is already pending.
    pub fn request(&mut self, key: &QueryKey) -> bool {
        match self.entries.get(key) {
            Some(EntryState::Ready(_) | EntryState::Pending) => false,
            Some(EntryState::Failed(_)) | None => {
                self.entries.insert(key.clone(), EntryState::Pending);
                true
            }
        }
    }

    /// Stores the outcome of a fetch for `key`.
    pub fn complete(&mut self, key: QueryKey, result: Result<SearchMoviesResponse, FetchError>) {
        let entry = match result {
            Ok(response) => EntryState::Ready(Arc::new(response)),
            Err(err) => EntryState::Failed(err),
        };
        self.entries.insert(key, entry);
    }

    /// Drops the entry for `key` so the next request fetches again.
    pub fn invalidate(&mut self, key: &QueryKey) {
        self.entries.remove(key);
        if self.displayed.as_ref() == Some(key) {
            self.displayed = None;
        }
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.displayed = None;
    }

    /// Reads the snapshot for the current key.
    ///
    /// `None` means the query is empty: fetching is disabled and the
    /// snapshot is idle. While `key` is pending, data last displayed for
    /// another page of the same query is returned as a placeholder.
    pub fn observe(&mut self, key: Option<&QueryKey>) -> QuerySnapshot {
        let Some(key) = key else {
            return QuerySnapshot::default();
        };

        match self.entries.get(key) {
            Some(EntryState::Ready(data)) => {
                let data = Arc::clone(data);
                self.displayed = Some(key.clone());
                QuerySnapshot {
                    data: Some(data),
                    ..QuerySnapshot::default()
                }
            }
            Some(EntryState::Failed(_)) => QuerySnapshot {
                is_error: true,
                ..QuerySnapshot::default()
            },
            pending => {
                let is_fetching = matches!(pending, Some(EntryState::Pending));
                self.placeholder_for(key).map_or(
                    QuerySnapshot {
                        is_loading: true,
                        is_fetching,
                        ..QuerySnapshot::default()
                    },
                    |stale| QuerySnapshot {
                        data: Some(stale),
                        is_placeholder: true,
                        is_fetching,
                        ..QuerySnapshot::default()
                    },
                )
            }
        }
    }

    /// Data of the last displayed key, when it is another page of `key.query`.
    fn placeholder_for(&self, key: &QueryKey) -> Option<Arc<SearchMoviesResponse>> {
        let shown = self.displayed.as_ref()?;
        if shown.query != key.query || shown == key {
            return None;
        }
        match self.entries.get(shown) {
            Some(EntryState::Ready(data)) => Some(Arc::clone(data)),
            _ => None,
        }
    }
}
