//! Remote fetch adapter.
//!
//! Runs one search for a `QueryKey` and folds any failure into a
//! `FetchError`. Causes are logged and then collapsed: auth, network,
//! and decode failures all look the same to the controller.

use std::fmt;

use moviesearch_api::tmdb::{MovieApi, SearchMoviesResponse};
use tracing::instrument;

use crate::query::QueryKey;

/// A failed fetch. Carries the cause text for logs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    reason: String,
}

impl FetchError {
    /// Creates an error with the given cause.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Cause text.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fetch failed: {}", self.reason)
    }
}

impl std::error::Error for FetchError {}

/// Result of a fetch, tagged with the key it was issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    /// Key the request was issued for.
    pub key: QueryKey,
    /// Response or failure.
    pub result: Result<SearchMoviesResponse, FetchError>,
}

/// Fetches one page of results for `key`.
#[instrument(skip_all, fields(query = %key.query, page = key.page))]
pub async fn fetch_page<A: MovieApi>(api: &A, key: QueryKey) -> FetchOutcome {
    let params = key.params();
    let result = match api.search_movies(&params).await {
        Ok(response) => {
            tracing::debug!(
                results = response.results.len(),
                total_pages = response.total_pages,
                "movie search completed"
            );
            Ok(response)
        }
        Err(err) => {
            let reason = format!("{err:#}");
            tracing::warn!(error = %reason, "movie search failed");
            Err(FetchError::new(reason))
        }
    };
    FetchOutcome { key, result }
}
