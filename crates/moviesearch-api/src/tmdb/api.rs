//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{SearchMoviesParams, SearchMoviesResponse};

/// Movie search API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait,
/// which is the one implemented by `TmdbClient` so fetches can be spawned.
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Searches movies by free-text query for one result page.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the server answers with
    /// a non-2xx status, or the JSON body cannot be decoded.
    async fn search_movies(&self, params: &SearchMoviesParams) -> Result<SearchMoviesResponse>;
}
