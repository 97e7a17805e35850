//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 `search/movie` endpoint.

mod api;
mod client;
mod types;

pub use api::{LocalMovieApi, MovieApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{
    DEFAULT_BASE_URL, TmdbClient, TmdbClientBuilder, image_url, movie_page_url,
};
#[allow(clippy::module_name_repetitions)]
pub use types::{Movie, SearchMoviesParams, SearchMoviesResponse, TmdbErrorResponse};
