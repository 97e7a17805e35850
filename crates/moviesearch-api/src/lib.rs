//! API client library for moviesearch.
//!
//! Provides a client for the TMDB movie search endpoint.

/// TMDB API client.
pub mod tmdb;
