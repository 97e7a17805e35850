//! TMDB API response types and search parameters.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

// --- Search Movie ---

/// Parameters for the `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMoviesParams {
    /// Search query (already trimmed, non-empty).
    pub query: String,
    /// 1-based page number.
    pub page: u32,
}

impl SearchMoviesParams {
    /// Creates params for the first page of `query`.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
        }
    }

    /// Sets the 1-based page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// Response from `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchMoviesResponse {
    /// Current page number.
    pub page: u32,
    /// Search results.
    pub results: Vec<Movie>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

/// A single movie search result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path (e.g. `/abc.jpg`).
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD, empty, or null).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: String,
    /// Vote average (0.0 - 10.0).
    #[serde(default)]
    pub vote_average: f64,
}

impl Movie {
    /// Parses `release_date`. TMDB sends `""` for unknown dates.
    #[must_use]
    pub fn released_on(&self) -> Option<NaiveDate> {
        let raw = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    /// Release year, if the date is known.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        self.released_on().map(|d| d.year())
    }
}

// --- Error ---

/// Error response body returned by TMDB on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB internal status code.
    pub status_code: u32,
    /// Human readable message.
    pub status_message: String,
    /// Always `false` for errors.
    #[serde(default)]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn movie_with_date(date: Option<&str>) -> Movie {
        Movie {
            id: 1,
            title: String::from("Test"),
            poster_path: None,
            backdrop_path: None,
            release_date: date.map(String::from),
            overview: String::new(),
            vote_average: 0.0,
        }
    }

    #[test]
    fn test_params_default_to_first_page() {
        // Arrange & Act
        let params = SearchMoviesParams::new("batman");

        // Assert
        assert_eq!(params.query, "batman");
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_params_page_override() {
        // Arrange & Act
        let params = SearchMoviesParams::new("batman").page(3);

        // Assert
        assert_eq!(params.page, 3);
    }

    #[test]
    fn test_release_year_parsed() {
        // Arrange
        let movie = movie_with_date(Some("2022-03-01"));

        // Act & Assert
        assert_eq!(movie.release_year(), Some(2022));
    }

    #[test]
    fn test_release_year_empty_string() {
        // Arrange
        let movie = movie_with_date(Some(""));

        // Act & Assert
        assert_eq!(movie.released_on(), None);
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn test_release_year_missing() {
        // Arrange
        let movie = movie_with_date(None);

        // Act & Assert
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn test_movie_tolerates_null_fields() {
        // Arrange
        let json = r#"{"id":42,"title":"Untitled","poster_path":null,"release_date":null}"#;

        // Act
        let movie: Movie = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.id, 42);
        assert!(movie.poster_path.is_none());
        assert!(movie.overview.is_empty());
        assert!(movie.vote_average.abs() < f64::EPSILON);
    }
}
