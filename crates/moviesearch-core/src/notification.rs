//! User-visible notifications.

use std::fmt;

/// A transient message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// An empty or whitespace-only query was submitted.
    EmptyQuery,
    /// A completed search returned zero results.
    NoResults,
}

impl Notification {
    /// Message text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyQuery => "Please enter your search query.",
            Self::NoResults => "No movies found for your request.",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        // Arrange & Act & Assert
        assert_eq!(
            Notification::EmptyQuery.to_string(),
            "Please enter your search query."
        );
        assert_eq!(
            Notification::NoResults.to_string(),
            "No movies found for your request."
        );
    }
}
