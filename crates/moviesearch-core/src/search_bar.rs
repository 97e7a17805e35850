//! Search input component.

use crate::notification::Notification;

/// Outcome of submitting the search field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Trimmed, non-empty query to hand to the controller.
    Query(String),
    /// Nothing to search for; show the notification and stop.
    Rejected(Notification),
}

/// Text field plus submit action.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchBar {
    field: String,
}

impl SearchBar {
    /// Creates an empty search bar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.field
    }

    /// Appends a character.
    pub fn push(&mut self, ch: char) {
        self.field.push(ch);
    }

    /// Removes the last character.
    pub fn pop(&mut self) {
        self.field.pop();
    }

    /// Clears the field.
    pub fn clear(&mut self) {
        self.field.clear();
    }

    /// Reads, trims, and resets the field.
    pub fn submit(&mut self) -> Submission {
        let raw = std::mem::take(&mut self.field);
        let query = raw.trim();
        if query.is_empty() {
            tracing::debug!("rejected empty search submission");
            return Submission::Rejected(Notification::EmptyQuery);
        }
        Submission::Query(String::from(query))
    }
}
