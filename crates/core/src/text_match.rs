//! Client-side text filtering over already-fetched rows.
//!
//! The needle is trimmed and lowercased once; a row matches when any of
//! its searchable fields contains it. A blank needle matches everything.

use crate::models::{Comment, Project, Task, User};

/// A row that can be narrowed by the free-text search box.
pub trait TextMatch {
    /// Fields searched by the text filter.
    fn search_fields(&self) -> Vec<&str>;

    /// Whether this row contains `needle` (already normalized).
    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Trim and lowercase user input for [`TextMatch::matches`].
pub fn normalize_needle(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Rows of `rows` matching `raw_needle`, in their original order.
pub fn filter_rows<'a, T: TextMatch>(rows: &'a [T], raw_needle: &str) -> Vec<&'a T> {
    let needle = normalize_needle(raw_needle);
    rows.iter().filter(|row| row.matches(&needle)).collect()
}

impl TextMatch for Task {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

impl TextMatch for Project {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

impl TextMatch for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.username.as_str(), self.email.as_str()]
    }
}

impl TextMatch for Comment {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.text.as_str(), self.user.username()]
    }
}
