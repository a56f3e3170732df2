//! Collapsible description text for the detail view.

use std::borrow::Cow;

/// Words shown while a description is collapsed.
pub const COLLAPSED_WORDS: usize = 20;

/// Marker appended to a shortened description.
pub const ELLIPSIS: &str = "...";

/// Whether `text` has more than `limit` words.
///
/// Any run of whitespace separates words, line breaks included, so review
/// text with blank lines counts the same as its single-line form.
#[must_use]
pub fn exceeds_words(text: &str, limit: usize) -> bool {
    text.split_whitespace().nth(limit).is_some()
}

/// First `limit` words of `text` followed by [`ELLIPSIS`].
///
/// Text within the limit is returned unchanged. Shortened text has its
/// whitespace collapsed: the kept words are joined with single spaces.
#[must_use]
pub fn truncate_words(text: &str, limit: usize) -> Cow<'_, str> {
    if !exceeds_words(text, limit) {
        return Cow::Borrowed(text);
    }
    let head: Vec<&str> = text.split_whitespace().take(limit).collect();
    Cow::Owned(format!("{}{ELLIPSIS}", head.join(" ")))
}

/// Expand/collapse state of the description shown in the detail modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expandable {
    expanded: bool,
}

impl Expandable {
    /// Collapse again, as happens whenever a new place is opened.
    pub fn reset(&mut self) {
        self.expanded = false;
    }

    /// Flip between collapsed and expanded.
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Whether the full text is shown.
    #[must_use]
    pub fn is_expanded(self) -> bool {
        self.expanded
    }

    /// Text to render for `description` in the current state.
    #[must_use]
    pub fn render(self, description: &str) -> Cow<'_, str> {
        if self.expanded {
            Cow::Borrowed(description)
        } else {
            truncate_words(description, COLLAPSED_WORDS)
        }
    }

    /// Whether a toggle would change anything for `description`.
    #[must_use]
    pub fn is_collapsible(description: &str) -> bool {
        exceeds_words(description, COLLAPSED_WORDS)
    }
}
