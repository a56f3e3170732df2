//! Keyword state behind the search dialog.
//!
//! Three variants of the keyword are tracked: the external one handed in by
//! navigation, the draft bound to the text input, and the committed one that
//! drives fetches. Only changes to the committed keyword are reported as
//! fetch triggers.

/// What happened when the search dialog was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogClose {
    /// Draft was blank, so every keyword was reset and a default fetch is due.
    Cleared,
    /// Dialog closed, keywords untouched.
    Dismissed,
}

/// Search controller state.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    external: String,
    external_seen: bool,
    draft: String,
    committed: String,
    dialog_open: bool,
}

impl SearchState {
    /// Fresh state with every keyword empty and the dialog closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently typed into the search box.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Keyword behind the last fetch.
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Last keyword seen from navigation.
    #[must_use]
    pub fn external(&self) -> &str {
        &self.external
    }

    /// Whether the search dialog is showing.
    #[must_use]
    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// Show the search dialog.
    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    /// Pull in the keyword from navigation.
    ///
    /// On the first call, and whenever `incoming` differs from the last seen
    /// value, it is copied into both draft and committed. Returns `true` when
    /// the committed keyword changed as a result.
    pub fn sync_external(&mut self, incoming: Option<&str>) -> bool {
        let incoming = incoming.unwrap_or_default();
        if self.external_seen && incoming == self.external {
            return false;
        }

        self.external_seen = true;
        incoming.clone_into(&mut self.external);
        incoming.clone_into(&mut self.draft);

        if self.committed == incoming {
            return false;
        }
        incoming.clone_into(&mut self.committed);
        true
    }

    /// Append a typed character to the draft.
    pub fn push_char(&mut self, character: char) {
        self.draft.push(character);
    }

    /// Drop the last character of the draft.
    pub fn pop_char(&mut self) {
        self.draft.pop();
    }

    /// Submit the dialog: the draft becomes the committed keyword.
    ///
    /// Always closes the dialog and always counts as a fetch trigger.
    pub fn commit(&mut self) -> &str {
        self.committed.clone_from(&self.draft);
        self.dialog_open = false;
        &self.committed
    }

    /// Reset external, draft and committed keywords to empty.
    pub fn clear(&mut self) {
        self.external.clear();
        self.draft.clear();
        self.committed.clear();
    }

    /// Dismiss the dialog without submitting.
    ///
    /// A blank draft counts as an implicit [`SearchState::clear`].
    pub fn close_dialog(&mut self) -> DialogClose {
        self.dialog_open = false;
        if is_blank(&self.draft) {
            self.clear();
            DialogClose::Cleared
        } else {
            DialogClose::Dismissed
        }
    }
}

/// Whether a keyword counts as empty.
#[must_use]
pub fn is_blank(keyword: &str) -> bool {
    keyword.trim().is_empty()
}
