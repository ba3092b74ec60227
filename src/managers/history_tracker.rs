//! Back-stack bookkeeping for engines that do not expose `can_go_back`.
//!
//! Fed with committed page loads and with same-document changes reported by
//! the page; a back step pops the stack and marks the next commit or
//! `popstate` as the result of that step.

use crate::types::navigation::SameDocumentChange;

#[derive(Debug, Default)]
pub struct HistoryTracker {
    entries: Vec<String>,
    going_back: bool,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_commit(&mut self, url: &str) {
        if url == "about:blank" {
            return;
        }
        if self.going_back {
            self.going_back = false;
            if self.entries.last().map(String::as_str) == Some(url) {
                return;
            }
        }
        if self.entries.last().map(String::as_str) != Some(url) {
            self.entries.push(url.to_string());
        }
    }

    /// Records `pushState`, `replaceState` and `popstate` inside the current document.
    pub fn record_same_document(&mut self, url: &str, change: SameDocumentChange) {
        match change {
            SameDocumentChange::Push => self.entries.push(url.to_string()),
            SameDocumentChange::Replace => match self.entries.last_mut() {
                Some(last) => *last = url.to_string(),
                None => self.entries.push(url.to_string()),
            },
            SameDocumentChange::Pop => {
                if self.going_back {
                    self.going_back = false;
                    return;
                }
                let len = self.entries.len();
                if len >= 2 && self.entries[len - 2] == url {
                    // The page called history.back() itself.
                    self.entries.pop();
                } else if self.entries.last().map(String::as_str) != Some(url) {
                    // Fragment links surface as a popstate to a new URL.
                    self.entries.push(url.to_string());
                }
            }
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Pops the current entry. Returns the URL that should become current.
    pub fn begin_back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.entries.pop();
        self.going_back = true;
        self.entries.last().map(String::as_str)
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.going_back = false;
    }
}
