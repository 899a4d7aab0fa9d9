use super::Router;

/// Router that records navigation into an in-memory history stack.
///
/// Used by the terminal front end (which has no URL bar) and by tests that
/// need to tell a `push` from a `replace`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryRouter {
    entries: Vec<String>,
}

impl HistoryRouter {
    /// Create a router positioned at `start`.
    pub fn new(start: impl Into<String>) -> Self {
        Self { entries: vec![start.into()] }
    }

    /// Current location. `None` if nothing was ever visited.
    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// All history entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of history entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Go back one entry. Returns `false` when already at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }
}

impl Router for HistoryRouter {
    fn push(&mut self, path: &str) {
        tracing::debug!(path, "navigate");
        self.entries.push(path.to_owned());
    }

    fn replace(&mut self, path: &str) {
        tracing::debug!(path, "navigate (replace)");
        match self.entries.last_mut() {
            Some(last) => path.clone_into(last),
            None => self.entries.push(path.to_owned()),
        }
    }
}
