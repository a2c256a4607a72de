//! Browser-style navigation history.

use crate::route::Route;

/// A linear history with a cursor, like the browser's session history.
///
/// Pushing drops any forward entries. Moving back or forward only moves
/// the cursor; it never adds an entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Route>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Welcome)
    }
}

impl History {
    /// Start a history at `initial`.
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// The current entry.
    pub fn current(&self) -> &Route {
        &self.entries[self.cursor]
    }

    /// Append an entry after the cursor, dropping forward entries.
    ///
    /// Pushing the route that is already current is a no-op.
    pub fn push(&mut self, route: Route) {
        if *self.current() == route {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(route);
        self.cursor += 1;
    }

    /// Overwrite the current entry without moving the cursor.
    pub fn replace(&mut self, route: Route) {
        self.entries[self.cursor] = route;
    }

    /// The entry `back` would move to, without moving.
    pub fn peek_back(&self) -> Option<&Route> {
        self.cursor.checked_sub(1).map(|i| &self.entries[i])
    }

    /// The entry `forward` would move to, without moving.
    pub fn peek_forward(&self) -> Option<&Route> {
        self.entries.get(self.cursor + 1)
    }

    /// Move back one entry.
    pub fn back(&mut self) -> Option<&Route> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Move forward one entry.
    pub fn forward(&mut self) -> Option<&Route> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history holds at least its initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_and_forward_do_not_push() {
        let mut history = History::default();
        history.push(Route::Trash);
        history.push(Route::Settings);
        assert_eq!(history.len(), 3);

        assert_eq!(history.back(), Some(&Route::Trash));
        assert_eq!(history.back(), Some(&Route::Welcome));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some(&Route::Trash));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_peek_leaves_cursor_in_place() {
        let mut history = History::default();
        history.push(Route::Trash);
        assert_eq!(history.peek_back(), Some(&Route::Welcome));
        assert_eq!(history.peek_forward(), None);
        assert_eq!(history.current(), &Route::Trash);

        history.back();
        assert_eq!(history.peek_back(), None);
        assert_eq!(history.peek_forward(), Some(&Route::Trash));
        assert_eq!(history.current(), &Route::Welcome);
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = History::default();
        history.push(Route::Trash);
        history.push(Route::Settings);
        history.back();
        history.push(Route::data("readme"));
        assert_eq!(history.len(), 3);
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn test_duplicate_push_is_ignored() {
        let mut history = History::default();
        history.push(Route::Trash);
        history.push(Route::Trash);
        assert_eq!(history.len(), 2);
    }
}
