//! Navigation history stack

use crate::core::error::NavigationError;

/// Coarse state of a [`NavigationStack`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackState {
    /// No entries
    Empty,
    /// Exactly one entry; back navigation is not possible
    Single,
    /// More than one entry
    Multiple,
}

/// Ordered history of activated entries; the last element is on screen.
///
/// The stack knows nothing about paths or roles. Removed entries are handed
/// back to the caller so it can release them after it is done mutating.
#[derive(Debug)]
pub struct NavigationStack<T> {
    entries: Vec<T>,
}

impl<T> NavigationStack<T> {
    /// Create an empty stack
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Push a new top entry
    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
    }

    /// Remove the top entry, returning it
    ///
    /// # Errors
    /// Returns [`NavigationError::NoHistory`] unless the stack holds more than
    /// one entry; the stack is left unchanged in that case.
    pub fn go_back(&mut self) -> Result<T, NavigationError> {
        if !self.can_go_back() {
            return Err(NavigationError::NoHistory);
        }
        self.entries.pop().ok_or(NavigationError::NoHistory)
    }

    /// Truncate to empty, returning the removed entries top first
    pub fn clear(&mut self) -> Vec<T> {
        let mut removed: Vec<T> = self.entries.drain(..).collect();
        removed.reverse();
        removed
    }

    /// Same as [`clear`](Self::clear)
    pub fn pop_to_root(&mut self) -> Vec<T> {
        self.clear()
    }

    /// The entry on screen
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.entries.last()
    }

    /// Number of entries
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// `count > 1`
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Coarse state derived from the entry count
    #[must_use]
    pub fn state(&self) -> StackState {
        match self.entries.len() {
            0 => StackState::Empty,
            1 => StackState::Single,
            _ => StackState::Multiple,
        }
    }

    /// Entries from the bottom (oldest) to the top (current)
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }
}

impl<T> Default for NavigationStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_machine() {
        let mut stack = NavigationStack::new();
        assert_eq!(stack.state(), StackState::Empty);
        assert!(stack.current().is_none());

        stack.push("home");
        assert_eq!(stack.state(), StackState::Single);
        assert!(!stack.can_go_back());

        stack.push("profile");
        assert_eq!(stack.state(), StackState::Multiple);
        assert!(stack.can_go_back());
        assert_eq!(stack.current(), Some(&"profile"));

        assert_eq!(stack.go_back(), Ok("profile"));
        assert_eq!(stack.state(), StackState::Single);
        assert_eq!(stack.current(), Some(&"home"));
    }

    #[test]
    fn test_go_back_requires_history() {
        let mut stack: NavigationStack<&str> = NavigationStack::new();
        assert_eq!(stack.go_back(), Err(NavigationError::NoHistory));

        stack.push("home");
        assert_eq!(stack.go_back(), Err(NavigationError::NoHistory));
        assert_eq!(stack.count(), 1);
    }

    #[test]
    fn test_clear_returns_entries_top_first() {
        let mut stack = NavigationStack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(stack.clear(), vec![3, 2, 1]);
        assert_eq!(stack.state(), StackState::Empty);
        assert!(stack.pop_to_root().is_empty());
    }

    #[test]
    fn test_iter_bottom_to_top() {
        let mut stack = NavigationStack::new();
        stack.push("home");
        stack.push("courses");
        let order: Vec<&&str> = stack.iter().collect();
        assert_eq!(order, vec![&"home", &"courses"]);
    }
}
