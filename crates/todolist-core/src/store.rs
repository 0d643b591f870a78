//! The in-memory todo store.
//!
//! Items live in a single ordered sequence and are addressed by position.
//! Removing an item shifts every later item down by one, so a position taken
//! from an earlier listing may name a different item, or none, by the time it
//! is used.

use std::fmt;

use parking_lot::RwLock;

use crate::position::Position;
use crate::sanitize;

/// What a mutating store operation did.
///
/// The HTTP layer answers every outcome with the same redirect; this type
/// keeps the distinction available to callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The store was changed.
    Applied,
    /// The submitted text was blank after trimming; nothing changed.
    RejectedEmpty,
    /// The position did not parse or named no item; nothing changed.
    RejectedNotFound,
}

impl Outcome {
    /// Returns `true` if the store was changed.
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Applied => "applied",
            Self::RejectedEmpty => "rejected_empty",
            Self::RejectedNotFound => "rejected_not_found",
        };
        f.write_str(label)
    }
}

/// Ordered, position-addressed list of todo items.
///
/// Text is escaped on the way in; everything read back out is already safe
/// to embed in HTML.
pub struct TodoStore {
    items: RwLock<Vec<String>>,
}

impl TodoStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Returns a copy of every item in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.items.read().clone()
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the store holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns the item at `position`, if one exists.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<String> {
        let items = self.items.read();
        position
            .index(items.len())
            .map(|index| items[index].clone())
    }

    /// Appends `raw` after escaping it.
    ///
    /// Blank text is dropped. The stored value keeps any surrounding
    /// whitespace; trimming only decides whether to store.
    pub fn add(&self, raw: &str) -> Outcome {
        let text = sanitize::escape(raw);
        if sanitize::is_blank(&text) {
            return Outcome::RejectedEmpty;
        }

        self.items.write().push(text);
        Outcome::Applied
    }

    /// Replaces the item at `position` with the escaped form of `raw`.
    ///
    /// Requires a parsed position, non-blank text and an existing item, checked
    /// in that order.
    pub fn update(&self, position: Option<Position>, raw: &str) -> Outcome {
        let text = sanitize::escape(raw);
        let Some(position) = position else {
            return Outcome::RejectedNotFound;
        };
        if sanitize::is_blank(&text) {
            return Outcome::RejectedEmpty;
        }

        let mut items = self.items.write();
        match position.index(items.len()) {
            Some(index) => {
                items[index] = text;
                Outcome::Applied
            },
            None => Outcome::RejectedNotFound,
        }
    }

    /// Removes the item at `position`, shifting later items down by one.
    pub fn remove(&self, position: Option<Position>) -> Outcome {
        let Some(position) = position else {
            return Outcome::RejectedNotFound;
        };

        let mut items = self.items.write();
        match position.index(items.len()) {
            Some(index) => {
                items.remove(index);
                Outcome::Applied
            },
            None => Outcome::RejectedNotFound,
        }
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoStore")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(items: &[&str]) -> TodoStore {
        let store = TodoStore::new();
        for item in items {
            assert_eq!(store.add(item), Outcome::Applied);
        }
        store
    }

    fn at(value: i64) -> Option<Position> {
        Some(Position::new(value))
    }

    #[test]
    fn test_add_and_snapshot() {
        let store = TodoStore::new();
        assert!(store.is_empty());

        assert_eq!(store.add("Buy milk"), Outcome::Applied);
        assert_eq!(store.snapshot(), vec!["Buy milk".to_string()]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_blank_is_rejected() {
        let store = TodoStore::new();
        assert_eq!(store.add("   "), Outcome::RejectedEmpty);
        assert_eq!(store.add(""), Outcome::RejectedEmpty);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_escapes_and_keeps_whitespace() {
        let store = TodoStore::new();
        store.add("  <b>bold</b> ");
        assert_eq!(store.snapshot(), vec!["  &lt;b&gt;bold&lt;/b&gt; ".to_string()]);
    }

    #[test]
    fn test_get() {
        let store = store_with(&["a", "b"]);
        assert_eq!(store.get(Position::new(1)), Some("b".to_string()));
        assert_eq!(store.get(Position::new(2)), None);
        assert_eq!(store.get(Position::new(-1)), None);
    }

    #[test]
    fn test_remove_shifts_later_items() {
        let store = store_with(&["a", "b", "c"]);
        assert_eq!(store.remove(at(1)), Outcome::Applied);
        assert_eq!(store.snapshot(), vec!["a".to_string(), "c".to_string()]);
        assert_eq!(store.get(Position::new(1)), Some("c".to_string()));
    }

    #[test]
    fn test_remove_out_of_range() {
        let store = store_with(&["a", "b"]);
        assert_eq!(store.remove(at(-1)), Outcome::RejectedNotFound);
        assert_eq!(store.remove(at(2)), Outcome::RejectedNotFound);
        assert_eq!(store.remove(None), Outcome::RejectedNotFound);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_twice_at_tail() {
        let store = store_with(&["a", "b"]);
        assert_eq!(store.remove(at(1)), Outcome::Applied);
        assert_eq!(store.remove(at(1)), Outcome::RejectedNotFound);
        assert_eq!(store.snapshot(), vec!["a".to_string()]);
    }

    #[test]
    fn test_update_replaces_only_target() {
        let store = store_with(&["a", "b", "c"]);
        assert_eq!(store.update(at(1), " B & co "), Outcome::Applied);
        assert_eq!(
            store.snapshot(),
            vec!["a".to_string(), " B &amp; co ".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_update_validation_order() {
        let store = store_with(&["a"]);
        assert_eq!(store.update(None, ""), Outcome::RejectedNotFound);
        assert_eq!(store.update(at(0), "  "), Outcome::RejectedEmpty);
        assert_eq!(store.update(at(5), "  "), Outcome::RejectedEmpty);
        assert_eq!(store.update(at(5), "x"), Outcome::RejectedNotFound);
        assert_eq!(store.snapshot(), vec!["a".to_string()]);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Applied.to_string(), "applied");
        assert!(Outcome::Applied.is_applied());
        assert!(!Outcome::RejectedEmpty.is_applied());
    }
}
