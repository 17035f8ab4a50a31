// SPDX-License-Identifier: Apache-2.0
//! Process-wide string interning for label text.

use std::collections::HashMap;

/// Stable identifier for an interned label string.
///
/// Ids are dense, allocated in first-intern order, and never reused for the
/// lifetime of the [`Interner`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelId(pub u32);

/// Two-way text ↔ id table with O(1) amortized lookup in both directions.
#[derive(Debug, Default)]
pub struct Interner {
    ids: HashMap<String, LabelId>,
    texts: Vec<String>,
}

impl Interner {
    /// Create an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning the existing id when it was seen before.
    pub fn intern(&mut self, text: &str) -> LabelId {
        if let Some(&id) = self.ids.get(text) {
            return id;
        }
        let id = LabelId(self.texts.len() as u32);
        self.texts.push(text.to_owned());
        self.ids.insert(text.to_owned(), id);
        id
    }

    /// Exact text for an id handed out by this interner.
    pub fn resolve(&self, id: LabelId) -> Option<&str> {
        self.texts.get(id.0 as usize).map(String::as_str)
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// True when nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let mut interner = Interner::new();
        let a = interner.intern("cat");
        let b = interner.intern("cat");
        assert_eq!(a, b);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn resolve_returns_exact_text() {
        let mut interner = Interner::new();
        let id = interner.intern("big cat ");
        assert_eq!(interner.resolve(id), Some("big cat "));
    }

    #[test]
    fn ids_are_dense_and_ordered() {
        let mut interner = Interner::new();
        assert_eq!(interner.intern("a"), LabelId(0));
        assert_eq!(interner.intern("b"), LabelId(1));
        assert_eq!(interner.intern("a"), LabelId(0));
        assert_eq!(interner.resolve(LabelId(7)), None);
    }
}
