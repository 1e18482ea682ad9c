use std::collections::HashMap;
use std::hash::Hash;

/// An append-only interning table.
///
/// Maps distinct values to dense, zero-based indices assigned in first-seen
/// order, and supports the inverse lookup for decode. Indices are stable for
/// the table's lifetime: nothing is ever reassigned or removed.
///
/// The table is plain owned state. One encode pass owns it mutably; sharing
/// one table across the encoding of sibling tables is what deduplicates
/// values document-wide.
#[derive(Debug, Clone)]
pub struct Interner<T: Eq + Hash + Clone> {
    indices: HashMap<T, usize>,
    entries: Vec<T>,
}

impl<T: Eq + Hash + Clone> Default for Interner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> Interner<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            indices: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Return the index of `value`, appending it at the next index if unseen.
    ///
    /// Grows the table by at most one entry.
    pub fn intern(&mut self, value: T) -> usize {
        if let Some(&idx) = self.indices.get(&value) {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push(value.clone());
        self.indices.insert(value, idx);
        idx
    }

    /// Look up the value stored at `index`
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    /// Number of interned entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in index order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Append a value during decode without the dedup lookup.
    ///
    /// Decode reads entries back in index order from a table that was
    /// already deduplicated on encode, so re-checking uniqueness here
    /// would only re-hash every entry.
    pub(crate) fn push_decoded(&mut self, value: T) {
        let idx = self.entries.len();
        self.entries.push(value.clone());
        self.indices.entry(value).or_insert(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let mut t = Interner::new();
        assert_eq!(t.intern("a"), 0);
        assert_eq!(t.intern("b"), 1);
        assert_eq!(t.intern("a"), 0);
        assert_eq!(t.intern("c"), 2);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_indices_are_dense_and_stable() {
        let mut t = Interner::new();
        for s in ["x", "y", "x", "z", "y"] {
            t.intern(s);
        }
        let snapshot: Vec<_> = t.iter().copied().collect();
        assert_eq!(snapshot, vec!["x", "y", "z"]);
        // Re-interning never moves anything
        assert_eq!(t.intern("z"), 2);
        assert_eq!(t.get(0), Some(&"x"));
    }

    #[test]
    fn test_get_out_of_range() {
        let t: Interner<String> = Interner::new();
        assert!(t.get(0).is_none());
    }
}
