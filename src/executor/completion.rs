//! Matched-row bookkeeping for RIGHT and FULL outer joins
//!
//! During the forward pass, the preserving scan records the id of every row
//! that produced at least one joined result. The anti-join second pass then
//! emits exactly the rows missing from the set.

use std::collections::HashSet;

use crate::index::RowId;

/// Set of row ids matched during a forward join pass
#[derive(Debug, Clone, Default)]
pub struct CompletionSet {
    matched: HashSet<RowId>,
}

impl CompletionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a matched row. Recording the same id again is a no-op.
    pub fn record(&mut self, id: RowId) {
        self.matched.insert(id);
    }

    /// True when the row matched during the forward pass.
    pub fn contains(&self, id: RowId) -> bool {
        self.matched.contains(&id)
    }

    /// Number of distinct matched rows.
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    /// True when no rows matched.
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_idempotent() {
        let mut set = CompletionSet::new();
        set.record(3);
        set.record(3);
        assert_eq!(set.len(), 1);
        assert!(set.contains(3));
        assert!(!set.contains(4));
    }
}
