//! Transposition table for caching evaluated positions
//!
//! Keyed by the canonical board snapshot, so identical positions reached
//! through different move orders share one entry. Entries are depth-aware:
//! a score computed with more remaining search depth may stand in for a
//! shallower need, never the reverse. The table lives for exactly one
//! top-level move selection and is cleared at the start of the next.

use std::collections::HashMap;

use crate::board::BoardKey;

/// Cached evaluation of one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    /// Remaining search depth when the score was computed
    pub remaining_depth: u8,
    /// Evaluated score
    pub score: i32,
}

/// Per-search transposition table.
///
/// Disabling the table is a pure performance toggle: probes miss and
/// stores are dropped, so search results cannot change, only node counts.
#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: HashMap<BoardKey, TtEntry>,
    enabled: bool,
}

impl TranspositionTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            enabled: true,
        }
    }

    /// Probe for a cached score usable at the given remaining depth.
    ///
    /// Returns the stored score only when the entry was computed with at
    /// least `remaining_depth` plies of search left.
    #[must_use]
    pub fn probe(&self, key: &BoardKey, remaining_depth: u8) -> Option<i32> {
        if !self.enabled {
            return None;
        }
        self.entries
            .get(key)
            .filter(|entry| entry.remaining_depth >= remaining_depth)
            .map(|entry| entry.score)
    }

    /// Store a score, unconditionally overwriting any entry for the position.
    pub fn store(&mut self, key: BoardKey, remaining_depth: u8, score: i32) {
        if !self.enabled {
            return;
        }
        self.entries.insert(
            key,
            TtEntry {
                remaining_depth,
                score,
            },
        );
    }

    /// Drop all entries. Called at the start of every move selection.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached positions
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Toggle the cache on or off (testing/diagnostics)
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
