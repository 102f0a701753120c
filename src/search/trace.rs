//! Search-node trace for external visualization
//!
//! Records one entry per search node plus the ids of pruned subtrees. The
//! trace is cosmetic: nothing in move selection reads it back, and it can
//! be disabled outright for a no-op, no-allocation path. It is reset at
//! the start of every move selection, never accumulated across moves.

use serde::Serialize;

/// Synthetic identifier of a search node within one trace
pub type NodeId = usize;

/// One explored or pruned node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceNode {
    /// Ply depth below the root position
    pub depth: u8,
    pub id: NodeId,
    pub parent: Option<NodeId>,
    /// Evaluated score; `None` for pruned placeholders
    pub score: Option<i32>,
    pub pruned: bool,
}

/// Trace of one search invocation
#[derive(Debug, Clone, Default)]
pub struct SearchTrace {
    nodes: Vec<TraceNode>,
    pruned_ids: Vec<NodeId>,
    disabled: bool,
}

impl SearchTrace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an evaluated node
    pub fn record(&mut self, depth: u8, id: NodeId, parent: Option<NodeId>, score: i32) {
        if self.disabled {
            return;
        }
        self.nodes.push(TraceNode {
            depth,
            id,
            parent,
            score: Some(score),
            pruned: false,
        });
    }

    /// Record a pruned placeholder for a child that was never explored
    pub fn record_pruned(&mut self, depth: u8, id: NodeId, parent: Option<NodeId>) {
        if self.disabled {
            return;
        }
        self.nodes.push(TraceNode {
            depth,
            id,
            parent,
            score: None,
            pruned: true,
        });
        self.pruned_ids.push(id);
    }

    /// Id the next batch of children starts from.
    ///
    /// Ids are derived from the running node count, matching the layout the
    /// visualization expects. With the trace disabled the ids degenerate,
    /// which is fine: nothing records or reads them.
    #[must_use]
    pub fn next_id(&self) -> NodeId {
        self.nodes.len() + 1
    }

    /// All recorded nodes, in recording order
    #[must_use]
    pub fn nodes(&self) -> &[TraceNode] {
        &self.nodes
    }

    /// Ids of pruned nodes
    #[must_use]
    pub fn pruned_ids(&self) -> &[NodeId] {
        &self.pruned_ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop all recorded nodes. Called at the start of every move selection.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.pruned_ids.clear();
    }

    /// Turn recording on or off. Disabled tracing records nothing.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_ids() {
        let mut trace = SearchTrace::new();
        assert_eq!(trace.next_id(), 1);

        trace.record(0, 0, None, 5);
        assert_eq!(trace.next_id(), 2);
        assert_eq!(trace.nodes().len(), 1);
        assert_eq!(trace.nodes()[0].score, Some(5));
        assert!(!trace.nodes()[0].pruned);
    }

    #[test]
    fn test_record_pruned() {
        let mut trace = SearchTrace::new();
        trace.record_pruned(2, 7, Some(3));

        let node = trace.nodes()[0];
        assert_eq!(node.score, None);
        assert!(node.pruned);
        assert_eq!(trace.pruned_ids(), &[7]);
    }

    #[test]
    fn test_clear() {
        let mut trace = SearchTrace::new();
        trace.record(0, 1, None, 0);
        trace.record_pruned(1, 2, Some(1));

        trace.clear();
        assert!(trace.is_empty());
        assert!(trace.pruned_ids().is_empty());
        assert_eq!(trace.next_id(), 1);
    }

    #[test]
    fn test_disabled_trace_records_nothing() {
        let mut trace = SearchTrace::new();
        trace.set_enabled(false);

        trace.record(0, 1, None, 3);
        trace.record_pruned(1, 2, Some(1));
        assert!(trace.is_empty());
        assert!(trace.pruned_ids().is_empty());

        trace.set_enabled(true);
        trace.record(0, 1, None, 3);
        assert_eq!(trace.len(), 1);
    }
}
