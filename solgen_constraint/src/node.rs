//! Constraint-graph vertices.

/// Stable identity of a constraint node. Ids are assigned by the program
/// generator (one per placeholder in the IR) and are unique per graph.
pub type NodeId = u64;

/// A vertex of the constraint graph.
///
/// Adjacency is kept as ordered lists because edge order participates in
/// deterministic output naming; the degree counters are maintained
/// incrementally by the graph on connect/disconnect.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: NodeId,
    /// Dominators, in connection order.
    pub ins: Vec<NodeId>,
    /// Dominatees, in connection order.
    pub outs: Vec<NodeId>,
    pub inbound: usize,
    pub outbound: usize,
}

impl GraphNode {
    pub fn new(id: NodeId) -> Self {
        GraphNode {
            id,
            ins: Vec::new(),
            outs: Vec::new(),
            inbound: 0,
            outbound: 0,
        }
    }

    /// No incoming constraints.
    pub fn is_root(&self) -> bool {
        self.inbound == 0
    }

    /// No outgoing constraints; only leaves receive a value directly from
    /// the solution space.
    pub fn is_leaf(&self) -> bool {
        self.outbound == 0
    }
}
