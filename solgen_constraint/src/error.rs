//! Engine error types.
//!
//! Three failure classes, all fatal to the current resolution attempt:
//! contradictions (a candidate range became empty), structural violations
//! (the surrounding generator wired the graph illegally), and internal
//! inconsistencies (the verifier caught a bug in propagation or
//! derivation). Exhaustion (zero consistent assignments) is deliberately
//! NOT an error: it surfaces as an empty solution collection.

use thiserror::Error;

use crate::node::NodeId;

/// Error type for all fallible graph operations.
#[derive(Error, Debug, Clone)]
pub enum SolverError {
    /// An operation referenced a node that was never inserted.
    #[error("graph '{graph}': node {id} is not in the graph")]
    UnknownNode { graph: String, id: NodeId },

    /// An operation referenced an edge that does not exist.
    #[error("graph '{graph}': no edge from {from} to {to}")]
    UnknownEdge {
        graph: String,
        from: NodeId,
        to: NodeId,
    },

    /// A node may not dominate itself.
    #[error("graph '{graph}': self-loop on node {id}")]
    SelfLoop { graph: String, id: NodeId },

    /// Connecting the pair would close a two-node cycle.
    #[error("graph '{graph}': edge {from} -> {to} would close a cycle with the existing edge {to} -> {from}")]
    BackEdge {
        graph: String,
        from: NodeId,
        to: NodeId,
    },

    /// A range intersection or propagation step produced an empty candidate
    /// range. The in-progress program has no valid instantiation and must be
    /// discarded by the caller.
    #[error("graph '{graph}': candidate range of node {id} became empty ({context})")]
    EmptyRange {
        graph: String,
        id: NodeId,
        context: String,
    },

    /// A non-leaf node has more than one dominator, which breaks the
    /// single-upward-path property the relation derivation relies on.
    #[error("graph '{graph}': non-leaf node {id} has {inbound} inbound edges (dominators: {dominators:?})")]
    MultipleInbound {
        graph: String,
        id: NodeId,
        inbound: usize,
        dominators: Vec<NodeId>,
    },

    /// A non-empty graph must expose roots and leaves before resolution.
    #[error("graph '{graph}': no {kind} found in a non-empty graph")]
    MissingBoundary { graph: String, kind: &'static str },

    /// Relation derivation reached a state the monotonicity law forbids.
    #[error("graph '{graph}': node {node} is same-range to leaf {leaf} but its descendant {child} claims {claimed} to that leaf")]
    RelationConflict {
        graph: String,
        node: NodeId,
        child: NodeId,
        leaf: NodeId,
        claimed: &'static str,
    },

    /// The post-hoc verifier found an accepted assignment violating the
    /// recorded constraints: a bug in propagation or derivation, never a
    /// recoverable user error.
    #[error("graph '{graph}': verification failed: {message}")]
    Verification { graph: String, message: String },
}
