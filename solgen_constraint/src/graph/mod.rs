//! The dominance-constraint graph.
//!
//! One graph exists per constraint domain (types, storage locations,
//! visibility/mutability). The surrounding program generator inserts a node
//! per placeholder, connects nodes as it discovers dominance requirements,
//! and calls [`ConstraintGraph::resolve`] once a candidate program is
//! complete. The graph then derives pairwise relations between its leaves
//! and enumerates consistent leaf assignments up to the configured cap.
//!
//! Structurally the graph is a DAG of trees that merge only at leaves:
//! every non-leaf node has at most one dominator. This is what gives each
//! non-leaf node a single upward path and makes the relation derivation
//! well-defined.

mod relations;
mod solve;
mod tighten;


use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::node::GraphNode;
use crate::relation::{EdgeRank, Relation};
use crate::value::LatticeValue;

pub use crate::node::NodeId;
pub use solve::SolutionStream;

/// One complete, consistent assignment of concrete values to every leaf.
pub type Solution<V> = BTreeMap<NodeId, V>;

/// A constraint graph over lattice values of type `V`.
#[derive(Debug, Clone)]
pub struct ConstraintGraph<V: LatticeValue> {
    name: String,
    config: SolverConfig,
    nodes: BTreeMap<NodeId, GraphNode>,
    ranges: BTreeMap<NodeId, Vec<V>>,
    /// Edges tagged "narrower", keyed (dominator, dominatee).
    narrower_edges: BTreeSet<(NodeId, NodeId)>,
    /// Edges tagged "wider", keyed (dominator, dominatee).
    wider_edges: BTreeSet<(NodeId, NodeId)>,

    // Derived state, rebuilt by resolve() each round.
    roots: BTreeSet<NodeId>,
    leaves: BTreeSet<NodeId>,
    /// How each leaf's eventual value relates to each node that reaches it,
    /// keyed (node, leaf).
    node_to_leaf: BTreeMap<(NodeId, NodeId), Relation>,
    /// Pairwise leaf facts, keyed canonically (smaller id, larger id); the
    /// relation constrains the larger-id leaf's value relative to the
    /// smaller-id leaf's.
    leaf_pairs: BTreeMap<(NodeId, NodeId), Relation>,
    /// Per-node range snapshot taken when resolution starts; the verifier
    /// checks accepted assignments against these.
    original_ranges: BTreeMap<NodeId, Vec<V>>,
    solutions: Vec<Solution<V>>,
}

impl<V: LatticeValue> ConstraintGraph<V> {
    pub fn new(name: impl Into<String>, config: SolverConfig) -> Self {
        ConstraintGraph {
            name: name.into(),
            config,
            nodes: BTreeMap::new(),
            ranges: BTreeMap::new(),
            narrower_edges: BTreeSet::new(),
            wider_edges: BTreeSet::new(),
            roots: BTreeSet::new(),
            leaves: BTreeSet::new(),
            node_to_leaf: BTreeMap::new(),
            leaf_pairs: BTreeMap::new(),
            original_ranges: BTreeMap::new(),
            solutions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Register a node with its full legal candidate range. Repeat inserts
    /// of the same id are no-ops; an empty initial range is a contradiction.
    pub fn insert(&mut self, id: NodeId, range: Vec<V>) -> Result<(), SolverError> {
        if self.nodes.contains_key(&id) {
            return Ok(());
        }
        if range.is_empty() {
            return Err(SolverError::EmptyRange {
                graph: self.name.clone(),
                id,
                context: "inserted with an empty candidate range".into(),
            });
        }
        self.nodes.insert(id, GraphNode::new(id));
        self.ranges.insert(id, range);
        Ok(())
    }

    /// Remove a node and every edge touching it.
    pub fn remove(&mut self, id: NodeId) -> Result<(), SolverError> {
        let node = self.nodes.remove(&id).ok_or_else(|| SolverError::UnknownNode {
            graph: self.name.clone(),
            id,
        })?;
        for dominator in &node.ins {
            if let Some(p) = self.nodes.get_mut(dominator) {
                p.outs.retain(|&out| out != id);
                p.outbound -= 1;
            }
            self.narrower_edges.remove(&(*dominator, id));
            self.wider_edges.remove(&(*dominator, id));
        }
        for dominatee in &node.outs {
            if let Some(c) = self.nodes.get_mut(dominatee) {
                c.ins.retain(|&i| i != id);
                c.inbound -= 1;
            }
            self.narrower_edges.remove(&(id, *dominatee));
            self.wider_edges.remove(&(id, *dominatee));
        }
        self.ranges.remove(&id);
        Ok(())
    }

    /// Add a dominance edge. Reconnecting an existing edge is a no-op (the
    /// first rank wins); self-loops and two-node cycles are rejected.
    pub fn connect(
        &mut self,
        from: NodeId,
        to: NodeId,
        rank: EdgeRank,
    ) -> Result<(), SolverError> {
        if from == to {
            return Err(SolverError::SelfLoop {
                graph: self.name.clone(),
                id: from,
            });
        }
        for id in [from, to] {
            if !self.nodes.contains_key(&id) {
                return Err(SolverError::UnknownNode {
                    graph: self.name.clone(),
                    id,
                });
            }
        }
        if self.has_edge(from, to) {
            return Ok(());
        }
        if self.has_edge(to, from) {
            return Err(SolverError::BackEdge {
                graph: self.name.clone(),
                from,
                to,
            });
        }
        {
            let f = self.nodes.get_mut(&from).expect("checked above");
            f.outs.push(to);
            f.outbound += 1;
        }
        {
            let t = self.nodes.get_mut(&to).expect("checked above");
            t.ins.push(from);
            t.inbound += 1;
        }
        match rank {
            EdgeRank::Narrower => {
                self.narrower_edges.insert((from, to));
            }
            EdgeRank::Wider => {
                self.wider_edges.insert((from, to));
            }
            EdgeRank::Same => {}
        }
        Ok(())
    }

    /// Remove a single edge.
    pub fn remove_connection(&mut self, from: NodeId, to: NodeId) -> Result<(), SolverError> {
        if !self.has_edge(from, to) {
            return Err(SolverError::UnknownEdge {
                graph: self.name.clone(),
                from,
                to,
            });
        }
        {
            let f = self.nodes.get_mut(&from).expect("edge endpoints exist");
            f.outs.retain(|&out| out != to);
            f.outbound -= 1;
        }
        {
            let t = self.nodes.get_mut(&to).expect("edge endpoints exist");
            t.ins.retain(|&i| i != from);
            t.inbound -= 1;
        }
        self.narrower_edges.remove(&(from, to));
        self.wider_edges.remove(&(from, to));
        Ok(())
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.nodes
            .get(&from)
            .is_some_and(|n| n.outs.contains(&to))
    }

    /// The rank of an existing edge; `None` when there is no edge.
    pub fn edge_rank(&self, from: NodeId, to: NodeId) -> Option<EdgeRank> {
        if !self.has_edge(from, to) {
            return None;
        }
        if self.narrower_edges.contains(&(from, to)) {
            Some(EdgeRank::Narrower)
        } else if self.wider_edges.contains(&(from, to)) {
            Some(EdgeRank::Wider)
        } else {
            Some(EdgeRank::Same)
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    /// All node ids, ascending.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn has_solution_range(&self, id: NodeId) -> bool {
        self.ranges.contains_key(&id)
    }

    pub fn solution_range_of(&self, id: NodeId) -> Option<&[V]> {
        self.ranges.get(&id).map(|r| r.as_slice())
    }

    /// Replace a node's range unconditionally, without intersection or
    /// propagation. The checked, propagating path is [`Self::update`].
    pub fn force_update(&mut self, id: NodeId, range: Vec<V>) -> Result<(), SolverError> {
        if !self.nodes.contains_key(&id) {
            return Err(SolverError::UnknownNode {
                graph: self.name.clone(),
                id,
            });
        }
        if range.is_empty() {
            return Err(SolverError::EmptyRange {
                graph: self.name.clone(),
                id,
                context: "force_update with an empty range".into(),
            });
        }
        self.ranges.insert(id, range);
        Ok(())
    }

    /// Roots of the last resolution round.
    pub fn roots(&self) -> &BTreeSet<NodeId> {
        &self.roots
    }

    /// Leaves of the last resolution round.
    pub fn leaves(&self) -> &BTreeSet<NodeId> {
        &self.leaves
    }

    /// The derived relation between a node and a leaf it reaches, if any.
    pub fn node_to_leaf_relation(&self, node: NodeId, leaf: NodeId) -> Option<Relation> {
        self.node_to_leaf.get(&(node, leaf)).copied()
    }

    /// The derived fact between two leaves, if any. The returned relation
    /// constrains the larger-id leaf's value relative to the smaller-id
    /// leaf's, regardless of argument order.
    pub fn leaf_relation(&self, a: NodeId, b: NodeId) -> Option<Relation> {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.leaf_pairs.get(&key).copied()
    }

    /// Assignments accepted by the last resolution round, at most
    /// `max_solution_count` of them.
    pub fn solutions(&self) -> &[Solution<V>] {
        &self.solutions
    }

    /// Reset all derived state (roots, leaves, relations, solutions) while
    /// keeping the node/edge structure and ranges built so far. Called at
    /// the start of every [`Self::resolve`].
    pub fn initialize_resolve(&mut self) {
        self.roots.clear();
        self.leaves.clear();
        self.node_to_leaf.clear();
        self.leaf_pairs.clear();
        self.original_ranges.clear();
        self.solutions.clear();
    }

    /// Fully reset the graph for reuse in a fresh generation round.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.ranges.clear();
        self.narrower_edges.clear();
        self.wider_edges.clear();
        self.initialize_resolve();
    }

    /// Compute roots and leaves and check the structural invariant: every
    /// non-leaf node has at most one dominator. Isolated nodes count as
    /// leaves (they still need a concrete value), not as roots.
    fn compute_boundaries(&mut self) -> Result<(), SolverError> {
        for node in self.nodes.values() {
            if node.is_leaf() {
                self.leaves.insert(node.id);
            } else {
                if node.inbound > 1 {
                    return Err(SolverError::MultipleInbound {
                        graph: self.name.clone(),
                        id: node.id,
                        inbound: node.inbound,
                        dominators: node.ins.clone(),
                    });
                }
                if node.is_root() {
                    self.roots.insert(node.id);
                }
            }
        }
        if !self.nodes.is_empty() && self.leaves.is_empty() {
            return Err(SolverError::MissingBoundary {
                graph: self.name.clone(),
                kind: "leaves",
            });
        }
        let has_edges = self.nodes.values().any(|n| n.outbound > 0);
        if has_edges && self.roots.is_empty() {
            return Err(SolverError::MissingBoundary {
                graph: self.name.clone(),
                kind: "roots",
            });
        }
        Ok(())
    }

    /// Align the ranges of every connected pair once. Each alignment
    /// propagates middle-out to a fixed point, so a single sweep leaves the
    /// whole graph mutually tightened.
    fn align_all_edges(&mut self) -> Result<(), SolverError> {
        let edges: Vec<(NodeId, NodeId)> = self
            .nodes
            .values()
            .flat_map(|n| n.outs.iter().map(move |&out| (n.id, out)))
            .collect();
        for (from, to) in edges {
            self.solution_range_alignment(from, to)?;
        }
        Ok(())
    }

    /// Resolve the graph: derive relations between leaves and enumerate up
    /// to `max_solution_count` consistent assignments.
    ///
    /// A contradiction (some range becomes empty) or a structural violation
    /// aborts with an error and the caller must discard the in-progress
    /// program. Zero consistent assignments is not an error.
    pub fn resolve(&mut self) -> Result<(), SolverError> {
        self.initialize_resolve();
        if self.nodes.is_empty() {
            return Ok(());
        }
        self.compute_boundaries()?;
        self.align_all_edges()?;
        // The verifier compares against the post-alignment snapshot, which
        // is what the leaves actually enumerate from.
        self.original_ranges = self.ranges.clone();
        self.derive_node_to_leaf_relations();
        self.enforce_relation_monotonicity()?;
        self.derive_leaf_pair_relations();
        let cap = self.config.max_solution_count;
        let collected: Vec<Solution<V>> = SolutionStream::new(self).take(cap).collect();
        self.solutions = collected;
        debug!(
            graph = %self.name,
            leaves = self.leaves.len(),
            solutions = self.solutions.len(),
            "resolved constraint graph"
        );
        Ok(())
    }
}
