//! Relation derivation: from edge structure to pairwise leaf facts.
//!
//! Two passes turn the DAG's edges into knowledge the enumerator can use.
//! The upward pass starts at every leaf and walks dominator chains,
//! composing edge ranks into a single relation per (node, leaf) pair; where
//! two branches of the same node both reach a leaf, the two path relations
//! are conjoined into their strongest common truth. The downward pass walks
//! from the roots and enforces a monotonicity law between a node and its
//! children with respect to a shared leaf. Finally, every node that reaches
//! two or more leaves contributes a fact about each leaf pair, and the facts
//! are closed over "same" chains.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::trace;

use super::{ConstraintGraph, NodeId};
use crate::error::SolverError;
use crate::relation::Relation;
use crate::value::LatticeValue;

impl<V: LatticeValue> ConstraintGraph<V> {
    /// Upward pass: compute, for every node, how each leaf reachable from it
    /// will relate to it once resolved.
    ///
    /// The walk is a worklist fixpoint: when a node's relation to a leaf
    /// changes (because a second path merged in), the merged relation is
    /// re-broadcast to its dominators. The conjunction only ever moves down
    /// the implication lattice, so the fixpoint is reached in finitely many
    /// steps.
    pub(super) fn derive_node_to_leaf_relations(&mut self) {
        let mut worklist: VecDeque<(NodeId, NodeId)> = VecDeque::new();
        let leaves: Vec<NodeId> = self.leaves.iter().copied().collect();
        for leaf in leaves {
            let dominators = self.nodes.get(&leaf).expect("leaf is a node").ins.clone();
            for dominator in dominators {
                let rank = self.edge_rank(dominator, leaf).expect("adjacency implies edge");
                if self.merge_node_to_leaf(dominator, leaf, rank.relation()) {
                    worklist.push_back((dominator, leaf));
                }
            }
        }
        while let Some((node, leaf)) = worklist.pop_front() {
            let relation = self.node_to_leaf[&(node, leaf)];
            let dominators = self.nodes.get(&node).expect("worklist ids are nodes").ins.clone();
            for dominator in dominators {
                let rank = self.edge_rank(dominator, node).expect("adjacency implies edge");
                let composed = rank.relation().compose(relation);
                if self.merge_node_to_leaf(dominator, leaf, composed) {
                    worklist.push_back((dominator, leaf));
                }
            }
        }
    }

    /// Conjoin `relation` into the stored (node, leaf) entry. Returns true
    /// when the stored relation changed.
    fn merge_node_to_leaf(&mut self, node: NodeId, leaf: NodeId, relation: Relation) -> bool {
        match self.node_to_leaf.get(&(node, leaf)) {
            None => {
                self.node_to_leaf.insert((node, leaf), relation);
                true
            }
            Some(&existing) => {
                let merged = existing.meet(relation);
                if merged == existing {
                    false
                } else {
                    trace!(
                        graph = %self.name,
                        node,
                        leaf,
                        from = existing.label(),
                        to = merged.label(),
                        "merged multi-path relation"
                    );
                    self.node_to_leaf.insert((node, leaf), merged);
                    true
                }
            }
        }
    }

    /// Downward pass: between a node and each of its children, with respect
    /// to a leaf both reach, relations must shrink monotonically.
    ///
    /// A node that is "same" to a leaf forces every child on the way to that
    /// leaf to "same" as well (a weaker claim is upgraded). A node that is
    /// only "same-range" to a leaf must not have a child claiming "same" or
    /// "equivalent"; the child would be more tightly bound than the path
    /// through it permits, which indicates a miswired graph.
    pub(super) fn enforce_relation_monotonicity(&mut self) -> Result<(), SolverError> {
        let mut stack: Vec<NodeId> = self.roots.iter().copied().collect();
        while let Some(node) = stack.pop() {
            let children = self.nodes.get(&node).expect("roots and their descendants are nodes").outs.clone();
            let node_leaves: Vec<(NodeId, Relation)> = self
                .node_to_leaf
                .range((node, NodeId::MIN)..=(node, NodeId::MAX))
                .map(|(&(_, leaf), &relation)| (leaf, relation))
                .collect();
            for child in children {
                for &(leaf, node_relation) in &node_leaves {
                    let Some(child_relation) = self.node_to_leaf_relation(child, leaf) else {
                        continue;
                    };
                    match node_relation {
                        Relation::Same if child_relation != Relation::Same => {
                            self.node_to_leaf.insert((child, leaf), Relation::Same);
                        }
                        Relation::SameRange
                            if matches!(
                                child_relation,
                                Relation::Same | Relation::Equivalent
                            ) =>
                        {
                            return Err(SolverError::RelationConflict {
                                graph: self.name.clone(),
                                node,
                                child,
                                leaf,
                                claimed: child_relation.label(),
                            });
                        }
                        _ => {}
                    }
                }
                if !self.leaves.contains(&child) {
                    stack.push(child);
                }
            }
        }
        Ok(())
    }

    /// Emit a fact about every leaf pair dominated by a common node, conjoin
    /// facts from different nodes, and close over "same" chains.
    pub(super) fn derive_leaf_pair_relations(&mut self) {
        let mut per_node: BTreeMap<NodeId, Vec<(NodeId, Relation)>> = BTreeMap::new();
        for (&(node, leaf), &relation) in &self.node_to_leaf {
            per_node.entry(node).or_default().push((leaf, relation));
        }
        let mut pairs: BTreeMap<(NodeId, NodeId), Relation> = BTreeMap::new();
        for (_, leaf_relations) in per_node {
            for i in 0..leaf_relations.len() {
                for j in (i + 1)..leaf_relations.len() {
                    let (a, to_a) = leaf_relations[i];
                    let (b, to_b) = leaf_relations[j];
                    // Chain a -> node -> b: how b relates to a.
                    let fact = to_a.invert().compose(to_b);
                    let entry = pairs.entry((a, b)).or_insert(fact);
                    *entry = entry.meet(fact);
                }
            }
        }
        close_same_classes(&mut pairs);
        self.leaf_pairs = pairs;
    }
}

/// Leaves chained by "same" form an equivalence class; record "same" for
/// every pair inside each class. Conjoining with an existing fact keeps the
/// pair consistent (same absorbs everything weaker).
fn close_same_classes(pairs: &mut BTreeMap<(NodeId, NodeId), Relation>) {
    let mut adjacency: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    for (&(a, b), &relation) in pairs.iter() {
        if relation == Relation::Same {
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }
    }
    let mut visited: BTreeSet<NodeId> = BTreeSet::new();
    for &start in adjacency.keys() {
        if visited.contains(&start) {
            continue;
        }
        // Depth-first flood over the same-adjacency map.
        let mut class: Vec<NodeId> = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            class.push(id);
            if let Some(neighbors) = adjacency.get(&id) {
                stack.extend(neighbors.iter().copied());
            }
        }
        class.sort_unstable();
        for i in 0..class.len() {
            for j in (i + 1)..class.len() {
                let key = (class[i], class[j]);
                let entry = pairs.entry(key).or_insert(Relation::Same);
                *entry = entry.meet(Relation::Same);
            }
        }
    }
}
