//! Middle-out range tightening.
//!
//! When a node's candidate range shrinks, every neighbor's range may have to
//! shrink with it: a dominator must keep at least one value compatible with
//! each side of the edge rank, and so on transitively. The walk goes both
//! upward (to dominators) and downward (to dominatees) from the changed
//! node, hence "middle-out".
//!
//! Termination: ranges are finite and only ever shrink, so the worklist
//! drains. The walk is iterative rather than recursive; the graphs are DAGs
//! by invariant but an explicit worklist keeps a miswired graph from
//! overflowing the stack.

use std::collections::{BTreeMap, VecDeque};

use tracing::trace;

use super::{ConstraintGraph, NodeId};
use crate::error::SolverError;
use crate::relation::EdgeRank;
use crate::value::{closure_of, intersect_ranges, is_equal_range, LatticeValue};

/// Which side of an edge the neighbor sits on, relative to the node whose
/// range just changed.
#[derive(Debug, Clone, Copy)]
enum Side {
    Dominator,
    Dominatee,
}

/// The minimum range a neighbor must hold so that every value in `range`
/// keeps at least one compatible partner across an edge of rank `rank`.
fn minimum_neighbor_range<V: LatticeValue>(rank: EdgeRank, side: Side, range: &[V]) -> Vec<V> {
    match (rank, side) {
        // An untagged edge forces equality: the neighbor needs exactly this.
        (EdgeRank::Same, _) => range.to_vec(),
        // dominatee narrower => the dominator must cover the wider closure
        (EdgeRank::Narrower, Side::Dominator) => closure_of(range, |v| v.wider()),
        (EdgeRank::Narrower, Side::Dominatee) => closure_of(range, |v| v.narrower()),
        (EdgeRank::Wider, Side::Dominator) => closure_of(range, |v| v.narrower()),
        (EdgeRank::Wider, Side::Dominatee) => closure_of(range, |v| v.wider()),
    }
}

impl<V: LatticeValue> ConstraintGraph<V> {
    /// Intersect a node's range with `range` and, if it shrank, propagate
    /// the restriction middle-out across the graph.
    pub fn update(&mut self, id: NodeId, range: Vec<V>) -> Result<(), SolverError> {
        let current = self
            .ranges
            .get(&id)
            .ok_or_else(|| SolverError::UnknownNode {
                graph: self.name.clone(),
                id,
            })?;
        let tightened = intersect_ranges(current, &range);
        if tightened.is_empty() {
            return Err(SolverError::EmptyRange {
                graph: self.name.clone(),
                id,
                context: format!(
                    "update with [{}] left nothing of [{}]",
                    display_range(&range),
                    display_range(current)
                ),
            });
        }
        if is_equal_range(&tightened, current) {
            return Ok(());
        }
        self.tighten_solution_range_middle_out(id, tightened)
    }

    /// Replace a node's range with an already-tightened `range` and walk the
    /// restriction across the graph until no neighbor can shrink further.
    pub fn tighten_solution_range_middle_out(
        &mut self,
        id: NodeId,
        range: Vec<V>,
    ) -> Result<(), SolverError> {
        if !self.nodes.contains_key(&id) {
            return Err(SolverError::UnknownNode {
                graph: self.name.clone(),
                id,
            });
        }
        let mut ranges = std::mem::take(&mut self.ranges);
        let result = self.tighten_ranges(&mut ranges, id, range);
        self.ranges = ranges;
        result
    }

    /// Non-destructive feasibility probe: run the same walk over a private
    /// copy of all ranges and report whether it completes without a
    /// contradiction. Shared state is left untouched either way.
    pub fn try_tighten_solution_range_middle_out(&self, id: NodeId, range: Vec<V>) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        let mut scratch = self.ranges.clone();
        self.tighten_ranges(&mut scratch, id, range).is_ok()
    }

    /// Align both endpoints of an existing edge: each side's range is
    /// tightened to the minimum implied by the other side and the edge rank.
    /// Calling this twice in a row is a no-op the second time.
    pub fn solution_range_alignment(
        &mut self,
        dominator: NodeId,
        dominatee: NodeId,
    ) -> Result<(), SolverError> {
        let rank = self
            .edge_rank(dominator, dominatee)
            .ok_or_else(|| SolverError::UnknownEdge {
                graph: self.name.clone(),
                from: dominator,
                to: dominatee,
            })?;
        let down = {
            let upper = self.ranges.get(&dominator).expect("endpoint has a range");
            minimum_neighbor_range(rank, Side::Dominatee, upper)
        };
        self.update(dominatee, down)?;
        let up = {
            let lower = self.ranges.get(&dominatee).expect("endpoint has a range");
            minimum_neighbor_range(rank, Side::Dominator, lower)
        };
        self.update(dominator, up)
    }

    /// The shared worklist walk. `ranges` is either the live range map or a
    /// scratch copy (for the `try_` variant); `self` is only read for
    /// structure.
    fn tighten_ranges(
        &self,
        ranges: &mut BTreeMap<NodeId, Vec<V>>,
        start: NodeId,
        range: Vec<V>,
    ) -> Result<(), SolverError> {
        ranges.insert(start, range);
        let mut worklist: VecDeque<NodeId> = VecDeque::from([start]);
        while let Some(id) = worklist.pop_front() {
            let node = self.nodes.get(&id).expect("worklist ids are graph nodes");
            trace!(graph = %self.name, node = id, "tightening from node");
            let neighbors: Vec<(NodeId, EdgeRank, Side)> = node
                .ins
                .iter()
                .map(|&dominator| {
                    let rank = self.edge_rank(dominator, id).expect("adjacency implies edge");
                    (dominator, rank, Side::Dominator)
                })
                .chain(node.outs.iter().map(|&dominatee| {
                    let rank = self.edge_rank(id, dominatee).expect("adjacency implies edge");
                    (dominatee, rank, Side::Dominatee)
                }))
                .collect();
            for (neighbor, rank, side) in neighbors {
                let minimum = minimum_neighbor_range(rank, side, &ranges[&id]);
                let current = &ranges[&neighbor];
                let tightened = intersect_ranges(current, &minimum);
                if tightened.is_empty() {
                    return Err(SolverError::EmptyRange {
                        graph: self.name.clone(),
                        id: neighbor,
                        context: format!(
                            "propagation from node {} over a {} edge requires [{}], current [{}]",
                            id,
                            rank.label(),
                            display_range(&minimum),
                            display_range(current)
                        ),
                    });
                }
                if is_equal_range(&tightened, current) {
                    continue;
                }
                ranges.insert(neighbor, tightened);
                worklist.push_back(neighbor);
            }
        }
        Ok(())
    }
}

fn display_range<V: LatticeValue>(range: &[V]) -> String {
    range
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
