//! Lazy enumeration of consistent leaf assignments, and the independent
//! post-hoc verifier.
//!
//! The search is a depth-first walk over the leaves in ascending id order.
//! At depth `i` it tries each value left in the `i`-th leaf's working range,
//! checks the tentative binding against every leaf already bound, and on
//! success narrows the working ranges of all not-yet-bound related leaves
//! before descending. Every narrowing is recorded on the frame's undo log
//! (a stack of range snapshots), so backtracking restores the exact prior
//! ranges without recomputation.
//!
//! [`SolutionStream`] implements [`Iterator`]: callers that stop consuming
//! (e.g. via `take(cap)`) stop the search; no work happens beyond the last
//! item pulled.

use std::collections::BTreeMap;

use tracing::trace;

use super::{ConstraintGraph, NodeId, Solution};
use crate::error::SolverError;
use crate::value::{intersect_ranges, is_equal_range, range_includes, LatticeValue};

/// One depth of the search: a leaf, the candidates it had when the search
/// reached it, a cursor into them, and the narrowing this depth applied to
/// later leaves.
#[derive(Debug)]
struct Frame<V> {
    leaf: NodeId,
    candidates: Vec<V>,
    next: usize,
    chosen: Option<V>,
    /// Ranges replaced by this frame's narrowing, restored on retract.
    undo: Vec<(NodeId, Vec<V>)>,
}

impl<V> Frame<V> {
    fn new(leaf: NodeId, candidates: Vec<V>) -> Self {
        Frame {
            leaf,
            candidates,
            next: 0,
            chosen: None,
            undo: Vec::new(),
        }
    }
}

/// A restartable, finite lazy sequence of complete leaf assignments.
#[derive(Debug)]
pub struct SolutionStream<'g, V: LatticeValue> {
    graph: &'g ConstraintGraph<V>,
    /// Fixed iteration order: leaf id order at the time roots and leaves
    /// were computed.
    leaf_order: Vec<NodeId>,
    /// Working ranges of the not-yet-bound leaves.
    ranges: BTreeMap<NodeId, Vec<V>>,
    stack: Vec<Frame<V>>,
    started: bool,
    finished: bool,
}

impl<'g, V: LatticeValue> SolutionStream<'g, V> {
    pub fn new(graph: &'g ConstraintGraph<V>) -> Self {
        let leaf_order: Vec<NodeId> = graph.leaves().iter().copied().collect();
        let ranges = leaf_order
            .iter()
            .map(|&leaf| {
                let range = graph
                    .solution_range_of(leaf)
                    .expect("every leaf has a range")
                    .to_vec();
                (leaf, range)
            })
            .collect();
        SolutionStream {
            graph,
            leaf_order,
            ranges,
            stack: Vec::new(),
            started: false,
            finished: false,
        }
    }

    /// Undo the top frame's narrowing and clear its choice, so the next loop
    /// iteration tries the frame's next candidate.
    fn retract_top(&mut self) {
        let frame = self.stack.last_mut().expect("retract with a frame on the stack");
        for (leaf, saved) in frame.undo.drain(..).rev() {
            self.ranges.insert(leaf, saved);
        }
        frame.chosen = None;
    }

    /// Check `value` for the leaf at `depth` against every leaf bound at an
    /// earlier depth that shares a recorded fact with it.
    fn consistent(&self, depth: usize, value: &V) -> bool {
        let leaf = self.leaf_order[depth];
        for frame in &self.stack[..depth] {
            let bound = frame.chosen.as_ref().expect("earlier frames are bound");
            let Some(relation) = self.graph.leaf_relation(frame.leaf, leaf) else {
                continue;
            };
            // The stored relation constrains the larger id relative to the
            // smaller; orient it to (bound leaf, current leaf).
            let holds = if frame.leaf <= leaf {
                relation.holds(bound, value)
            } else {
                relation.invert().holds(bound, value)
            };
            if !holds {
                return false;
            }
        }
        true
    }

    /// Narrow the working ranges of all later leaves related to the leaf at
    /// `depth`, just bound to `value`. On success the applied narrowing is
    /// returned for the frame's undo log; if any range empties, everything
    /// applied so far is rolled back and `None` signals the dead end.
    fn narrow_future(&mut self, depth: usize, value: &V) -> Option<Vec<(NodeId, Vec<V>)>> {
        let leaf = self.leaf_order[depth];
        let mut undo: Vec<(NodeId, Vec<V>)> = Vec::new();
        for &later in &self.leaf_order[depth + 1..] {
            let Some(relation) = self.graph.leaf_relation(leaf, later) else {
                continue;
            };
            let oriented = if leaf <= later {
                relation
            } else {
                relation.invert()
            };
            let allowed = oriented.allowed_values(value);
            let current = self.ranges.get(&later).expect("later leaves have ranges");
            let narrowed = intersect_ranges(current, &allowed);
            if narrowed.is_empty() {
                for (l, saved) in undo.into_iter().rev() {
                    self.ranges.insert(l, saved);
                }
                return None;
            }
            if is_equal_range(&narrowed, current) {
                continue;
            }
            undo.push((later, current.clone()));
            self.ranges.insert(later, narrowed);
        }
        Some(undo)
    }

    fn assignment(&self) -> Solution<V> {
        self.stack
            .iter()
            .map(|frame| {
                let value = frame.chosen.clone().expect("full stack is fully bound");
                (frame.leaf, value)
            })
            .collect()
    }
}

impl<V: LatticeValue> Iterator for SolutionStream<'_, V> {
    type Item = Solution<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            if self.leaf_order.is_empty() {
                self.finished = true;
                return None;
            }
            let first = self.leaf_order[0];
            let candidates = self.ranges[&first].clone();
            self.stack.push(Frame::new(first, candidates));
        } else {
            // Resume after a yield: retract the deepest choice and continue
            // with that leaf's next candidate.
            self.retract_top();
        }
        loop {
            let depth = self.stack.len() - 1;
            let candidate = {
                let frame = self.stack.last_mut().expect("loop keeps the stack non-empty");
                if frame.next < frame.candidates.len() {
                    let value = frame.candidates[frame.next].clone();
                    frame.next += 1;
                    Some(value)
                } else {
                    None
                }
            };
            let Some(value) = candidate else {
                // This leaf is out of candidates: drop the frame and retract
                // the choice that led here.
                self.stack.pop();
                if self.stack.is_empty() {
                    self.finished = true;
                    return None;
                }
                self.retract_top();
                continue;
            };
            if !self.consistent(depth, &value) {
                continue;
            }
            let Some(undo) = self.narrow_future(depth, &value) else {
                continue;
            };
            {
                let frame = self.stack.last_mut().expect("loop keeps the stack non-empty");
                frame.chosen = Some(value);
                frame.undo = undo;
            }
            if depth + 1 == self.leaf_order.len() {
                trace!(leaves = self.leaf_order.len(), "yielding assignment");
                return Some(self.assignment());
            }
            let next_leaf = self.leaf_order[depth + 1];
            let candidates = self.ranges[&next_leaf].clone();
            self.stack.push(Frame::new(next_leaf, candidates));
        }
    }
}

impl<V: LatticeValue> ConstraintGraph<V> {
    /// Re-validate every accepted assignment independently of how the search
    /// produced it: each leaf is bound, each bound value sits in the leaf's
    /// resolve-time range, and every recorded pairwise fact holds. Any
    /// violation is an internal-consistency failure, a bug in propagation
    /// or derivation, not a recoverable condition.
    pub fn verify(&self) -> Result<(), SolverError> {
        for (index, solution) in self.solutions.iter().enumerate() {
            for &leaf in &self.leaves {
                let Some(value) = solution.get(&leaf) else {
                    return Err(self.verification_error(format!(
                        "solution {} leaves leaf {} unbound",
                        index, leaf
                    )));
                };
                let original = self
                    .original_ranges
                    .get(&leaf)
                    .expect("every leaf has a resolve-time range");
                if !range_includes(original, value) {
                    return Err(self.verification_error(format!(
                        "solution {} binds leaf {} to {}, outside its candidate range",
                        index, leaf, value
                    )));
                }
            }
            for (&(a, b), &relation) in &self.leaf_pairs {
                let (x, y) = (&solution[&a], &solution[&b]);
                if !relation.holds(x, y) {
                    return Err(self.verification_error(format!(
                        "solution {} violates {} between leaf {} = {} and leaf {} = {}",
                        index,
                        relation.label(),
                        a,
                        x,
                        b,
                        y
                    )));
                }
            }
        }
        Ok(())
    }

    fn verification_error(&self, message: String) -> SolverError {
        SolverError::Verification {
            graph: self.name().to_string(),
            message,
        }
    }
}
