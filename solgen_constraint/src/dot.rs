//! Debug rendering of a constraint graph in graphviz DOT form.
//!
//! Purely a diagnostic side channel: the output is a deterministic string
//! (nodes in id order, edges in connection order) that callers may write to
//! a file and feed to `dot`. Roots are drawn red, leaves blue, inner nodes
//! black. Not required for correctness.

use std::fmt::Write as _;

use crate::graph::ConstraintGraph;
use crate::relation::EdgeRank;
use crate::value::LatticeValue;

impl<V: LatticeValue> ConstraintGraph<V> {
    /// Render the graph as DOT text.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph \"{}\" {{", self.name());
        for id in self.node_ids() {
            let node = self.node(id).expect("listed ids exist");
            let color = if node.is_leaf() {
                "blue"
            } else if node.is_root() {
                "red"
            } else {
                "black"
            };
            let range = self
                .solution_range_of(id)
                .map(|r| {
                    r.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {} [color={}, label=\"{} {{{}}}\"];",
                id, color, id, range
            );
        }
        for id in self.node_ids() {
            let node = self.node(id).expect("listed ids exist");
            for &out_id in &node.outs {
                let rank = self
                    .edge_rank(id, out_id)
                    .expect("adjacency implies edge");
                if rank == EdgeRank::Same {
                    let _ = writeln!(out, "  {} -> {};", id, out_id);
                } else {
                    let _ = writeln!(out, "  {} -> {} [label=\"{}\"];", id, out_id, rank.label());
                }
            }
        }
        out.push_str("}\n");
        out
    }
}
