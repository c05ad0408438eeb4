//! solgen_constraint
//!
//! Dominance-constraint resolution engine for random Solidity program
//! generation.
//!
//! A generator that emits random programs in a statically typed language
//! cannot pick types, storage locations, or visibilities independently: the
//! choice made for one placeholder restricts the choices left for others
//! ("this expression's type must be convertible to that declaration's
//! type"). This crate models every open choice as a node in a directed
//! acyclic graph whose edges carry a dominance rank, keeps a finite
//! candidate range of lattice values per node, and resolves the graph into
//! concrete assignments for its leaves.
//!
//! The crate is generic over [`LatticeValue`]; concrete Solidity lattices
//! (elementary types, storage locations, visibility/mutability) live in the
//! sibling `solgen_lattice` crate.
//!
//! # Example
//!
//! ```
//! use solgen_constraint::{ConstraintGraph, EdgeRank, LatticeValue, SolverConfig};
//! # use std::fmt;
//! # #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! # struct W(u16);
//! # impl fmt::Display for W {
//! #     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "uint{}", self.0) }
//! # }
//! # impl LatticeValue for W {
//! #     fn narrower(&self) -> Vec<W> {
//! #         [8u16, 16, 32].iter().filter(|&&b| b <= self.0).map(|&b| W(b)).collect()
//! #     }
//! #     fn wider(&self) -> Vec<W> {
//! #         [8u16, 16, 32].iter().filter(|&&b| b >= self.0).map(|&b| W(b)).collect()
//! #     }
//! #     fn same(&self, other: &W) -> bool { self == other }
//! # }
//! // W is a three-value integer-width chain implementing LatticeValue
//! let widths = vec![W(8), W(16), W(32)];
//! let mut graph = ConstraintGraph::new("type", SolverConfig::default());
//! graph.insert(1, widths.clone()).unwrap();
//! graph.insert(2, widths).unwrap();
//! graph.connect(1, 2, EdgeRank::Narrower).unwrap();
//! graph.resolve().unwrap();
//!
//! // node 2 is the leaf; node 1's value is derived from its relation to 2
//! assert_eq!(graph.solutions().len(), 3);
//! for solution in graph.solutions() {
//!     assert!(solution.contains_key(&2));
//! }
//! ```

// Library code must not write to stderr directly; diagnostics go through
// `tracing`. CLI consumers may subscribe and print as they see fit.
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]

pub mod config;
pub mod dot;
pub mod error;
pub mod graph;
pub mod node;
pub mod relation;
pub mod value;

// Re-exports
pub use config::SolverConfig;
pub use error::SolverError;
pub use graph::{ConstraintGraph, NodeId, Solution, SolutionStream};
pub use node::GraphNode;
pub use relation::{EdgeRank, Relation};
pub use value::{
    intersect_ranges, is_equal_range, is_super_range, range_includes, LatticeValue,
};

// Sample lattices (available in tests or with the "testing" feature)
#[cfg(any(test, feature = "testing"))]
pub mod testing;
