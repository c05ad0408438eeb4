//! Combined visibility × mutability lattice.
//!
//! A function declaration is resolved against (visibility, mutability)
//! pairs, a state variable against its visibility alone; both appear as one
//! domain so a single constraint graph can relate them. Dominance is the
//! cartesian product of the orderless visibility cluster with the
//! mutability chain, filtered for legality: internal and private functions
//! cannot be payable.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use solgen_constraint::LatticeValue;

use crate::mutability::Mutability;
use crate::visibility::{FuncVis, VarVis};

/// A resolved visibility/mutability choice for one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisMut {
    /// A state-variable declaration: visibility only.
    Var(VarVis),
    /// A function declaration: visibility and state mutability.
    Func(FuncVis, Mutability),
}

/// Every legal value: 4 variable visibilities and 14 function combinations.
pub static ALL_VIS_MUTS: Lazy<Vec<VisMut>> = Lazy::new(|| {
    let mut all: Vec<VisMut> = VarVis::all().into_iter().map(VisMut::Var).collect();
    for vis in FuncVis::all() {
        for mutability in Mutability::all() {
            if VisMut::is_legal(vis, mutability) {
                all.push(VisMut::Func(vis, mutability));
            }
        }
    }
    all
});

impl VisMut {
    pub fn all() -> Vec<VisMut> {
        ALL_VIS_MUTS.clone()
    }

    /// Internal and private functions never receive ether, so they cannot
    /// be payable.
    pub fn is_legal(vis: FuncVis, mutability: Mutability) -> bool {
        !(matches!(vis, FuncVis::Internal | FuncVis::Private)
            && mutability == Mutability::Payable)
    }
}

impl fmt::Display for VisMut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisMut::Var(vis) => write!(f, "var {}", vis),
            VisMut::Func(vis, mutability) => write!(f, "func {} {}", vis, mutability),
        }
    }
}

impl LatticeValue for VisMut {
    fn narrower(&self) -> Vec<VisMut> {
        match self {
            VisMut::Var(vis) => vis.narrower().into_iter().map(VisMut::Var).collect(),
            VisMut::Func(_, mutability) => {
                // any visibility, every narrower mutability, legal pairs only
                let mut out = Vec::new();
                for vis in FuncVis::all() {
                    for narrower in mutability.narrower() {
                        if VisMut::is_legal(vis, narrower) {
                            out.push(VisMut::Func(vis, narrower));
                        }
                    }
                }
                out
            }
        }
    }

    fn wider(&self) -> Vec<VisMut> {
        match self {
            VisMut::Var(vis) => vis.wider().into_iter().map(VisMut::Var).collect(),
            VisMut::Func(_, mutability) => {
                let mut out = Vec::new();
                for vis in FuncVis::all() {
                    for wider in mutability.wider() {
                        if VisMut::is_legal(vis, wider) {
                            out.push(VisMut::Func(vis, wider));
                        }
                    }
                }
                out
            }
        }
    }

    fn same(&self, other: &VisMut) -> bool {
        match (self, other) {
            (VisMut::Var(a), VisMut::Var(b)) => a.same(b),
            (VisMut::Func(va, ma), VisMut::Func(vb, mb)) => va.same(vb) && ma.same(mb),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_eighteen_values() {
        assert_eq!(VisMut::all().len(), 18);
    }

    #[test]
    fn test_internal_payable_is_illegal() {
        assert!(!VisMut::all().contains(&VisMut::Func(FuncVis::Internal, Mutability::Payable)));
        assert!(!VisMut::all().contains(&VisMut::Func(FuncVis::Private, Mutability::Payable)));
        assert!(VisMut::all().contains(&VisMut::Func(FuncVis::External, Mutability::Payable)));
    }

    #[test]
    fn test_func_dominance_follows_mutability() {
        // internal pure narrows from public view: pure ⊑ view, visibility free
        let internal_pure = VisMut::Func(FuncVis::Internal, Mutability::Pure);
        let public_view = VisMut::Func(FuncVis::Public, Mutability::View);
        assert!(internal_pure.is_narrower_than(&public_view));
        assert!(!public_view.is_narrower_than(&internal_pure));
    }

    #[test]
    fn test_payable_never_narrows_into_internal() {
        let external_payable = VisMut::Func(FuncVis::External, Mutability::Payable);
        for narrower in external_payable.narrower() {
            if let VisMut::Func(vis, mutability) = narrower {
                assert!(VisMut::is_legal(vis, mutability));
            }
        }
    }

    #[test]
    fn test_var_and_func_never_mix() {
        let var = VisMut::Var(VarVis::Public);
        let func = VisMut::Func(FuncVis::Public, Mutability::View);
        assert!(!var.same(&func));
        assert!(!var.is_comparable_to(&func));
    }
}
