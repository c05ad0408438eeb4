//! Visibility lattices.
//!
//! Visibility carries no genuine narrower/wider order: swapping a
//! function's visibility never changes which call sites type-check inside
//! the generated contract, so every value dominates every other in both
//! directions. The engine sees the whole domain as one equivalence cluster
//! and only `same`-tagged constraints actually pin a choice.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use solgen_constraint::LatticeValue;

/// Function visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuncVis {
    Internal,
    External,
    Public,
    Private,
}

/// Every function visibility.
pub static ALL_FUNC_VIS: Lazy<Vec<FuncVis>> = Lazy::new(|| {
    vec![
        FuncVis::Internal,
        FuncVis::External,
        FuncVis::Public,
        FuncVis::Private,
    ]
});

impl FuncVis {
    pub fn all() -> Vec<FuncVis> {
        ALL_FUNC_VIS.clone()
    }
}

impl fmt::Display for FuncVis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FuncVis::Internal => "internal",
            FuncVis::External => "external",
            FuncVis::Public => "public",
            FuncVis::Private => "private",
        };
        write!(f, "{}", name)
    }
}

impl LatticeValue for FuncVis {
    fn narrower(&self) -> Vec<FuncVis> {
        FuncVis::all()
    }

    fn wider(&self) -> Vec<FuncVis> {
        FuncVis::all()
    }

    fn same(&self, other: &FuncVis) -> bool {
        self == other
    }
}

/// State-variable visibility. `Default` is the spelled-out-nothing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VarVis {
    Internal,
    Public,
    Private,
    Default,
}

/// Every state-variable visibility.
pub static ALL_VAR_VIS: Lazy<Vec<VarVis>> = Lazy::new(|| {
    vec![
        VarVis::Internal,
        VarVis::Public,
        VarVis::Private,
        VarVis::Default,
    ]
});

impl VarVis {
    pub fn all() -> Vec<VarVis> {
        ALL_VAR_VIS.clone()
    }
}

impl fmt::Display for VarVis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VarVis::Internal => "internal",
            VarVis::Public => "public",
            VarVis::Private => "private",
            VarVis::Default => "default",
        };
        write!(f, "{}", name)
    }
}

impl LatticeValue for VarVis {
    fn narrower(&self) -> Vec<VarVis> {
        VarVis::all()
    }

    fn wider(&self) -> Vec<VarVis> {
        VarVis::all()
    }

    fn same(&self, other: &VarVis) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibilities_are_pairwise_equivalent() {
        for a in FuncVis::all() {
            for b in FuncVis::all() {
                assert!(a.is_equivalent_to(&b));
                assert_eq!(a.same(&b), a == b);
            }
        }
    }

    #[test]
    fn test_var_default_is_orderless_too() {
        assert!(VarVis::Default.is_equivalent_to(&VarVis::Public));
        assert!(VarVis::Public.is_equivalent_to(&VarVis::Default));
    }
}
