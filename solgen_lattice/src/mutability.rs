//! State-mutability lattice.
//!
//! A `pure` function body is valid wherever a `view` body is, and a `view`
//! body wherever an unannotated (non-payable) one is, giving the chain
//! `pure ⊑ view ⊑ nonpayable`. `payable` sits on its own branch: it only
//! widens into `nonpayable`.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use solgen_constraint::LatticeValue;

/// Function state mutability. `NonPayable` is the unannotated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mutability {
    Pure,
    View,
    Payable,
    NonPayable,
}

/// Every mutability.
pub static ALL_MUTABILITIES: Lazy<Vec<Mutability>> = Lazy::new(|| {
    vec![
        Mutability::Pure,
        Mutability::View,
        Mutability::Payable,
        Mutability::NonPayable,
    ]
});

impl Mutability {
    pub fn all() -> Vec<Mutability> {
        ALL_MUTABILITIES.clone()
    }
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mutability::Pure => "pure",
            Mutability::View => "view",
            Mutability::Payable => "payable",
            Mutability::NonPayable => "nonpayable",
        };
        write!(f, "{}", name)
    }
}

impl LatticeValue for Mutability {
    fn narrower(&self) -> Vec<Mutability> {
        use Mutability::*;
        match self {
            Pure => vec![Pure],
            View => vec![View, Pure],
            Payable => vec![Payable],
            NonPayable => vec![NonPayable, Payable, View, Pure],
        }
    }

    fn wider(&self) -> Vec<Mutability> {
        use Mutability::*;
        match self {
            Pure => vec![Pure, View, NonPayable],
            View => vec![View, NonPayable],
            Payable => vec![Payable, NonPayable],
            NonPayable => vec![NonPayable],
        }
    }

    fn same(&self, other: &Mutability) -> bool {
        self == other
    }
}
