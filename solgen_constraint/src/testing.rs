//! Sample lattices for tests and benchmarks.
//!
//! `Width` is the unsigned-integer-width chain the engine's own tests run
//! on; `Slot` is a minimal three-value lattice with an equivalent pair (two
//! representations of the same underlying value), for exercising the
//! equivalence paths the chain cannot reach. Real Solidity lattices live in
//! the `solgen_lattice` crate.

use std::fmt;

use crate::value::LatticeValue;

/// Unsigned integer widths: `W8 ⊑ W16 ⊑ W32 ⊑ W64 ⊑ W128 ⊑ W256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
    W128,
    W256,
}

impl Width {
    pub fn all() -> Vec<Width> {
        vec![
            Width::W8,
            Width::W16,
            Width::W32,
            Width::W64,
            Width::W128,
            Width::W256,
        ]
    }

    pub fn bits(self) -> u16 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
            Width::W128 => 128,
            Width::W256 => 256,
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "uint{}", self.bits())
    }
}

impl LatticeValue for Width {
    fn narrower(&self) -> Vec<Width> {
        Width::all()
            .into_iter()
            .filter(|w| w.bits() <= self.bits())
            .collect()
    }

    fn wider(&self) -> Vec<Width> {
        Width::all()
            .into_iter()
            .filter(|w| w.bits() >= self.bits())
            .collect()
    }

    fn same(&self, other: &Width) -> bool {
        self == other
    }
}

/// A storage-slot lattice with an equivalent pair: `Pointer` and `Ref` are
/// two representations of the same storage class (each narrower AND wider
/// than the other without being the same), and both are narrower than
/// `Heap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Pointer,
    Ref,
    Heap,
}

impl Slot {
    pub fn all() -> Vec<Slot> {
        vec![Slot::Pointer, Slot::Ref, Slot::Heap]
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Pointer => "pointer",
            Slot::Ref => "ref",
            Slot::Heap => "heap",
        };
        write!(f, "{}", name)
    }
}

impl LatticeValue for Slot {
    fn narrower(&self) -> Vec<Slot> {
        match self {
            Slot::Pointer | Slot::Ref => vec![Slot::Pointer, Slot::Ref],
            Slot::Heap => vec![Slot::Heap, Slot::Pointer, Slot::Ref],
        }
    }

    fn wider(&self) -> Vec<Slot> {
        match self {
            Slot::Pointer | Slot::Ref => vec![Slot::Pointer, Slot::Ref, Slot::Heap],
            Slot::Heap => vec![Slot::Heap],
        }
    }

    fn same(&self, other: &Slot) -> bool {
        self == other
    }
}
