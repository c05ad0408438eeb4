//! Storage-location lattice.
//!
//! Solidity distinguishes where a reference-typed value lives (storage,
//! memory, calldata) and, for storage, whether a declaration is the
//! canonical slot (`StorageRef`) or a local alias to one
//! (`StoragePointer`). The two storage flavors are interchangeable in the
//! generated source text, so they compare [`same`] across representations
//! while keeping distinct dominance tables.
//!
//! [`same`]: solgen_constraint::LatticeValue::same

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use solgen_constraint::LatticeValue;

/// Where a reference-typed declaration lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageLocation {
    StoragePointer,
    StorageRef,
    Memory,
    Calldata,
    /// The implicit memory location of a struct member inside its struct
    /// declaration, where Solidity forbids an explicit keyword.
    MemoryDefault,
}

/// Every storage location, in the order the generator enumerates them.
pub static ALL_STORAGE_LOCATIONS: Lazy<Vec<StorageLocation>> = Lazy::new(|| {
    vec![
        StorageLocation::StoragePointer,
        StorageLocation::StorageRef,
        StorageLocation::Memory,
        StorageLocation::Calldata,
        StorageLocation::MemoryDefault,
    ]
});

impl StorageLocation {
    pub fn all() -> Vec<StorageLocation> {
        ALL_STORAGE_LOCATIONS.clone()
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageLocation::StoragePointer => "storage pointer",
            StorageLocation::StorageRef => "storage ref",
            StorageLocation::Memory => "memory",
            StorageLocation::Calldata => "calldata",
            StorageLocation::MemoryDefault => "memory default",
        };
        write!(f, "{}", name)
    }
}

impl LatticeValue for StorageLocation {
    fn narrower(&self) -> Vec<StorageLocation> {
        use StorageLocation::*;
        match self {
            StoragePointer => vec![StoragePointer, StorageRef],
            StorageRef => vec![StoragePointer, StorageRef, Memory, Calldata],
            Memory => vec![Memory, StorageRef, Calldata, StoragePointer],
            Calldata => vec![Calldata],
            MemoryDefault => vec![MemoryDefault, Memory, StorageRef, Calldata, StoragePointer],
        }
    }

    fn wider(&self) -> Vec<StorageLocation> {
        use StorageLocation::*;
        match self {
            StoragePointer => vec![StoragePointer, StorageRef, Memory],
            StorageRef => vec![StoragePointer, StorageRef, Memory],
            Memory => vec![Memory, StorageRef],
            Calldata => vec![Calldata, Memory, StorageRef],
            MemoryDefault => vec![MemoryDefault, Memory, StorageRef],
        }
    }

    fn same(&self, other: &StorageLocation) -> bool {
        use StorageLocation::*;
        match (self, other) {
            // two representations of the same storage class
            (StoragePointer | StorageRef, StoragePointer | StorageRef) => true,
            _ => self == other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_and_ref_are_same() {
        assert!(StorageLocation::StoragePointer.same(&StorageLocation::StorageRef));
        assert!(StorageLocation::StorageRef.same(&StorageLocation::StoragePointer));
        assert!(!StorageLocation::Memory.same(&StorageLocation::StorageRef));
    }

    #[test]
    fn test_calldata_narrows_into_memory() {
        // calldata may be used where memory is expected, not the reverse
        assert!(StorageLocation::Calldata.is_narrower_than(&StorageLocation::Memory));
        assert!(!StorageLocation::Memory.is_narrower_than(&StorageLocation::Calldata));
    }

    #[test]
    fn test_storage_ref_and_memory_are_mutually_convertible() {
        assert!(StorageLocation::Memory.is_equivalent_to(&StorageLocation::StorageRef));
    }
}
