//! Elementary-type lattice.
//!
//! Unsigned integers form a width chain: a `uint8` expression may appear
//! wherever a wider unsigned integer is expected. `address payable`
//! implicitly converts to `address` (never the reverse), and
//! `bool`/`string`/`bytes` convert to nothing but themselves.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use solgen_constraint::LatticeValue;

/// A Solidity elementary type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementaryType {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    UInt256,
    Address,
    AddressPayable,
    Bool,
    String,
    Bytes,
}

/// Every elementary type.
pub static ALL_ELEMENTARY_TYPES: Lazy<Vec<ElementaryType>> = Lazy::new(|| {
    vec![
        ElementaryType::UInt8,
        ElementaryType::UInt16,
        ElementaryType::UInt32,
        ElementaryType::UInt64,
        ElementaryType::UInt128,
        ElementaryType::UInt256,
        ElementaryType::Address,
        ElementaryType::AddressPayable,
        ElementaryType::Bool,
        ElementaryType::String,
        ElementaryType::Bytes,
    ]
});

/// The unsigned-integer chain, ascending by width.
pub static ALL_UINT_TYPES: Lazy<Vec<ElementaryType>> = Lazy::new(|| {
    vec![
        ElementaryType::UInt8,
        ElementaryType::UInt16,
        ElementaryType::UInt32,
        ElementaryType::UInt64,
        ElementaryType::UInt128,
        ElementaryType::UInt256,
    ]
});

impl ElementaryType {
    pub fn all() -> Vec<ElementaryType> {
        ALL_ELEMENTARY_TYPES.clone()
    }

    pub fn uints() -> Vec<ElementaryType> {
        ALL_UINT_TYPES.clone()
    }

    /// Bit width for unsigned integers, `None` otherwise.
    pub fn uint_bits(self) -> Option<u16> {
        match self {
            ElementaryType::UInt8 => Some(8),
            ElementaryType::UInt16 => Some(16),
            ElementaryType::UInt32 => Some(32),
            ElementaryType::UInt64 => Some(64),
            ElementaryType::UInt128 => Some(128),
            ElementaryType::UInt256 => Some(256),
            _ => None,
        }
    }
}

impl fmt::Display for ElementaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementaryType::UInt8 => "uint8",
            ElementaryType::UInt16 => "uint16",
            ElementaryType::UInt32 => "uint32",
            ElementaryType::UInt64 => "uint64",
            ElementaryType::UInt128 => "uint128",
            ElementaryType::UInt256 => "uint256",
            ElementaryType::Address => "address",
            ElementaryType::AddressPayable => "address payable",
            ElementaryType::Bool => "bool",
            ElementaryType::String => "string",
            ElementaryType::Bytes => "bytes",
        };
        write!(f, "{}", name)
    }
}

impl LatticeValue for ElementaryType {
    fn narrower(&self) -> Vec<ElementaryType> {
        match self.uint_bits() {
            Some(bits) => ElementaryType::uints()
                .into_iter()
                .filter(|t| t.uint_bits().expect("uints() yields uints") <= bits)
                .collect(),
            None => match self {
                ElementaryType::Address => {
                    vec![ElementaryType::Address, ElementaryType::AddressPayable]
                }
                other => vec![*other],
            },
        }
    }

    fn wider(&self) -> Vec<ElementaryType> {
        match self.uint_bits() {
            Some(bits) => ElementaryType::uints()
                .into_iter()
                .filter(|t| t.uint_bits().expect("uints() yields uints") >= bits)
                .collect(),
            None => match self {
                ElementaryType::AddressPayable => {
                    vec![ElementaryType::AddressPayable, ElementaryType::Address]
                }
                other => vec![*other],
            },
        }
    }

    fn same(&self, other: &ElementaryType) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint_chain() {
        assert!(ElementaryType::UInt8.is_narrower_than(&ElementaryType::UInt256));
        assert!(ElementaryType::UInt64.is_wider_than(&ElementaryType::UInt16));
        assert!(!ElementaryType::UInt256.is_narrower_than(&ElementaryType::UInt8));
    }

    #[test]
    fn test_address_payable_narrows_into_address() {
        assert!(ElementaryType::AddressPayable.is_narrower_than(&ElementaryType::Address));
        assert!(!ElementaryType::Address.is_narrower_than(&ElementaryType::AddressPayable));
    }

    #[test]
    fn test_isolated_values_do_not_mix() {
        assert!(!ElementaryType::Bool.is_comparable_to(&ElementaryType::UInt8));
        assert!(!ElementaryType::String.is_comparable_to(&ElementaryType::Bytes));
        assert!(!ElementaryType::Address.is_comparable_to(&ElementaryType::UInt256));
    }
}
