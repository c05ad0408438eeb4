//! solgen_lattice
//!
//! Concrete Solidity lattices for the `solgen_constraint` engine: the
//! domains a random Solidity program generator has to pick values from,
//! each implementing the engine's [`LatticeValue`] contract.
//!
//! - [`ElementaryType`]: `uint8 ⊑ … ⊑ uint256`, `address payable ⊑
//!   address`, and the isolated `bool`/`string`/`bytes` values.
//! - [`StorageLocation`]: storage pointer/ref (two representations of one
//!   storage class), memory, calldata.
//! - [`FuncVis`] / [`VarVis`]: visibilities; they carry no genuine order,
//!   so every value is narrower and wider of every other.
//! - [`Mutability`]: `pure ⊑ view ⊑ nonpayable` plus the `payable` island.
//! - [`VisMut`]: the combined visibility × mutability domain a function or
//!   state-variable declaration is resolved against.
//!
//! [`LatticeValue`]: solgen_constraint::LatticeValue

pub mod location;
pub mod mutability;
pub mod types;
pub mod visibility;
pub mod vismut;

// Re-exports
pub use location::{StorageLocation, ALL_STORAGE_LOCATIONS};
pub use mutability::{Mutability, ALL_MUTABILITIES};
pub use types::{ElementaryType, ALL_ELEMENTARY_TYPES, ALL_UINT_TYPES};
pub use visibility::{FuncVis, VarVis, ALL_FUNC_VIS, ALL_VAR_VIS};
pub use vismut::{VisMut, ALL_VIS_MUTS};
