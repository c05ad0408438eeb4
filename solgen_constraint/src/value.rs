//! The lattice-value capability contract and range helpers.
//!
//! Every domain whose values can dominate one another (elementary types,
//! storage locations, visibility/mutability pairs) implements
//! [`LatticeValue`]. The contract is deliberately small: enumerate the
//! values a given value may narrow to, enumerate the values it may widen
//! to, and decide structural equality. Everything else the engine needs is
//! derived from those three.
//!
//! Values are compared structurally with [`LatticeValue::same`], never by
//! pointer identity: a lattice is free to intern its values, but the engine
//! must not rely on it.

use std::fmt::{Debug, Display};

/// A value of a partially ordered, finite domain.
///
/// `narrower()` and `wider()` are reflexive: a value is always a member of
/// its own narrower and wider sets. "Narrower" follows the substitution
/// direction of the source language: a `uint8` expression may appear where
/// a `uint256` is expected, so `uint8` is narrower than `uint256`.
pub trait LatticeValue: Clone + Debug + Display {
    /// All values this value may narrow to, including itself.
    fn narrower(&self) -> Vec<Self>;

    /// All values this value may widen to, including itself.
    fn wider(&self) -> Vec<Self>;

    /// Structural equality. Two distinct representations of one underlying
    /// value (e.g. storage pointer vs. storage ref) may compare `same`.
    fn same(&self, other: &Self) -> bool;

    /// `self` may be substituted where `other` is expected.
    fn is_narrower_than(&self, other: &Self) -> bool {
        self.wider().iter().any(|w| w.same(other))
    }

    /// `other` may be substituted where `self` is expected.
    fn is_wider_than(&self, other: &Self) -> bool {
        self.narrower().iter().any(|n| n.same(other))
    }

    /// All values comparable to this one in either direction.
    fn same_range(&self) -> Vec<Self> {
        let mut range = self.narrower();
        for w in self.wider() {
            if !range_includes(&range, &w) {
                range.push(w);
            }
        }
        range
    }

    /// Values that are both narrower and wider than this one. A lattice with
    /// two representations of the same underlying value reports both here.
    fn equivalents(&self) -> Vec<Self> {
        let wider = self.wider();
        self.narrower()
            .into_iter()
            .filter(|n| wider.iter().any(|w| w.same(n)))
            .collect()
    }

    /// `self` and `other` dominate each other in both directions.
    fn is_equivalent_to(&self, other: &Self) -> bool {
        self.is_narrower_than(other) && self.is_wider_than(other)
    }

    /// `self` and `other` are comparable in at least one direction.
    fn is_comparable_to(&self, other: &Self) -> bool {
        self.is_narrower_than(other) || self.is_wider_than(other)
    }
}

/// Membership test under structural equality.
pub fn range_includes<V: LatticeValue>(range: &[V], value: &V) -> bool {
    range.iter().any(|v| v.same(value))
}

/// Every element of `subset` is a member of `set`.
pub fn is_super_range<V: LatticeValue>(set: &[V], subset: &[V]) -> bool {
    subset.iter().all(|v| range_includes(set, v))
}

/// The two ranges contain the same values (order-insensitive, under
/// structural equality).
pub fn is_equal_range<V: LatticeValue>(a: &[V], b: &[V]) -> bool {
    is_super_range(a, b) && is_super_range(b, a)
}

/// Elements of `a` that are also members of `b`, in `a`'s order.
pub fn intersect_ranges<V: LatticeValue>(a: &[V], b: &[V]) -> Vec<V> {
    a.iter()
        .filter(|v| range_includes(b, v))
        .cloned()
        .collect()
}

/// Deduplicated union of `f` applied to every element of `range`, in first
/// occurrence order. Used to compute the minimum range a neighbor must hold
/// during propagation.
pub fn closure_of<V: LatticeValue>(range: &[V], f: impl Fn(&V) -> Vec<V>) -> Vec<V> {
    let mut out: Vec<V> = Vec::new();
    for v in range {
        for c in f(v) {
            if !range_includes(&out, &c) {
                out.push(c);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Slot, Width};

    #[test]
    fn test_width_chain_order() {
        // W8 <: W16 <: W32 <: W64 <: W128 <: W256
        assert!(Width::W8.is_narrower_than(&Width::W256));
        assert!(Width::W256.is_wider_than(&Width::W8));
        assert!(!Width::W256.is_narrower_than(&Width::W8));

        // Reflexive: every value is narrower and wider than itself
        assert!(Width::W32.is_narrower_than(&Width::W32));
        assert!(Width::W32.is_wider_than(&Width::W32));
    }

    #[test]
    fn test_equivalents_on_chain_are_trivial() {
        // On a chain, the only equivalent of a value is the value itself
        let eq = Width::W64.equivalents();
        assert_eq!(eq.len(), 1);
        assert!(eq[0].same(&Width::W64));
    }

    #[test]
    fn test_slot_equivalent_pair() {
        // Pointer and Ref are two representations of the same storage class:
        // mutually narrower and wider, but not structurally the same.
        assert!(Slot::Pointer.is_equivalent_to(&Slot::Ref));
        assert!(Slot::Ref.is_equivalent_to(&Slot::Pointer));
        assert!(!Slot::Pointer.same(&Slot::Ref));
        assert!(!Slot::Pointer.is_equivalent_to(&Slot::Heap));
    }

    #[test]
    fn test_range_helpers() {
        let all = Width::all();
        let small = vec![Width::W8, Width::W16];
        assert!(is_super_range(&all, &small));
        assert!(!is_super_range(&small, &all));
        assert!(is_equal_range(&small, &[Width::W16, Width::W8]));
        assert!(!is_equal_range(&small, &all));

        let inter = intersect_ranges(&all, &small);
        assert!(is_equal_range(&inter, &small));
    }

    #[test]
    fn test_closure_of_dedups() {
        // wider-closure of {W8, W16} is the whole chain, each value once
        let closed = closure_of(&[Width::W8, Width::W16], |v| v.wider());
        assert!(is_equal_range(&closed, &Width::all()));
        assert_eq!(closed.len(), Width::all().len());
    }
}
