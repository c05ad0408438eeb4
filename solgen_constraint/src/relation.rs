//! The five-relation dominance algebra.
//!
//! Edges carry a [`EdgeRank`]; derived facts between nodes carry a
//! [`Relation`]. A relation recorded for an ordered pair `(u, v)`
//! constrains the eventual values `x = value(u)` and `y = value(v)`:
//!
//! | relation     | constraint                                  |
//! |--------------|---------------------------------------------|
//! | `Same`       | `x.same(y)`                                 |
//! | `Narrower`   | `y` narrower-or-equal `x`                   |
//! | `Wider`      | `y` wider-or-equal `x`                      |
//! | `Equivalent` | `y` both narrower and wider than `x`        |
//! | `SameRange`  | `y` comparable to `x` in either direction   |
//!
//! The relations form an implication lattice
//! `Same ⊑ Equivalent ⊑ {Narrower, Wider} ⊑ SameRange`: a stronger relation
//! implies every weaker one. [`Relation::compose`] extends a chain of
//! constraints by one hop and [`Relation::meet`] conjoins two constraints on
//! the same pair into the strongest common truth. Both tables are total, so
//! no combination of derived relations is ever unrepresentable.

use serde::{Deserialize, Serialize};

use crate::value::LatticeValue;

/// The qualifier on a dominance edge, from dominator to dominatee.
///
/// `Same` is the untagged default: the dominatee's eventual value must equal
/// the dominator's. `Narrower` requires the dominatee to resolve
/// narrower-or-equal, `Wider` the inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EdgeRank {
    #[default]
    Same,
    Narrower,
    Wider,
}

impl EdgeRank {
    /// The relation a single edge of this rank induces between its
    /// endpoints, read dominator-to-dominatee.
    pub fn relation(self) -> Relation {
        match self {
            EdgeRank::Same => Relation::Same,
            EdgeRank::Narrower => Relation::Narrower,
            EdgeRank::Wider => Relation::Wider,
        }
    }

    /// Label used in DOT output and error messages.
    pub fn label(self) -> &'static str {
        match self {
            EdgeRank::Same => "same",
            EdgeRank::Narrower => "narrower",
            EdgeRank::Wider => "wider",
        }
    }
}

/// A derived dominance relation between two nodes (see module docs for the
/// pair convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    Same,
    Narrower,
    Wider,
    Equivalent,
    SameRange,
}

impl Relation {
    /// Extend a chain of constraints by one hop: `self` relates `m` to `u`,
    /// `next` relates `v` to `m`; the result relates `v` to `u`.
    ///
    /// A narrower hop followed by a wider hop (or vice versa) bounds the far
    /// end on both sides of the midpoint, which collapses to `SameRange`.
    pub fn compose(self, next: Relation) -> Relation {
        use Relation::*;
        match (self, next) {
            (Same, r) => r,
            (r, Same) => r,
            (SameRange, _) | (_, SameRange) => SameRange,
            (Equivalent, r) => r,
            (r, Equivalent) => r,
            (Narrower, Narrower) => Narrower,
            (Wider, Wider) => Wider,
            (Narrower, Wider) | (Wider, Narrower) => SameRange,
        }
    }

    /// Conjoin two relations recorded for the same ordered pair into the
    /// strongest common truth (the meet in the implication lattice).
    ///
    /// Narrower and wider holding simultaneously force equivalence; `Same`
    /// absorbs everything.
    pub fn meet(self, other: Relation) -> Relation {
        use Relation::*;
        match (self, other) {
            (Same, _) | (_, Same) => Same,
            (Equivalent, _) | (_, Equivalent) => Equivalent,
            (Narrower, Wider) | (Wider, Narrower) => Equivalent,
            (Narrower, _) | (_, Narrower) => Narrower,
            (Wider, _) | (_, Wider) => Wider,
            (SameRange, SameRange) => SameRange,
        }
    }

    /// The same constraint read with the pair flipped.
    pub fn invert(self) -> Relation {
        use Relation::*;
        match self {
            Narrower => Wider,
            Wider => Narrower,
            r => r,
        }
    }

    /// Whether the constraint holds between concrete values `x = value(u)`
    /// and `y = value(v)`.
    pub fn holds<V: LatticeValue>(self, x: &V, y: &V) -> bool {
        use Relation::*;
        match self {
            Same => x.same(y),
            Narrower => y.is_narrower_than(x),
            Wider => y.is_wider_than(x),
            Equivalent => y.is_equivalent_to(x),
            SameRange => y.is_comparable_to(x),
        }
    }

    /// All values `v` may still take once `u` is bound to `x`.
    pub fn allowed_values<V: LatticeValue>(self, x: &V) -> Vec<V> {
        use Relation::*;
        match self {
            Same => vec![x.clone()],
            Narrower => x.narrower(),
            Wider => x.wider(),
            Equivalent => x.equivalents(),
            SameRange => x.same_range(),
        }
    }

    /// Label used in DOT output and error messages.
    pub fn label(self) -> &'static str {
        use Relation::*;
        match self {
            Same => "same",
            Narrower => "narrower",
            Wider => "wider",
            Equivalent => "equivalent",
            SameRange => "same-range",
        }
    }

    /// All five relations, for exhaustive table tests.
    pub fn all() -> [Relation; 5] {
        use Relation::*;
        [Same, Narrower, Wider, Equivalent, SameRange]
    }
}
