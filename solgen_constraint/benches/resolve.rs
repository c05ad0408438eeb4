//! End-to-end resolve() benchmark over a fan-out of dominance chains.

use std::fmt;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use solgen_constraint::{ConstraintGraph, EdgeRank, LatticeValue, SolverConfig};

/// A standalone integer-width chain so the bench does not depend on the
/// crate's test-only feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bits(u16);

const ALL_BITS: [u16; 6] = [8, 16, 32, 64, 128, 256];

impl Bits {
    fn all() -> Vec<Bits> {
        ALL_BITS.iter().map(|&b| Bits(b)).collect()
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "uint{}", self.0)
    }
}

impl LatticeValue for Bits {
    fn narrower(&self) -> Vec<Bits> {
        ALL_BITS.iter().filter(|&&b| b <= self.0).map(|&b| Bits(b)).collect()
    }

    fn wider(&self) -> Vec<Bits> {
        ALL_BITS.iter().filter(|&&b| b >= self.0).map(|&b| Bits(b)).collect()
    }

    fn same(&self, other: &Bits) -> bool {
        self == other
    }
}

/// One root fanning into `chains` dominance chains of `depth` inner nodes,
/// each ending in a leaf.
fn build_graph(chains: u64, depth: u64) -> ConstraintGraph<Bits> {
    let mut graph = ConstraintGraph::new("bench", SolverConfig::with_max_solutions(10));
    graph.insert(0, Bits::all()).unwrap();
    let mut next_id = 1;
    for chain in 0..chains {
        let mut previous = 0;
        for level in 0..=depth {
            let id = next_id;
            next_id += 1;
            graph.insert(id, Bits::all()).unwrap();
            let rank = if (chain + level) % 2 == 0 {
                EdgeRank::Narrower
            } else {
                EdgeRank::Same
            };
            graph.connect(previous, id, rank).unwrap();
            previous = id;
        }
    }
    graph
}

fn bench_resolve(c: &mut Criterion) {
    c.bench_function("resolve_fanout_4x4", |b| {
        b.iter(|| {
            let mut graph = build_graph(black_box(4), black_box(4));
            graph.resolve().unwrap();
            graph.solutions().len()
        })
    });
    c.bench_function("resolve_fanout_8x8", |b| {
        b.iter(|| {
            let mut graph = build_graph(black_box(8), black_box(8));
            graph.resolve().unwrap();
            graph.solutions().len()
        })
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
