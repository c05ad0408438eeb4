//! End-to-end resolution scenarios over the real Solidity lattices.

use solgen_constraint::{ConstraintGraph, EdgeRank, LatticeValue, SolverConfig, SolverError};
use solgen_lattice::{
    ElementaryType, FuncVis, Mutability, StorageLocation, VarVis, VisMut,
};

fn small_uints() -> Vec<ElementaryType> {
    vec![
        ElementaryType::UInt8,
        ElementaryType::UInt16,
        ElementaryType::UInt32,
    ]
}

#[test]
fn test_storage_location_narrowing() {
    // a memory declaration dominates a use site that may pick anything
    // assignable into memory
    let mut graph = ConstraintGraph::new("loc", SolverConfig::default());
    graph.insert(1, vec![StorageLocation::Memory]).unwrap();
    graph.insert(2, StorageLocation::all()).unwrap();
    graph.connect(1, 2, EdgeRank::Narrower).unwrap();
    graph.resolve().unwrap();

    let solutions = graph.solutions();
    assert_eq!(solutions.len(), 4);
    for solution in solutions {
        assert!(
            solution[&2].is_narrower_than(&StorageLocation::Memory),
            "{} is not narrower than memory",
            solution[&2]
        );
    }
    graph.verify().unwrap();
}

#[test]
fn test_storage_pointer_and_ref_unify() {
    // the two storage representations satisfy a same-edge across each other
    let mut graph = ConstraintGraph::new("loc", SolverConfig::default());
    graph.insert(1, vec![StorageLocation::StoragePointer]).unwrap();
    graph.insert(2, vec![StorageLocation::StorageRef]).unwrap();
    graph.connect(1, 2, EdgeRank::Same).unwrap();
    graph.resolve().unwrap();

    let solutions = graph.solutions();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0][&2], StorageLocation::StorageRef);
    graph.verify().unwrap();
}

#[test]
fn test_elementary_type_chain_scenario() {
    // decl --narrower--> use, use --same--> expr, decl --same--> expr:
    // the same-path forces all three equal despite the narrower edge
    let mut graph = ConstraintGraph::new("type", SolverConfig::default());
    for id in 1..=3 {
        graph.insert(id, small_uints()).unwrap();
    }
    graph.connect(1, 2, EdgeRank::Narrower).unwrap();
    graph.connect(2, 3, EdgeRank::Same).unwrap();
    graph.connect(1, 3, EdgeRank::Same).unwrap();
    graph.resolve().unwrap();

    let solutions = graph.solutions();
    assert_eq!(solutions.len(), 3);
    for (solution, expected) in solutions.iter().zip(small_uints()) {
        assert_eq!(solution[&3], expected);
    }
    graph.verify().unwrap();
}

#[test]
fn test_assignment_chain_pins_the_leaf() {
    // uint256-family decl flows into an expression that a uint32 decl also
    // pins through a same-edge; the whole chain collapses to uint32
    let mut graph = ConstraintGraph::new("type", SolverConfig::default());
    graph.insert(1, ElementaryType::uints()).unwrap();
    graph.insert(2, ElementaryType::uints()).unwrap();
    graph.insert(3, ElementaryType::uints()).unwrap();
    graph.insert(4, vec![ElementaryType::UInt32]).unwrap();
    graph.connect(1, 2, EdgeRank::Same).unwrap();
    graph.connect(2, 3, EdgeRank::Narrower).unwrap();
    graph.connect(4, 3, EdgeRank::Same).unwrap();
    graph.resolve().unwrap();

    assert_eq!(graph.solutions().len(), 1);
    assert_eq!(graph.solutions()[0][&3], ElementaryType::UInt32);
    // the dominating chain kept only widths the leaf can narrow from
    let decl_range = graph.solution_range_of(2).unwrap();
    for value in decl_range {
        assert!(value.is_wider_than(&ElementaryType::UInt32));
    }
    graph.verify().unwrap();
}

#[test]
fn test_incompatible_types_are_a_contradiction() {
    let mut graph = ConstraintGraph::new("type", SolverConfig::default());
    graph.insert(1, vec![ElementaryType::Bool]).unwrap();
    graph.insert(2, vec![ElementaryType::UInt8]).unwrap();
    graph.connect(1, 2, EdgeRank::Same).unwrap();
    assert!(matches!(
        graph.resolve(),
        Err(SolverError::EmptyRange { .. })
    ));
}

#[test]
fn test_mutability_widening() {
    // a view body dominates its declared mutability from below
    let mut graph = ConstraintGraph::new("mut", SolverConfig::default());
    graph.insert(1, vec![Mutability::View]).unwrap();
    graph.insert(2, Mutability::all()).unwrap();
    graph.connect(1, 2, EdgeRank::Wider).unwrap();
    graph.resolve().unwrap();

    let solutions = graph.solutions();
    assert_eq!(solutions.len(), 2);
    assert_eq!(solutions[0][&2], Mutability::View);
    assert_eq!(solutions[1][&2], Mutability::NonPayable);
    graph.verify().unwrap();
}

#[test]
fn test_vismut_payable_stays_externally_callable() {
    // narrowing from external payable may move the visibility freely but
    // payability rules out internal and private
    let mut graph = ConstraintGraph::new("vismut", SolverConfig::default());
    graph
        .insert(1, vec![VisMut::Func(FuncVis::External, Mutability::Payable)])
        .unwrap();
    graph.insert(2, VisMut::all()).unwrap();
    graph.connect(1, 2, EdgeRank::Narrower).unwrap();
    graph.resolve().unwrap();

    let solutions = graph.solutions();
    assert_eq!(solutions.len(), 2);
    for solution in solutions {
        match solution[&2] {
            VisMut::Func(vis, Mutability::Payable) => {
                assert!(matches!(vis, FuncVis::External | FuncVis::Public));
            }
            other => panic!("unexpected value {}", other),
        }
    }
    graph.verify().unwrap();
}

#[test]
fn test_var_visibility_cluster() {
    // a pinned variable visibility forces a same-leaf but leaves a
    // narrower-leaf the whole orderless cluster
    let mut graph = ConstraintGraph::new("vismut", SolverConfig::default());
    graph.insert(1, vec![VisMut::Var(VarVis::Internal)]).unwrap();
    graph.insert(2, VisMut::all()).unwrap();
    graph.insert(3, VisMut::all()).unwrap();
    graph.connect(1, 2, EdgeRank::Same).unwrap();
    graph.connect(1, 3, EdgeRank::Narrower).unwrap();
    graph.resolve().unwrap();

    let solutions = graph.solutions();
    assert_eq!(solutions.len(), 4);
    for solution in solutions {
        assert_eq!(solution[&2], VisMut::Var(VarVis::Internal));
        assert!(matches!(solution[&3], VisMut::Var(_)));
    }
    graph.verify().unwrap();
}

#[test]
fn test_domains_resolve_independently() {
    // one graph per placeholder kind, resolved sequentially per round
    let mut types = ConstraintGraph::new("type", SolverConfig::default());
    types.insert(1, ElementaryType::uints()).unwrap();
    types.insert(2, ElementaryType::uints()).unwrap();
    types.connect(1, 2, EdgeRank::Narrower).unwrap();

    let mut locations = ConstraintGraph::new("loc", SolverConfig::default());
    locations.insert(1, StorageLocation::all()).unwrap();
    locations.insert(2, StorageLocation::all()).unwrap();
    locations.connect(1, 2, EdgeRank::Same).unwrap();

    let mut vismuts = ConstraintGraph::new("vismut", SolverConfig::default());
    vismuts.insert(1, VisMut::all()).unwrap();

    types.resolve().unwrap();
    locations.resolve().unwrap();
    vismuts.resolve().unwrap();

    assert!(!types.solutions().is_empty());
    assert!(!locations.solutions().is_empty());
    assert!(!vismuts.solutions().is_empty());
    types.verify().unwrap();
    locations.verify().unwrap();
    vismuts.verify().unwrap();
}
