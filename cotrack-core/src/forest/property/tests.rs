//! Property runners for the maximum spanning forest selector.

use std::collections::HashSet;

use proptest::prelude::*;
use rstest::rstest;

use crate::{ExecutionStrategy, MaximumSpanningForest, SpanningForest};
use crate::test_utils::suite_proptest_config;

use super::oracle::{component_count, is_acyclic, max_forest_weight};
use super::strategies::{GraphFixture, seeded_graph, small_graph_strategy};

fn extract(fixture: &GraphFixture, strategy: ExecutionStrategy) -> SpanningForest {
    MaximumSpanningForest::new()
        .with_execution_strategy(strategy)
        .extract_from_edges(fixture.node_count, &fixture.edges)
        .expect("generated graphs are valid")
}

fn check_structure(fixture: &GraphFixture, forest: &SpanningForest) -> Result<(), TestCaseError> {
    let expected_components = component_count(fixture.node_count, &fixture.edges);
    prop_assert!(is_acyclic(fixture.node_count, forest.edges()));
    prop_assert_eq!(forest.component_count(), expected_components);
    prop_assert_eq!(forest.edges().len(), fixture.node_count - expected_components);

    let input: HashSet<_> = fixture.edges.iter().copied().collect();
    for edge in forest.edges() {
        prop_assert!(input.contains(edge), "selected edge {edge:?} is not in the input");
    }
    let weights: Vec<u32> = forest.edges().iter().map(|edge| edge.weight()).collect();
    prop_assert!(weights.windows(2).all(|pair| pair[0] >= pair[1]));
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(256))]

    #[test]
    fn forest_weight_matches_oracle(fixture in small_graph_strategy()) {
        let forest = extract(&fixture, ExecutionStrategy::Sequential);
        prop_assert_eq!(
            forest.total_weight(),
            max_forest_weight(fixture.node_count, &fixture.edges)
        );
    }

    #[test]
    fn forest_spans_every_component_without_cycles(fixture in small_graph_strategy()) {
        let forest = extract(&fixture, ExecutionStrategy::Sequential);
        check_structure(&fixture, &forest)?;
    }

    #[test]
    fn strategies_select_identical_forests(fixture in small_graph_strategy()) {
        prop_assert_eq!(
            extract(&fixture, ExecutionStrategy::Auto),
            extract(&fixture, ExecutionStrategy::Sequential)
        );
    }

    #[test]
    fn weakest_link_split_adds_one_component(fixture in small_graph_strategy()) {
        let mut forest = extract(&fixture, ExecutionStrategy::Sequential);
        let before = forest.clone();
        match forest.split_weakest_link() {
            None => prop_assert!(before.edges().is_empty()),
            Some(removed) => {
                let lightest = before.edges().iter().map(|edge| edge.weight()).min();
                prop_assert_eq!(Some(removed.weight()), lightest);
                prop_assert_eq!(forest.component_count(), before.component_count() + 1);
                prop_assert_eq!(forest.components().len(), forest.component_count());
            }
        }
    }
}

#[rstest]
#[case::seed_7(7)]
#[case::seed_42(42)]
#[case::seed_999(999)]
#[case::seed_31337(31_337)]
fn seeded_graphs_keep_structural_invariants(#[case] seed: u64) {
    let fixture = seeded_graph(seed);
    let forest = extract(&fixture, ExecutionStrategy::Auto);
    check_structure(&fixture, &forest).expect("structural invariants must hold");
    assert_eq!(forest, extract(&fixture, ExecutionStrategy::Sequential));
}
