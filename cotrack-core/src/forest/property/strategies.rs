//! Graph generators for forest property tests.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{TrackId, graph::Edge};

/// Largest node count for oracle-checked graphs; six nodes give at most
/// fifteen candidate edges.
const ORACLE_MAX_NODES: usize = 6;

/// A node count plus canonical, duplicate-free edges in enumeration order.
#[derive(Clone, Debug)]
pub(super) struct GraphFixture {
    pub node_count: usize,
    pub edges: Vec<Edge>,
}

/// Small graphs with weights drawn from a narrow range so ties are common.
pub(super) fn small_graph_strategy() -> impl Strategy<Value = GraphFixture> {
    (1..=ORACLE_MAX_NODES).prop_flat_map(|node_count| {
        let pairs = node_count * (node_count - 1) / 2;
        (
            Just(node_count),
            prop::collection::vec(prop::option::weighted(0.6, 1_u32..=4), pairs),
        )
            .prop_map(|(node_count, weights)| GraphFixture {
                node_count,
                edges: edges_from_slots(node_count, &weights),
            })
    })
}

/// Seeded sparse graph on up to a few hundred nodes, usually disconnected.
pub(super) fn seeded_graph(seed: u64) -> GraphFixture {
    let mut rng = SmallRng::seed_from_u64(seed);
    let node_count = rng.gen_range(32..=256);
    let density: f64 = rng.gen_range(0.005..0.05);
    let slots: Vec<Option<u32>> = (0..node_count * (node_count - 1) / 2)
        .map(|_| rng.gen_bool(density).then(|| rng.gen_range(1..=8)))
        .collect();
    GraphFixture {
        node_count,
        edges: edges_from_slots(node_count, &slots),
    }
}

fn edges_from_slots(node_count: usize, slots: &[Option<u32>]) -> Vec<Edge> {
    let pairs = (0..node_count).flat_map(|left| (left + 1..node_count).map(move |right| (left, right)));
    pairs
        .zip(slots)
        .filter_map(|((left, right), slot)| {
            let weight = (*slot)?;
            Edge::new(track(left), track(right), weight).ok()
        })
        .collect()
}

fn track(index: usize) -> TrackId {
    TrackId::new(u32::try_from(index).expect("generated node counts fit in u32"))
}
