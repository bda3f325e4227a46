use frontier::{
    run_parallel_bfs_with, sequential_bfs, CsrGraph, FrontierMerger, NodeId, PartitionPolicy,
    Partitioner,
};
use proptest::prelude::*;

fn policy() -> impl Strategy<Value = PartitionPolicy> {
    prop_oneof![Just(PartitionPolicy::Static), Just(PartitionPolicy::RoundRobin)]
}

/// Random graphs of 1..40 nodes with values in 1..=4 and arbitrary edges,
/// including self loops and duplicates.
fn graph() -> impl Strategy<Value = CsrGraph> {
    (1usize..40).prop_flat_map(|n| {
        let values = proptest::collection::vec(1i16..=4, n);
        let adjacency = proptest::collection::vec(
            proptest::collection::vec(0..n as NodeId, 0..6),
            n,
        );
        (values, adjacency)
            .prop_map(|(values, adjacency)| CsrGraph::from_adjacency(values, &adjacency).unwrap())
    })
}

proptest! {
    #[test]
    fn test_partition_is_complete_and_disjoint(
        len in 0usize..500,
        workers in 1usize..17,
        chunk in 1usize..9,
        policy in policy(),
    ) {
        let p = Partitioner::new(policy, workers, chunk);
        let mut owners = vec![0u32; len];
        for w in 0..workers {
            for range in p.assignment(len, w) {
                prop_assert!(range.end <= len);
                for i in range {
                    owners[i] += 1;
                }
            }
        }
        prop_assert!(owners.iter().all(|&c| c == 1), "owners: {:?}", owners);
    }

    #[test]
    fn test_merge_yields_each_node_once_sorted(
        buffers in proptest::collection::vec(proptest::collection::vec(0u32..64, 0..20), 1..9),
    ) {
        let mut expected: Vec<NodeId> = buffers.iter().flatten().copied().collect();
        expected.sort_unstable();
        expected.dedup();

        let mut buffers = buffers;
        let mut frontier = Vec::new();
        FrontierMerger::new().merge(buffers.iter_mut(), &mut frontier);

        prop_assert_eq!(frontier, expected);
        prop_assert!(buffers.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_parallel_matches_sequential(
        g in graph(),
        start_seed in any::<u32>(),
        search in 1i16..=4,
        chunk in 1usize..4,
        policy in policy(),
    ) {
        let start = start_seed % g.values().len() as u32;
        let expected = sequential_bfs(&g, start, search).unwrap();
        for workers in [1, 2, 4, 8] {
            let got = run_parallel_bfs_with(&g, start, search, workers, chunk, policy).unwrap();
            prop_assert_eq!(got, expected, "workers={}", workers);
        }
    }
}
