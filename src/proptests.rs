use super::*;
use crate::node::NodeId;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeSet;

fn validate_tree(t: &RadixTree) {
    let mut stack = vec![NodeId::ROOT];
    let mut reachable = 0usize;

    while let Some(id) = stack.pop() {
        reachable += 1;
        let node = t.nodes.get(id);
        let mut first_bytes = BTreeSet::new();

        for edge in &node.edges {
            let label = t.labels.get(edge.label);
            assert!(!label.is_empty(), "edge label must not be empty");
            assert!(edge.count >= 1, "edge count must be at least 1");
            assert!(
                first_bytes.insert(label[0]),
                "sibling edges share first byte {:#04x}",
                label[0]
            );

            let Some(target) = edge.target else {
                continue;
            };
            let child = t.nodes.get(target);
            assert!(!child.edges.is_empty(), "reachable node without edges");

            let below: u64 = child.edges.iter().map(|e| e.count).sum();
            assert!(
                below <= edge.count,
                "children count {below} exceeds parent count {}",
                edge.count
            );
            if child.edges.len() == 1 {
                // A node with one child must mark the end of some value,
                // otherwise the two edges should have been one.
                assert!(below < edge.count, "uncompressed single-child node");
            }
            stack.push(target);
        }
    }

    assert_eq!(reachable, t.node_count(), "every node must be reachable");
}

/// Walk output must match a naive count over everything inserted so far.
fn check_against_inserted(t: &RadixTree, inserted: &[Vec<u8>]) {
    let mut seen = BTreeSet::new();
    t.walk(|prefix, count| {
        let expected = inserted.iter().filter(|v| v.starts_with(prefix)).count() as u64;
        assert_eq!(count, expected, "wrong count for prefix {:?}", prefix);
        assert!(seen.insert(prefix.to_vec()), "prefix {:?} visited twice", prefix);
    });
    for v in inserted.iter().filter(|v| !v.is_empty()) {
        assert!(seen.contains(v), "inserted value {:?} is not a walked prefix", v);
    }
}

fn small_alphabet_value() -> impl Strategy<Value = Vec<u8>> {
    // Few distinct bytes so values collide on prefixes constantly.
    prop::collection::vec(b'a'..=b'd', 0..=12)
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 20)]
    Insert(#[proptest(strategy = "small_alphabet_value()")] Vec<u8>),
    #[proptest(weight = 1)]
    Walk,
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_counts_match_naive(ops in prop::collection::vec(any::<Op>(), 0..=400)) {
        let mut t = RadixTree::new();
        let mut inserted: Vec<Vec<u8>> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(value) => {
                    t.insert(&value);
                    inserted.push(value);
                }
                Op::Walk => {
                    let walked: Vec<(Vec<u8>, u64)> = t.iter().collect();
                    let mut again = Vec::new();
                    t.walk(|p, c| again.push((p.to_vec(), c)));
                    prop_assert_eq!(&walked, &again);
                    prop_assert_eq!(walked.len(), t.edge_count());
                }
            }
        }

        validate_tree(&t);
        check_against_inserted(&t, &inserted);
    }

    #[test]
    fn prop_arbitrary_bytes(values in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..=24), 0..=200)) {
        let t: RadixTree = values.iter().collect();
        validate_tree(&t);
        check_against_inserted(&t, &values);
    }

    #[test]
    fn prop_repeated_value_adds_no_structure(value in prop::collection::vec(any::<u8>(), 1..=32), n in 1u64..=20) {
        let mut t = RadixTree::new();
        t.insert(&value);
        let edges = t.edge_count();
        let nodes = t.node_count();
        for _ in 1..n {
            t.insert(&value);
        }
        prop_assert_eq!(t.edge_count(), edges);
        prop_assert_eq!(t.node_count(), nodes);
        prop_assert_eq!(t.iter().collect::<Vec<_>>(), vec![(value, n)]);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let values = vec!["a", "ab", "abc", "abd", "b", "ba"];

    let mut expected: Option<Vec<(Vec<u8>, u64)>> = None;
    for_each_permutation(&values, |perm| {
        let t: RadixTree = perm.iter().collect();
        validate_tree(&t);

        // Sibling order follows insertion order; the set of pairs does not.
        let mut got: Vec<(Vec<u8>, u64)> = t.iter().collect();
        got.sort();
        match &expected {
            Some(e) => assert_eq!(&got, e, "order {:?}", perm),
            None => expected = Some(got),
        }
    });

    let expected = expected.unwrap();
    assert_eq!(
        expected,
        vec![
            (b"a".to_vec(), 4),
            (b"ab".to_vec(), 3),
            (b"abc".to_vec(), 1),
            (b"abd".to_vec(), 1),
            (b"b".to_vec(), 2),
            (b"ba".to_vec(), 1),
        ]
    );
}
