//! Randomized checks of the AVL invariants against a BTreeSet model

use std::collections::BTreeSet;

use avltree::AvlTree;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rstest::rstest;

/// Upper bound on AVL height for `n` nodes.
fn max_avl_height(n: usize) -> f64 {
    1.4405 * ((n + 2) as f64).log2() - 0.3277
}

fn assert_consistent(tree: &AvlTree<i64>, model: &BTreeSet<i64>) {
    tree.check_invariants().unwrap();
    assert_eq!(tree.len(), model.len());
    assert!(tree.iter().eq(model.iter()), "in-order sequence differs from model");
    assert!(
        (tree.depth() as f64) <= max_avl_height(tree.len()),
        "depth {} too large for {} nodes",
        tree.depth(),
        tree.len()
    );
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(42)]
#[case(2024)]
fn given_random_operations_when_applied_then_invariants_hold_after_each(#[case] seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree = AvlTree::new();
    let mut model = BTreeSet::new();

    for _ in 0..2_000 {
        let key = rng.gen_range(0..300);
        if rng.gen_bool(0.6) {
            assert_eq!(tree.insert(key).unwrap(), model.insert(key));
        } else {
            assert_eq!(tree.delete(&key).unwrap(), model.remove(&key));
        }
        assert_consistent(&tree, &model);
    }
}

#[rstest]
#[case::ascending((0..512).collect())]
#[case::descending((0..512).rev().collect())]
#[case::zig_zag((0..256).flat_map(|i| [i, 511 - i]).collect())]
fn given_adversarial_order_when_built_then_height_logarithmic(#[case] keys: Vec<i64>) {
    let mut tree = AvlTree::new();
    tree.build(keys.iter().copied()).unwrap();
    let model: BTreeSet<i64> = keys.into_iter().collect();

    assert_consistent(&tree, &model);
    assert!(tree.stats().total() > 0);
}

#[rstest]
#[case(3)]
#[case(99)]
fn given_distinct_keys_when_all_deleted_in_random_order_then_empty(#[case] seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut keys: Vec<i64> = (0..400).map(|k| k * 3 - 600).collect();
    keys.shuffle(&mut rng);

    let mut tree = AvlTree::new();
    tree.build(keys.iter().copied()).unwrap();
    let mut model: BTreeSet<i64> = keys.iter().copied().collect();

    keys.shuffle(&mut rng);
    for key in &keys {
        assert!(tree.delete(key).unwrap());
        model.remove(key);
        assert_consistent(&tree, &model);
    }

    assert!(tree.is_empty());
    assert!(tree.root().is_none());
}

#[test]
fn given_float_keys_when_mixed_operations_then_order_preserved() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut tree = AvlTree::new();
    let mut values = Vec::new();

    for _ in 0..500 {
        let key: f64 = rng.gen_range(-100.0..100.0);
        if tree.insert(key).unwrap() {
            values.push(key);
        }
    }
    for key in values.iter().step_by(2) {
        assert!(tree.delete(key).unwrap());
    }

    tree.check_invariants().unwrap();
    let mut expected: Vec<f64> = values.iter().skip(1).step_by(2).copied().collect();
    expected.sort_by(|a, b| a.total_cmp(b));
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), expected);
}
