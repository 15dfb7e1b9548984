use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sapling::{
    binary_tree::SubtreeStats,
    BinaryTree,
    Order,
    Side,
    Storage,
    Traversable,
    TreeError,
};

type Row = (i32, Option<i32>, Option<i32>, Option<i32>);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rows(tree: &BinaryTree<i32>) -> Vec<Row> {
    tree.flatten()
        .into_iter()
        .map(|info| Row::from(info.cloned()))
        .collect()
}

fn stats(size: usize, height: usize) -> SubtreeStats {
    SubtreeStats { size, height }
}

/// Checks that every parent link agrees with the child links of the parent, that the root has no parent, and that no node is its own ancestor.
fn assert_consistent(tree: &BinaryTree<i32>, keys: &[usize]) {
    let root = tree.get(tree.root_key()).expect("root is stored");
    assert_eq!(root.parent(), None);
    for key in keys.iter().filter(|key| tree.get(key).is_some()) {
        let node = tree.get(key).unwrap();
        for side in [Side::Left, Side::Right].iter().copied() {
            if let Some(child) = node.child(side) {
                assert_eq!(tree.get(child).and_then(|x| x.parent()), Some(key));
            }
        }
        if let Some(parent) = node.parent() {
            assert!(tree.get(parent).expect("parent is stored").side_of(key).is_some());
        }
        let mut ancestor = node.parent().copied();
        let mut steps = 0;
        while let Some(current) = ancestor {
            assert_ne!(current, *key, "{} is its own ancestor", key);
            steps += 1;
            assert!(steps <= tree.len());
            ancestor = tree.get(&current).and_then(|x| x.parent()).copied();
        }
    }
}

#[test]
fn demo_scenario() -> Result<(), TreeError> {
    init_logging();
    //                   0
    //         1                   2
    //    3         4         5         6
    //  7   8     -   9     -   -     10  11
    let mut tree = BinaryTree::<_>::new(0);
    let root = *tree.root_key();
    let n1 = tree.add_left(&root, 1)?;
    let n2 = tree.add_right(&root, 2)?;
    let n3 = tree.add_left(&n1, 3)?;
    let n4 = tree.add_right(&n1, 4)?;
    let n5 = tree.add_left(&n2, 5)?;
    let n6 = tree.add_right(&n2, 6)?;
    tree.add_left(&n3, 7)?;
    tree.add_right(&n3, 8)?;
    let n9 = tree.add_right(&n4, 9)?;
    let n10 = tree.add_left(&n6, 10)?;
    let n11 = tree.add_right(&n6, 11)?;

    assert_eq!(tree.stats(), stats(12, 3));
    assert_eq!(tree.to_string(), "binary tree (root value = 0, size = 12, height = 3)");
    assert_eq!(
        rows(&tree),
        [
            (0, Some(1), Some(2), None),
            (1, Some(3), Some(4), Some(0)),
            (2, Some(5), Some(6), Some(0)),
            (3, Some(7), Some(8), Some(1)),
            (4, None, Some(9), Some(1)),
            (5, None, None, Some(2)),
            (6, Some(10), Some(11), Some(2)),
            (7, None, None, Some(3)),
            (8, None, None, Some(3)),
            (9, None, None, Some(4)),
            (10, None, None, Some(6)),
            (11, None, None, Some(6)),
        ],
    );

    assert!(!tree.is_empty());
    assert_eq!(tree.is_leaf(&n3), Ok(false));
    assert_eq!(tree.is_leaf(&n5), Ok(true));

    assert_eq!(tree.search(&10, Order::PreOrder), Some(n10));
    assert_eq!(tree.search(&3, Order::PostOrder), Some(n3));
    assert_eq!(tree.search(&5, Order::Queue), Some(n5));
    assert_eq!(tree.search_from(&n1, &9, Order::InOrder), Some(n9));
    assert_eq!(tree.search_from(&n6, &11, Order::Stack), Some(n11));
    assert_eq!(tree.search_from(&n6, &9, Order::Stack), None);

    assert_eq!(tree.change_value(&4, -4, Order::PreOrder), Some(n4));
    assert_eq!(tree.change_node(&n4, 4), Ok(-4));
    assert_eq!(
        tree.node(&n4).map(|x| Row::from(x.info().cloned())),
        Some((4, None, Some(9), Some(1))),
    );

    //                   0
    //         1                   2
    //    -         4         5         -
    //  -   -     -   9     -   -     -   -
    assert_eq!(tree.remove_value(&6, Order::Queue), Ok(Some(n6)));
    assert_eq!(tree.remove_node(&n3), Ok(n3));
    assert_eq!(tree.stats(), stats(6, 3));
    assert_eq!(
        rows(&tree),
        [
            (0, Some(1), Some(2), None),
            (1, None, Some(4), Some(0)),
            (2, Some(5), None, Some(0)),
            (4, None, Some(9), Some(1)),
            (5, None, None, Some(2)),
            (9, None, None, Some(4)),
        ],
    );

    //                   0
    //         1                   2
    //    -         4         5         3
    //  -   -     -   9     -   -     7   8
    assert_eq!(tree.add_subtree(&n3, &n2, Side::Right), Ok(None));
    assert_eq!(tree.stats(), stats(9, 3));
    assert_eq!(
        rows(&tree),
        [
            (0, Some(1), Some(2), None),
            (1, None, Some(4), Some(0)),
            (2, Some(5), Some(3), Some(0)),
            (4, None, Some(9), Some(1)),
            (5, None, None, Some(2)),
            (3, Some(7), Some(8), Some(2)),
            (9, None, None, Some(4)),
            (7, None, None, Some(3)),
            (8, None, None, Some(3)),
        ],
    );

    //                   0
    //         1                   2
    //    -         4         5         20
    //  -   -     -   9     -   -     3    -
    //                              7   8
    let n20 = tree.add_right_pushing(&n2, 20, Side::Left)?;
    assert_eq!(tree.node(&n3).and_then(|x| x.parent()).map(|x| x.into_raw_key()), Some(n20));
    assert_eq!(tree.stats(), stats(10, 4));
    assert_eq!(
        rows(&tree),
        [
            (0, Some(1), Some(2), None),
            (1, None, Some(4), Some(0)),
            (2, Some(5), Some(20), Some(0)),
            (4, None, Some(9), Some(1)),
            (5, None, None, Some(2)),
            (20, Some(3), None, Some(2)),
            (9, None, None, Some(4)),
            (3, Some(7), Some(8), Some(20)),
            (7, None, None, Some(3)),
            (8, None, None, Some(3)),
        ],
    );

    let new_tree = tree.split_off(&n6)?;
    assert_eq!(new_tree.stats(), stats(3, 1));
    assert_eq!(
        rows(&new_tree),
        [
            (6, Some(10), Some(11), None),
            (10, None, None, Some(6)),
            (11, None, None, Some(6)),
        ],
    );
    assert_eq!(tree.get(&n10), None);

    let detached = tree.clear();
    assert_eq!(detached.as_slice(), &[n1, n2]);
    assert_eq!(tree.stats(), stats(1, 0));
    assert_eq!(rows(&tree), [(0, None, None, None)]);
    assert!(tree.is_empty());
    // Both halves are still stored until collected
    assert_eq!(tree.len(), 10);
    assert_eq!(tree.collect_detached(), 9);
    assert_eq!(tree.len(), 1);
    Ok(())
}

#[test]
fn deep_trees_do_not_overflow() {
    init_logging();
    let mut tree = BinaryTree::<_>::new(0);
    let mut tip = *tree.root_key();
    for value in 1..100_000 {
        tip = tree.add_left(&tip, value).unwrap();
    }
    assert_eq!(tree.stats(), stats(100_000, 99_999));
    for &order in &Order::ALL {
        assert_eq!(tree.search(&99_999, order), Some(tip));
    }
    assert_eq!(tree.traverse(Order::InOrder).next(), Some(tip));
    assert_eq!(tree.traverse(Order::PostOrder).next(), Some(tip));
}

#[derive(Clone, Debug)]
enum Edit {
    AddLeft(usize, i32, Side),
    AddRight(usize, i32, Side),
    AddSubtree(usize, usize, Side),
    Remove(usize),
    Change(usize, i32),
    Prune(usize),
    Clear,
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Left), Just(Side::Right)]
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => (any::<usize>(), any::<i32>(), side()).prop_map(|(a, v, s)| Edit::AddLeft(a, v, s)),
        3 => (any::<usize>(), any::<i32>(), side()).prop_map(|(a, v, s)| Edit::AddRight(a, v, s)),
        2 => (any::<usize>(), any::<usize>(), side()).prop_map(|(a, b, s)| Edit::AddSubtree(a, b, s)),
        1 => any::<usize>().prop_map(Edit::Remove),
        1 => (any::<usize>(), any::<i32>()).prop_map(|(a, v)| Edit::Change(a, v)),
        1 => any::<usize>().prop_map(Edit::Prune),
        1 => Just(Edit::Clear),
    ]
}

proptest! {
    #[test]
    fn edits_keep_links_consistent(edits in prop::collection::vec(edit(), 1..64)) {
        let mut tree = BinaryTree::<_>::new(0);
        let mut keys = vec![*tree.root_key()];
        for edit in edits {
            keys.retain(|key| tree.get(key).is_some());
            let pick = |index: usize| keys[index % keys.len()];
            match edit {
                Edit::AddLeft(parent, value, push_to) => {
                    let key = tree.add_left_pushing(&pick(parent), value, push_to).unwrap();
                    keys.push(key);
                }
                Edit::AddRight(parent, value, push_to) => {
                    let key = tree.add_right_pushing(&pick(parent), value, push_to).unwrap();
                    keys.push(key);
                }
                Edit::AddSubtree(subtree_root, parent, side) => {
                    let subtree_root = pick(subtree_root);
                    let parent = pick(parent);
                    let cycle = tree
                        .node(&parent)
                        .unwrap()
                        .is_in_subtree_of(&subtree_root);
                    match tree.add_subtree(&subtree_root, &parent, side) {
                        Ok(previous) => {
                            prop_assert!(!cycle);
                            prop_assert_eq!(tree.node(&subtree_root).unwrap().side(), Some(side));
                            if let Some(previous) = previous {
                                prop_assert!(tree.node(&previous).unwrap().is_root());
                            }
                        }
                        Err(TreeError::WasRootNode) => prop_assert_eq!(subtree_root, *tree.root_key()),
                        Err(TreeError::WouldCreateCycle) => prop_assert!(cycle),
                        Err(TreeError::NoSuchNode) => prop_assert!(false, "both keys were stored"),
                        Err(TreeError::InconsistentLink) => prop_assert!(false, "links were only edited through the tree"),
                    }
                }
                Edit::Remove(key) => {
                    let key = pick(key);
                    let had_parent = !tree.node(&key).unwrap().is_root();
                    prop_assert_eq!(tree.remove_node(&key).is_ok(), had_parent);
                    prop_assert!(tree.node(&key).unwrap().is_root());
                }
                Edit::Change(key, value) => {
                    let key = pick(key);
                    let before = tree.get(&key).cloned().unwrap();
                    tree.change_node(&key, value).unwrap();
                    let after = tree.get(&key).unwrap();
                    prop_assert_eq!((after.left(), after.right(), after.parent()), (before.left(), before.right(), before.parent()));
                }
                Edit::Prune(key) => {
                    let key = pick(key);
                    let size = tree.node(&key).unwrap().stats().size;
                    match tree.prune(&key) {
                        Ok(released) => prop_assert_eq!(released, size),
                        Err(error) => {
                            prop_assert_eq!(error, TreeError::WasRootNode);
                            prop_assert_eq!(key, *tree.root_key());
                        }
                    }
                }
                Edit::Clear => {
                    tree.clear();
                    prop_assert!(tree.is_empty());
                }
            }
            assert_consistent(&tree, &keys);
        }

        let size = tree.stats().size;
        for &order in &Order::ALL {
            let mut walked = tree.traverse(order).collect::<Vec<_>>();
            prop_assert_eq!(walked.len(), size);
            walked.sort_unstable();
            walked.dedup();
            prop_assert_eq!(walked.len(), size);
        }
        let stored = tree.len();
        let collected = tree.collect_detached();
        prop_assert_eq!(stored - collected, size);
        prop_assert_eq!(tree.len(), size);
    }
}

#[test]
fn storage_keeps_keys_stable() {
    let mut storage = sapling::storage::SparseVec::new();
    let a = storage.add("a");
    let b = storage.add("b");
    storage.remove(&a);
    assert_eq!(storage.get(&b), Some(&"b"));
    assert_eq!(storage.get(&a), None);
}
