extern crate ordset;
use ordset::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn keys(tree: &RedBlackTree<i32>) -> Vec<i32> {
    tree.iter().copied().collect()
}

#[test]
fn new() {
    let tree: RedBlackTree<i32> = Default::default();
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    assert!(tree.check_invariants().is_ok());
}

#[test]
fn insert_four_keeps_first_key_at_root() {
    init_logging();
    let mut tree = RedBlackTree::new();
    for key in [10, 5, 15, 3] {
        assert!(tree.insert(key));
    }

    assert_eq!(keys(&tree), vec![3, 5, 10, 15]);
    assert_eq!(tree.root(), Some(&10));
    assert_eq!(tree.root_color(), Some(Color::Black));
    assert!(tree.check_invariants().is_ok());
}

#[test]
fn ascending_run_is_rebalanced() {
    init_logging();
    let mut tree = RedBlackTree::new();
    for key in [10, 20, 30] {
        tree.insert(key);
        assert!(tree.check_invariants().is_ok());
    }

    assert_eq!(tree.root(), Some(&20));
    assert_eq!(tree.black_height(), 1);
    assert_eq!(keys(&tree), vec![10, 20, 30]);
}

#[test]
fn long_ascending_run_stays_shallow() {
    let tree: RedBlackTree<i32> = (0..10_000).collect();
    assert!(tree.check_invariants().is_ok());
    // Black-height bounds the longest path to twice its length.
    assert!(tree.black_height() <= 15);
}

#[test]
fn delete_root_of_complete_tree() {
    init_logging();
    let mut tree = RedBlackTree::new();
    for key in [40, 20, 60, 10, 30, 50, 70] {
        tree.insert(key);
    }
    assert_eq!(tree.len(), 7);

    let root = *tree.root().unwrap();
    assert!(tree.remove(&root));

    assert!(tree.check_invariants().is_ok());
    assert_eq!(tree.len(), 6);
    let expected: Vec<i32> = [10, 20, 30, 40, 50, 60, 70]
        .into_iter()
        .filter(|&key| key != root)
        .collect();
    assert_eq!(keys(&tree), expected);
    assert!(!tree.contains(&root));
}

#[test]
fn insert_get_duplicate() {
    let key = 55;
    let mut tree = RedBlackTree::new();

    assert!(tree.insert(key));
    let first: *const i32 = tree.get(&key).unwrap();

    // The second insertion should fail, the key is already there
    assert!(!tree.insert(key));
    // Duplicate insertions don't change the length
    assert_eq!(tree.len(), 1);
    // and don't replace the stored key
    assert!(std::ptr::eq(first, tree.get(&key).unwrap()));
}

#[test]
fn insert_two_remove() {
    let key_1 = 435;
    let key_2 = 555;
    let mut tree = RedBlackTree::new();

    assert!(tree.insert(key_1));
    assert!(tree.contains(&key_1));
    assert!(!tree.contains(&key_2));

    assert!(tree.insert(key_2));
    assert_eq!(tree.len(), 2);

    assert!(tree.remove(&key_1));
    assert_eq!(tree.len(), 1);
    assert!(!tree.contains(&key_1));
    assert!(tree.contains(&key_2));

    assert!(tree.insert(key_1));
    assert!(tree.remove(&key_2));
    assert!(tree.contains(&key_1));
    assert!(!tree.contains(&key_2));

    assert!(tree.remove(&key_1));
    assert!(tree.is_empty());
    assert!(tree.check_invariants().is_ok());
}

#[test]
fn remove_empty() {
    let mut tree: RedBlackTree<i32> = RedBlackTree::new();
    assert!(!tree.remove(&3));
    assert!(!tree.remove(&32));
    assert_eq!(tree.len(), 0);
    assert!(tree.check_invariants().is_ok());
}

#[test]
fn clear_does_not_invalidate() {
    let mut tree: RedBlackTree<usize> = RedBlackTree::new();

    for i in 0..10 {
        assert_eq!(tree.len(), i);
        assert!(tree.insert(i));
        assert!(!tree.insert(i));
    }

    tree.clear();
    assert_eq!(tree.len(), 0);
    assert!(tree.check_invariants().is_ok());

    for i in 0..10 {
        assert!(!tree.contains(&i));
        assert!(tree.insert(i));
    }
    assert_eq!(tree.first(), Some(&0));
    assert_eq!(tree.last(), Some(&9));
}

#[test]
fn clone_is_independent() {
    let original: RedBlackTree<i32> = (0..20).collect();
    let mut copy = original.clone();
    copy.remove(&5);
    copy.insert(100);

    assert!(original.contains(&5));
    assert!(!original.contains(&100));
    assert!(!copy.contains(&5));
    assert!(copy.check_invariants().is_ok());
}

#[test]
fn format_empty() {
    let tree: RedBlackTree<u32> = RedBlackTree::new();
    assert_eq!(format!("{}", tree), "[]");
    assert_eq!(format!("{:?}", tree), "{}");
}

#[test]
fn format_multiple() {
    let tree: RedBlackTree<u32> = [4, 2, 6, 1, 5, 3].into_iter().collect();
    assert_eq!(format!("{}", tree), "[1, 2, 3, 4, 5, 6]");
    assert_eq!(format!("{:?}", tree), "{1, 2, 3, 4, 5, 6}");
}
