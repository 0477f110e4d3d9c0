use super::*;
use crate::tree::{Node, LEFT, RIGHT};

#[test]
fn insert_search_delete() {
    let keys = [8, 3, 10, 1, 6, 14, 4, 7, 13];
    let mut tree = build::<Plain>(&keys);
    print_tree(&tree);
    assert_eq!(tree.len(), keys.len());
    assert_eq!(tree.height(), 3);
    for key in keys {
        assert!(tree.contains(key));
    }
    assert!(!tree.contains(2));
    for key in keys {
        tree.delete(key).unwrap();
        assert_valid(&tree);
    }
    assert!(tree.is_empty());
    assert_eq!(tree.height(), -1);
}

#[test]
fn duplicate_insert_is_rejected() {
    let mut tree = build::<Plain>(&[5, 2, 8]);
    let before = tree.linearize();
    assert_eq!(tree.insert(5), Err(Error::DuplicateKey(5)));
    assert_eq!(tree.linearize(), before);
}

#[test]
fn delete_of_absent_key_is_inert() {
    let mut tree = build::<Plain>(&[5, 2, 8]);
    let before = tree.linearize();
    assert_eq!(tree.delete(7), Err(Error::KeyNotFound(7)));
    assert_eq!(tree.linearize(), before);
}

#[test]
fn delete_with_two_children_takes_the_successor() {
    let mut tree = build::<Plain>(&[5, 2, 8, 6, 9, 7]);
    tree.delete(5).unwrap();
    assert_valid(&tree);
    let keys: Vec<Key> = tree.linearize().into_iter().map(|view| view.key).collect();
    // 6 takes over the root, its old right child 7 moves under 8
    assert_eq!(keys, vec![6, 2, 8, 7, 9]);
}

#[test]
fn root_removal_empties_a_single_node_tree() {
    let mut tree = Tree::<Plain>::with_root(42);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.height(), 0);
    tree.delete(42).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.height(), -1);
}

#[test]
fn negative_keys_are_ordinary_keys() {
    let mut tree = build::<Plain>(&[0, -5, 7, -9, -2]);
    assert_eq!(tree.keys_in_order(), vec![-9, -5, -2, 0, 7]);
    tree.delete(-5).unwrap();
    assert_valid(&tree);
    assert!(!tree.contains(-5));
}

#[test]
fn deep_subtree_violation_is_detected() {
    // 5 -> left 3 -> right 6: every parent/child pair is ordered, the full
    // subtree property is not
    let mut tree = Tree::<Plain>::new();
    let root = tree.arena.insert(Node::new(5, ()));
    let left = tree.arena.insert(Node::new(3, ()));
    let inner = tree.arena.insert(Node::new(6, ()));
    tree.root = Some(root);
    tree[root].children[LEFT] = Some(left);
    tree[left].parent = Some(root);
    tree[left].children[RIGHT] = Some(inner);
    tree[inner].parent = Some(left);
    assert!(!tree.is_well_formed());
    tree[inner].key = 4;
    assert!(tree.is_well_formed());
}

#[test]
fn broken_parent_link_is_detected() {
    let mut tree = build::<Plain>(&[5, 2, 8]);
    let root = tree.root.unwrap();
    let left = tree[root].children[LEFT].unwrap();
    tree[left].parent = Some(left);
    assert!(!tree.is_well_formed());
}
