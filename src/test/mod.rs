mod codec;
mod simple;

use crate::{
    prelude::*,
    tree::{Discipline, NodeRef},
};

fn print_subtree<D: Discipline>(tree: &Tree<D>, root: NodeRef, depth: u8, markers: u32) {
    for level in 0..depth {
        if markers & (1 << level) == 0 {
            print!("| ");
        } else {
            print!("  ");
        }
    }
    let Some(root) = root else {
        println!("NIL");
        return;
    };
    let node = &tree[root];
    println!("[{:?}] {}", node.aug, node.key);
    print_subtree(tree, node.children[0], depth + 1, markers);
    print_subtree(tree, node.children[1], depth + 1, markers | (1 << (depth + 1)));
}

#[allow(unused)]
fn print_tree<D: Discipline>(tree: &Tree<D>) {
    print_subtree(tree, tree.root, 0, 1);
}

#[track_caller]
fn assert_valid<D: Discipline>(tree: &Tree<D>) {
    assert!(tree.is_well_formed(), "tree violates its invariants");
    let keys = tree.keys_in_order();
    assert!(
        keys.windows(2).all(|pair| pair[0] < pair[1]),
        "in-order keys are not strictly increasing: {:?}",
        keys
    );
    assert_eq!(keys.len(), tree.len());
}

fn build<D: Discipline>(keys: &[Key]) -> Tree<D> {
    let mut tree = Tree::with_capacity(keys.len());
    for &key in keys {
        tree.insert(key).unwrap();
        assert_valid(&tree);
    }
    tree
}
