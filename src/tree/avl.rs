use super::{
    validate, Discipline, Error, Height, Key, Kind, NodeIndex, NodeRef, SearchResult, Tree, LEFT,
    RIGHT,
};

/// AVL tree: every node's child subtree heights differ by at most one,
/// maintained by single and double rotations on the ancestor walk.
#[derive(Debug, Clone, Copy)]
pub struct Avl;

impl Discipline for Avl {
    const KIND: Kind = Kind::Avl;
    type Aug = Height;

    fn insert(tree: &mut Tree<Self>, key: Key) -> Result<(), Error> {
        let ptr = tree.insert_leaf(key, Height(0))?;
        let parent = tree[ptr].parent;
        rebalance_insert(tree, parent);
        Ok(())
    }

    fn delete(tree: &mut Tree<Self>, key: Key) -> Result<(), Error> {
        let SearchResult::Here(ptr) = tree.search(key) else {
            return Err(Error::KeyNotFound(key));
        };
        let splice = tree.splice_out(ptr);
        rebalance_delete(tree, splice.parent);
        Ok(())
    }

    fn is_well_formed(tree: &Tree<Self>) -> bool {
        validate::ordered(tree) && validate::avl_balanced(tree)
    }
}

#[inline]
fn height_of(tree: &Tree<Avl>, ptr: NodeRef) -> i32 {
    ptr.map_or(-1, |ptr| i32::from(tree[ptr].aug.0))
}

#[inline]
fn balance_of(tree: &Tree<Avl>, ptr: NodeIndex) -> i32 {
    let [left, right] = tree[ptr].children;
    height_of(tree, left) - height_of(tree, right)
}

/// Recompute the cached height from the children; reports whether it changed.
fn update_height(tree: &mut Tree<Avl>, ptr: NodeIndex) -> bool {
    let [left, right] = tree[ptr].children;
    let height = (1 + height_of(tree, left).max(height_of(tree, right))) as u16;
    let old = std::mem::replace(&mut tree[ptr].aug, Height(height));
    old.0 != height
}

/// Walk up from the new leaf's parent. Insertion needs at most one
/// restructuring; past the first unchanged ancestor nothing above moves.
fn rebalance_insert(tree: &mut Tree<Avl>, mut ptr: NodeRef) {
    while let Some(index) = ptr {
        let changed = update_height(tree, index);
        if balance_of(tree, index).abs() > 1 {
            restructure(tree, index);
            break;
        }
        if !changed {
            break;
        }
        ptr = tree[index].parent;
    }
}

/// Walk up from the splice point. A deletion can shrink a subtree and
/// unbalance every ancestor, so the walk always continues to the root.
fn rebalance_delete(tree: &mut Tree<Avl>, mut ptr: NodeRef) {
    while let Some(index) = ptr {
        update_height(tree, index);
        let parent = tree[index].parent;
        if balance_of(tree, index).abs() > 1 {
            restructure(tree, index);
        }
        ptr = parent;
    }
}

/// Restore balance at a node with balance factor +/-2 by a single or double
/// rotation, refreshing the heights of every repositioned node child-first.
fn restructure(tree: &mut Tree<Avl>, ptr: NodeIndex) {
    let (heavy, rotation) = if balance_of(tree, ptr) > 0 { (LEFT, RIGHT) } else { (RIGHT, LEFT) };
    // SAFETY: a +/-2 balance factor implies a child on the heavy side
    let child = tree[ptr].children[heavy].unwrap();
    let child_balance = balance_of(tree, child);
    let inner_heavy = if heavy == LEFT { child_balance < 0 } else { child_balance > 0 };
    if inner_heavy {
        // zig-zag: rotate the heavy child towards the outside first
        let pivot = tree[child].children[1 - heavy].unwrap();
        tree.rotate(child, heavy);
        update_height(tree, child);
        update_height(tree, pivot);
    }
    let pivot = tree[ptr].children[heavy].unwrap();
    tree.rotate(ptr, rotation);
    update_height(tree, ptr);
    update_height(tree, pivot);
}

/// Rebuild every cached height bottom-up; used after the codec wires a tree
/// from a file, which stores no heights.
pub(crate) fn recompute_heights(tree: &mut Tree<Avl>) {
    let Some(root) = tree.root else { return };
    let mut stack = vec![(root, false)];
    while let Some((ptr, ready)) = stack.pop() {
        if ready {
            update_height(tree, ptr);
        } else {
            stack.push((ptr, true));
            for child in tree[ptr].children.into_iter().flatten() {
                stack.push((child, false));
            }
        }
    }
}
