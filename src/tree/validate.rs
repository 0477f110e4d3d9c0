//! Per-variant legality predicates, run after file loads and by tests.
//!
//! All walks use explicit stacks so a corrupted input (a degenerate chain,
//! say) cannot overflow the call stack before being rejected.

use std::collections::HashMap;

use super::{Avl, Discipline, Key, NodeIndex, NodeRef, RedBlack, Tree, LEFT};

/// Full BST property: every key in a left subtree is strictly smaller and
/// every key in a right subtree strictly greater than the node's key, not
/// just the parent/child comparison. Also audits the parent back-links.
pub(crate) fn ordered<D: Discipline>(tree: &Tree<D>) -> bool {
    let Some(root) = tree.root else { return true };
    if tree[root].parent.is_some() {
        return false;
    }
    let mut stack: Vec<(NodeIndex, Option<Key>, Option<Key>)> = vec![(root, None, None)];
    while let Some((ptr, low, high)) = stack.pop() {
        let node = &tree[ptr];
        if low.is_some_and(|low| node.key <= low) || high.is_some_and(|high| node.key >= high) {
            return false;
        }
        for (side, child) in node.children.iter().enumerate() {
            let Some(child) = *child else { continue };
            if tree[child].parent != Some(ptr) {
                return false;
            }
            let bounds = if side == LEFT {
                (low, Some(node.key))
            } else {
                (Some(node.key), high)
            };
            stack.push((child, bounds.0, bounds.1));
        }
    }
    true
}

/// AVL invariant: balance factor within {-1, 0, 1} everywhere, and every
/// cached height equal to the height recomputed from the children (catches
/// stale caches, not just bad shapes).
pub(crate) fn avl_balanced(tree: &Tree<Avl>) -> bool {
    let Some(root) = tree.root else { return true };
    let mut heights: HashMap<NodeIndex, i32> = HashMap::with_capacity(tree.len());
    let mut stack = vec![(root, false)];
    while let Some((ptr, ready)) = stack.pop() {
        let node = &tree[ptr];
        if ready {
            let of = |child: NodeRef| child.map_or(-1, |child| heights[&child]);
            let (left, right) = (of(node.children[0]), of(node.children[1]));
            if (left - right).abs() > 1 {
                return false;
            }
            let actual = 1 + left.max(right);
            if i32::from(node.aug.0) != actual {
                return false;
            }
            heights.insert(ptr, actual);
        } else {
            stack.push((ptr, true));
            for child in node.children.into_iter().flatten() {
                stack.push((child, false));
            }
        }
    }
    true
}

/// Red-black invariant: black root, no red node with a red child, and an
/// identical black count along every root-to-nil path, failing on the first
/// mismatching sibling pair.
pub(crate) fn rb_legal(tree: &Tree<RedBlack>) -> bool {
    let Some(root) = tree.root else { return true };
    if tree[root].is_red() {
        return false;
    }
    let mut blacks: HashMap<NodeIndex, u32> = HashMap::with_capacity(tree.len());
    let mut stack = vec![(root, false)];
    while let Some((ptr, ready)) = stack.pop() {
        let node = &tree[ptr];
        if ready {
            let of = |child: NodeRef| child.map_or(0, |child| blacks[&child]);
            let (left, right) = (of(node.children[0]), of(node.children[1]));
            if left != right {
                return false;
            }
            blacks.insert(ptr, left + u32::from(node.is_black()));
        } else {
            if node.is_red()
                && node.children.iter().flatten().any(|&child| tree[child].is_red())
            {
                return false;
            }
            stack.push((ptr, true));
            for child in node.children.into_iter().flatten() {
                stack.push((child, false));
            }
        }
    }
    true
}
