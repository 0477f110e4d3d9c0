use super::{
    validate, Color, Discipline, Error, Key, Kind, NodeIndex, NodeRef, SearchResult, Tree, LEFT, RIGHT,
};

/// Red-black tree: black root, no red node with a red child, equal black
/// count on every root-to-nil path.
#[derive(Debug, Clone, Copy)]
pub struct RedBlack;

impl Discipline for RedBlack {
    const KIND: Kind = Kind::RedBlack;
    type Aug = Color;

    fn insert(tree: &mut Tree<Self>, key: Key) -> Result<(), Error> {
        let ptr = tree.insert_leaf(key, Color::Red)?;
        fix_insert(tree, ptr);
        Ok(())
    }

    fn delete(tree: &mut Tree<Self>, key: Key) -> Result<(), Error> {
        let SearchResult::Here(ptr) = tree.search(key) else {
            return Err(Error::KeyNotFound(key));
        };
        let splice = tree.splice_out(ptr);
        // removing a red node leaves every black count intact
        if splice.aug == Color::Black {
            fix_delete(tree, splice.child, splice.parent);
        }
        Ok(())
    }

    fn is_well_formed(tree: &Tree<Self>) -> bool {
        validate::ordered(tree) && validate::rb_legal(tree)
    }
}

/// Repair the red-red violation a fresh red leaf may introduce, walking up
/// as long as the parent is red. A red parent implies a black grandparent.
fn fix_insert(tree: &mut Tree<RedBlack>, mut ptr: NodeIndex) {
    loop {
        let Some(parent) = tree[ptr].parent else { break };
        if tree[parent].is_black() {
            break;
        }
        // SAFETY: the root is black, so a red parent has a parent
        let grandparent = tree[parent].parent.unwrap();
        let side = if tree[grandparent].children[LEFT] == Some(parent) { LEFT } else { RIGHT };
        let uncle = tree[grandparent].children[1 - side];
        if uncle.is_some_and(|uncle| tree[uncle].is_red()) {
            // red uncle: push the blackness down from the grandparent
            tree[parent].aug = Color::Black;
            tree[uncle.unwrap()].aug = Color::Black;
            tree[grandparent].aug = Color::Red;
            ptr = grandparent;
        } else {
            let mut parent = parent;
            if tree[parent].children[1 - side] == Some(ptr) {
                // inner grandchild: rotate into the outer case first
                tree.rotate(parent, side);
                ptr = parent;
                // SAFETY: rotation made the old pivot the parent
                parent = tree[ptr].parent.unwrap();
            }
            tree[parent].aug = Color::Black;
            tree[grandparent].aug = Color::Red;
            tree.rotate(grandparent, 1 - side);
            break;
        }
    }
    // SAFETY: insertion succeeded, so the tree is not empty
    let root = tree.root.unwrap();
    tree[root].aug = Color::Black;
}

/// Repair the black-height deficit left by splicing out a black node.
///
/// `ptr` is the replacement (possibly a nil position, hence the separate
/// `parent`), carrying a conceptual extra black until a red node absorbs it,
/// a restructuring resolves it, or the deficit reaches the root.
fn fix_delete(tree: &mut Tree<RedBlack>, mut ptr: NodeRef, mut parent: NodeRef) {
    while ptr != tree.root && ptr.map_or(true, |ptr| tree[ptr].is_black()) {
        // SAFETY: ptr is not the root, so the splice point has a parent
        let above = parent.unwrap();
        let side = match ptr {
            Some(ptr) if tree[above].children[LEFT] == Some(ptr) => LEFT,
            Some(_) => RIGHT,
            // a deficit side is empty, the sibling side never is
            None if tree[above].children[LEFT].is_none() => LEFT,
            None => RIGHT,
        };
        // SAFETY: the deficit side was black, so the sibling side is non-nil
        let mut sibling = tree[above].children[1 - side].unwrap();
        if tree[sibling].is_red() {
            // red sibling: rotate it up to get a black one
            tree[sibling].aug = Color::Black;
            tree[above].aug = Color::Red;
            tree.rotate(above, side);
            sibling = tree[above].children[1 - side].unwrap();
        }
        let near = tree[sibling].children[side];
        let far = tree[sibling].children[1 - side];
        let near_red = near.is_some_and(|near| tree[near].is_red());
        let far_red = far.is_some_and(|far| tree[far].is_red());
        if !near_red && !far_red {
            // both nephews black: move the deficit one level up
            tree[sibling].aug = Color::Red;
            ptr = Some(above);
            parent = tree[above].parent;
        } else {
            let sibling = if far_red {
                sibling
            } else {
                // near nephew red: rotate it up to expose a red far nephew
                tree[near.unwrap()].aug = Color::Black;
                tree[sibling].aug = Color::Red;
                tree.rotate(sibling, 1 - side);
                tree[above].children[1 - side].unwrap()
            };
            let inherited = tree[above].aug;
            tree[sibling].aug = inherited;
            tree[above].aug = Color::Black;
            // SAFETY: this branch requires a red far nephew
            let far = tree[sibling].children[1 - side].unwrap();
            tree[far].aug = Color::Black;
            tree.rotate(above, side);
            return;
        }
    }
    if let Some(ptr) = ptr {
        tree[ptr].aug = Color::Black;
    }
}
