mod node;
pub use node::*;
mod plain;
pub use plain::*;
mod avl;
pub use avl::*;
mod redblack;
pub use redblack::*;
pub(crate) mod validate;

use std::{
    cmp::Ordering,
    collections::VecDeque,
    fmt,
    ops::{Index as IndexRO, IndexMut},
};

use thiserror::Error;
use tracing::trace;

use crate::arena::Arena;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("key {0} already exists")]
    DuplicateKey(Key),
    #[error("key {0} not found")]
    KeyNotFound(Key),
}

/// Tree variant tag, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bst,
    Avl,
    RedBlack,
}

impl Kind {
    /// The exact header token of the file format.
    #[inline]
    pub fn header(self) -> &'static str {
        match self {
            Kind::Bst => "BINARYSEARCHTREE",
            Kind::Avl => "AVLTREE",
            Kind::RedBlack => "REDBLACKTREE",
        }
    }
    #[inline]
    pub fn from_header(token: &str) -> Option<Self> {
        match token {
            "BINARYSEARCHTREE" => Some(Kind::Bst),
            "AVLTREE" => Some(Kind::Avl),
            "REDBLACKTREE" => Some(Kind::RedBlack),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Balancing discipline of a tree variant: the per-node payload plus the
/// mutation and validation algorithms that maintain it.
pub trait Discipline: Sized {
    const KIND: Kind;
    type Aug: Augment;
    fn insert(tree: &mut Tree<Self>, key: Key) -> Result<(), Error>;
    fn delete(tree: &mut Tree<Self>, key: Key) -> Result<(), Error>;
    fn is_well_formed(tree: &Tree<Self>) -> bool;
}

#[derive(Debug)]
pub(crate) enum SearchResult<T> {
    Empty,
    LeftOf(T),
    Here(T),
    RightOf(T),
}

/// A binary search tree of discipline `D`, backed by an arena.
///
/// Child links own their subtrees; parent links are weak arena indices used
/// only for upward traversal during fixups.
#[derive(Debug)]
pub struct Tree<D: Discipline> {
    pub(crate) arena: Arena<Node<D::Aug>>,
    pub(crate) root: NodeRef,
}

impl<D: Discipline> IndexRO<NodeIndex> for Tree<D> {
    type Output = Node<D::Aug>;
    #[inline(always)]
    fn index(&self, index: NodeIndex) -> &Self::Output {
        self.arena.get(index).expect("dangling node index")
    }
}
impl<D: Discipline> IndexMut<NodeIndex> for Tree<D> {
    #[inline(always)]
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        self.arena.get_mut(index).expect("dangling node index")
    }
}

impl<D: Discipline> Tree<D> {
    #[inline]
    pub fn new() -> Self {
        Self { arena: Arena::new(), root: None }
    }
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { arena: Arena::with_capacity(capacity), root: None }
    }
    #[inline]
    pub fn with_root(key: Key) -> Self {
        let mut tree = Self::new();
        // insertion into an empty tree cannot collide
        let _ = D::insert(&mut tree, key);
        tree
    }
    #[inline(always)]
    pub fn kind(&self) -> Kind {
        D::KIND
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.arena.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[inline]
    pub fn insert(&mut self, key: Key) -> Result<(), Error> {
        trace!(kind = %D::KIND, key, "insert");
        D::insert(self, key)
    }
    #[inline]
    pub fn delete(&mut self, key: Key) -> Result<(), Error> {
        trace!(kind = %D::KIND, key, "delete");
        D::delete(self, key)
    }
    #[inline]
    pub fn contains(&self, key: Key) -> bool {
        matches!(self.search(key), SearchResult::Here(_))
    }
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        D::is_well_formed(self)
    }

    /// Longest root-to-leaf edge count; -1 when empty, 0 for a single node.
    pub fn height(&self) -> i32 {
        let Some(root) = self.root else { return -1 };
        let mut max = 0;
        let mut stack = vec![(root, 0)];
        while let Some((ptr, depth)) = stack.pop() {
            max = max.max(depth);
            for child in self[ptr].children.into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        max
    }

    /// Level-order node sequence; the authoritative linearization used by
    /// the file format.
    pub fn linearize(&self) -> Vec<NodeView> {
        self.level_order().into_iter().map(|ptr| NodeView::from(&self[ptr])).collect()
    }

    pub(crate) fn level_order(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.len());
        let mut queue = VecDeque::new();
        queue.extend(self.root);
        while let Some(ptr) = queue.pop_front() {
            order.push(ptr);
            queue.extend(self[ptr].children.into_iter().flatten());
        }
        order
    }

    /// In-order key sequence, strictly increasing for a well-formed tree.
    pub fn keys_in_order(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut ptr = self.root;
        loop {
            while let Some(index) = ptr {
                stack.push(index);
                ptr = self[index].children[LEFT];
            }
            let Some(index) = stack.pop() else { break };
            keys.push(self[index].key);
            ptr = self[index].children[RIGHT];
        }
        keys
    }

    pub(crate) fn search(&self, key: Key) -> SearchResult<NodeIndex> {
        let mut ptr = self.root;
        let (mut parent, mut left) = (None, false);
        while let Some(valid) = ptr {
            parent = ptr;
            let node = &self[valid];
            match node.key.cmp(&key) {
                Ordering::Greater => {
                    left = true;
                    ptr = node.children[LEFT];
                }
                Ordering::Equal => return SearchResult::Here(valid),
                Ordering::Less => {
                    left = false;
                    ptr = node.children[RIGHT];
                }
            }
        }
        match parent {
            Some(parent) if left => SearchResult::LeftOf(parent),
            Some(parent) => SearchResult::RightOf(parent),
            None => SearchResult::Empty,
        }
    }

    /// Place a fresh leaf at its BST position, or fail on a duplicate key.
    /// Discipline fixups run after this returns.
    pub(crate) fn insert_leaf(&mut self, key: Key, aug: D::Aug) -> Result<NodeIndex, Error> {
        match self.search(key) {
            SearchResult::Here(_) => Err(Error::DuplicateKey(key)),
            SearchResult::Empty => {
                let ptr = self.arena.insert(Node::new(key, aug));
                self.root = Some(ptr);
                Ok(ptr)
            }
            SearchResult::LeftOf(parent) => Ok(self.attach(parent, LEFT, key, aug)),
            SearchResult::RightOf(parent) => Ok(self.attach(parent, RIGHT, key, aug)),
        }
    }
    fn attach(&mut self, parent: NodeIndex, side: usize, key: Key, aug: D::Aug) -> NodeIndex {
        let ptr = self.arena.insert(Node::new(key, aug));
        self[ptr].parent = Some(parent);
        self[parent].children[side] = Some(ptr);
        ptr
    }

    /// Rotate `ptr` down into the `side` child slot of its `1 - side` child.
    /// `side == LEFT` is a left rotation; the pivot child must exist.
    pub(crate) fn rotate(&mut self, ptr: NodeIndex, side: usize) {
        let node = &self[ptr];
        let parent = node.parent;
        // SAFETY: callers only rotate towards the lighter side
        let pivot = node.children[1 - side].unwrap();
        let inner = self[pivot].children[side];
        {
            let pivot_node = &mut self[pivot];
            pivot_node.parent = parent;
            pivot_node.children[side] = Some(ptr);
        }
        if let Some(inner) = inner {
            self[inner].parent = Some(ptr);
        }
        {
            let node = &mut self[ptr];
            node.parent = Some(pivot);
            node.children[1 - side] = inner;
        }
        match parent {
            Some(parent) => {
                let parent_node = &mut self[parent];
                if parent_node.children[LEFT] == Some(ptr) {
                    parent_node.children[LEFT] = Some(pivot);
                } else {
                    parent_node.children[RIGHT] = Some(pivot);
                }
            }
            None => self.root = Some(pivot),
        }
    }

    /// Replace `ptr` by `child` in `ptr`'s parent (or as root), repairing
    /// the parent back-link. `ptr` itself is left dangling for the caller.
    pub(crate) fn transplant(&mut self, ptr: NodeIndex, child: NodeRef) {
        let parent = self[ptr].parent;
        if let Some(child) = child {
            self[child].parent = parent;
        }
        match parent {
            Some(parent) => {
                let parent_node = &mut self[parent];
                if parent_node.children[LEFT] == Some(ptr) {
                    parent_node.children[LEFT] = child;
                } else {
                    parent_node.children[RIGHT] = child;
                }
            }
            None => self.root = child,
        }
    }

    pub(crate) fn min_of(&self, mut ptr: NodeIndex) -> NodeIndex {
        while let Some(left) = self[ptr].children[LEFT] {
            ptr = left;
        }
        ptr
    }

    /// Physically remove the node found at `ptr`. A node with two children
    /// takes over its in-order successor's key and the successor (which has
    /// at most one child) is spliced out instead. Returns what the
    /// discipline fixup needs: the splice point and the removed payload.
    pub(crate) fn splice_out(&mut self, ptr: NodeIndex) -> Splice<D::Aug> {
        let ptr = match self[ptr].children {
            [Some(_), Some(right)] => {
                let successor = self.min_of(right);
                let key = self[successor].key;
                self[ptr].key = key;
                successor
            }
            _ => ptr,
        };
        let child = self[ptr].children[LEFT].or(self[ptr].children[RIGHT]);
        let parent = self[ptr].parent;
        self.transplant(ptr, child);
        // SAFETY: ptr came from a successful search
        let node = self.arena.remove(ptr).unwrap();
        Splice { parent, child, aug: node.aug }
    }
}

impl<D: Discipline> Default for Tree<D> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of [`Tree::splice_out`]: where the physical removal happened.
pub(crate) struct Splice<A> {
    /// Parent of the removed node at removal time.
    pub parent: NodeRef,
    /// Subtree that took the removed node's place, if any.
    pub child: NodeRef,
    /// Payload of the physically removed node.
    pub aug: A,
}

macro_rules! dispatch {
    ( $any:expr , $tree:ident => $body:expr ) => {
        match $any {
            AnyTree::Bst($tree) => $body,
            AnyTree::Avl($tree) => $body,
            AnyTree::RedBlack($tree) => $body,
        }
    };
}

/// The closed set of tree variants, for callers that pick the kind at run
/// time (the file codec in particular).
#[derive(Debug)]
pub enum AnyTree {
    Bst(Tree<Plain>),
    Avl(Tree<Avl>),
    RedBlack(Tree<RedBlack>),
}

impl AnyTree {
    #[inline]
    pub fn empty(kind: Kind) -> Self {
        match kind {
            Kind::Bst => AnyTree::Bst(Tree::new()),
            Kind::Avl => AnyTree::Avl(Tree::new()),
            Kind::RedBlack => AnyTree::RedBlack(Tree::new()),
        }
    }
    #[inline]
    pub fn with_root(kind: Kind, key: Key) -> Self {
        match kind {
            Kind::Bst => AnyTree::Bst(Tree::with_root(key)),
            Kind::Avl => AnyTree::Avl(Tree::with_root(key)),
            Kind::RedBlack => AnyTree::RedBlack(Tree::with_root(key)),
        }
    }
    #[inline]
    pub fn kind(&self) -> Kind {
        dispatch!(self, tree => tree.kind())
    }
    #[inline]
    pub fn insert(&mut self, key: Key) -> Result<(), Error> {
        dispatch!(self, tree => tree.insert(key))
    }
    #[inline]
    pub fn delete(&mut self, key: Key) -> Result<(), Error> {
        dispatch!(self, tree => tree.delete(key))
    }
    #[inline]
    pub fn contains(&self, key: Key) -> bool {
        dispatch!(self, tree => tree.contains(key))
    }
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        dispatch!(self, tree => tree.is_well_formed())
    }
    #[inline]
    pub fn height(&self) -> i32 {
        dispatch!(self, tree => tree.height())
    }
    #[inline]
    pub fn linearize(&self) -> Vec<NodeView> {
        dispatch!(self, tree => tree.linearize())
    }
    #[inline]
    pub fn keys_in_order(&self) -> Vec<Key> {
        dispatch!(self, tree => tree.keys_in_order())
    }
    #[inline]
    pub fn len(&self) -> usize {
        dispatch!(self, tree => tree.len())
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        dispatch!(self, tree => tree.is_empty())
    }
}

impl From<Tree<Plain>> for AnyTree {
    #[inline(always)]
    fn from(tree: Tree<Plain>) -> Self {
        AnyTree::Bst(tree)
    }
}
impl From<Tree<Avl>> for AnyTree {
    #[inline(always)]
    fn from(tree: Tree<Avl>) -> Self {
        AnyTree::Avl(tree)
    }
}
impl From<Tree<RedBlack>> for AnyTree {
    #[inline(always)]
    fn from(tree: Tree<RedBlack>) -> Self {
        AnyTree::RedBlack(tree)
    }
}
