use std::{fmt::Debug, ops::Not};

use crate::arena::Index;

pub(crate) type NodeIndex = Index;
pub(crate) type NodeRef = Option<NodeIndex>;

/// Child slot selectors for `Node::children`.
pub(crate) const LEFT: usize = 0;
pub(crate) const RIGHT: usize = 1;

/// Node color in a red-black tree.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red = 0,
    Black = 1,
}
impl Not for Color {
    type Output = Color;
    #[inline]
    fn not(self) -> Self::Output {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// Key type stored in every tree.
pub type Key = i64;

/// Per-variant node payload: `()` for plain BSTs, a cached subtree height
/// for AVL, a color bit for red-black.
pub trait Augment: Copy + Debug + PartialEq {
    #[inline(always)]
    fn height(&self) -> Option<u16> {
        None
    }
    #[inline(always)]
    fn color(&self) -> Option<Color> {
        None
    }
}

impl Augment for () {}

/// Cached height of the subtree rooted at the node, leaf = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Height(pub(crate) u16);
impl Augment for Height {
    #[inline(always)]
    fn height(&self) -> Option<u16> {
        Some(self.0)
    }
}

impl Augment for Color {
    #[inline(always)]
    fn color(&self) -> Option<Color> {
        Some(*self)
    }
}

#[derive(Debug)]
pub(crate) struct Node<A: Augment> {
    pub key: Key,
    pub aug: A,
    // parent is a weak lookup link; ownership runs strictly root-down
    pub parent: NodeRef,
    pub children: [NodeRef; 2],
}

impl<A: Augment> Node<A> {
    #[inline]
    pub const fn new(key: Key, aug: A) -> Self {
        Self { key, aug, parent: None, children: [None, None] }
    }
    #[inline(always)]
    pub fn is_red(&self) -> bool {
        self.aug.color() == Some(Color::Red)
    }
    #[inline(always)]
    pub fn is_black(&self) -> bool {
        !self.is_red()
    }
}

/// Snapshot of one node as seen through [`Tree::linearize`](super::Tree::linearize):
/// the key plus whichever variant attribute the tree kind carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeView {
    pub key: Key,
    pub height: Option<u16>,
    pub color: Option<Color>,
}

impl<A: Augment> From<&Node<A>> for NodeView {
    #[inline]
    fn from(node: &Node<A>) -> Self {
        Self { key: node.key, height: node.aug.height(), color: node.aug.color() }
    }
}
