//! Self-balancing binary search tree engines over a small integer key
//! domain: plain BST, AVL and red-black variants sharing one arena-backed
//! node store, plus a line-oriented description format for persisting and
//! reloading them.
//!
//! Ownership runs strictly root-down through child links; parent links are
//! weak arena indices used only for the upward fixup walks. The variants are
//! a closed set: pick one statically with [`Tree<Plain>`], [`Tree<Avl>`] or
//! [`Tree<RedBlack>`], or at run time through [`AnyTree`] (which is what
//! [`codec::load`] hands back).
//!
//! ```
//! use arboretum::prelude::*;
//!
//! let mut tree = Tree::<Avl>::new();
//! for key in [8, 5, 10, 4, 6, 9, 3] {
//!     tree.insert(key).unwrap();
//! }
//! assert_eq!(tree.height(), 3);
//! assert!(tree.is_well_formed());
//!
//! let text = codec::render(&tree.into());
//! let again = codec::parse(&text).unwrap();
//! assert_eq!(again.kind(), Kind::Avl);
//! ```

mod arena;
pub mod codec;
pub mod tree;

pub use crate::tree::{AnyTree, Avl, Error, Key, Kind, Plain, RedBlack, Tree};

pub mod prelude {
    pub use crate::{
        codec,
        tree::{AnyTree, Avl, Color, Error, Key, Kind, NodeView, Plain, RedBlack, Tree},
    };
}

#[cfg(test)]
mod test;
