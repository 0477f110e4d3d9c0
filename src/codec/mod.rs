//! Line-oriented tree description format.
//!
//! A file names its tree kind on the first meaningful line
//! (`BINARYSEARCHTREE`, `AVLTREE` or `REDBLACKTREE`), then one row per node
//! in breadth-first order. `#` starts a comment and blank lines are ignored
//! anywhere. Row indices double as child references and must reproduce the
//! breadth-first numbering exactly; AVL heights are never stored, they are
//! recomputed on load.

mod row;
use row::Row;

use std::{
    collections::{HashMap, VecDeque},
    fs, io,
    path::Path,
};

use thiserror::Error;
use tracing::debug;

use crate::tree::{
    self, AnyTree, Augment, Avl, Color, Discipline, Height, Kind, Node, NodeIndex, Plain,
    RedBlack, Tree, LEFT, RIGHT,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("missing tree kind header")]
    MissingHeader,
    #[error("line {line}: unknown tree kind `{token}`")]
    UnknownKind { line: usize, token: String },
    #[error("line {line}: {reason}")]
    Format { line: usize, reason: FormatReason },
    #[error("{0} description violates the tree invariants")]
    InvalidTree(Kind),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatReason {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid integer `{0}`")]
    BadInteger(String),
    #[error("invalid color `{0}`")]
    BadColor(String),
    #[error("row index {found} out of order, expected {expected}")]
    IndexOutOfOrder { found: usize, expected: usize },
    #[error("child index {found} breaks the breadth-first numbering, expected {expected}")]
    NumberingMismatch { found: usize, expected: usize },
    #[error("child index {0} references a missing row")]
    MissingRow(usize),
    #[error("{0} trailing rows are unreachable from the root")]
    UnreferencedRows(usize),
}

/// Parse a full tree description. Errors are reported eagerly with the
/// offending line; no tree is returned on failure.
pub fn parse(text: &str) -> Result<AnyTree, LoadError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(at, line)| (at + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));
    let Some((header_line, token)) = lines.next() else {
        return Err(LoadError::MissingHeader);
    };
    let Some(kind) = Kind::from_header(token) else {
        return Err(LoadError::UnknownKind { line: header_line, token: token.to_string() });
    };
    let mut rows = Vec::new();
    for (line, text) in lines {
        let row = Row::parse(line, text, kind)?;
        if row.index != rows.len() {
            return Err(LoadError::Format {
                line,
                reason: FormatReason::IndexOutOfOrder { found: row.index, expected: rows.len() },
            });
        }
        rows.push(row);
    }
    check_numbering(&rows)?;
    let tree = build(kind, &rows);
    if !tree.is_well_formed() {
        return Err(LoadError::InvalidTree(kind));
    }
    debug!(kind = %kind, nodes = rows.len(), "parsed tree description");
    Ok(tree)
}

/// Flatten a tree back into the description grammar, indices freshly
/// assigned in level order. `parse(render(t))` reproduces `t` exactly.
pub fn render(tree: &AnyTree) -> String {
    match tree {
        AnyTree::Bst(tree) => render_tree(tree),
        AnyTree::Avl(tree) => render_tree(tree),
        AnyTree::RedBlack(tree) => render_tree(tree),
    }
}

pub fn load(path: impl AsRef<Path>) -> Result<AnyTree, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let tree = parse(&text)?;
    debug!(path = %path.display(), kind = %tree.kind(), "loaded tree");
    Ok(tree)
}

pub fn save(tree: &AnyTree, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    fs::write(path, render(tree))?;
    debug!(path = %path.display(), kind = %tree.kind(), nodes = tree.len(), "saved tree");
    Ok(())
}

/// Child indices must replay the breadth-first numbering: the n-th non-nil
/// reference names row n, and the row count equals the reference count plus
/// one for the root.
fn check_numbering(rows: &[Row]) -> Result<(), LoadError> {
    if rows.is_empty() {
        return Ok(());
    }
    let mut next = 1;
    let mut queue = VecDeque::from([0]);
    while let Some(at) = queue.pop_front() {
        let row = &rows[at];
        for child in row.children.into_iter().flatten() {
            if child != next {
                return Err(LoadError::Format {
                    line: row.line,
                    reason: FormatReason::NumberingMismatch { found: child, expected: next },
                });
            }
            if child >= rows.len() {
                return Err(LoadError::Format {
                    line: row.line,
                    reason: FormatReason::MissingRow(child),
                });
            }
            next += 1;
            queue.push_back(child);
        }
    }
    if next != rows.len() {
        return Err(LoadError::Format {
            line: rows[next].line,
            reason: FormatReason::UnreferencedRows(rows.len() - next),
        });
    }
    Ok(())
}

fn build(kind: Kind, rows: &[Row]) -> AnyTree {
    match kind {
        Kind::Bst => AnyTree::Bst(build_tree::<Plain>(rows, |_| ())),
        Kind::Avl => {
            let mut tree = build_tree::<Avl>(rows, |_| Height(0));
            tree::recompute_heights(&mut tree);
            AnyTree::Avl(tree)
        }
        Kind::RedBlack => {
            // SAFETY: red-black rows always carry a color after parsing
            AnyTree::RedBlack(build_tree::<RedBlack>(rows, |row| row.color.unwrap()))
        }
    }
}

fn build_tree<D: Discipline>(rows: &[Row], aug: impl Fn(&Row) -> D::Aug) -> Tree<D> {
    let mut tree = Tree::with_capacity(rows.len());
    let ids: Vec<NodeIndex> =
        rows.iter().map(|row| tree.arena.insert(Node::new(row.key, aug(row)))).collect();
    for (at, row) in rows.iter().enumerate() {
        for (side, child) in row.children.into_iter().enumerate() {
            let Some(child) = child else { continue };
            tree[ids[at]].children[side] = Some(ids[child]);
            tree[ids[child]].parent = Some(ids[at]);
        }
    }
    tree.root = ids.first().copied();
    tree
}

fn render_tree<D: Discipline>(tree: &Tree<D>) -> String {
    let order = tree.level_order();
    let serial: HashMap<NodeIndex, usize> =
        order.iter().enumerate().map(|(at, &ptr)| (ptr, at)).collect();
    let mut out = String::with_capacity(16 * (order.len() + 1));
    out.push_str(D::KIND.header());
    out.push('\n');
    for (at, &ptr) in order.iter().enumerate() {
        let node = &tree[ptr];
        let reference = |side: usize| match node.children[side] {
            Some(child) => serial[&child].to_string(),
            None => "nil".to_string(),
        };
        out.push_str(&format!("{} {} {} {}", at, node.key, reference(LEFT), reference(RIGHT)));
        if let Some(color) = node.aug.color() {
            out.push(' ');
            out.push_str(match color {
                Color::Red => "red",
                Color::Black => "black",
            });
        }
        out.push('\n');
    }
    out
}
