use super::*;
use crate::codec::{self, FormatReason, LoadError};

const AVL_SAMPLE: &str = "\
# sample tree description
AVLTREE

0 8 1 2
1 5 3 4
2 10 5 nil
3 4 6 nil
4 6 nil nil
5 9 nil nil
6 3 nil nil
";

#[test]
fn parse_sample_avl() {
    let tree = codec::parse(AVL_SAMPLE).unwrap();
    assert_eq!(tree.kind(), Kind::Avl);
    assert_eq!(tree.len(), 7);
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.keys_in_order(), vec![3, 4, 5, 6, 8, 9, 10]);
    // heights are recomputed on load, never read from the file
    let views: Vec<(Key, u16)> =
        tree.linearize().into_iter().map(|view| (view.key, view.height.unwrap())).collect();
    assert_eq!(views, vec![(8, 3), (5, 2), (10, 1), (4, 1), (6, 0), (9, 0), (3, 0)]);
}

#[test]
fn round_trip_all_kinds() {
    let keys = [1, 7, 8, 9, 10, 6, 5, 2, 3, 4, 0, 11];
    for kind in [Kind::Bst, Kind::Avl, Kind::RedBlack] {
        let mut tree = AnyTree::empty(kind);
        for key in keys {
            tree.insert(key).unwrap();
        }
        let text = codec::render(&tree);
        println!("{}", text);
        let again = codec::parse(&text).unwrap();
        assert_eq!(again.kind(), kind);
        assert_eq!(again.linearize(), tree.linearize());
        assert_eq!(codec::render(&again), text, "render is stable across a round trip");
    }
}

#[test]
fn round_trip_empty_tree() {
    let text = codec::render(&AnyTree::empty(Kind::RedBlack));
    assert_eq!(text, "REDBLACKTREE\n");
    let tree = codec::parse(&text).unwrap();
    assert!(tree.is_empty());
}

#[test]
fn save_and_load_file() {
    let mut tree = AnyTree::with_root(Kind::Avl, 8);
    for key in [5, 10, 4, 6, 9, 3] {
        tree.insert(key).unwrap();
    }
    let path = std::env::temp_dir().join("arboretum-codec-roundtrip.tree");
    codec::save(&tree, &path).unwrap();
    let again = codec::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(again.linearize(), tree.linearize());
}

#[test]
fn load_of_missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("arboretum-codec-no-such-file.tree");
    assert!(matches!(codec::load(&path), Err(LoadError::Io(_))));
}

#[test]
fn header_errors() {
    assert!(matches!(codec::parse(""), Err(LoadError::MissingHeader)));
    assert!(matches!(codec::parse("# only a comment\n\n"), Err(LoadError::MissingHeader)));
    // the header is case sensitive and exact
    assert!(matches!(
        codec::parse("avltree\n"),
        Err(LoadError::UnknownKind { line: 1, .. })
    ));
    assert!(matches!(
        codec::parse("\n# preamble\nSPLAYTREE\n"),
        Err(LoadError::UnknownKind { line: 3, .. })
    ));
}

#[test]
fn field_count_errors() {
    assert!(matches!(
        codec::parse("BINARYSEARCHTREE\n0 1 nil\n"),
        Err(LoadError::Format {
            line: 2,
            reason: FormatReason::FieldCount { expected: 4, found: 3 },
        })
    ));
    // a color column is only legal on red-black rows
    assert!(matches!(
        codec::parse("BINARYSEARCHTREE\n0 1 nil nil black\n"),
        Err(LoadError::Format { reason: FormatReason::FieldCount { expected: 4, found: 5 }, .. })
    ));
    assert!(matches!(
        codec::parse("REDBLACKTREE\n0 1 nil nil\n"),
        Err(LoadError::Format { reason: FormatReason::FieldCount { expected: 5, found: 4 }, .. })
    ));
}

#[test]
fn token_errors() {
    assert!(matches!(
        codec::parse("AVLTREE\n0 x nil nil\n"),
        Err(LoadError::Format { line: 2, reason: FormatReason::BadInteger(_) })
    ));
    assert!(matches!(
        codec::parse("AVLTREE\n0 1 left nil\n"),
        Err(LoadError::Format { line: 2, reason: FormatReason::BadInteger(_) })
    ));
    assert!(matches!(
        codec::parse("REDBLACKTREE\n0 1 nil nil green\n"),
        Err(LoadError::Format { line: 2, reason: FormatReason::BadColor(_) })
    ));
}

#[test]
fn numbering_errors() {
    assert!(matches!(
        codec::parse("AVLTREE\n1 5 nil nil\n"),
        Err(LoadError::Format {
            line: 2,
            reason: FormatReason::IndexOutOfOrder { found: 1, expected: 0 },
        })
    ));
    // children must be numbered in breadth-first visit order
    assert!(matches!(
        codec::parse("AVLTREE\n0 5 2 1\n1 3 nil nil\n2 8 nil nil\n"),
        Err(LoadError::Format {
            line: 2,
            reason: FormatReason::NumberingMismatch { found: 2, expected: 1 },
        })
    ));
    // a reference past the end of the table means rows are missing
    assert!(matches!(
        codec::parse("AVLTREE\n0 5 1 nil\n"),
        Err(LoadError::Format { line: 2, reason: FormatReason::MissingRow(1) })
    ));
    // rows the root never reaches mean there are too many
    assert!(matches!(
        codec::parse("AVLTREE\n0 5 nil nil\n1 3 nil nil\n"),
        Err(LoadError::Format { line: 3, reason: FormatReason::UnreferencedRows(1) })
    ));
}

#[test]
fn invalid_trees_are_rejected() {
    // parses cleanly but puts 9 in a left subtree of 5
    assert!(matches!(
        codec::parse("BINARYSEARCHTREE\n0 5 1 nil\n1 9 nil nil\n"),
        Err(LoadError::InvalidTree(Kind::Bst))
    ));
    // a chain of three is not AVL balanced
    assert!(matches!(
        codec::parse("AVLTREE\n0 5 1 nil\n1 3 2 nil\n2 1 nil nil\n"),
        Err(LoadError::InvalidTree(Kind::Avl))
    ));
    // red root
    assert!(matches!(
        codec::parse("REDBLACKTREE\n0 1 nil nil red\n"),
        Err(LoadError::InvalidTree(Kind::RedBlack))
    ));
    // red 2 directly under red 3
    assert!(matches!(
        codec::parse(
            "REDBLACKTREE\n0 5 1 2 black\n1 3 3 nil red\n2 8 nil nil black\n3 2 nil nil red\n"
        ),
        Err(LoadError::InvalidTree(Kind::RedBlack))
    ));
    // one black on the left path, none on the right
    assert!(matches!(
        codec::parse("REDBLACKTREE\n0 5 1 nil black\n1 3 nil nil black\n"),
        Err(LoadError::InvalidTree(Kind::RedBlack))
    ));
}
