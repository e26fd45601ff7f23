//! Tests for Newick parsing and writing.

use cladepaint::newick::{parse_str, to_newick};
use cladepaint::parser::ParsingErrorType;

#[test]
fn parses_binary_tree_with_branch_lengths() {
    let (tree, labels) = parse_str("((A:0.1,B:0.2):0.3,C:0.4);").unwrap();
    assert!(tree.is_valid());
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_vertices(), 5);
    assert_eq!(labels.num_labels(), 3);
    assert!(tree.vertices_have_branch_lengths());
}

#[test]
fn parses_multifurcation() {
    let (tree, labels) = parse_str("(A,B,C,D);").unwrap();
    assert!(tree.is_valid());
    assert_eq!(tree.num_leaves(), 4);
    assert_eq!(tree.root().children().unwrap().len(), 4);
    assert_eq!(labels.num_labels(), 4);
}

#[test]
fn parses_quoted_labels() {
    let (tree, labels) = parse_str("('taxon one':1,'it''s':2);").unwrap();
    assert_eq!(tree.num_leaves(), 2);
    assert!(labels.contains_label("taxon one"));
    assert!(labels.contains_label("it's"));
}

#[test]
fn skips_comments_and_whitespace() {
    let (tree, _) = parse_str("[a comment] ( A : 1 ,\n\tB : 2 ) ;").unwrap();
    assert_eq!(tree.num_leaves(), 2);
}

#[test]
fn internal_labels_are_accepted_and_discarded() {
    let (tree, labels) = parse_str("((A,B)clade1:0.5,C)root;").unwrap();
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(labels.num_labels(), 3);
    assert!(!labels.contains_label("clade1"));
}

#[test]
fn leaves_keep_input_order() {
    let (tree, labels) = parse_str("((C,A),B);").unwrap();
    let order: Vec<&str> = tree
        .leaves_in_order()
        .map(|v| &labels[v.label_index().unwrap()])
        .collect();
    assert_eq!(order, vec!["C", "A", "B"]);
}

#[test]
fn missing_semicolon_is_an_error() {
    let err = parse_str("(A,B)").unwrap_err();
    assert!(matches!(
        err.kind(),
        ParsingErrorType::InvalidNewickString(_) | ParsingErrorType::UnexpectedEof
    ));
}

#[test]
fn unbalanced_parentheses_are_an_error() {
    assert!(parse_str("((A,B);").is_err());
    assert!(parse_str("(A,B));").is_err());
}

#[test]
fn negative_branch_length_is_an_error() {
    assert!(parse_str("(A:-1,B:2);").is_err());
}

#[test]
fn trailing_content_is_an_error() {
    assert!(parse_str("(A,B);(C,D);").is_err());
}

#[test]
fn single_leaf_without_parentheses_is_an_error() {
    // A lone label has no branches to colour; the root must carry children.
    assert!(parse_str("A;").is_err());
    assert!(parse_str("A:1.0;").is_err());
}

#[test]
fn writer_round_trips_structure() {
    let input = "((A:0.1,B:0.2):0.3,C:0.4);";
    let (tree, labels) = parse_str(input).unwrap();
    let written = to_newick(&tree, &labels, None);
    let (tree2, labels2) = parse_str(&written).unwrap();
    assert_eq!(tree2.num_leaves(), tree.num_leaves());
    assert_eq!(tree2.num_vertices(), tree.num_vertices());
    assert_eq!(labels2.labels(), labels.labels());
}

#[test]
fn writer_escapes_labels_that_need_quoting() {
    // Spaces become underscores, structural characters force quoting.
    let (tree, labels) = parse_str("('taxon one':1,'a:b':2);").unwrap();
    let written = to_newick(&tree, &labels, None);
    assert_eq!(written, "(taxon_one:1,'a:b':2);");
}
