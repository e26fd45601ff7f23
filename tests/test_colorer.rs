//! Tests for ancestral state reconstruction and branch colouring.

use cladepaint::alignment::{Alignment, match_taxa};
use cladepaint::color::{ColorTable, StateAlphabet};
use cladepaint::error::Error;
use cladepaint::model::{LeafLabelMap, Tree, VertexIndex};
use cladepaint::newick;
use cladepaint::paint::color_site;

const AMBIGUOUS: &str = "#797D7F";
const Q_COLOR: &str = "#FF00CC";
const R_COLOR: &str = "#990000";

fn setup(newick: &str, rows: &[(&str, &str)]) -> (Tree, LeafLabelMap, Alignment, Vec<usize>) {
    let (tree, labels) = newick::parse_str(newick).unwrap();
    let alignment = Alignment::new(
        rows.iter()
            .map(|(n, s)| (n.to_string(), s.to_string()))
            .collect(),
    )
    .unwrap();
    let row_for_label = match_taxa(&labels, &alignment).unwrap();
    (tree, labels, alignment, row_for_label)
}

fn leaf_index(tree: &Tree, labels: &LeafLabelMap, name: &str) -> VertexIndex {
    let label_index = labels.get_index(name).unwrap();
    tree.leaves_in_order()
        .find(|v| v.label_index() == Some(label_index))
        .unwrap()
        .index()
}

#[test]
fn unanimous_subtree_gets_state_color_and_split_root_is_ambiguous() {
    let (tree, labels, alignment, rows) = setup(
        "((A:1,B:1):1,C:1);",
        &[("A", "Q"), ("B", "Q"), ("C", "R")],
    );
    let coloring = color_site(
        &tree,
        &alignment,
        &rows,
        &StateAlphabet::amino_acid(),
        &ColorTable::default_palette(),
        0,
    )
    .unwrap();

    let a = leaf_index(&tree, &labels, "A");
    let c = leaf_index(&tree, &labels, "C");
    let ab = tree[a].parent_index().unwrap();

    assert_eq!(coloring.color(a).to_string(), Q_COLOR);
    assert_eq!(coloring.color(c).to_string(), R_COLOR);
    assert_eq!(coloring.color(ab).to_string(), Q_COLOR);
    assert_eq!(coloring.color(tree.root_index()).to_string(), AMBIGUOUS);
}

#[test]
fn full_unanimity_colors_the_root() {
    let (tree, _, alignment, rows) = setup(
        "((A:1,B:1):1,C:1);",
        &[("A", "Q"), ("B", "Q"), ("C", "Q")],
    );
    let coloring = color_site(
        &tree,
        &alignment,
        &rows,
        &StateAlphabet::amino_acid(),
        &ColorTable::default_palette(),
        0,
    )
    .unwrap();
    for v in tree.post_order_iter() {
        assert_eq!(coloring.color(v.index()).to_string(), Q_COLOR);
    }
}

#[test]
fn lowercase_states_are_normalized() {
    let (tree, labels, alignment, rows) =
        setup("(A:1,B:1);", &[("A", "q"), ("B", "q")]);
    let coloring = color_site(
        &tree,
        &alignment,
        &rows,
        &StateAlphabet::amino_acid(),
        &ColorTable::default_palette(),
        0,
    )
    .unwrap();
    let a = leaf_index(&tree, &labels, "A");
    assert_eq!(coloring.leaf_state(a), Some('Q'));
    assert_eq!(coloring.color(a).to_string(), Q_COLOR);
}

#[test]
fn multifurcation_needs_all_children_to_agree() {
    let (tree, _, alignment, rows) = setup(
        "(A:1,B:1,C:1);",
        &[("A", "QQ"), ("B", "QQ"), ("C", "QR")],
    );
    let alphabet = StateAlphabet::amino_acid();
    let table = ColorTable::default_palette();

    let site0 = color_site(&tree, &alignment, &rows, &alphabet, &table, 0).unwrap();
    assert_eq!(site0.color(tree.root_index()).to_string(), Q_COLOR);

    let site1 = color_site(&tree, &alignment, &rows, &alphabet, &table, 1).unwrap();
    assert_eq!(site1.color(tree.root_index()).to_string(), AMBIGUOUS);
}

#[test]
fn colorings_of_different_sites_are_independent() {
    let (tree, labels, alignment, rows) = setup(
        "((A:1,B:1):1,C:1);",
        &[("A", "QR"), ("B", "QR"), ("C", "RR")],
    );
    let alphabet = StateAlphabet::amino_acid();
    let table = ColorTable::default_palette();

    let site0 = color_site(&tree, &alignment, &rows, &alphabet, &table, 0).unwrap();
    let site1 = color_site(&tree, &alignment, &rows, &alphabet, &table, 1).unwrap();
    // Same site again, after another site was coloured in between.
    let site0_again = color_site(&tree, &alignment, &rows, &alphabet, &table, 0).unwrap();

    let a = leaf_index(&tree, &labels, "A");
    let ab = tree[a].parent_index().unwrap();
    assert_eq!(site0.color(ab).to_string(), Q_COLOR);
    assert_eq!(site0_again.color(ab).to_string(), Q_COLOR);
    assert_eq!(site1.color(ab).to_string(), R_COLOR);
}

#[test]
fn unknown_state_symbol_is_a_lookup_error() {
    let (tree, _, alignment, rows) = setup("(A:1,B:1);", &[("A", "QJ"), ("B", "QQ")]);
    let result = color_site(
        &tree,
        &alignment,
        &rows,
        &StateAlphabet::amino_acid(),
        &ColorTable::default_palette(),
        1,
    );
    match result {
        Err(Error::ColorLookup { symbol, site }) => {
            assert_eq!(symbol, 'J');
            assert_eq!(site, 2); // reported 1-based
        }
        other => panic!("expected ColorLookup, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn state_without_color_entry_is_a_lookup_error() {
    // A custom table that misses R; the unanimous R subtree cannot be coloured.
    let table = ColorTable::from_reader("Q,#FF00CC\n".as_bytes()).unwrap();
    let (tree, _, alignment, rows) = setup("(A:1,B:1);", &[("A", "R"), ("B", "R")]);
    let result = color_site(
        &tree,
        &alignment,
        &rows,
        &StateAlphabet::amino_acid(),
        &table,
        0,
    );
    assert!(matches!(
        result,
        Err(Error::ColorLookup { symbol: 'R', site: 1 })
    ));
}
