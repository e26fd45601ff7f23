//! NEXUS tree input: block handling, translation tables, and the full
//! pipeline from a NEXUS tree file to coloured output.

use cladepaint::input::{Input, Options};
use cladepaint::nexus::parse_str;
use std::fs;
use tempfile::TempDir;

#[test]
fn reads_tree_without_translation() {
    let text = "#NEXUS\nBegin Trees;\n\tTree tree1=((A:0.1,B:0.2):0.3,C:0.4);\nEnd;\n";

    let (tree, labels) = parse_str(text).unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert!(labels.contains_label("A"));
    assert!(labels.contains_label("B"));
    assert!(labels.contains_label("C"));
}

#[test]
fn skips_leading_blocks() {
    let text = "#NEXUS\n\
        Begin Taxa;\n\
        \tDimensions NTax=3;\n\
        \tTaxLabels A B C;\n\
        End;\n\
        Begin Trees;\n\
        \tTree tree1=((A:0.1,B:0.2):0.3,C:0.4);\n\
        End;\n";

    let (tree, labels) = parse_str(text).unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(labels.num_labels(), 3);
}

#[test]
fn resolves_integer_translation_keys() {
    let text = "#NEXUS\n\
        Begin Trees;\n\
        \tTranslate\n\
        \t\t1 Homo_sapiens,\n\
        \t\t2 Pan_troglodytes,\n\
        \t\t3 Gorilla_gorilla;\n\
        \tTree tree1=((1:0.1,2:0.2):0.3,3:0.4);\n\
        End;\n";

    let (tree, labels) = parse_str(text).unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert!(labels.contains_label("Homo_sapiens"));
    assert!(labels.contains_label("Pan_troglodytes"));
    assert!(labels.contains_label("Gorilla_gorilla"));
    assert!(!labels.contains_label("1"));
}

#[test]
fn resolves_quoted_translation_labels() {
    let text = "#NEXUS\n\
        Begin Trees;\n\
        \tTranslate 1 'St John''s wort', 2 Hypericum;\n\
        \tTree tree1=(1:0.1,2:0.2);\n\
        End;\n";

    let (_, labels) = parse_str(text).unwrap();

    assert!(labels.contains_label("St John's wort"));
    assert!(labels.contains_label("Hypericum"));
}

#[test]
fn untranslated_keys_keep_their_name() {
    let text = "#NEXUS\n\
        Begin Trees;\n\
        \tTranslate 1 Alpha;\n\
        \tTree tree1=(1:0.1,Beta:0.2);\n\
        End;\n";

    let (_, labels) = parse_str(text).unwrap();

    assert!(labels.contains_label("Alpha"));
    assert!(labels.contains_label("Beta"));
}

#[test]
fn skips_rootedness_comment_before_newick() {
    let text = "#NEXUS\nBegin Trees;\n\tTree tree1 = [&R] (A:0.1,B:0.2);\nEnd;\n";

    let (tree, _) = parse_str(text).unwrap();

    assert_eq!(tree.num_leaves(), 2);
}

#[test]
fn nexus_tree_file_runs_through_the_pipeline() {
    let dir = TempDir::new().unwrap();
    let tree_path = dir.path().join("example.nex");
    let align_path = dir.path().join("example.fasta");
    fs::write(
        &tree_path,
        "#NEXUS\n\
         Begin Taxa;\n\
         \tDimensions NTax=3;\n\
         \tTaxLabels A B C;\n\
         End;\n\
         Begin Trees;\n\
         \tTranslate 1 A, 2 B, 3 C;\n\
         \tTree tree1=((1:0.1,2:0.2):0.3,3:0.4);\n\
         End;\n",
    )
    .unwrap();
    fs::write(&align_path, ">A\nQR\n>B\nQR\n>C\nRR\n").unwrap();

    let options = Options {
        tree_path,
        alignment_path: align_path,
        tree_format: "nexus".to_string(),
        alignment_format: "fasta".to_string(),
        output_format: "figtree".to_string(),
        color_branches: true,
        sites: String::new(),
        colors_path: None,
        output_path: None,
    };

    let input = Input::load(&options).unwrap();
    cladepaint::run(&input).unwrap();

    let text = fs::read_to_string(dir.path().join("col_example.nex")).unwrap();
    assert!(text.starts_with("#NEXUS\n"));
    assert!(text.contains("A__site_1__Q[&!color=#FF00CC]"));
    assert!(text.contains("C__site_2__R[&!color=#990000]"));
}
