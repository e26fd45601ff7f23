//! End-to-end tests: load inputs, colour, and check the written files.

use cladepaint::input::{Input, Options};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const TREE: &str = "((A:0.1,B:0.2):0.3,C:0.4);\n";
const FASTA: &str = ">A\nQR\n>B\nQR\n>C\nRR\n";

fn write_inputs(dir: &TempDir) -> (PathBuf, PathBuf) {
    let tree_path = dir.path().join("example.nwk");
    let align_path = dir.path().join("example.fasta");
    fs::write(&tree_path, TREE).unwrap();
    fs::write(&align_path, FASTA).unwrap();
    (tree_path, align_path)
}

fn options(tree_path: PathBuf, align_path: PathBuf) -> Options {
    Options {
        tree_path,
        alignment_path: align_path,
        tree_format: "newick".to_string(),
        alignment_format: "fasta".to_string(),
        output_format: "figtree".to_string(),
        color_branches: true,
        sites: String::new(),
        colors_path: None,
        output_path: None,
    }
}

#[test]
fn figtree_output_has_nexus_structure() {
    let dir = TempDir::new().unwrap();
    let (tree_path, align_path) = write_inputs(&dir);
    let options = options(tree_path, align_path);

    let input = Input::load(&options).unwrap();
    cladepaint::run(&input).unwrap();

    // Default output name gets the col_ prefix, next to the tree file.
    let out_path = dir.path().join("col_example.nwk");
    let text = fs::read_to_string(out_path).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "#NEXUS");
    assert_eq!(lines[1], "Begin Taxa;");
    // 3 leaves, 2 sites
    assert_eq!(lines[2], "\tDimensions NTax=6;");
    assert!(lines[3].starts_with("\tTaxLabels "));
    assert!(lines[3].contains("A__site_1__Q[&!color=#FF00CC]"));
    assert!(lines[3].contains("C__site_2__R[&!color=#990000]"));
    assert_eq!(lines[4], "End;");
    assert_eq!(lines[5], "Begin Trees;");
    assert!(lines[6].starts_with("\tTree tree1="));
    assert!(lines[7].starts_with("\tTree tree2="));
    assert_eq!(lines[8], "End;");
    // Site 2 is all R, so its tree is R-coloured to the root.
    assert!(lines[7].contains(")[&!color=#990000];"));
}

#[test]
fn newick_output_writes_one_tree_per_site() {
    let dir = TempDir::new().unwrap();
    let (tree_path, align_path) = write_inputs(&dir);
    let mut options = options(tree_path, align_path);
    options.output_format = "newick".to_string();
    options.sites = "2".to_string();
    options.output_path = Some(dir.path().join("out.nwk"));

    let input = Input::load(&options).unwrap();
    cladepaint::run(&input).unwrap();

    let text = fs::read_to_string(dir.path().join("out.nwk")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("A__site_2__R"));
    assert!(lines[0].ends_with(";"));
}

#[test]
fn taxon_mismatch_is_reported_before_any_output() {
    let dir = TempDir::new().unwrap();
    let tree_path = dir.path().join("example.nwk");
    let align_path = dir.path().join("example.fasta");
    fs::write(&tree_path, TREE).unwrap();
    fs::write(&align_path, ">A\nQR\n>B\nQR\n>D\nRR\n").unwrap();

    let options = options(tree_path, align_path);
    let err = Input::load(&options).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("C"));
    assert!(message.contains("D"));
    assert!(!dir.path().join("col_example.nwk").exists());
}

#[test]
fn custom_colors_and_explicit_output_path() {
    let dir = TempDir::new().unwrap();
    let (tree_path, align_path) = write_inputs(&dir);
    let colors_path = dir.path().join("colors.csv");
    fs::write(&colors_path, "Q,#111111\nR,#222222\n").unwrap();

    let mut options = options(tree_path, align_path);
    options.colors_path = Some(colors_path);
    options.output_path = Some(dir.path().join("custom.trees"));
    options.sites = "1".to_string();

    let input = Input::load(&options).unwrap();
    cladepaint::run(&input).unwrap();

    let text = fs::read_to_string(dir.path().join("custom.trees")).unwrap();
    assert!(text.contains("A__site_1__Q[&!color=#111111]"));
    assert!(text.contains("C__site_1__R[&!color=#222222]"));
    // The root split stays ambiguous regardless of the palette.
    assert!(text.contains("[&!color=#797D7F]"));
}

#[test]
fn missing_output_directory_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (tree_path, align_path) = write_inputs(&dir);
    let mut options = options(tree_path, align_path);
    options.output_path = Some(dir.path().join("no_such_dir").join("out.trees"));

    assert!(Input::load(&options).is_err());
}
