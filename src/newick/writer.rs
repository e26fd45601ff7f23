//! Newick format writing, with optional per-site label decorations.

use crate::model::tree::VertexIndex;
use crate::model::vertex::BranchLength;
use crate::model::{LeafLabelMap, Tree};
use crate::paint::AnnotatedTree;
use crate::parser::utils::escape_label;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Writes the given per-site annotated trees to a file in Newick format,
/// one tree per line, in the order given.
///
/// Labels are escaped; site suffixes and colour tags are appended verbatim
/// after escaping so that tree viewers recognise them.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_newick_file(
    file: File,
    tree: &Tree,
    labels: &LeafLabelMap,
    annotated: &[AnnotatedTree],
) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    for site_tree in annotated {
        let newick = to_newick(tree, labels, Some(site_tree));
        writer.write_all(newick.as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Returns the Newick representation of a tree with closing semicolon.
///
/// Leaf labels come from the [LeafLabelMap] and are escaped. When a
/// per-site [AnnotatedTree] is given, each vertex's decoration (site suffix
/// and/or FigTree colour tag) is appended after the escaped label: for a
/// leaf directly after its name, for an internal vertex after the closing
/// parenthesis (where Newick node labels go).
///
/// # Example
/// ```
/// use cladepaint::model::{Tree, LeafLabelMap};
/// use cladepaint::model::vertex::BranchLength;
/// use cladepaint::newick::to_newick;
///
/// let mut tree = Tree::new();
/// let mut labels = LeafLabelMap::new(2);
/// let a = tree.add_leaf(Some(BranchLength::new(1.0)), labels.get_or_insert("A"));
/// let b = tree.add_leaf(Some(BranchLength::new(2.0)), labels.get_or_insert("B"));
/// tree.add_root(vec![a, b]);
///
/// assert_eq!(to_newick(&tree, &labels, None), "(A:1,B:2);");
/// ```
pub fn to_newick(tree: &Tree, labels: &LeafLabelMap, decor: Option<&AnnotatedTree>) -> String {
    /// One pending step of the iterative traversal.
    enum Step {
        Visit(VertexIndex),
        Close(VertexIndex),
        Comma,
    }

    fn push_branch_length(newick: &mut String, branch_length: Option<BranchLength>) {
        if let Some(branch_length) = branch_length {
            newick.push(':');
            newick.push_str(&branch_length.to_string());
        }
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree, labels, decor));

    // Explicit stack instead of recursion, so caterpillar trees cannot
    // exhaust the call stack.
    let mut stack = vec![Step::Visit(tree.root_index())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Visit(index) => {
                let vertex = &tree[index];

                if let Some(children) = vertex.children() {
                    newick.push('(');
                    stack.push(Step::Close(index));
                    for (k, &child) in children.iter().enumerate().rev() {
                        stack.push(Step::Visit(child));
                        if k > 0 {
                            stack.push(Step::Comma);
                        }
                    }
                } else if let Some(label_index) = vertex.label_index() {
                    newick.push_str(&escape_label(&labels[label_index]));
                    if let Some(decor) = decor {
                        newick.push_str(decor.decoration(index));
                    }
                    push_branch_length(&mut newick, vertex.branch_length());
                }
            }
            Step::Comma => newick.push(','),
            Step::Close(index) => {
                let vertex = &tree[index];
                newick.push(')');
                if let Some(decor) = decor {
                    newick.push_str(decor.decoration(index));
                }
                if !vertex.is_root() {
                    push_branch_length(&mut newick, vertex.branch_length());
                }
            }
        }
    }
    newick.push(';');

    newick
}

/// Estimates the length of a Newick string for a given tree, accounting for
/// structure, labels, decorations, and branch lengths. Used to pre-allocate
/// string capacity.
fn estimate_newick_len(
    tree: &Tree,
    labels: &LeafLabelMap,
    decor: Option<&AnnotatedTree>,
) -> usize {
    // Each internal node: "(,)" ~= 3 chars
    const INTERNAL_NODE_CHARS: usize = 3;
    // Branch lengths: ~20 chars each (e.g., ":0.009529961339106089")
    const BRANCH_LENGTH_CHARS: usize = 20;

    let num_internal = tree.num_internal() + 1; // +1 for root
    let structure_capacity = num_internal * INTERNAL_NODE_CHARS;

    let label_capacity: usize = labels.labels().iter().map(|s| escape_label(s).len()).sum();

    let decor_capacity = decor.map_or(0, AnnotatedTree::total_decoration_len);

    let branch_capacity = if tree.vertices_have_branch_lengths() {
        (tree.num_leaves() + num_internal - 1) * BRANCH_LENGTH_CHARS
    } else {
        0
    };

    structure_capacity + label_capacity + decor_capacity + branch_capacity + BUFFER_CHARS
}
