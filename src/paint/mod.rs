//! The colouring pipeline: ancestral reconstruction, branch colours, and
//! label decorations, one independent pass per selected site.

pub mod annotate;
pub mod colorer;

pub use annotate::{AnnotatedTree, annotate};
pub use colorer::{SiteColoring, color_site};

use crate::alignment::Alignment;
use crate::color::{ColorTable, StateAlphabet};
use crate::error::Result;
use crate::model::Tree;

/// Colours and annotates `tree` for every selected site.
///
/// `sites` holds 0-based columns in output order; repeats simply produce
/// repeated annotated trees. The tree itself is shared and never modified.
pub fn paint_sites(
    tree: &Tree,
    alignment: &Alignment,
    row_for_label: &[usize],
    alphabet: &StateAlphabet,
    table: &ColorTable,
    sites: &[usize],
    color_branches: bool,
) -> Result<Vec<AnnotatedTree>> {
    let mut annotated = Vec::with_capacity(sites.len());
    for &site in sites {
        let coloring = color_site(tree, alignment, row_for_label, alphabet, table, site)?;
        annotated.push(annotate(tree, &coloring, color_branches));
    }
    Ok(annotated)
}
