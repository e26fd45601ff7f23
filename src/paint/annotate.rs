//! Annotation rendering: leaf suffixes and FigTree colour tags.
//!
//! Decorations live in a side table indexed by vertex, leaving the tree and
//! its label map untouched. The Newick writer appends each vertex's
//! decoration after the (escaped) label and before the branch length.

use crate::color::{Color, ColorTable};
use crate::error::{Error, Result};
use crate::model::{LeafLabelMap, Tree, VertexIndex};
use crate::parser::utils::escape_label;

use super::colorer::SiteColoring;

/// Per-vertex decoration strings for one coloured site.
#[derive(Debug, Clone)]
pub struct AnnotatedTree {
    site: usize,
    branches_colored: bool,
    decor: Vec<String>,
}

impl AnnotatedTree {
    /// The 0-based alignment column this annotation is for.
    pub fn site(&self) -> usize {
        self.site
    }

    pub fn branches_colored(&self) -> bool {
        self.branches_colored
    }

    /// Decoration appended after the vertex's label, may be empty.
    pub fn decoration(&self, vertex: VertexIndex) -> &str {
        &self.decor[vertex]
    }

    /// Total length of all decorations, for output buffer sizing.
    pub fn total_decoration_len(&self) -> usize {
        self.decor.iter().map(String::len).sum()
    }

    /// Taxon labels for a FigTree taxa block, in the tree's leaf order.
    ///
    /// Each label is the escaped leaf name plus its decoration. When
    /// branches are not coloured the decoration carries no colour tag, so
    /// the tip colour is re-derived from the state symbol the suffix ends
    /// with and appended here; FigTree then colours tip labels either way.
    pub fn taxon_labels(
        &self,
        tree: &Tree,
        labels: &LeafLabelMap,
        table: &ColorTable,
    ) -> Result<Vec<String>> {
        let mut taxa = Vec::with_capacity(tree.num_leaves());
        for leaf in tree.leaves_in_order() {
            let Some(label_index) = leaf.label_index() else {
                continue;
            };
            let mut taxon = escape_label(&labels[label_index]);
            taxon.push_str(&self.decor[leaf.index()]);
            if !self.branches_colored {
                let symbol = taxon.chars().last().unwrap_or_default();
                let color = table.get(symbol).ok_or(Error::ColorLookup {
                    symbol,
                    site: self.site + 1,
                })?;
                taxon.push_str(&color_tag(color));
            }
            taxa.push(taxon);
        }
        Ok(taxa)
    }
}

/// Builds the decoration table for one coloured site.
///
/// Leaves get a `__site_<n>__<STATE>` suffix (`n` 1-based). With
/// `color_branches` every vertex additionally gets a `[&!color=#RRGGBB]`
/// FigTree tag from the site colouring; without it, branches stay untagged
/// and only tip labels end up coloured (via [`AnnotatedTree::taxon_labels`]).
pub fn annotate(tree: &Tree, coloring: &SiteColoring, color_branches: bool) -> AnnotatedTree {
    let site = coloring.site();
    let mut decor = vec![String::new(); tree.num_vertices()];
    for v in tree.post_order_iter() {
        let vertex = v.index();
        let text = &mut decor[vertex];
        if let Some(state) = coloring.leaf_state(vertex) {
            text.push_str(&format!("__site_{}__{}", site + 1, state));
        }
        if color_branches {
            text.push_str(&color_tag(coloring.color(vertex)));
        }
    }
    AnnotatedTree {
        site,
        branches_colored: color_branches,
        decor,
    }
}

fn color_tag(color: Color) -> String {
    format!("[&!color={color}]")
}
