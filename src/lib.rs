//! Cladepaint colours phylogenetic trees by the states of a multiple
//! sequence alignment, one tree per alignment column.
//!
//! For each selected site, every leaf takes the colour of its alignment
//! symbol and every internal branch takes a colour by ancestral state
//! reconstruction: an ancestor is coloured with a state only when all leaves
//! below it carry that state, otherwise it gets a neutral "ambiguous"
//! colour. The coloured trees are written as a FigTree-loadable NEXUS file
//! or as plain Newick, with tip labels suffixed by site and state
//! (`taxonA__site_3__Q`) and colours carried as FigTree `[&!color=#RRGGBB]`
//! tags.
//!
//! Core pieces:
//! - [model]: arena-pattern [Tree](model::Tree) + [LeafLabelMap](model::LeafLabelMap);
//!   leaves store only label indices, vertices are addressed by index.
//! - [newick] / [nexus]: tree input and output.
//! - [alignment]: FASTA and relaxed PHYLIP readers and tree/alignment
//!   taxon matching.
//! - [paint]: per-site ancestral colouring and label decoration. The input
//!   tree is shared across all sites; colours and decorations live in side
//!   tables keyed by vertex index, so sites never interfere.
//! - [color] / [sites] / [input]: colour tables, site-range expressions,
//!   and upfront input validation.
//!
//! # Example
//!
//! ```no_run
//! use cladepaint::input::{Input, Options};
//! use std::path::PathBuf;
//!
//! let options = Options {
//!     tree_path: PathBuf::from("example.nwk"),
//!     alignment_path: PathBuf::from("example.fasta"),
//!     tree_format: "newick".to_string(),
//!     alignment_format: "fasta".to_string(),
//!     output_format: "figtree".to_string(),
//!     color_branches: true,
//!     sites: "1-5".to_string(),
//!     colors_path: None,
//!     output_path: None,
//! };
//! let input = Input::load(&options)?;
//! cladepaint::run(&input)?;
//! # Ok::<(), cladepaint::error::Error>(())
//! ```

pub mod alignment;
pub mod color;
pub mod error;
pub mod input;
pub mod model;
pub mod newick;
pub mod nexus;
pub mod paint;
pub mod parser;
pub mod sites;

use crate::error::Result;
use crate::input::{Input, OutputFormat};
use crate::nexus::FigTreeWriter;
use crate::paint::paint_sites;
use std::fs::File;

/// Runs the full colouring pass on loaded inputs and writes the output file.
pub fn run(input: &Input) -> Result<()> {
    let annotated = paint_sites(
        &input.tree,
        &input.alignment,
        &input.row_for_label,
        &input.alphabet,
        &input.table,
        &input.sites,
        input.color_branches,
    )?;

    log::info!(
        "coloured {} site(s) of a tree with {} leaves",
        annotated.len(),
        input.tree.num_leaves()
    );

    let file = File::create(&input.output_path)?;
    match input.output_format {
        OutputFormat::Figtree => {
            FigTreeWriter::new(file).write_figtree(
                &input.tree,
                &input.labels,
                &annotated,
                &input.table,
            )?;
        }
        OutputFormat::Newick => {
            newick::write_newick_file(file, &input.tree, &input.labels, &annotated)?;
        }
    }
    log::info!("wrote {}", input.output_path.display());
    Ok(())
}
