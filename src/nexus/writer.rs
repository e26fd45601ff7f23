//! FigTree-flavoured NEXUS writer.
//!
//! One annotated tree per selected site goes into a single Trees block, and
//! the Taxa block lists the decorated tip labels of every site tree (so
//! NTax is leaves times sites). FigTree reads the `[&!color=...]` tags from
//! both the tip labels and the Newick strings.

use crate::color::ColorTable;
use crate::error::Result;
use crate::model::{LeafLabelMap, Tree};
use crate::newick::to_newick;
use crate::paint::AnnotatedTree;
use std::io;
use std::io::{BufWriter, Write};

const NEXUS_HEADER: &[u8] = b"#NEXUS";
const TAXA_BEGIN: &[u8] = b"Begin Taxa;";
const TREES_BEGIN: &[u8] = b"Begin Trees;";
const BLOCK_END: &[u8] = b"End;";
const DIMENSIONS_NTAX: &[u8] = b"Dimensions NTax=";
const TAXLABELS: &[u8] = b"TaxLabels";
const TREE: &[u8] = b"Tree";

/// Buffered writer producing a FigTree-loadable NEXUS file.
pub struct FigTreeWriter<W: Write> {
    bw: BufWriter<W>,
}

// ============================================================================
// API (public)
// ============================================================================
impl<W: Write> FigTreeWriter<W> {
    pub fn new(writer: W) -> FigTreeWriter<W> {
        FigTreeWriter {
            bw: BufWriter::new(writer),
        }
    }

    /// Writes the complete NEXUS file: Taxa block covering every site tree,
    /// then one `Tree tree<i>=...` command per site.
    pub fn write_figtree(
        &mut self,
        tree: &Tree,
        labels: &LeafLabelMap,
        annotated: &[AnnotatedTree],
        table: &ColorTable,
    ) -> Result<()> {
        self.header()?
            .taxa_block(tree, labels, annotated, table)?
            .trees_block(tree, labels, annotated)?;
        self.bw.flush()?;
        Ok(())
    }
}

// ============================================================================
// Nexus Block & Command Writing (private)
// ============================================================================
impl<W: Write> FigTreeWriter<W> {
    fn header(&mut self) -> io::Result<&mut Self> {
        self.write_all(NEXUS_HEADER)?.newline()?;
        Ok(self)
    }

    fn taxa_block(
        &mut self,
        tree: &Tree,
        labels: &LeafLabelMap,
        annotated: &[AnnotatedTree],
        table: &ColorTable,
    ) -> Result<&mut Self> {
        // "Begin Taxa;"
        self.write_all(TAXA_BEGIN)?.newline()?;

        // "\tDimensions NTax=n;" where n counts tips across all site trees
        let ntax = tree.num_leaves() * annotated.len();
        self.tab()?
            .write_all(DIMENSIONS_NTAX)?
            .write_all(ntax.to_string().as_bytes())?
            .semicolon_ln()?;

        // "\tTaxLabels [label ...];"
        self.tab()?.write_all(TAXLABELS)?;
        for site_tree in annotated {
            for taxon in site_tree.taxon_labels(tree, labels, table)? {
                self.space()?.write_all(taxon.as_bytes())?;
            }
        }
        self.semicolon_ln()?;

        // "End;"
        self.write_all(BLOCK_END)?.newline()?;
        Ok(self)
    }

    fn trees_block(
        &mut self,
        tree: &Tree,
        labels: &LeafLabelMap,
        annotated: &[AnnotatedTree],
    ) -> io::Result<&mut Self> {
        // "Begin Trees;"
        self.write_all(TREES_BEGIN)?.newline()?;

        // "\tTree tree<i>=<newick>" (i starts at 1)
        for (i, site_tree) in annotated.iter().enumerate() {
            let newick = to_newick(tree, labels, Some(site_tree));
            self.tab()?
                .write_all(TREE)?
                .space()?
                .write_all(format!("tree{}", i + 1).as_bytes())?
                .equals()?
                .write_all(newick.as_bytes())?
                .newline()?;
        }

        // "End;"
        self.write_all(BLOCK_END)?.newline()?;
        Ok(self)
    }
}

// ============================================================================
// Little Helpers (private)
// ============================================================================
impl<W: Write> FigTreeWriter<W> {
    fn write_all(&mut self, buf: &[u8]) -> io::Result<&mut Self> {
        self.bw.write_all(buf)?;
        Ok(self)
    }

    fn space(&mut self) -> io::Result<&mut Self> {
        self.bw.write_all(b" ")?;
        Ok(self)
    }

    fn tab(&mut self) -> io::Result<&mut Self> {
        self.bw.write_all(b"\t")?;
        Ok(self)
    }

    fn newline(&mut self) -> io::Result<&mut Self> {
        self.bw.write_all(b"\n")?;
        Ok(self)
    }

    fn semicolon_ln(&mut self) -> io::Result<&mut Self> {
        self.bw.write_all(b";\n")?;
        Ok(self)
    }

    fn equals(&mut self) -> io::Result<&mut Self> {
        self.bw.write_all(b"=")?;
        Ok(self)
    }
}
