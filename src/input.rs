//! Input validation and loading.
//!
//! [`Options`] holds raw, unvalidated settings as they arrive from the
//! command line; [`Input::load`] checks and loads everything up front, so a
//! run either has a fully valid [`Input`] or stops with one clear error
//! before any output is written.

use crate::alignment::{self, Alignment, match_taxa};
use crate::color::{ColorTable, StateAlphabet};
use crate::error::{Error, Result};
use crate::model::{LeafLabelMap, Tree};
use crate::newick;
use crate::nexus;
use crate::sites::parse_site_selection;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prefix for the default output file name.
const OUT_PREFIX: &str = "col_";

/// Tree input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Newick,
    Nexus,
}

impl FromStr for TreeFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "newick" => Ok(TreeFormat::Newick),
            "nexus" => Ok(TreeFormat::Nexus),
            _ => Err(Error::Format {
                what: "tree",
                name: s.to_string(),
                supported: "newick, nexus",
            }),
        }
    }
}

/// Alignment input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    Fasta,
    Phylip,
}

impl FromStr for AlignmentFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fasta" => Ok(AlignmentFormat::Fasta),
            "phylip" => Ok(AlignmentFormat::Phylip),
            _ => Err(Error::Format {
                what: "alignment",
                name: s.to_string(),
                supported: "fasta, phylip",
            }),
        }
    }
}

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// FigTree-flavoured NEXUS.
    Figtree,
    /// Plain Newick, one tree per line.
    Newick,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "figtree" => Ok(OutputFormat::Figtree),
            "newick" => Ok(OutputFormat::Newick),
            _ => Err(Error::Format {
                what: "output",
                name: s.to_string(),
                supported: "figtree, newick",
            }),
        }
    }
}

/// Raw settings before validation.
#[derive(Debug, Clone)]
pub struct Options {
    pub tree_path: PathBuf,
    pub alignment_path: PathBuf,
    pub tree_format: String,
    pub alignment_format: String,
    pub output_format: String,
    pub color_branches: bool,
    pub sites: String,
    pub colors_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

/// Fully validated and loaded inputs, ready for the colouring pass.
#[derive(Debug)]
pub struct Input {
    pub tree: Tree,
    pub labels: LeafLabelMap,
    pub alignment: Alignment,
    pub row_for_label: Vec<usize>,
    pub alphabet: StateAlphabet,
    pub table: ColorTable,
    pub sites: Vec<usize>,
    pub color_branches: bool,
    pub output_format: OutputFormat,
    pub output_path: PathBuf,
}

impl Input {
    /// Validates options and loads every input. Checks run in a fixed order
    /// (formats, tree, alignment, taxon match, output path, sites, colours);
    /// the first failure is returned.
    pub fn load(options: &Options) -> Result<Input> {
        let tree_format: TreeFormat = options.tree_format.parse()?;
        let alignment_format: AlignmentFormat = options.alignment_format.parse()?;
        let output_format: OutputFormat = options.output_format.parse()?;

        read_check(&options.tree_path, "tree file")?;
        let (tree, labels) = match tree_format {
            TreeFormat::Newick => newick::parse_file(&options.tree_path)?,
            TreeFormat::Nexus => nexus::parse_file(&options.tree_path)?,
        };

        let alignment = match alignment_format {
            AlignmentFormat::Fasta => alignment::fasta::parse_file(&options.alignment_path)?,
            AlignmentFormat::Phylip => alignment::phylip::parse_file(&options.alignment_path)?,
        };

        log::debug!(
            "loaded tree with {} leaves, alignment with {} sequences of length {}",
            tree.num_leaves(),
            alignment.num_sequences(),
            alignment.length()
        );

        let row_for_label = match_taxa(&labels, &alignment)?;

        let output_path = resolve_output_path(options)?;

        let sites = parse_site_selection(&options.sites, alignment.length())?;

        let table = match &options.colors_path {
            Some(path) => ColorTable::from_path(path)?,
            None => ColorTable::default_palette(),
        };

        Ok(Input {
            tree,
            labels,
            alignment,
            row_for_label,
            alphabet: StateAlphabet::amino_acid(),
            table,
            sites,
            color_branches: options.color_branches,
            output_format,
            output_path,
        })
    }
}

/// Default output path is the tree file's name prefixed with `col_`, in the
/// tree file's directory. An explicit path must point into an existing
/// directory.
fn resolve_output_path(options: &Options) -> Result<PathBuf> {
    let path = match &options.output_path {
        Some(path) => path.clone(),
        None => {
            let file_name = options
                .tree_path
                .file_name()
                .ok_or_else(|| Error::Invalid {
                    what: "tree file",
                    reason: format!("'{}' has no file name", options.tree_path.display()),
                })?;
            let mut name = std::ffi::OsString::from(OUT_PREFIX);
            name.push(file_name);
            options.tree_path.with_file_name(name)
        }
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(Error::Invalid {
                what: "output path",
                reason: format!("directory '{}' does not exist", parent.display()),
            });
        }
    }
    Ok(path)
}

fn read_check(path: &Path, what: &'static str) -> Result<()> {
    if !path.is_file() {
        return Err(Error::Read {
            what,
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("Newick".parse::<TreeFormat>().unwrap(), TreeFormat::Newick);
        assert_eq!("NEXUS".parse::<TreeFormat>().unwrap(), TreeFormat::Nexus);
        assert_eq!(
            "FASTA".parse::<AlignmentFormat>().unwrap(),
            AlignmentFormat::Fasta
        );
        assert_eq!(
            "FigTree".parse::<OutputFormat>().unwrap(),
            OutputFormat::Figtree
        );
    }

    #[test]
    fn unknown_format_is_an_error() {
        assert!(matches!(
            "phyloxml".parse::<TreeFormat>(),
            Err(Error::Format { what: "tree", .. })
        ));
        assert!(matches!(
            "stockholm".parse::<AlignmentFormat>(),
            Err(Error::Format {
                what: "alignment",
                ..
            })
        ));
        assert!(matches!(
            "svg".parse::<OutputFormat>(),
            Err(Error::Format { what: "output", .. })
        ));
    }

    #[test]
    fn default_output_path_gets_prefix() {
        let options = Options {
            tree_path: PathBuf::from("/tmp/example.nwk"),
            alignment_path: PathBuf::from("/tmp/example.fasta"),
            tree_format: "newick".to_string(),
            alignment_format: "fasta".to_string(),
            output_format: "figtree".to_string(),
            color_branches: true,
            sites: String::new(),
            colors_path: None,
            output_path: None,
        };
        let path = resolve_output_path(&options).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/col_example.nwk"));
    }
}
