//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [`NewickParser`] to parse Newick format strings into
//! the arena [Tree](crate::model::Tree) model, and a writer that serialises a
//! tree back to Newick with optional per-site annotations (see
//! [crate::paint]).
//!
//! # Quick API
//! * [`parse_str`] - parses a single Newick string
//! * [`parse_file`] - parses a file expected to contain exactly one tree
//!
//! Both return the tree together with its [LeafLabelMap].

mod parser;
pub mod writer;

pub use self::parser::NewickParser;
pub use self::writer::{to_newick, write_newick_file};

use crate::model::{LeafLabelMap, Tree};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::ParsingError;
use std::fs;
use std::path::Path;

/// Parses a single Newick string, returning the [Tree] and its [LeafLabelMap].
///
/// # Example
/// ```
/// use cladepaint::newick::parse_str;
///
/// let (tree, labels) = parse_str("((A:0.1,B:0.2):0.3,C:0.4);").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// assert!(labels.contains_label("C"));
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<(Tree, LeafLabelMap), ParsingError> {
    let mut byte_parser = ByteParser::from_str(newick.as_ref());
    parse_single(&mut byte_parser)
}

/// Parses a Newick file expected to contain exactly one tree,
/// returning the [Tree] and its [LeafLabelMap].
///
/// # Errors
/// Returns a [ParsingError] if the file cannot be read, the Newick string is
/// malformed, or the file contains trailing content after the first tree.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<(Tree, LeafLabelMap), ParsingError> {
    let bytes = fs::read(path)?;
    let mut byte_parser = ByteParser::new(InMemoryByteSource::from_vec(bytes));
    parse_single(&mut byte_parser)
}

/// Parses one tree and requires that nothing but whitespace/comments follows.
fn parse_single<S: ByteSource>(
    byte_parser: &mut ByteParser<S>,
) -> Result<(Tree, LeafLabelMap), ParsingError> {
    let mut newick_parser = NewickParser::new();
    let tree = newick_parser.parse(byte_parser)?;

    byte_parser.skip_comment_and_whitespace()?;
    if !byte_parser.is_eof() {
        return Err(ParsingError::invalid_newick_string(
            byte_parser,
            "Expected exactly one tree, found trailing content".to_string(),
        ));
    }

    Ok((tree, newick_parser.into_leaf_label_map()))
}
