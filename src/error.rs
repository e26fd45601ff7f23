//! Error handling for cladepaint.
//!
//! All failures are deterministic input problems and fail fast: no retries,
//! no partial output. Each variant carries enough context (offending token,
//! symbol, or name sets) to tell the user what to fix.

use crate::parser::ParsingError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cladepaint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cladepaint operations
#[derive(Error, Debug)]
pub enum Error {
    /// A format name the tool does not recognise (tree, alignment, or output).
    #[error("unrecognised {what} format '{name}' (supported: {supported})")]
    Format {
        what: &'static str,
        name: String,
        supported: &'static str,
    },

    /// An input source is missing or unreadable.
    #[error("cannot read {what} '{}': {source}", .path.display())]
    Read {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input source is structurally malformed (e.g. ragged alignment rows,
    /// a colour table line that does not split into two fields).
    #[error("invalid {what}: {reason}")]
    Invalid { what: &'static str, reason: String },

    /// Tree leaf names and alignment sequence names are not the same set.
    #[error(
        "tree and alignment names don't match (missing in alignment: [{}]; missing in tree: [{}])",
        .missing_in_alignment.join(", "),
        .missing_in_tree.join(", ")
    )]
    TaxonMismatch {
        missing_in_alignment: Vec<String>,
        missing_in_tree: Vec<String>,
    },

    /// The site-range expression could not be parsed or is out of bounds.
    #[error("invalid site selection: {0}")]
    SiteExpression(#[from] SiteExpressionError),

    /// A state symbol encountered during colouring has no colour table entry
    /// (or is not part of the state alphabet). `site` is 1-based.
    #[error("state '{symbol}' at site {site} has no colour table entry")]
    ColorLookup { symbol: char, site: usize },

    /// A combined state vector had more than one set bit at an internal
    /// vertex. This cannot happen for one-hot leaf vectors combined by AND;
    /// observing it means a broken invariant, not bad input. `site` is 1-based.
    #[error(
        "internal consistency violation: state vector at vertex {vertex} has {set_bits} set bits for site {site}"
    )]
    InternalInvariant {
        vertex: usize,
        site: usize,
        set_bits: usize,
    },

    /// Tree file could not be parsed (either input format).
    #[error("cannot read tree: {0}")]
    TreeParse(#[from] ParsingError),

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in the site-range expression, each kind distinguishable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SiteExpressionError {
    /// Expression is non-empty but contains no digit at all.
    #[error("no digits given for site numbers")]
    NoDigits,

    /// A token could not be parsed as an integer or a range.
    #[error("don't understand site token '{token}'")]
    Token { token: String },

    /// A range token `a-b` with `a > b`.
    #[error("invalid site range '{token}' (start greater than end)")]
    InvalidRange { token: String },

    /// A 1-based site number outside `1..=length`.
    #[error("site number {site} outside alignment length {length}")]
    OutOfRange { site: usize, length: usize },
}
