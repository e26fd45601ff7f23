//! NEXUS input and FigTree-flavoured NEXUS output.
//!
//! [`parse_str`] and [`parse_file`] read a NEXUS file holding exactly one
//! tree in its `Trees` block (optional `Translate` table supported), while
//! [`FigTreeWriter`] produces the annotated output file.

pub mod reader;
pub mod writer;

pub use reader::{parse_file, parse_str};
pub use writer::FigTreeWriter;
