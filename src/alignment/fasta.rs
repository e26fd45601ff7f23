//! FASTA alignment reader.

use super::Alignment;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Parses an aligned FASTA file. Sequence names are the first
/// whitespace-delimited token of the header line; sequence data may span
/// multiple lines.
pub fn parse_str(text: &str) -> Result<Alignment> {
    let mut rows: Vec<(String, String)> = Vec::new();
    for (line_num, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            let name = header.split_whitespace().next().unwrap_or("").to_string();
            if name.is_empty() {
                return Err(Error::Invalid {
                    what: "alignment",
                    reason: format!("FASTA header without a name at line {}", line_num + 1),
                });
            }
            rows.push((name, String::new()));
        } else {
            match rows.last_mut() {
                Some((_, seq)) => seq.push_str(line.trim()),
                None => {
                    return Err(Error::Invalid {
                        what: "alignment",
                        reason: format!(
                            "sequence data before the first FASTA header at line {}",
                            line_num + 1
                        ),
                    });
                }
            }
        }
    }
    Alignment::new(rows)
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Alignment> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        what: "alignment",
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&text)
}
