//! Relaxed PHYLIP alignment reader.
//!
//! Expects a `ntax nchar` header line, then one `name sequence` line per
//! taxon with whitespace between name and sequence (relaxed names, no
//! 10-character padding). Interleaved files are not supported.

use super::Alignment;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

pub fn parse_str(text: &str) -> Result<Alignment> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().ok_or_else(|| Error::Invalid {
        what: "alignment",
        reason: "empty PHYLIP file".to_string(),
    })?;
    let mut header_fields = header.split_whitespace();
    let ntax: usize = header_fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| bad_header(header))?;
    let nchar: usize = header_fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| bad_header(header))?;
    if header_fields.next().is_some() {
        return Err(bad_header(header));
    }

    let mut rows = Vec::with_capacity(ntax);
    for line in lines {
        let mut fields = line.trim().splitn(2, char::is_whitespace);
        let name = fields.next().unwrap_or("").to_string();
        let seq: String = fields
            .next()
            .unwrap_or("")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if name.is_empty() || seq.is_empty() {
            return Err(Error::Invalid {
                what: "alignment",
                reason: format!("PHYLIP line is not 'name sequence': '{line}'"),
            });
        }
        rows.push((name, seq));
    }

    if rows.len() != ntax {
        return Err(Error::Invalid {
            what: "alignment",
            reason: format!("header declares {ntax} taxa but found {}", rows.len()),
        });
    }
    let alignment = Alignment::new(rows)?;
    if alignment.length() != nchar {
        return Err(Error::Invalid {
            what: "alignment",
            reason: format!(
                "header declares {nchar} columns but sequences have {}",
                alignment.length()
            ),
        });
    }
    Ok(alignment)
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

fn bad_header(header: &str) -> Error {
    Error::Invalid {
        what: "alignment",
        reason: format!("PHYLIP header is not 'ntax nchar': '{header}'"),
    }
}
