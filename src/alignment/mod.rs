//! Multiple sequence alignments and their pairing with tree leaves.

pub mod fasta;
pub mod phylip;

use crate::error::{Error, Result};
use crate::model::LeafLabelMap;
use std::collections::{HashMap, HashSet};

/// A multiple sequence alignment: named rows of equal length.
///
/// Row order follows the input file; lookups by name go through an index map.
#[derive(Debug, Clone)]
pub struct Alignment {
    rows: Vec<(String, String)>,
    index: HashMap<String, usize>,
    length: usize,
}

impl Alignment {
    /// Builds an alignment from named sequences, rejecting non-ASCII rows,
    /// ragged rows, and duplicate names.
    pub fn new(rows: Vec<(String, String)>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::Invalid {
                what: "alignment",
                reason: "no sequences found".to_string(),
            });
        }
        // state() indexes by byte, so every column must be one byte wide
        if let Some((name, _)) = rows.iter().find(|(_, seq)| !seq.is_ascii()) {
            return Err(Error::Invalid {
                what: "alignment",
                reason: format!("sequence '{name}' contains non-ASCII symbols"),
            });
        }
        let length = rows[0].1.len();
        if length == 0 {
            return Err(Error::Invalid {
                what: "alignment",
                reason: format!("sequence '{}' is empty", rows[0].0),
            });
        }
        let mut index = HashMap::with_capacity(rows.len());
        for (i, (name, seq)) in rows.iter().enumerate() {
            let row_len = seq.len();
            if row_len != length {
                return Err(Error::Invalid {
                    what: "alignment",
                    reason: format!(
                        "sequence '{name}' has {row_len} columns but '{}' has {length}",
                        rows[0].0
                    ),
                });
            }
            if index.insert(name.clone(), i).is_some() {
                return Err(Error::Invalid {
                    what: "alignment",
                    reason: format!("duplicate sequence name '{name}'"),
                });
            }
        }
        Ok(Alignment {
            rows,
            index,
            length,
        })
    }

    /// Number of columns.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of sequences.
    pub fn num_sequences(&self) -> usize {
        self.rows.len()
    }

    /// The symbol at `column` (0-based) of row `row`.
    pub fn state(&self, row: usize, column: usize) -> char {
        self.rows[row].1.as_bytes()[column] as char
    }

    pub fn name(&self, row: usize) -> &str {
        &self.rows[row].0
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(name, _)| name.as_str())
    }
}

/// Pairs tree leaf labels with alignment rows.
///
/// Returns `row_for_label` such that `row_for_label[label_index]` is the
/// alignment row for that leaf. The two name sets must match exactly; any
/// difference is reported in full, both directions, sorted.
pub fn match_taxa(labels: &LeafLabelMap, alignment: &Alignment) -> Result<Vec<usize>> {
    let mut missing_in_alignment = Vec::new();
    let mut row_for_label = Vec::with_capacity(labels.num_labels());
    for label in labels.labels() {
        match alignment.index_of(label) {
            Some(row) => row_for_label.push(row),
            None => missing_in_alignment.push(label.clone()),
        }
    }

    let tree_names: HashSet<&str> = labels.labels().iter().map(String::as_str).collect();
    let mut missing_in_tree: Vec<String> = alignment
        .names()
        .filter(|name| !tree_names.contains(name))
        .map(str::to_string)
        .collect();

    if !missing_in_alignment.is_empty() || !missing_in_tree.is_empty() {
        missing_in_alignment.sort();
        missing_in_tree.sort();
        return Err(Error::TaxonMismatch {
            missing_in_alignment,
            missing_in_tree,
        });
    }
    Ok(row_for_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, s)| (n.to_string(), s.to_string()))
            .collect()
    }

    #[test]
    fn rejects_ragged_rows() {
        let result = Alignment::new(rows(&[("A", "QRS"), ("B", "QR")]));
        assert!(matches!(result, Err(Error::Invalid { .. })));
    }

    #[test]
    fn rejects_non_ascii_rows() {
        let result = Alignment::new(rows(&[("A", "QRS"), ("B", "QRÉ")]));
        match result {
            Err(Error::Invalid { reason, .. }) => assert!(reason.contains("'B'")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_names() {
        let result = Alignment::new(rows(&[("A", "QRS"), ("A", "QRT")]));
        assert!(matches!(result, Err(Error::Invalid { .. })));
    }

    #[test]
    fn state_lookup() {
        let alignment = Alignment::new(rows(&[("A", "QRS"), ("B", "QRT")])).unwrap();
        assert_eq!(alignment.length(), 3);
        assert_eq!(alignment.state(1, 2), 'T');
        assert_eq!(alignment.index_of("B"), Some(1));
        assert_eq!(alignment.index_of("C"), None);
    }

    #[test]
    fn taxon_mismatch_reports_both_directions() {
        let mut labels = LeafLabelMap::new(4);
        labels.get_or_insert("A");
        labels.get_or_insert("B");
        labels.get_or_insert("C");
        let alignment = Alignment::new(rows(&[("A", "Q"), ("B", "Q"), ("D", "Q")])).unwrap();
        match match_taxa(&labels, &alignment) {
            Err(Error::TaxonMismatch {
                missing_in_alignment,
                missing_in_tree,
            }) => {
                assert_eq!(missing_in_alignment, vec!["C".to_string()]);
                assert_eq!(missing_in_tree, vec!["D".to_string()]);
            }
            other => panic!("expected TaxonMismatch, got {other:?}"),
        }
    }

    #[test]
    fn taxon_match_maps_labels_to_rows() {
        let mut labels = LeafLabelMap::new(2);
        labels.get_or_insert("B");
        labels.get_or_insert("A");
        let alignment = Alignment::new(rows(&[("A", "Q"), ("B", "R")])).unwrap();
        let row_for_label = match_taxa(&labels, &alignment).unwrap();
        assert_eq!(row_for_label, vec![1, 0]);
    }
}
