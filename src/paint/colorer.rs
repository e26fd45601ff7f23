//! Ancestral state reconstruction and per-site branch colouring.
//!
//! Each leaf gets a one-hot state vector for the selected column; internal
//! vertices combine their children with a bitwise AND, so an internal vertex
//! keeps a state only when every leaf below it agrees. One surviving bit
//! colours the branch with that state's colour, zero bits colour it with the
//! ambiguous colour, and more than one bit is impossible for one-hot inputs.

use crate::alignment::Alignment;
use crate::color::{Color, ColorTable, StateAlphabet};
use crate::error::{Error, Result};
use crate::model::{Tree, VertexIndex};

/// A set of candidate states, one flag per alphabet symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StateVector(Vec<u8>);

impl StateVector {
    fn ones(len: usize) -> Self {
        StateVector(vec![1; len])
    }

    fn one_hot(len: usize, index: usize) -> Self {
        let mut bits = vec![0; len];
        bits[index] = 1;
        StateVector(bits)
    }

    fn and_assign(&mut self, other: &StateVector) {
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            *a &= b;
        }
    }

    fn count_ones(&self) -> usize {
        self.0.iter().filter(|&&b| b == 1).count()
    }

    /// Index of the single set bit, if exactly one bit is set.
    fn single_index(&self) -> Option<usize> {
        let mut found = None;
        for (i, &b) in self.0.iter().enumerate() {
            if b == 1 {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            }
        }
        found
    }
}

/// Branch colours for one alignment column, indexed by vertex.
///
/// A side table parallel to the tree arena; the tree itself is never
/// modified, so colourings for different sites are independent.
#[derive(Debug, Clone)]
pub struct SiteColoring {
    site: usize,
    colors: Vec<Color>,
    leaf_states: Vec<Option<char>>,
}

impl SiteColoring {
    /// The 0-based alignment column this colouring is for.
    pub fn site(&self) -> usize {
        self.site
    }

    /// Branch colour of the given vertex.
    pub fn color(&self, vertex: VertexIndex) -> Color {
        self.colors[vertex]
    }

    /// The (uppercased) alignment symbol at a leaf; `None` for internals.
    pub fn leaf_state(&self, vertex: VertexIndex) -> Option<char> {
        self.leaf_states[vertex]
    }
}

/// Reconstructs ancestral states and colours every branch of `tree` for one
/// alignment column (`site`, 0-based).
///
/// `row_for_label` maps leaf label indices to alignment rows, as produced by
/// [`crate::alignment::match_taxa`].
pub fn color_site(
    tree: &Tree,
    alignment: &Alignment,
    row_for_label: &[usize],
    alphabet: &StateAlphabet,
    table: &ColorTable,
    site: usize,
) -> Result<SiteColoring> {
    let num_vertices = tree.num_vertices();
    let mut states: Vec<Option<StateVector>> = vec![None; num_vertices];
    let mut colors = vec![table.ambiguous(); num_vertices];
    let mut leaf_states = vec![None; num_vertices];

    for v in tree.post_order_iter() {
        let vertex = v.index();
        let vector = if let Some(label_index) = v.label_index() {
            let row = row_for_label[label_index];
            let symbol = alignment.state(row, site).to_ascii_uppercase();
            let state_index = alphabet.index_of(symbol).ok_or(Error::ColorLookup {
                symbol,
                site: site + 1,
            })?;
            leaf_states[vertex] = Some(symbol);
            StateVector::one_hot(alphabet.len(), state_index)
        } else {
            let children = v.children().unwrap_or(&[]);
            let mut acc = StateVector::ones(alphabet.len());
            for &child in children {
                // post order guarantees the child vectors are present
                acc.and_assign(states[child].as_ref().unwrap());
            }
            acc
        };

        colors[vertex] = match vector.single_index() {
            Some(state_index) => {
                let symbol = alphabet.symbol(state_index);
                table.get(symbol).ok_or(Error::ColorLookup {
                    symbol,
                    site: site + 1,
                })?
            }
            None if vector.count_ones() == 0 => table.ambiguous(),
            None => {
                return Err(Error::InternalInvariant {
                    vertex,
                    site: site + 1,
                    set_bits: vector.count_ones(),
                });
            }
        };
        states[vertex] = Some(vector);
    }

    Ok(SiteColoring {
        site,
        colors,
        leaf_states,
    })
}
