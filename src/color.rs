//! Colours, the state alphabet, and the state-to-colour table.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Hex colour drawn for branches where no single state is reconstructed.
const AMBIGUOUS_COLOR: Color = Color {
    r: 0x79,
    g: 0x7D,
    b: 0x7F,
};

/// An RGB colour, written as an uppercase hex triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parses `#RRGGBB` (case-insensitive hex digits, leading `#` required).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color { r, g, b })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// The ordered set of state symbols a site may take.
///
/// The index of a symbol in the alphabet is the bit position used by the
/// colouring pass, so the ordering is fixed.
#[derive(Debug, Clone)]
pub struct StateAlphabet {
    symbols: Vec<char>,
}

impl StateAlphabet {
    /// The 20 amino acids plus stop (`*`), gap (`-`) and unknown (`X`).
    pub fn amino_acid() -> Self {
        StateAlphabet {
            symbols: "ACDEFGHIKLMNPQRSTVWY*-X".chars().collect(),
        }
    }

    /// Position of `symbol` in the alphabet, if present. Case-sensitive;
    /// callers normalise to uppercase first.
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|&c| c == symbol)
    }

    pub fn symbol(&self, index: usize) -> char {
        self.symbols[index]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Maps state symbols to branch colours.
#[derive(Debug, Clone)]
pub struct ColorTable {
    map: HashMap<char, Color>,
    ambiguous: Color,
}

impl ColorTable {
    /// The built-in amino-acid palette.
    ///
    /// Stop, gap, and unknown get their own greys: the ambiguous colour is
    /// reserved for branches where reconstruction found no unanimous state,
    /// so no alphabet symbol may share it.
    pub fn default_palette() -> Self {
        let entries = [
            ('A', "#FF0000"),
            ('C', "#009933"),
            ('D', "#990000"),
            ('E', "#FF0066"),
            ('F', "#6666FF"),
            ('G', "#00CC33"),
            ('H', "#FFCC00"),
            ('I', "#660066"),
            ('K', "#CC3300"),
            ('L', "#00CCFF"),
            ('M', "#FF9900"),
            ('N', "#FF9966"),
            ('P', "#CC0099"),
            ('Q', "#FF00CC"),
            ('R', "#990000"),
            ('S', "#336600"),
            ('T', "#FF6699"),
            ('V', "#FF66FF"),
            ('W', "#0000FF"),
            ('Y', "#0099FF"),
            ('*', "#4D4D4D"),
            ('-', "#B3B3B3"),
            ('X', "#999999"),
        ];
        let mut map = HashMap::with_capacity(entries.len());
        for (symbol, hex) in entries {
            let color = Color::from_hex(hex).unwrap();
            map.insert(symbol, color);
        }
        ColorTable {
            map,
            ambiguous: AMBIGUOUS_COLOR,
        }
    }

    /// Parses a colour table from `symbol,#RRGGBB` lines. Blank lines are
    /// skipped; anything else malformed is an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut map = HashMap::new();
        for (line_num, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split(',');
            let symbol_field = fields.next().unwrap_or("").trim();
            let color_field = fields.next().unwrap_or("").trim();
            if fields.next().is_some() || symbol_field.is_empty() || color_field.is_empty() {
                return Err(Error::Invalid {
                    what: "colour file",
                    reason: format!(
                        "line {} is not of the form 'symbol,#RRGGBB': '{line}'",
                        line_num + 1
                    ),
                });
            }
            let mut chars = symbol_field.chars();
            let symbol = chars.next().unwrap().to_ascii_uppercase();
            if chars.next().is_some() {
                return Err(Error::Invalid {
                    what: "colour file",
                    reason: format!("line {}: '{symbol_field}' is not a single symbol", line_num + 1),
                });
            }
            let color = Color::from_hex(color_field).ok_or_else(|| Error::Invalid {
                what: "colour file",
                reason: format!(
                    "line {}: '{color_field}' is not a hex colour of the form #RRGGBB",
                    line_num + 1
                ),
            })?;
            map.insert(symbol, color);
        }
        if map.is_empty() {
            return Err(Error::Invalid {
                what: "colour file",
                reason: "no colour entries found".to_string(),
            });
        }
        Ok(ColorTable {
            map,
            ambiguous: AMBIGUOUS_COLOR,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Read {
            what: "colour file",
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Colour for a state symbol, if one is defined.
    pub fn get(&self, symbol: char) -> Option<Color> {
        self.map.get(&symbol).copied()
    }

    /// Colour used when the reconstructed state is ambiguous.
    pub fn ambiguous(&self) -> Color {
        self.ambiguous
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::default_palette()
    }
}
