//! NEXUS tree input.
//!
//! Reads a NEXUS file and extracts the single tree from its `Trees` block.
//! All other blocks (`Taxa`, `Characters`, ...) are skipped command by
//! command. An optional `Translate` command is honoured: leaf keys in the
//! tree are replaced by the labels the table maps them to.

use crate::model::{LeafLabelMap, Tree};
use crate::newick::NewickParser;
use crate::parser::byte_parser::{ByteParser, ConsumeMode};
use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::ParsingError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// NEXUS word delimiters: whitespace, separators, and comment opener
const NEXUS_WORD_DELIMITERS: &[u8] = b" \t\n\r,;=[";

/// Parses a NEXUS string containing exactly one tree,
/// returning the [Tree] and its [LeafLabelMap].
///
/// # Example
/// ```
/// use cladepaint::nexus::parse_str;
///
/// let text = "#NEXUS\nBegin Trees;\n\tTree t1=((A:0.1,B:0.2):0.3,C:0.4);\nEnd;\n";
/// let (tree, labels) = parse_str(text).unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// assert!(labels.contains_label("C"));
/// ```
pub fn parse_str<S: AsRef<str>>(text: S) -> Result<(Tree, LeafLabelMap), ParsingError> {
    let mut byte_parser = ByteParser::from_str(text.as_ref());
    parse_nexus(&mut byte_parser)
}

/// Parses a NEXUS file containing exactly one tree,
/// returning the [Tree] and its [LeafLabelMap].
///
/// # Errors
/// Returns a [ParsingError] if the file cannot be read, the `#NEXUS` header
/// is missing, no `Trees` block with a tree is present, or the block holds
/// more than one tree.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<(Tree, LeafLabelMap), ParsingError> {
    let bytes = fs::read(path)?;
    let mut byte_parser = ByteParser::new(InMemoryByteSource::from_vec(bytes));
    parse_nexus(&mut byte_parser)
}

/// Parses the header, then walks blocks until the `Trees` block is found.
fn parse_nexus<S: ByteSource>(
    parser: &mut ByteParser<S>,
) -> Result<(Tree, LeafLabelMap), ParsingError> {
    parse_header(parser)?;

    loop {
        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::invalid_nexus_block(
                parser,
                "No Trees block found".to_string(),
            ));
        }

        let word = parser.parse_label(NEXUS_WORD_DELIMITERS)?;
        if !word.eq_ignore_ascii_case("begin") {
            return Err(ParsingError::invalid_nexus_block(
                parser,
                format!("Expected 'Begin' but found '{}'", word),
            ));
        }

        let name = parser.parse_label(NEXUS_WORD_DELIMITERS)?;
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            return Err(ParsingError::invalid_nexus_block(
                parser,
                format!("Expected ';' after block name '{}'", name),
            ));
        }

        if name.eq_ignore_ascii_case("trees") {
            return parse_trees_block(parser);
        }

        skip_block(parser)?;
    }
}

/// Consumes the `#NEXUS` header (case-insensitive).
fn parse_header<S: ByteSource>(parser: &mut ByteParser<S>) -> Result<(), ParsingError> {
    parser.skip_comment_and_whitespace()?;
    if !parser.consume_if(b'#') {
        return Err(ParsingError::missing_nexus_header(parser));
    }

    let word = parser.parse_label(NEXUS_WORD_DELIMITERS)?;
    if !word.eq_ignore_ascii_case("nexus") {
        return Err(ParsingError::missing_nexus_header(parser));
    }

    Ok(())
}

/// Skips an entire block command by command until `End;`.
fn skip_block<S: ByteSource>(parser: &mut ByteParser<S>) -> Result<(), ParsingError> {
    loop {
        parser.skip_comment_and_whitespace()?;

        let word = parser.parse_label(NEXUS_WORD_DELIMITERS)?;
        if word.eq_ignore_ascii_case("end") {
            parser.skip_comment_and_whitespace()?;
            if !parser.consume_if(b';') {
                return Err(ParsingError::invalid_nexus_block(
                    parser,
                    "Expected ';' after 'End'".to_string(),
                ));
            }
            return Ok(());
        }

        if word.is_empty() && parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }

        // Swallow the rest of the command
        if !parser.consume_until(b';', ConsumeMode::Inclusive) {
            return Err(ParsingError::unexpected_eof(parser));
        }
    }
}

/// Parses the `Trees` block: an optional `Translate` command and exactly one
/// `Tree <name> = <newick>;` command. Unknown commands are skipped.
fn parse_trees_block<S: ByteSource>(
    parser: &mut ByteParser<S>,
) -> Result<(Tree, LeafLabelMap), ParsingError> {
    let mut translation: Option<HashMap<String, String>> = None;
    let mut parsed: Option<(Tree, LeafLabelMap)> = None;

    loop {
        parser.skip_comment_and_whitespace()?;

        let word = parser.parse_label(NEXUS_WORD_DELIMITERS)?;
        if word.eq_ignore_ascii_case("end") {
            parser.skip_comment_and_whitespace()?;
            if !parser.consume_if(b';') {
                return Err(ParsingError::invalid_nexus_block(
                    parser,
                    "Expected ';' after 'End'".to_string(),
                ));
            }
            break;
        } else if word.eq_ignore_ascii_case("translate") {
            translation = Some(parse_translate(parser)?);
        } else if word.eq_ignore_ascii_case("tree") {
            if parsed.is_some() {
                return Err(ParsingError::invalid_nexus_block(
                    parser,
                    "Expected exactly one tree, found a second Tree command".to_string(),
                ));
            }
            parsed = Some(parse_tree_command(parser)?);
        } else if word.is_empty() {
            if parser.is_eof() {
                return Err(ParsingError::unexpected_eof(parser));
            }
            // Stray separator, e.g. a doubled ';'
            parser.next();
        } else if !parser.consume_until(b';', ConsumeMode::Inclusive) {
            return Err(ParsingError::unexpected_eof(parser));
        }
    }

    let (tree, labels) = parsed.ok_or_else(|| {
        ParsingError::invalid_nexus_block(parser, "Trees block contains no tree".to_string())
    })?;

    match translation {
        Some(table) => Ok((tree, resolve_translation(parser, labels, &table)?)),
        None => Ok((tree, labels)),
    }
}

/// Parses a `Translate` command: comma-separated `key label` pairs ending
/// with `;`. Keys and labels may be quoted.
fn parse_translate<S: ByteSource>(
    parser: &mut ByteParser<S>,
) -> Result<HashMap<String, String>, ParsingError> {
    let mut table = HashMap::new();

    loop {
        let key = parser.parse_label(NEXUS_WORD_DELIMITERS)?;
        if key.is_empty() {
            return Err(ParsingError::invalid_nexus_block(
                parser,
                "Expected key in Translate command".to_string(),
            ));
        }

        let label = parser.parse_label(NEXUS_WORD_DELIMITERS)?;
        if label.is_empty() {
            return Err(ParsingError::invalid_nexus_block(
                parser,
                format!("Expected label after Translate key '{}'", key),
            ));
        }

        table.insert(key, label);

        parser.skip_comment_and_whitespace()?;
        if parser.consume_if(b',') {
            continue;
        }
        if parser.consume_if(b';') {
            return Ok(table);
        }
        return Err(ParsingError::invalid_nexus_block(
            parser,
            "Expected ',' or ';' after Translate pair".to_string(),
        ));
    }
}

/// Parses a `Tree <name> = <newick>;` command (the `Tree` word is already
/// consumed). Rooted-ness comments like `[&R]` before the Newick string are
/// skipped by the Newick parser.
fn parse_tree_command<S: ByteSource>(
    parser: &mut ByteParser<S>,
) -> Result<(Tree, LeafLabelMap), ParsingError> {
    // Tree name, possibly quoted, is not used further
    let _ = parser.parse_label(NEXUS_WORD_DELIMITERS)?;

    parser.skip_comment_and_whitespace()?;
    if !parser.consume_if(b'=') {
        return Err(ParsingError::invalid_nexus_block(
            parser,
            "Expected '=' after tree name".to_string(),
        ));
    }

    let mut newick_parser = NewickParser::new();
    let tree = newick_parser.parse(parser)?;

    Ok((tree, newick_parser.into_leaf_label_map()))
}

/// Replaces leaf keys with the labels the translation table maps them to.
/// Keys without an entry keep their own name. Index order is preserved so
/// the tree's label indices stay valid.
fn resolve_translation<S: ByteSource>(
    parser: &ByteParser<S>,
    keys: LeafLabelMap,
    table: &HashMap<String, String>,
) -> Result<LeafLabelMap, ParsingError> {
    let mut labels = LeafLabelMap::new(keys.num_labels());

    for key in keys.labels() {
        let label = table.get(key).map(String::as_str).unwrap_or(key);
        labels.get_or_insert(label);
    }

    // A collision would silently alias two leaves to the same index
    if labels.num_labels() != keys.num_labels() {
        return Err(ParsingError::invalid_nexus_block(
            parser,
            "Translate table maps two keys to the same label".to_string(),
        ));
    }

    Ok(labels)
}
