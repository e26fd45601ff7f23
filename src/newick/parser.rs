use crate::model::{LeafLabelMap, Tree, VertexIndex};
use crate::model::vertex::BranchLength;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

/// Newick label delimiters: parentheses, comma, colon, semicolon, whitespace, brackets
const NEWICK_LABEL_DELIMITERS: &[u8] = b"([,:; \n\t\r)]";

/// Default guess for number of leaves, used to pre-size the label map
const DEFAULT_NUM_LEAVES_GUESS: usize = 16;

/// Parser for Newick format rooted phylogenetic [Tree]s.
///
/// Supports multifurcating trees: an internal vertex may have any number of
/// children. Leaf labels are collected into a [LeafLabelMap] shared with the
/// rest of the pipeline (alignment rows reference the same indices).
///
/// # Format
/// The Newick format has the following structure:
/// * `tree ::= internal_vertex [label] [branch_length] ';'`
/// * `vertex ::= leaf | internal_vertex`
/// * `internal_vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length]`
/// * `leaf ::= label [branch_length]`
/// * `branch_length ::= ':' number`
///
/// Furthermore:
/// * Whitespace can occur between elements, just not within an unquoted label
///   or a branch_length
/// * Comments are square brackets and can occur anywhere whitespace can
/// * Labels on internal vertices (support values and the like) are parsed and
///   discarded; the colouring pipeline writes its own internal annotations
///
/// # Example
/// ```
/// use cladepaint::newick::NewickParser;
/// use cladepaint::parser::byte_parser::ByteParser;
///
/// let mut byte_parser = ByteParser::from_str("((A:1.0,B:1.0):0.5,C:1.5);");
///
/// let mut newick_parser = NewickParser::new();
/// let tree = newick_parser.parse(&mut byte_parser).unwrap();
/// let labels = newick_parser.into_leaf_label_map();
///
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(labels.num_labels(), 3);
/// ```
pub struct NewickParser {
    labels: LeafLabelMap,
}

impl NewickParser {
    /// Creates a new `NewickParser` with an empty label map.
    pub fn new() -> Self {
        Self {
            labels: LeafLabelMap::new(DEFAULT_NUM_LEAVES_GUESS),
        }
    }

    /// Consumes the parser and returns the accumulated [LeafLabelMap].
    ///
    /// Call after parsing to retrieve the mapping of leaf labels to indices.
    pub fn into_leaf_label_map(self) -> LeafLabelMap {
        self.labels
    }

    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick tree string
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse<S: ByteSource>(
        &mut self,
        parser: &mut ByteParser<S>,
    ) -> Result<Tree, ParsingError> {
        let mut tree = Tree::with_leaf_capacity(DEFAULT_NUM_LEAVES_GUESS);

        parser.skip_comment_and_whitespace()?;

        // The root must carry children; a bare leaf is not a tree we can paint.
        if !parser.peek_is(b'(') {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!(
                    "Expected '(' at start of tree but found {:?}",
                    parser.peek().map(|b| b as char)
                ),
            ));
        }

        let children = self.parse_children(parser, &mut tree)?;

        // Root may have a label (discarded) and a branch length (ignored)
        let _ = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let _ = self.parse_branch_length(parser)?;

        // Consume the terminating semicolon
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!(
                    "Expected ';' at end of tree but found {:?}",
                    parser.peek().map(|b| b as char)
                ),
            ));
        }

        tree.add_root(children);

        Ok(tree)
    }

    /// Parses a vertex (either internal vertex or leaf) and returns its index:
    /// - Skips leading comments and whitespace
    /// - Dispatches to `parse_internal_vertex` if starts with `(`, otherwise `parse_leaf`
    fn parse_vertex<S: ByteSource>(
        &mut self,
        parser: &mut ByteParser<S>,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.peek_is(b'(') {
            self.parse_internal_vertex(parser, tree)
        } else {
            self.parse_leaf(parser, tree)
        }
    }

    /// Parses internal vertex, adds it to tree, and returns its index:
    /// - `(child, child, ...) [label] [:branch_length]`
    /// - Internal labels (e.g. support values) are discarded
    fn parse_internal_vertex<S: ByteSource>(
        &mut self,
        parser: &mut ByteParser<S>,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        let children = self.parse_children(parser, tree)?;
        let _ = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let branch_length = self.parse_branch_length(parser)?;

        let index = tree.add_internal_vertex(children, branch_length);

        Ok(index)
    }

    /// Parses a parenthesised child list `(vertex, vertex, ...)` and returns
    /// the child indices in tree order:
    /// - Expects parser at opening `(`
    ///   (caller should skip leading comments/whitespace)
    fn parse_children<S: ByteSource>(
        &mut self,
        parser: &mut ByteParser<S>,
        tree: &mut Tree,
    ) -> Result<Vec<VertexIndex>, ParsingError> {
        // Calling methods should have skipped comments and whitespace
        if !parser.consume_if(b'(') {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!(
                    "Expected '(' before children but found {:?}",
                    parser.peek().map(|b| b as char)
                ),
            ));
        }

        let mut children = Vec::with_capacity(2);
        loop {
            children.push(self.parse_vertex(parser, tree)?);

            parser.skip_comment_and_whitespace()?;
            if !parser.consume_if(b',') {
                break;
            }
        }

        if !parser.consume_if(b')') {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!(
                    "Expected ',' or ')' after child but found {:?}",
                    parser.peek().map(|b| b as char)
                ),
            ));
        }

        Ok(children)
    }

    /// Parses leaf vertex and adds it to tree:
    /// - `label[:branch_length]`
    /// - Expects parser at start of label
    ///   (caller should skip leading comments/whitespace)
    fn parse_leaf<S: ByteSource>(
        &mut self,
        parser: &mut ByteParser<S>,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if label.is_empty() {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!(
                    "Expected leaf label but found {:?}",
                    parser.peek().map(|b| b as char)
                ),
            ));
        }

        let label_index = self.labels.get_or_insert(&label);
        let branch_length = self.parse_branch_length(parser)?;

        Ok(tree.add_leaf(branch_length, label_index))
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - [BranchLength] if found branch length and was able to parse it
    /// - `None` if found no branch length
    /// - [ParsingError] if it couldn't parse branch length value
    fn parse_branch_length<S: ByteSource>(
        &mut self,
        parser: &mut ByteParser<S>,
    ) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+' || b == b'e' || b == b'E'
            {
                branch_length_str.push(b as char);
                parser.next(); // consume it
            } else {
                break; // Hit a delimiter like ',', ')', ';', or whitespace
            }
        }

        let value: f64 = branch_length_str.parse().map_err(|_| {
            ParsingError::invalid_newick_string(
                parser,
                format!("Invalid branch length: {}", branch_length_str),
            )
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Branch length must be non-negative and finite: {}", branch_length_str),
            ));
        }
        Ok(Some(BranchLength::new(value)))
    }
}

impl Default for NewickParser {
    fn default() -> Self {
        NewickParser::new()
    }
}
