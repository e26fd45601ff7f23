//! Label escaping for Newick/NEXUS output.
//!
//! Taxon labels may contain characters that are structural in tree formats
//! (parentheses, commas, colons, ...). Writers escape such labels by quoting;
//! decorations like the FigTree colour tag are appended *after* escaping so
//! they stay recognisable to tree viewers.

/// Checks if a label is already escaped:
/// - wrapped in single quotes and each internal single quote doubled, or
/// - contains no space and no special characters
///
/// # Examples
/// ```
/// # use cladepaint::parser::utils::is_escaped;
/// assert_eq!(is_escaped("taxonX"), true);
/// assert_eq!(is_escaped("taxon X"), false);
/// assert_eq!(is_escaped("taxon_X"), true);
/// assert_eq!(is_escaped("taxon(X)"), false);
/// assert_eq!(is_escaped("'taxon X'"), true);
/// assert_eq!(is_escaped("'St John''s wort'"), true);
/// assert_eq!(is_escaped("'St John's wort'"), false); // unescaped internal quote
/// ```
pub fn is_escaped(label: &str) -> bool {
    if is_single_quoted(label) {
        // Check that every internal single quote is escaped (doubled)
        let inner = &label[1..label.len() - 1];
        let mut prev = ' ';
        for char in inner.chars() {
            if prev == '\'' {
                if char != '\'' {
                    return false;
                }
                // This pair of quotes is fine, reset
                prev = ' ';
            } else {
                prev = char;
            }
        }

        true
    } else {
        !label.chars().any(is_special)
    }
}

/// Checks if a label is enclosed in single quotes.
pub fn is_single_quoted(label: &str) -> bool {
    label.starts_with('\'') && label.ends_with('\'') && label.len() >= 2
}

/// Characters that are structural in Newick/NEXUS and force quoting
/// (plus the space, which can alternatively become an underscore).
fn is_special(c: char) -> bool {
    matches!(
        c,
        ' ' | ',' | ';' | '\t' | '\n' | '\r' | '(' | ')' | ':' | '[' | ']' | '\''
    )
}

/// Escapes a label for safe use in Newick and NEXUS output.
///
/// Labels containing special characters are wrapped in single quotes, with
/// internal single quotes doubled. Labels whose only special character is a
/// space get spaces replaced by underscores instead. Already-escaped labels
/// are returned as-is.
///
/// # Examples
/// ```
/// # use cladepaint::parser::utils::escape_label;
/// assert_eq!(escape_label("taxonX"), "taxonX");
/// assert_eq!(escape_label("taxon X"), "taxon_X");
/// assert_eq!(escape_label("taxon(X)"), "'taxon(X)'");
/// assert_eq!(escape_label("'taxon X'"), "'taxon X'");
/// assert_eq!(escape_label("St John's wort"), "'St John''s wort'");
/// ```
pub fn escape_label(label: &str) -> String {
    // Don't double-escape
    if is_escaped(label) {
        return label.to_string();
    }

    // Already quoted but with unescaped internal quotes: fix those
    if is_single_quoted(label) {
        let inner = &label[1..label.len() - 1];
        let mut fixed = String::with_capacity(inner.len() + 3);
        let mut chars = inner.chars().peekable();

        fixed.push('\'');
        while let Some(ch) = chars.next() {
            fixed.push(ch);
            if ch == '\'' {
                if chars.peek() == Some(&'\'') {
                    // Already escaped pair, keep both
                    fixed.push(chars.next().unwrap());
                } else {
                    fixed.push('\'');
                }
            }
        }
        fixed.push('\'');

        return fixed;
    }

    if label.chars().any(|c| is_special(c) && c != ' ') {
        // Contains structural characters: double internal quotes and wrap
        let escaped = label.replace('\'', "''");
        format!("'{}'", escaped)
    } else {
        // Only spaces to worry about
        label.replace(' ', "_")
    }
}
