//! Site-range expression parsing.
//!
//! Expressions are comma-separated tokens, each a 1-based column number or an
//! inclusive range `a-b`. An empty expression selects every column. The
//! selection keeps the order and duplicates the user wrote; it is never
//! sorted or deduplicated.

use crate::error::SiteExpressionError;

/// Parses a site-range expression against an alignment of `length` columns.
///
/// Returns 0-based column indices. All tokens are parsed and bounds-checked
/// before any index is returned, so a later bad token reports its error even
/// when earlier tokens were fine.
pub fn parse_site_selection(
    expression: &str,
    length: usize,
) -> Result<Vec<usize>, SiteExpressionError> {
    let expression: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    if expression.is_empty() {
        return Ok((0..length).collect());
    }
    if !expression.contains(|c: char| c.is_ascii_digit()) {
        return Err(SiteExpressionError::NoDigits);
    }

    let mut sites = Vec::new();
    // Empty tokens (trailing or doubled commas) are skipped, not errors.
    for token in expression.split(',').filter(|t| !t.is_empty()) {
        if let Some((start, end)) = token.split_once('-') {
            let start = parse_site_number(start, token)?;
            let end = parse_site_number(end, token)?;
            if start > end {
                return Err(SiteExpressionError::InvalidRange {
                    token: token.to_string(),
                });
            }
            sites.extend(start..=end);
        } else {
            sites.push(parse_site_number(token, token)?);
        }
    }

    for &site in &sites {
        if site == 0 || site > length {
            return Err(SiteExpressionError::OutOfRange { site, length });
        }
    }

    Ok(sites.into_iter().map(|s| s - 1).collect())
}

fn parse_site_number(s: &str, token: &str) -> Result<usize, SiteExpressionError> {
    s.parse::<usize>().map_err(|_| SiteExpressionError::Token {
        token: token.to_string(),
    })
}
