//! Tests for site-range expression parsing.

use cladepaint::error::SiteExpressionError;
use cladepaint::sites::parse_site_selection;

#[test]
fn empty_expression_selects_all_columns() {
    assert_eq!(parse_site_selection("", 4).unwrap(), vec![0, 1, 2, 3]);
    assert_eq!(parse_site_selection("  ", 4).unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn single_sites_and_ranges() {
    assert_eq!(parse_site_selection("3", 10).unwrap(), vec![2]);
    assert_eq!(parse_site_selection("1-3,5", 10).unwrap(), vec![0, 1, 2, 4]);
    assert_eq!(parse_site_selection("2-2", 10).unwrap(), vec![1]);
}

#[test]
fn whitespace_is_ignored() {
    assert_eq!(
        parse_site_selection(" 1 - 3 , 5 ", 10).unwrap(),
        vec![0, 1, 2, 4]
    );
}

#[test]
fn empty_tokens_are_skipped() {
    assert_eq!(parse_site_selection("1,2,", 10).unwrap(), vec![0, 1]);
    assert_eq!(parse_site_selection("1,,2", 10).unwrap(), vec![0, 1]);
    assert_eq!(parse_site_selection(",3", 10).unwrap(), vec![2]);
}

#[test]
fn order_and_duplicates_are_preserved() {
    assert_eq!(
        parse_site_selection("5,1-2,5", 10).unwrap(),
        vec![4, 0, 1, 4]
    );
}

#[test]
fn no_digits_is_an_error() {
    assert_eq!(
        parse_site_selection("abc", 10),
        Err(SiteExpressionError::NoDigits)
    );
    assert_eq!(
        parse_site_selection(",-", 10),
        Err(SiteExpressionError::NoDigits)
    );
}

#[test]
fn unparseable_token_is_an_error() {
    assert_eq!(
        parse_site_selection("1,x2", 10),
        Err(SiteExpressionError::Token {
            token: "x2".to_string()
        })
    );
    assert_eq!(
        parse_site_selection("1-2-3", 10),
        Err(SiteExpressionError::Token {
            token: "1-2-3".to_string()
        })
    );
}

#[test]
fn backwards_range_is_an_error() {
    assert_eq!(
        parse_site_selection("5-2", 10),
        Err(SiteExpressionError::InvalidRange {
            token: "5-2".to_string()
        })
    );
}

#[test]
fn out_of_bounds_sites_are_an_error() {
    assert_eq!(
        parse_site_selection("11", 10),
        Err(SiteExpressionError::OutOfRange {
            site: 11,
            length: 10
        })
    );
    assert_eq!(
        parse_site_selection("0", 10),
        Err(SiteExpressionError::OutOfRange { site: 0, length: 10 })
    );
    // Bounds are checked only after the whole expression parses.
    assert_eq!(
        parse_site_selection("99,x", 10),
        Err(SiteExpressionError::Token {
            token: "x".to_string()
        })
    );
}
