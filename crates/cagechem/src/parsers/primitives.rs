use std::num::NonZeroU32;

use nom::{
    character::complete::{char, one_of, satisfy, u32},
    combinator::{cut, map, map_opt, not},
    sequence::preceded,
};

use crate::OffsetKind;

use super::errors::{FormulaErrorKind, ParseResult, expect};

/// uppercase = "A" | "B" | ... | "Z" ;
pub fn uppercase(i: &str) -> ParseResult<char> {
    let parser = satisfy(|c| c.is_ascii_uppercase());
    expect(parser, FormulaErrorKind::ExpectedUppercase)(i)
}

/// lowercase = "a" | "b" | ... | "z" ;
pub fn lowercase(i: &str) -> ParseResult<char> {
    let parser = satisfy(|c| c.is_ascii_lowercase());
    expect(parser, FormulaErrorKind::ExpectedLowercase)(i)
}

/// Count = digit - "0" , { digit } ;
pub fn count(i: &str) -> ParseResult<NonZeroU32> {
    let not_zero = cut(expect(not(char('0')), FormulaErrorKind::ExpectedNoLeadingZero));
    let digits = expect(map_opt(u32, NonZeroU32::new), FormulaErrorKind::ExpectedDigit);
    preceded(not_zero, digits)(i)
}

/// Offset Kind = "+" | "-" ;
pub fn offset_kind(i: &str) -> ParseResult<OffsetKind> {
    map(one_of("+-"), |c| {
        if c == '+' {
            OffsetKind::Add
        } else {
            OffsetKind::Remove
        }
    })(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase() {
        // Ensure the complete uppercase ASCII alphabet is present
        for c in 'A'..='Z' {
            assert_eq!(uppercase(&c.to_string()), Ok(("", c)));
        }
        // Ensure the complete lowercase ASCII alphabet is absent
        for c in 'a'..='z' {
            assert!(uppercase(&c.to_string()).is_err());
        }
        // Ensure only one character is parsed
        assert_eq!(uppercase("Hg"), Ok(("g", 'H')));
        assert_eq!(uppercase("HG"), Ok(("G", 'H')));
    }

    #[test]
    fn test_lowercase() {
        for c in 'a'..='z' {
            assert_eq!(lowercase(&c.to_string()), Ok(("", c)));
        }
        for c in 'A'..='Z' {
            assert!(lowercase(&c.to_string()).is_err());
        }
        assert_eq!(lowercase("ep"), Ok(("p", 'e')));
    }

    #[test]
    fn test_count() {
        let count = |i| count(i).map(|(r, c)| (r, c.get()));
        // Valid Counts
        assert_eq!(count("1"), Ok(("", 1)));
        assert_eq!(count("10"), Ok(("", 10)));
        assert_eq!(count("422"), Ok(("", 422)));
        assert_eq!(count("9999"), Ok(("", 9999)));
        // Invalid Counts
        assert!(matches!(count("0"), Err(nom::Err::Failure(_))));
        assert!(matches!(count("01"), Err(nom::Err::Failure(_))));
        assert!(matches!(count("00145"), Err(nom::Err::Failure(_))));
        assert!(matches!(count("H"), Err(nom::Err::Error(_))));
        assert!(matches!(count("p"), Err(nom::Err::Error(_))));
        assert!(matches!(count("+H"), Err(nom::Err::Error(_))));
        // Multiple Counts
        assert_eq!(count("1OH"), Ok(("OH", 1)));
        assert_eq!(count("42HeH"), Ok(("HeH", 42)));
    }

    #[test]
    fn test_offset_kind() {
        assert_eq!(offset_kind("+"), Ok(("", OffsetKind::Add)));
        assert_eq!(offset_kind("-"), Ok(("", OffsetKind::Remove)));
        assert!(offset_kind("p").is_err());
        assert_eq!(offset_kind("+p"), Ok(("p", OffsetKind::Add)));
    }
}
