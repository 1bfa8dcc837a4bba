//! Tokenization of update strings using `nom`.
//!
//! An update string is a flat list of segments separated by `,`. Each
//! segment becomes one [`Token`]; a segment is split at its first `=` only,
//! so values may themselves contain `=`. Keys and values are trimmed.

use std::fmt;

use nom::{
    IResult, Parser,
    bytes::complete::{take_till, take_while},
    character::complete::char,
    combinator::rest,
    multi::separated_list1,
    sequence::separated_pair,
};

/// A single comma-separated segment of an update string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A segment holding nothing but whitespace.
    Blank,
    /// A `key=value` segment.
    Pair {
        /// Text before the first `=`.
        key: String,
        /// Text after the first `=`.
        value: String,
    },
    /// A segment without any `=`.
    Bare(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "an empty segment"),
            Self::Pair { key, value } => write!(f, "`{key}={value}`"),
            Self::Bare(text) => write!(f, "`{text}` (missing `=`)"),
        }
    }
}

/// Raw text up to the next comma.
fn segment(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c != ',').parse(input)
}

/// Every segment of the input, empty ones included.
fn segments(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char(','), segment).parse(input)
}

/// Splits a segment at its first `=`.
fn key_value(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_till(|c: char| c == '='), char('='), rest).parse(input)
}

fn classify(raw: &str) -> Token {
    match key_value(raw) {
        Ok((_, (key, value))) => Token::Pair {
            key: key.trim().to_owned(),
            value: value.trim().to_owned(),
        },
        Err(_) if raw.trim().is_empty() => Token::Blank,
        Err(_) => Token::Bare(raw.trim().to_owned()),
    }
}

/// Tokenizes an update string into one token per comma-separated segment.
///
/// The empty string yields a single [`Token::Blank`].
///
/// # Errors
///
/// Returns the lexer's description if the input cannot be segmented.
pub fn tokenize(input: &str) -> std::result::Result<Vec<Token>, String> {
    let (remaining, raw) = segments(input).map_err(|e| format!("lexer error: {e}"))?;
    if !remaining.is_empty() {
        return Err(format!("unexpected trailing input: \"{remaining}\""));
    }
    Ok(raw.into_iter().map(classify).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> Token {
        Token::Pair {
            key: key.into(),
            value: value.into(),
        }
    }

    #[test]
    fn tokenize_empty_input() {
        let tokens = tokenize("").expect("should tokenize");
        assert_eq!(tokens, vec![Token::Blank]);
    }

    #[test]
    fn tokenize_pairs() {
        let tokens = tokenize("container=web,tag=2").expect("should tokenize");
        assert_eq!(tokens, vec![pair("container", "web"), pair("tag", "2")]);
    }

    #[test]
    fn tokenize_splits_at_first_equals_only() {
        let tokens = tokenize("value=a=b=c").expect("should tokenize");
        assert_eq!(tokens, vec![pair("value", "a=b=c")]);
    }

    #[test]
    fn tokenize_trims_keys_and_values() {
        let tokens = tokenize(" container = web , name= FOO ").expect("should tokenize");
        assert_eq!(tokens, vec![pair("container", "web"), pair("name", "FOO")]);
    }

    #[test]
    fn tokenize_keeps_empty_segments() {
        let tokens = tokenize("container=web,,tag=2,").expect("should tokenize");
        assert_eq!(
            tokens,
            vec![
                pair("container", "web"),
                Token::Blank,
                pair("tag", "2"),
                Token::Blank,
            ]
        );
    }

    #[test]
    fn tokenize_marks_segments_without_equals() {
        let tokens = tokenize("container=web,oops").expect("should tokenize");
        assert_eq!(
            tokens,
            vec![pair("container", "web"), Token::Bare("oops".into())]
        );
    }

    #[test]
    fn tokenize_allows_empty_value() {
        let tokens = tokenize("value=").expect("should tokenize");
        assert_eq!(tokens, vec![pair("value", "")]);
    }

    #[test]
    fn display_describes_token() {
        assert_eq!(pair("a", "b").to_string(), "`a=b`");
        assert_eq!(Token::Bare("x".into()).to_string(), "`x` (missing `=`)");
    }
}
