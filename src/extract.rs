use std::fmt::Display;
use std::str::FromStr;

use regex::{Captures, Regex};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("line {line:?} didn't match pattern {pattern}")]
    NoMatch { line: String, pattern: String },

    #[error("group {index} didn't match anything")]
    MissingGroup { index: usize },

    #[error("failed to parse group {index} {field:?}: {reason}")]
    BadField {
        index: usize,
        field: String,
        reason: String,
    },
}

/// Match `pattern` against `line`, failing with the offending line if it
/// doesn't match.
pub fn captures<'t>(pattern: &Regex, line: &'t str) -> Result<Captures<'t>, ExtractError> {
    pattern.captures(line).ok_or_else(|| ExtractError::NoMatch {
        line: line.to_owned(),
        pattern: pattern.as_str().to_owned(),
    })
}

pub trait RegexExtractor<'t> {
    fn field(&self, index: usize) -> Result<&'t str, ExtractError>;

    fn parse<T: FromStr>(&self, index: usize) -> Result<T, ExtractError>
    where
        T::Err: Display;
}

impl<'t> RegexExtractor<'t> for Captures<'t> {
    #[inline]
    fn field(&self, index: usize) -> Result<&'t str, ExtractError> {
        self.get(index)
            .map(|m| m.as_str())
            .ok_or(ExtractError::MissingGroup { index })
    }

    #[inline]
    fn parse<T: FromStr>(&self, index: usize) -> Result<T, ExtractError>
    where
        T::Err: Display,
    {
        let field = self.field(index)?;

        field.parse().map_err(move |err: T::Err| ExtractError::BadField {
            index,
            field: field.to_owned(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_groups() {
        let pattern = Regex::new(r"^move (\d+) from (\d+) to (\d+)$").unwrap();
        let caps = captures(&pattern, "move 3 from 1 to 2").unwrap();

        assert_eq!(caps.parse::<usize>(1), Ok(3));
        assert_eq!(caps.field(3), Ok("2"));
    }

    #[test]
    fn reports_unmatched_line() {
        let pattern = Regex::new(r"^(\d+)$").unwrap();
        let err = captures(&pattern, "abc").unwrap_err();

        assert!(matches!(err, ExtractError::NoMatch { ref line, .. } if line == "abc"));
    }

    #[test]
    fn reports_missing_and_bad_groups() {
        let pattern = Regex::new(r"^(-?\d+)(x)?$").unwrap();
        let caps = captures(&pattern, "-12").unwrap();

        assert_eq!(caps.field(2), Err(ExtractError::MissingGroup { index: 2 }));
        assert!(matches!(
            caps.parse::<u32>(1),
            Err(ExtractError::BadField { index: 1, .. })
        ));
        assert_eq!(caps.parse::<i32>(1), Ok(-12));
    }
}
