//! Text form of a score list, as stored in the `Threat_Scores` CSV column.
//!
//! The format is a bracketed, comma separated list of decimal numbers:
//! `[22, 30, 25]`. Parsing is strict; nothing outside that grammar is accepted.

use crate::utils::error::{Result, ScoreError};
use regex::Regex;
use std::sync::OnceLock;

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$")
            .expect("score pattern is a valid regex")
    })
}

/// Writes `scores` as `[a, b, c]`. Whole numbers are written without a fraction.
pub fn format_score_list(scores: &[f64]) -> String {
    let items: Vec<String> = scores.iter().map(|s| s.to_string()).collect();
    format!("[{}]", items.join(", "))
}

pub fn parse_score_list(input: &str) -> Result<Vec<f64>> {
    let error = |position: usize, reason: &str| ScoreError::ScoreListParseError {
        input: input.to_string(),
        position,
        reason: reason.to_string(),
    };

    let body = input
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| error(0, "expected a list enclosed in '[' and ']'"))?;

    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    body.split(',')
        .enumerate()
        .map(|(position, token)| {
            let token = token.trim();
            if token.is_empty() {
                return Err(error(position, "empty element"));
            }
            if !number_pattern().is_match(token) {
                return Err(error(position, &format!("'{}' is not a number", token)));
            }
            let value: f64 = token
                .parse()
                .map_err(|_| error(position, &format!("'{}' is not a number", token)))?;
            if !value.is_finite() {
                return Err(error(position, &format!("'{}' is out of range", token)));
            }
            Ok(value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_numbers() {
        assert_eq!(format_score_list(&[22.0, 30.0, 25.0]), "[22, 30, 25]");
        assert_eq!(format_score_list(&[]), "[]");
        assert_eq!(format_score_list(&[1.5, -2.0]), "[1.5, -2]");
    }

    #[test]
    fn test_parse_valid_lists() {
        assert_eq!(parse_score_list("[22, 30, 25]").unwrap(), vec![22.0, 30.0, 25.0]);
        assert_eq!(parse_score_list("  [1,2.5 ,-3e1]  ").unwrap(), vec![1.0, 2.5, -30.0]);
        assert_eq!(parse_score_list("[]").unwrap(), Vec::<f64>::new());
        assert_eq!(parse_score_list("[ ]").unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn test_parse_reads_back_formatted_list() {
        let scores = vec![20.0, 18.0, 24.0, 90.0, 0.25];
        assert_eq!(parse_score_list(&format_score_list(&scores)).unwrap(), scores);
    }

    #[test]
    fn test_parse_rejects_missing_brackets() {
        let err = parse_score_list("1, 2, 3").unwrap_err();
        assert!(matches!(err, ScoreError::ScoreListParseError { position: 0, .. }));
        assert!(parse_score_list("[1, 2").is_err());
    }

    #[test]
    fn test_parse_reports_offending_element() {
        match parse_score_list("[1, 2, __import__('os')]").unwrap_err() {
            ScoreError::ScoreListParseError { position, reason, .. } => {
                assert_eq!(position, 2);
                assert!(reason.contains("__import__"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_empty_elements_and_specials() {
        assert!(parse_score_list("[1,,2]").is_err());
        assert!(parse_score_list("[1, 2,]").is_err());
        assert!(parse_score_list("[NaN]").is_err());
        assert!(parse_score_list("[inf]").is_err());
        assert!(parse_score_list("[1e999]").is_err());
        assert!(parse_score_list("[[1]]").is_err());
    }
}
