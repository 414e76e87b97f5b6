//! Completion-time extraction from client output.
//!
//! The client under test reports its measurement as free-form text on stdout,
//! one line of which looks like `Completion Time: 12.34 ms`. This module is
//! the single place that knows about that format. It is intentionally a
//! narrow contract (one marker phrase, one numeric token) rather than a
//! general log parser; the fragility is inherent to the benchmarked
//! program's interface.

use thiserror::Error;

/// Marker phrase the client prints in front of its reported completion time.
pub const COMPLETION_MARKER: &str = "Completion Time:";

/// Reasons the completion time could not be extracted from client output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No line of the output contained the marker phrase.
    #[error("no line containing '{COMPLETION_MARKER}' in client output")]
    MarkerMissing,

    /// The marker was present but the token following it was not a
    /// non-negative number.
    #[error("malformed completion time token: '{0}'")]
    Malformed(String),
}

/// Scan client output for the first line containing [`COMPLETION_MARKER`]
/// and parse the numeric token that follows it, in milliseconds.
///
/// The token is everything between the marker and the next whitespace
/// (the trailing unit label, typically `ms`, is ignored). The first matching
/// line wins; later matches are never inspected.
pub fn extract_completion_time(output: &str) -> Result<f64, ExtractError> {
    for line in output.lines() {
        if let Some(pos) = line.find(COMPLETION_MARKER) {
            let rest = line[pos + COMPLETION_MARKER.len()..].trim_start();
            let token = rest
                .split_whitespace()
                .next()
                .ok_or_else(|| ExtractError::Malformed(String::new()))?;

            return match token.parse::<f64>() {
                Ok(value) if value >= 0.0 && value.is_finite() => Ok(value),
                _ => Err(ExtractError::Malformed(token.to_string())),
            };
        }
    }

    Err(ExtractError::MarkerMissing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_well_formed_line() {
        let output = "connecting...\nCompletion Time: 12.34 ms\ndone\n";
        assert_eq!(extract_completion_time(output), Ok(12.34));
    }

    #[test]
    fn test_extract_integer_token() {
        assert_eq!(extract_completion_time("Completion Time: 250 ms"), Ok(250.0));
    }

    #[test]
    fn test_missing_marker() {
        let output = "connected\ntransfer finished in 12 ms\n";
        assert_eq!(
            extract_completion_time(output),
            Err(ExtractError::MarkerMissing)
        );
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(extract_completion_time(""), Err(ExtractError::MarkerMissing));
    }

    #[test]
    fn test_malformed_token() {
        assert_eq!(
            extract_completion_time("Completion Time: abc ms"),
            Err(ExtractError::Malformed("abc".to_string()))
        );
    }

    #[test]
    fn test_negative_token_rejected() {
        assert_eq!(
            extract_completion_time("Completion Time: -1 ms"),
            Err(ExtractError::Malformed("-1".to_string()))
        );
    }

    #[test]
    fn test_marker_with_nothing_after() {
        assert!(matches!(
            extract_completion_time("Completion Time:"),
            Err(ExtractError::Malformed(_))
        ));
    }

    #[test]
    fn test_first_matching_line_wins() {
        let output = "Completion Time: 1.5 ms\nCompletion Time: 99.9 ms\n";
        assert_eq!(extract_completion_time(output), Ok(1.5));
    }

    #[test]
    fn test_marker_not_at_line_start() {
        let output = "[client] Completion Time: 7.25 ms\n";
        assert_eq!(extract_completion_time(output), Ok(7.25));
    }
}
