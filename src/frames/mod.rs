//! Line-oriented results file parsing.
//!
//! Both results formats are plain UTF-8 text with one frame per line and
//! comma-separated numeric tokens:
//!
//! - [`particles`] – `x,y,z,x,y,z,...` float triples, streamed line by line
//! - [`densities`] – `n,n,n,...` integer region counts, loaded in one pass
//! - [`condense`] – bins particle frames into density frames
//!
//! Tokens are trimmed before parsing so files with CRLF line endings or
//! spaces after the commas load the same as compact ones.

pub mod condense;
pub mod densities;
pub mod particles;

use thiserror::Error;

/// Errors raised while reading or parsing a results file.
#[derive(Debug, Error)]
pub enum FrameError {
    /// A particle line whose value count is not a multiple of three.
    #[error("expected a multiple of 3 values, found {count}")]
    Arity { count: usize },
    /// A token that is not a valid number.
    #[error("invalid number '{token}'")]
    Number { token: String },
    /// Reading the underlying file failed.
    #[error("failed to read results: {0}")]
    Io(#[from] std::io::Error),
    /// Wraps another error with the 1-based line it occurred on.
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<FrameError>,
    },
}

impl FrameError {
    /// Attach a 1-based line number to this error.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            FrameError::AtLine { .. } => self,
            other => FrameError::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }

    /// True when the error only concerns the shape of a line, not its numbers.
    ///
    /// Shape errors skip the line; everything else stops playback.
    pub fn is_recoverable(&self) -> bool {
        match self {
            FrameError::Arity { .. } => true,
            FrameError::AtLine { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

/// Split a line into trimmed comma-separated tokens.
pub(crate) fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_trims_whitespace_and_carriage_returns() {
        let parts: Vec<&str> = tokens(" 1, 2 ,3\r").collect();
        assert_eq!(parts, vec!["1", "2", "3"]);
    }

    #[test]
    fn empty_line_yields_single_empty_token() {
        let parts: Vec<&str> = tokens("").collect();
        assert_eq!(parts, vec![""]);
    }

    #[test]
    fn at_line_does_not_nest() {
        let err = FrameError::Number {
            token: "x".into(),
        }
        .at_line(3)
        .at_line(9);
        assert_eq!(err.to_string(), "line 3: invalid number 'x'");
    }

    #[test]
    fn only_arity_errors_are_recoverable() {
        assert!(FrameError::Arity { count: 4 }.at_line(1).is_recoverable());
        assert!(
            !FrameError::Number {
                token: "a".into()
            }
            .is_recoverable()
        );
    }
}
