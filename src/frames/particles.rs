//! Particle position frames.
//!
//! A particle results file holds one frame per line. Every line is a flat
//! list of floats read as consecutive `(x, y, z)` triples. The file can be
//! very large, so [`ParticleFeed`] streams it one line at a time instead of
//! buffering it.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use raylib::prelude::Vector3;

use super::{FrameError, tokens};

/// Parse one particle line into positions divided by `scale`.
///
/// Returns [`FrameError::Arity`] when the value count is not a multiple of
/// three (no token is parsed in that case) and [`FrameError::Number`] on the
/// first token that is not a float.
pub fn parse_particle_line(line: &str, scale: f32) -> Result<Vec<Vector3>, FrameError> {
    let raw: Vec<&str> = tokens(line).collect();
    if raw.len() % 3 != 0 {
        return Err(FrameError::Arity { count: raw.len() });
    }

    let mut values = Vec::with_capacity(raw.len());
    for token in raw {
        let v: f32 = token.parse().map_err(|_| FrameError::Number {
            token: token.to_string(),
        })?;
        values.push(v);
    }

    Ok(values
        .chunks_exact(3)
        .map(|c| Vector3::new(c[0] / scale, c[1] / scale, c[2] / scale))
        .collect())
}

/// Streaming reader over a particle results file.
pub struct ParticleFeed {
    reader: Box<dyn BufRead + Send + Sync>,
    line_number: usize,
    buf: String,
}

impl ParticleFeed {
    /// Open a particle results file for streaming.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    /// Stream frames from any buffered reader.
    pub fn from_reader(reader: impl BufRead + Send + Sync + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            line_number: 0,
            buf: String::new(),
        }
    }

    /// Read the next line without its terminator.
    ///
    /// Returns `None` at end of file.
    pub fn next_line(&mut self) -> Option<io::Result<String>> {
        self.buf.clear();
        match self.reader.read_line(&mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                let line = self.buf.trim_end_matches(['\n', '\r']);
                Some(Ok(line.to_string()))
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// 1-based number of the last line returned, 0 before the first read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_triples_and_applies_scale() {
        let points = parse_particle_line("0,0,0,300,0,0", 100.0).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(points[1], Vector3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn accepts_fixed_point_output_with_spaces() {
        let points = parse_particle_line("12.500000, 50.000000 ,-1.0", 1.0).unwrap();
        assert_eq!(points, vec![Vector3::new(12.5, 50.0, -1.0)]);
    }

    #[test]
    fn rejects_counts_not_divisible_by_three() {
        match parse_particle_line("1,2,3,4", 1.0) {
            Err(FrameError::Arity { count }) => assert_eq!(count, 4),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn arity_is_checked_before_numbers() {
        // A bad token on a bad-shaped line is still only a shape error.
        let err = parse_particle_line("a,b", 1.0).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn empty_line_is_a_shape_error() {
        let err = parse_particle_line("", 1.0).unwrap_err();
        assert!(matches!(err, FrameError::Arity { count: 1 }));
    }

    #[test]
    fn reports_bad_number() {
        match parse_particle_line("1,2,nope", 1.0) {
            Err(FrameError::Number { token }) => assert_eq!(token, "nope"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn feed_yields_lines_without_terminators() {
        let mut feed = ParticleFeed::from_reader(Cursor::new("1,2,3\r\n4,5,6\n7,8,9"));
        assert_eq!(feed.line_number(), 0);
        assert_eq!(feed.next_line().unwrap().unwrap(), "1,2,3");
        assert_eq!(feed.next_line().unwrap().unwrap(), "4,5,6");
        assert_eq!(feed.next_line().unwrap().unwrap(), "7,8,9");
        assert_eq!(feed.line_number(), 3);
        assert!(feed.next_line().is_none());
    }
}
