//! Region density frames.
//!
//! A density results file holds one frame per line; each line lists one
//! integer count per grid region in enumeration order. The whole file is
//! parsed once into [`DensityFrames`], which records the file-wide maximum
//! while loading so playback never has to read the file a second time.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{FrameError, tokens};

/// Parse one density line into region counts.
pub fn parse_density_line(line: &str) -> Result<Vec<i64>, FrameError> {
    tokens(line)
        .map(|token| {
            token.parse::<i64>().map_err(|_| FrameError::Number {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Map a density onto `[0, 1]` relative to the file-wide maximum.
///
/// A maximum of zero (no positive density anywhere) maps every value to 0.
pub fn normalize_density(value: i64, max: i64) -> f32 {
    if max <= 0 {
        return 0.0;
    }
    (value as f32 / max as f32).clamp(0.0, 1.0)
}

/// All frames of a density results file plus the largest value seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DensityFrames {
    frames: Vec<Vec<i64>>,
    max: i64,
}

impl DensityFrames {
    /// Load and parse a density results file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FrameError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse every line of `reader`, tracking the running maximum.
    ///
    /// The maximum starts at 0, so a file without positive values keeps 0.
    /// A malformed token fails the whole load.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, FrameError> {
        let mut frames = Vec::new();
        let mut max = 0;
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| FrameError::from(e).at_line(index + 1))?;
            let values = parse_density_line(&line).map_err(|e| e.at_line(index + 1))?;
            if let Some(&line_max) = values.iter().max() {
                max = max.max(line_max);
            }
            frames.push(values);
        }
        Ok(Self { frames, max })
    }

    /// Largest density over the whole file.
    pub fn max_density(&self) -> i64 {
        self.max
    }

    /// Values of frame `index`, if present.
    pub fn frame(&self, index: usize) -> Option<&[i64]> {
        self.frames.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
