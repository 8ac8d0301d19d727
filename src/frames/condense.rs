//! Condense particle frames into density frames.
//!
//! Each particle is counted toward the region of [`RegionGrid`] that contains
//! it; particles outside the box are dropped. The output uses the density
//! results format, one line of `n³` counts per input line.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use super::particles::parse_particle_line;
use super::FrameError;
use crate::resources::regiongrid::RegionGrid;

/// Count the particles of one position line per grid region.
///
/// Positions are read unscaled, in the same units as `grid.box_width`.
pub fn condense_line(line: &str, grid: &RegionGrid) -> Result<Vec<u32>, FrameError> {
    let mut counts = vec![0u32; grid.cell_count()];
    for p in parse_particle_line(line, 1.0)? {
        if let Some(index) = grid.bin(p.x, p.y, p.z) {
            counts[index] += 1;
        }
    }
    Ok(counts)
}

/// Write one frame of counts as a comma-separated line.
pub fn write_density_line<W: Write>(out: &mut W, counts: &[u32]) -> std::io::Result<()> {
    let mut first = true;
    for c in counts {
        if !first {
            out.write_all(b",")?;
        }
        write!(out, "{}", c)?;
        first = false;
    }
    out.write_all(b"\n")
}

/// Condense every line of `reader` into `out`. Returns the frame count.
pub fn condense<R: BufRead, W: Write>(
    reader: R,
    out: &mut W,
    grid: &RegionGrid,
) -> Result<usize, FrameError> {
    let mut frames = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| FrameError::from(e).at_line(index + 1))?;
        let counts = condense_line(&line, grid).map_err(|e| e.at_line(index + 1))?;
        write_density_line(out, &counts)?;
        frames += 1;
    }
    Ok(frames)
}

/// Condense the particle file at `input` into a density file at `output`.
pub fn condense_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    grid: &RegionGrid,
) -> Result<usize, FrameError> {
    let reader = BufReader::new(File::open(input.as_ref())?);
    let mut out = BufWriter::new(File::create(output.as_ref())?);
    let frames = condense(reader, &mut out, grid)?;
    out.flush()?;
    info!(
        "Condensed {} frames from {} into {} ({} regions)",
        frames,
        input.as_ref().display(),
        output.as_ref().display(),
        grid.cell_count()
    );
    Ok(frames)
}
