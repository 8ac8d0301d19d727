//! Naive N-body particle simulation that generates results files.
//!
//! Particles of unit mass attract each other with plain Newtonian gravity
//! (`O(n²)` per step, unit time step) inside a closed cubic box. A particle
//! that leaves the box on an axis is pinned to the wall and loses its
//! velocity and acceleration on that axis.
//!
//! [`run_simulation`] writes one line per frame, either raw positions
//! (particle results format) or per-region counts (density results format).

use std::io::{self, Write};

use fastrand::Rng;
use log::info;

use crate::frames::condense::write_density_line;
use crate::resources::regiongrid::RegionGrid;

/// Gravitational constant in simulation units.
pub const GRAVITY: f32 = 6.6743;
const PARTICLE_MASS: f32 = 1.0;

/// State of every particle in the box.
#[derive(Debug, Clone)]
pub struct Simulation {
    positions: Vec<[f32; 3]>,
    velocities: Vec<[f32; 3]>,
    accelerations: Vec<[f32; 3]>,
    box_width: f32,
}

impl Simulation {
    /// `count` particles at rest, uniformly spread over the box.
    pub fn random(count: usize, box_width: f32, rng: &mut Rng) -> Self {
        let positions = (0..count)
            .map(|_| {
                [
                    rng.f32() * box_width,
                    rng.f32() * box_width,
                    rng.f32() * box_width,
                ]
            })
            .collect();
        Self::from_positions(positions, box_width)
    }

    /// Particles at rest at the given positions.
    pub fn from_positions(positions: Vec<[f32; 3]>, box_width: f32) -> Self {
        let n = positions.len();
        Self {
            positions,
            velocities: vec![[0.0; 3]; n],
            accelerations: vec![[0.0; 3]; n],
            box_width,
        }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn velocities(&self) -> &[[f32; 3]] {
        &self.velocities
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        let n = self.positions.len();
        for i in 0..n {
            let mut acc = [0.0f32; 3];
            let pi = self.positions[i];
            for (j, pj) in self.positions.iter().enumerate() {
                if i == j {
                    continue;
                }
                let d = [pj[0] - pi[0], pj[1] - pi[1], pj[2] - pi[2]];
                let r = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
                if r > 0.0 && !r.is_nan() {
                    let force = (GRAVITY * PARTICLE_MASS * PARTICLE_MASS) / (r * r);
                    for k in 0..3 {
                        acc[k] += force * (d[k] / r);
                    }
                }
            }
            self.accelerations[i] = acc;
        }

        for i in 0..n {
            for k in 0..3 {
                self.velocities[i][k] += self.accelerations[i][k];
                self.positions[i][k] += self.velocities[i][k];
            }
        }

        self.handle_walls();
    }

    fn handle_walls(&mut self) {
        for i in 0..self.positions.len() {
            for k in 0..3 {
                let p = self.positions[i][k];
                let pinned = if p < 0.0 {
                    Some(0.0)
                } else if p > self.box_width {
                    Some(self.box_width)
                } else {
                    None
                };
                if let Some(wall) = pinned {
                    self.positions[i][k] = wall;
                    self.velocities[i][k] = 0.0;
                    self.accelerations[i][k] = 0.0;
                }
            }
        }
    }

    /// Write the current positions as one `x,y,z,...` line.
    pub fn write_positions<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut first = true;
        for p in &self.positions {
            if !first {
                out.write_all(b",")?;
            }
            write!(out, "{:.6},{:.6},{:.6}", p[0], p[1], p[2])?;
            first = false;
        }
        out.write_all(b"\n")
    }

    /// Write the current per-region particle counts as one line.
    pub fn write_densities<W: Write>(&self, out: &mut W, grid: &RegionGrid) -> io::Result<()> {
        let mut counts = vec![0u32; grid.cell_count()];
        for p in &self.positions {
            if let Some(index) = grid.bin(p[0], p[1], p[2]) {
                counts[index] += 1;
            }
        }
        write_density_line(out, &counts)
    }
}

/// Write `frames` lines: the initial state, then one line per step.
///
/// With `densities` set, each line holds region counts instead of positions.
pub fn run_simulation<W: Write>(
    sim: &mut Simulation,
    frames: usize,
    out: &mut W,
    densities: Option<&RegionGrid>,
) -> io::Result<()> {
    for frame in 0..frames {
        if frame > 0 {
            sim.step();
        }
        match densities {
            Some(grid) => sim.write_densities(out, grid)?,
            None => sim.write_positions(out)?,
        }
        if (frame + 1) % 100 == 0 {
            info!("Simulated {}/{} frames", frame + 1, frames);
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::densities::DensityFrames;
    use crate::frames::particles::parse_particle_line;
    use std::io::Cursor;

    #[test]
    fn random_particles_start_inside_the_box_at_rest() {
        let mut rng = Rng::with_seed(7);
        let sim = Simulation::random(50, 100.0, &mut rng);
        assert_eq!(sim.positions().len(), 50);
        for p in sim.positions() {
            assert!(p.iter().all(|v| (0.0..100.0).contains(v)));
        }
        assert!(sim.velocities().iter().all(|v| *v == [0.0; 3]));
    }

    #[test]
    fn same_seed_same_start() {
        let a = Simulation::random(5, 100.0, &mut Rng::with_seed(42));
        let b = Simulation::random(5, 100.0, &mut Rng::with_seed(42));
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn two_particles_attract() {
        let mut sim = Simulation::from_positions(vec![[40.0, 50.0, 50.0], [60.0, 50.0, 50.0]], 100.0);
        sim.step();
        let p = sim.positions();
        // a = G / r² = 6.6743 / 400 toward each other
        let a = GRAVITY / 400.0;
        assert!((p[0][0] - (40.0 + a)).abs() < 1e-4);
        assert!((p[1][0] - (60.0 - a)).abs() < 1e-4);
        assert_eq!(p[0][1], 50.0);
    }

    #[test]
    fn walls_pin_and_stop_particles() {
        let mut sim = Simulation::from_positions(vec![[0.5, 50.0, 50.0], [0.0, 50.0, 50.0]], 100.0);
        // 0.5 apart on x: the strong pull drags the first one through x = 0.
        for _ in 0..5 {
            sim.step();
        }
        for (p, v) in sim.positions().iter().zip(sim.velocities()) {
            assert!(p.iter().all(|c| (0.0..=100.0).contains(c)));
            if p[0] == 0.0 {
                assert_eq!(v[0], 0.0);
            }
        }
    }

    #[test]
    fn position_lines_parse_back_as_particle_frames() {
        let mut sim = Simulation::from_positions(vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], 100.0);
        let mut out = Vec::new();
        run_simulation(&mut sim, 1, &mut out, None).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "1.000000,2.000000,3.000000,4.000000,5.000000,6.000000\n");
        assert_eq!(parse_particle_line(text.trim_end(), 1.0).unwrap().len(), 2);
    }

    #[test]
    fn density_output_has_one_line_per_frame() {
        let grid = RegionGrid::new(2, 100.0);
        let mut sim = Simulation::random(20, 100.0, &mut Rng::with_seed(3));
        let mut out = Vec::new();
        run_simulation(&mut sim, 3, &mut out, Some(&grid)).unwrap();

        let frames = DensityFrames::from_reader(Cursor::new(out)).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames.frame(0).unwrap().iter().sum::<i64>(), 20);
        for i in 0..3 {
            let values = frames.frame(i).unwrap();
            assert_eq!(values.len(), 8);
            // Particles pinned to an upper wall fall outside the grid.
            assert!(values.iter().sum::<i64>() <= 20);
        }
    }
}
