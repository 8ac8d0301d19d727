//! Region grid layout resource.
//!
//! Describes the cubic box split into `regions_per_dim³` equal cells. Cells
//! are enumerated x outer, y middle, z inner, which is the order density
//! files list their values in:
//!
//! ```text
//! index = (ix * n + iy) * n + iz
//! ```

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector3;

/// Layout of the density region grid.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct RegionGrid {
    /// Number of cells along each axis.
    pub regions_per_dim: usize,
    /// Edge length of the whole box in world units.
    pub box_width: f32,
}

impl RegionGrid {
    pub fn new(regions_per_dim: usize, box_width: f32) -> Self {
        Self {
            regions_per_dim,
            box_width,
        }
    }

    /// Total number of cells (`n³`).
    pub fn cell_count(&self) -> usize {
        self.regions_per_dim.pow(3)
    }

    /// Edge length of a single cell.
    pub fn cell_size(&self) -> f32 {
        self.box_width / self.regions_per_dim as f32
    }

    /// Enumeration index of cell `(ix, iy, iz)`.
    pub fn index_of(&self, ix: usize, iy: usize, iz: usize) -> usize {
        let n = self.regions_per_dim;
        (ix * n + iy) * n + iz
    }

    /// Centre of cell `(ix, iy, iz)` in world units.
    pub fn cell_center(&self, ix: usize, iy: usize, iz: usize) -> Vector3 {
        let size = self.cell_size();
        let half = size * 0.5;
        Vector3::new(
            ix as f32 * size + half,
            iy as f32 * size + half,
            iz as f32 * size + half,
        )
    }

    /// Iterate `(index, centre)` for every cell in enumeration order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, Vector3)> + '_ {
        let n = self.regions_per_dim;
        (0..n).flat_map(move |ix| {
            (0..n).flat_map(move |iy| {
                (0..n).map(move |iz| (self.index_of(ix, iy, iz), self.cell_center(ix, iy, iz)))
            })
        })
    }

    /// Index of the cell containing `(x, y, z)`, or `None` outside the box.
    ///
    /// The upper faces are exclusive: a coordinate equal to `box_width`
    /// falls outside.
    pub fn bin(&self, x: f32, y: f32, z: f32) -> Option<usize> {
        let n = self.regions_per_dim as i64;
        let axis = |v: f32| -> Option<usize> {
            let r = ((v / self.box_width) * n as f32).floor();
            if r.is_nan() || r < 0.0 || r >= n as f32 {
                None
            } else {
                Some(r as usize)
            }
        };
        Some(self.index_of(axis(x)?, axis(y)?, axis(z)?))
    }
}

impl Default for RegionGrid {
    fn default() -> Self {
        Self::new(10, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_has_thousand_cells() {
        let grid = RegionGrid::default();
        assert_eq!(grid.cell_count(), 1000);
        assert_eq!(grid.cell_size(), 10.0);
    }

    #[test]
    fn enumeration_is_x_outer_z_inner() {
        let grid = RegionGrid::new(2, 2.0);
        let cells: Vec<_> = grid.iter_cells().collect();
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[0], (0, Vector3::new(0.5, 0.5, 0.5)));
        assert_eq!(cells[1], (1, Vector3::new(0.5, 0.5, 1.5)));
        assert_eq!(cells[2], (2, Vector3::new(0.5, 1.5, 0.5)));
        assert_eq!(cells[4], (4, Vector3::new(1.5, 0.5, 0.5)));
        assert_eq!(cells[7], (7, Vector3::new(1.5, 1.5, 1.5)));
    }

    #[test]
    fn odd_box_widths_still_enumerate_exactly() {
        // 100 / 3 is not representable; integer loops keep the count exact.
        let grid = RegionGrid::new(3, 100.0);
        assert_eq!(grid.iter_cells().count(), 27);
    }

    #[test]
    fn bins_positions_into_cells() {
        let grid = RegionGrid::default();
        assert_eq!(grid.bin(0.0, 0.0, 0.0), Some(0));
        assert_eq!(grid.bin(5.0, 5.0, 15.0), Some(1));
        assert_eq!(grid.bin(99.9, 99.9, 99.9), Some(999));
        assert_eq!(grid.bin(15.0, 0.0, 0.0), Some(100));
    }

    #[test]
    fn bin_rejects_outside_positions() {
        let grid = RegionGrid::default();
        assert_eq!(grid.bin(-0.1, 0.0, 0.0), None);
        assert_eq!(grid.bin(0.0, 100.0, 0.0), None);
        assert_eq!(grid.bin(0.0, 0.0, f32::NAN), None);
    }
}
