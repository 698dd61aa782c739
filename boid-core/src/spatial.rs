#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, vec::Vec};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

use crate::boid::Boid;
use crate::vector::Vector2D;

fn floor(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.floor()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::floorf(value)
    }
}

/// Uniform grid over boid indices with cells as wide as the visual range.
///
/// Boids may drift outside the world, so cells are keyed by coordinate instead
/// of living in a fixed array.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: BTreeMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    /// `None` when `cell_size` cannot partition space (zero, negative or not finite)
    pub fn new(cell_size: f32) -> Option<Self> {
        if cell_size > 0.0 && cell_size.is_finite() {
            Some(Self {
                cell_size,
                cells: BTreeMap::new(),
            })
        } else {
            None
        }
    }

    pub fn build(cell_size: f32, boids: &[Boid]) -> Option<Self> {
        let mut grid = Self::new(cell_size)?;
        for (index, boid) in boids.iter().enumerate() {
            grid.insert(index, boid.position);
        }
        Some(grid)
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn cell_of(&self, position: Vector2D) -> (i64, i64) {
        (
            floor(position.x / self.cell_size) as i64,
            floor(position.y / self.cell_size) as i64,
        )
    }

    pub fn insert(&mut self, index: usize, position: Vector2D) {
        let cell = self.cell_of(position);
        self.cells.entry(cell).or_default().push(index);
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Fill `out` with every index in the 3x3 block around `position`, ascending
    pub fn nearby(&self, position: Vector2D, out: &mut Vec<usize>) {
        out.clear();
        let (cx, cy) = self.cell_of(position);

        for dy in -1..=1 {
            for dx in -1..=1 {
                let key = (cx.saturating_add(dx), cy.saturating_add(dy));
                if let Some(indices) = self.cells.get(&key) {
                    out.extend_from_slice(indices);
                }
            }
        }

        // Ascending order keeps accumulation identical to a full scan
        out.sort_unstable();
        out.dedup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boid_at(x: f32, y: f32) -> Boid {
        Boid::new(Vector2D::new(x, y), Vector2D::zero())
    }

    #[test]
    fn test_rejects_degenerate_cells() {
        assert!(SpatialGrid::new(0.0).is_none());
        assert!(SpatialGrid::new(-5.0).is_none());
        assert!(SpatialGrid::new(f32::INFINITY).is_none());
        assert!(SpatialGrid::new(f32::NAN).is_none());
        assert_eq!(SpatialGrid::new(10.0).map(|g| g.cell_size()), Some(10.0));
    }

    #[test]
    fn test_nearby_covers_adjacent_cells_only() {
        let boids = [
            boid_at(5.0, 5.0),
            boid_at(15.0, 5.0),
            boid_at(-5.0, -5.0),
            boid_at(35.0, 5.0),
            boid_at(5.0, 100.0),
        ];
        let grid = SpatialGrid::build(10.0, &boids).unwrap();
        let mut out = Vec::new();

        grid.nearby(Vector2D::new(5.0, 5.0), &mut out);
        assert_eq!(out, vec![0, 1, 2]);
    }

    #[test]
    fn test_nearby_outside_world() {
        let boids = [boid_at(-1000.0, -1000.0), boid_at(-995.0, -1002.0)];
        let grid = SpatialGrid::build(20.0, &boids).unwrap();
        let mut out = vec![42];

        grid.nearby(Vector2D::new(-1000.0, -1000.0), &mut out);
        assert_eq!(out, vec![0, 1]);

        grid.nearby(Vector2D::new(0.0, 0.0), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut grid = SpatialGrid::build(10.0, &[boid_at(1.0, 1.0)]).unwrap();
        grid.clear();
        let mut out = Vec::new();
        grid.nearby(Vector2D::new(1.0, 1.0), &mut out);
        assert!(out.is_empty());
    }
}
