//! Static 2D angle grid that steers the particles.
//!
//! The surface is divided into square cells of `cell_size` units. Each cell
//! stores one direction angle (radians), computed once from its integer
//! coordinates:
//!
//! ```text
//! angle(x, y) = (cos(x * zoom) + sin(y * zoom)) * curve
//! ```
//!
//! Angles are stored row-major, so cell `(x, y)` lives at index
//! `y * cols + x`. The grid never changes after construction; a resize
//! builds a new one.

use glam::{IVec2, Vec2};

use crate::config::FlowConfig;

/// Precomputed grid of flow angles.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowField {
    rows: usize,
    cols: usize,
    angles: Vec<f32>,
}

impl FlowField {
    /// Build a `rows` x `cols` grid from the curve and zoom factors.
    pub fn new(rows: usize, cols: usize, curve: f32, zoom: f32) -> Self {
        let mut angles = Vec::with_capacity(rows * cols);
        for y in 0..rows {
            for x in 0..cols {
                let angle = ((x as f32 * zoom).cos() + (y as f32 * zoom).sin()) * curve;
                angles.push(angle);
            }
        }
        Self { rows, cols, angles }
    }

    /// Build the grid covering a `width` x `height` surface.
    ///
    /// Partial cells at the right and bottom edges are not part of the grid.
    pub fn for_surface(width: f32, height: f32, config: &FlowConfig) -> Self {
        let rows = (height / config.cell_size).floor() as usize;
        let cols = (width / config.cell_size).floor() as usize;
        Self::new(rows, cols, config.curve, config.zoom)
    }

    /// Number of cell rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// Whether the grid has no cells (surface smaller than one cell).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// All angles in row-major order.
    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    /// Angle at a linear cell index.
    #[inline]
    pub fn angle(&self, index: usize) -> Option<f32> {
        self.angles.get(index).copied()
    }

    /// Angle at the linear index `y * cols + x`, or `None` when that index
    /// falls outside the grid.
    ///
    /// Only the linear index is range-checked. A column past the right edge
    /// reads into the start of the next row, and a negative column reads
    /// the end of the previous row.
    pub fn angle_at(&self, cell: IVec2) -> Option<f32> {
        let index = cell.y as i64 * self.cols as i64 + cell.x as i64;
        if index < 0 {
            return None;
        }
        self.angle(index as usize)
    }

    /// Cell containing `position` for the given cell size.
    #[inline]
    pub fn cell_of(position: Vec2, cell_size: f32) -> IVec2 {
        (position / cell_size).floor().as_ivec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angles_follow_formula() {
        let (curve, zoom) = (5.0, 0.09);
        let field = FlowField::new(7, 11, curve, zoom);

        for y in 0..field.rows() {
            for x in 0..field.cols() {
                let expected = ((x as f32 * zoom).cos() + (y as f32 * zoom).sin()) * curve;
                assert_eq!(field.angles()[y * field.cols() + x], expected);
            }
        }
    }

    #[test]
    fn test_surface_300_gives_10_by_10() {
        let config = FlowConfig::default();
        let field = FlowField::for_surface(300.0, 300.0, &config);

        assert_eq!(field.rows(), 10);
        assert_eq!(field.cols(), 10);
        assert_eq!(field.len(), 100);
        assert_eq!(field.angle(0), Some(config.curve));
    }

    #[test]
    fn test_partial_cells_dropped() {
        let config = FlowConfig::default();
        let field = FlowField::for_surface(95.0, 61.0, &config);

        assert_eq!(field.cols(), 3);
        assert_eq!(field.rows(), 2);
    }

    #[test]
    fn test_deterministic() {
        let a = FlowField::new(20, 30, 5.0, 0.09);
        let b = FlowField::new(20, 30, 5.0, 0.09);
        assert_eq!(a, b);
    }

    #[test]
    fn test_angle_at_uses_linear_index() {
        let field = FlowField::new(2, 3, 5.0, 0.09);

        assert_eq!(field.angle_at(IVec2::new(2, 1)), field.angle(5));
        // Past the right edge spills into the next row.
        assert_eq!(field.angle_at(IVec2::new(3, 0)), field.angle(3));
        // A negative column wraps back to the previous row.
        assert_eq!(field.angle_at(IVec2::new(-1, 1)), field.angle(2));
    }

    #[test]
    fn test_angle_at_rejects_indices_outside_grid() {
        let field = FlowField::new(2, 3, 5.0, 0.09);

        assert_eq!(field.angle_at(IVec2::new(0, 2)), None);
        assert_eq!(field.angle_at(IVec2::new(3, 1)), None);
        assert_eq!(field.angle_at(IVec2::new(-1, 0)), None);
        assert_eq!(field.angle_at(IVec2::new(0, -1)), None);
    }

    #[test]
    fn test_cell_of_floors() {
        assert_eq!(FlowField::cell_of(Vec2::new(0.0, 0.0), 30.0), IVec2::new(0, 0));
        assert_eq!(FlowField::cell_of(Vec2::new(29.9, 30.0), 30.0), IVec2::new(0, 1));
        assert_eq!(FlowField::cell_of(Vec2::new(-0.5, 61.0), 30.0), IVec2::new(-1, 2));
    }

    #[test]
    fn test_degenerate_surface_is_empty() {
        let config = FlowConfig::default();
        let field = FlowField::for_surface(0.0, 500.0, &config);
        assert!(field.is_empty());
        assert_eq!(field.angle_at(IVec2::ZERO), None);
    }
}
