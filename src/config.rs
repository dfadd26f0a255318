//! Fixed constants for the flow field effect.
//!
//! Everything the effect needs to know up front lives in [`FlowConfig`].
//! The defaults are the values the effect is tuned for; the `with_*`
//! builders exist so tests and benchmarks can shrink the scene.
//!
//! ```ignore
//! let config = FlowConfig::default()
//!     .with_particle_count(50)
//!     .with_cell_size(10.0);
//! ```

use std::ops::{Range, RangeInclusive};

use glam::Vec4;

use crate::palette::Palette;

/// Number of particles created on construction and on every resize.
pub const PARTICLE_COUNT: usize = 1000;

/// Side length of one flow field cell, in surface units.
pub const CELL_SIZE: f32 = 30.0;

/// Multiplier applied to the summed trig terms of each cell angle.
pub const CURVE: f32 = 5.0;

/// Scale applied to cell coordinates before taking cos/sin.
pub const ZOOM: f32 = 0.09;

/// Configuration for a [`ParticleSystem`](crate::ParticleSystem).
#[derive(Clone, Debug, PartialEq)]
pub struct FlowConfig {
    /// Number of particles in the system.
    pub particle_count: usize,
    /// Flow field cell size in surface units.
    pub cell_size: f32,
    /// Curve factor of the angle function.
    pub curve: f32,
    /// Zoom factor of the angle function.
    pub zoom: f32,
    /// Per-particle speed multiplier range (whole numbers).
    pub speed_range: RangeInclusive<u32>,
    /// Per-particle max trail length range (whole numbers, end exclusive).
    pub trail_range: Range<usize>,
    /// Stroke width used for every trail.
    pub line_width: f32,
    /// Stroke style in effect before any particle sets its own.
    pub default_stroke: Vec4,
    /// Color the surface is cleared to each frame.
    pub background: Vec4,
    /// Colors particles pick from.
    pub palette: Palette,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            cell_size: CELL_SIZE,
            curve: CURVE,
            zoom: ZOOM,
            speed_range: 1..=5,
            trail_range: 10..210,
            line_width: 1.0,
            default_stroke: Vec4::ONE,
            background: Vec4::new(0.0, 0.0, 0.0, 1.0),
            palette: Palette::AMETHYST,
        }
    }
}

impl FlowConfig {
    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the flow field cell size.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not strictly positive.
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "Cell size must be positive");
        self.cell_size = cell_size;
        self
    }

    /// Set the curve and zoom factors of the angle function.
    pub fn with_angle_factors(mut self, curve: f32, zoom: f32) -> Self {
        self.curve = curve;
        self.zoom = zoom;
        self
    }

    /// Set the max trail length range.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty or starts at zero.
    pub fn with_trail_range(mut self, range: Range<usize>) -> Self {
        assert!(range.start >= 1, "Trails must hold at least one point");
        assert!(range.start < range.end, "Trail range must not be empty");
        self.trail_range = range;
        self
    }

    /// Set the speed multiplier range.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty.
    pub fn with_speed_range(mut self, range: RangeInclusive<u32>) -> Self {
        assert!(!range.is_empty(), "Speed range must not be empty");
        self.speed_range = range;
        self
    }

    /// Set the palette particles pick their colors from.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}
