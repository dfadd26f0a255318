//! Trail color palettes.

use glam::Vec4;
use rand::Rng;

/// A fixed set of five trail colors (RGBA, 0.0-1.0).
///
/// Each particle picks one color uniformly at random when it is created and
/// keeps it for its whole existence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    colors: [Vec4; 5],
}

impl Palette {
    /// Deep plum through orchid.
    pub const AMETHYST: Palette = Palette {
        colors: [
            Vec4::new(0.298, 0.008, 0.149, 1.0), // #4c0226
            Vec4::new(0.451, 0.051, 0.612, 1.0), // #730d9c
            Vec4::new(0.588, 0.133, 0.780, 1.0), // #9622c7
            Vec4::new(0.706, 0.290, 0.878, 1.0), // #b44ae0
            Vec4::new(0.804, 0.447, 0.949, 1.0), // #cd72f2
        ],
    };

    /// Create a palette from five colors.
    pub const fn new(colors: [Vec4; 5]) -> Self {
        Self { colors }
    }

    /// The color stops of this palette.
    pub fn colors(&self) -> &[Vec4; 5] {
        &self.colors
    }

    /// Pick one color uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec4 {
        self.colors[rng.gen_range(0..self.colors.len())]
    }

    /// Whether `color` is one of this palette's stops.
    pub fn contains(&self, color: Vec4) -> bool {
        self.colors.contains(&color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::AMETHYST
    }
}
