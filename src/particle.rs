//! A single trail-drawing particle and its lifecycle.
//!
//! Each particle cycles through three phases, driven by a countdown timer
//! that starts at twice its max trail length:
//!
//! | Phase | Condition | Per-tick effect |
//! |-------|-----------|-----------------|
//! | [`Phase::Growing`] | timer >= 1 | move along the flow, push one trail point |
//! | [`Phase::Shrinking`] | timer < 1, trail > 1 | drop the oldest trail point |
//! | [`Phase::Reset`] | timer < 1, trail == 1 | respawn at a random position |
//!
//! Speed, max trail length and color are rolled once at creation and survive
//! every reset.

use std::collections::VecDeque;

use glam::{Vec2, Vec4};
use rand::Rng;

use crate::config::FlowConfig;
use crate::flow_field::FlowField;
use crate::surface::Surface;

/// Surface extent and cell size a particle moves within.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Surface width and height.
    pub size: Vec2,
    /// Flow field cell size.
    pub cell_size: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            cell_size,
        }
    }

    /// Whether `point` lies in `[0, width) x [0, height)`.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x < self.size.x && point.y < self.size.y
    }

    /// A whole-unit position chosen uniformly inside the surface.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            random_coordinate(self.size.x, rng),
            random_coordinate(self.size.y, rng),
        )
    }
}

fn random_coordinate<R: Rng + ?Sized>(extent: f32, rng: &mut R) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    // f32 rounding can land exactly on `extent`; keep the half-open range
    // and whole-unit results for fractional extents too.
    (rng.gen::<f32>() * extent)
        .floor()
        .min((extent.ceil() - 1.0).max(0.0))
}

/// Where a particle is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Timer running; the particle moves and its trail grows.
    Growing,
    /// Timer expired; the trail is consumed from its oldest end.
    Shrinking,
    /// Trail down to one point with the timer expired; respawns next tick.
    Reset,
}

/// A particle drifting through a [`FlowField`].
#[derive(Clone, Debug)]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    angle: f32,
    speed_modifier: f32,
    trail: VecDeque<Vec2>,
    max_trail: usize,
    timer: i32,
    color: Vec4,
}

impl Particle {
    /// Create a particle with randomized position, speed, trail length and color.
    pub fn new<R: Rng + ?Sized>(bounds: &Bounds, config: &FlowConfig, rng: &mut R) -> Self {
        let position = bounds.random_position(rng);
        let speed = rng.gen_range(config.speed_range.clone());
        let max_trail = rng.gen_range(config.trail_range.clone());
        let color = config.palette.pick(rng);
        Self::spawn_at(position, speed as f32, max_trail, color)
    }

    /// Create a particle with explicit state.
    ///
    /// # Panics
    ///
    /// Panics if `max_trail` is zero.
    pub fn spawn_at(position: Vec2, speed_modifier: f32, max_trail: usize, color: Vec4) -> Self {
        assert!(max_trail >= 1, "max trail length must be at least 1");
        let mut trail = VecDeque::with_capacity(max_trail + 1);
        trail.push_back(position);
        Self {
            position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            speed_modifier,
            trail,
            max_trail,
            timer: lifetime(max_trail),
            color,
        }
    }

    /// Advance one tick.
    ///
    /// The angle is read at linear index `cell_y * cols + cell_x`. When that
    /// index is outside the grid the angle is left unchanged, so a particle
    /// that drifts off the field keeps heading the way it was going.
    pub fn update<R: Rng + ?Sized>(&mut self, field: &FlowField, bounds: &Bounds, rng: &mut R) {
        self.timer -= 1;

        if self.timer >= 1 {
            let cell = FlowField::cell_of(self.position, bounds.cell_size);
            if let Some(angle) = field.angle_at(cell) {
                self.angle = angle;
            }

            self.velocity = Vec2::new(self.angle.cos(), self.angle.sin());
            self.position += self.velocity * self.speed_modifier;

            self.trail.push_back(self.position);
            if self.trail.len() > self.max_trail {
                self.trail.pop_front();
            }
        } else if self.trail.len() > 1 {
            self.trail.pop_front();
        } else {
            self.reset(bounds, rng);
        }
    }

    /// Respawn at a random position with a fresh timer and a one-point trail.
    pub fn reset<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) {
        self.position = bounds.random_position(rng);
        self.trail.clear();
        self.trail.push_back(self.position);
        self.timer = lifetime(self.max_trail);
    }

    /// Stroke the trail as one connected polyline in this particle's color.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let mut points = self.trail.iter();
        let Some(first) = points.next() else {
            return;
        };

        surface.begin_path();
        surface.move_to(*first);
        for point in points {
            surface.line_to(*point);
        }
        surface.set_stroke_style(self.color);
        surface.stroke();
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.timer >= 1 {
            Phase::Growing
        } else if self.trail.len() > 1 {
            Phase::Shrinking
        } else {
            Phase::Reset
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Last flow angle this particle steered by (radians).
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn speed_modifier(&self) -> f32 {
        self.speed_modifier
    }

    /// Past positions, oldest first.
    pub fn trail(&self) -> &VecDeque<Vec2> {
        &self.trail
    }

    #[inline]
    pub fn max_trail(&self) -> usize {
        self.max_trail
    }

    #[inline]
    pub fn timer(&self) -> i32 {
        self.timer
    }

    #[inline]
    pub fn color(&self) -> Vec4 {
        self.color
    }
}

fn lifetime(max_trail: usize) -> i32 {
    (max_trail as i32).saturating_mul(2)
}
